//! Pixel sampling of equirectangular images.
//!
//! Panoramas are cylinders: columns wrap around the left/right seam while rows are pinned
//! at the poles. Every fetch goes through [`clamp`], so samples taken outside the image are
//! never an error.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: uses the value of the nearest pixel
//! - **Bilinear**: weighted mean of the four surrounding pixels

mod bilinear;
mod clamp;
mod interpolate;
mod nearest;

pub use bilinear::sample_bilinear;
pub use clamp::{clamp, clamp_to_size, sample_pixel};
pub use interpolate::{interpolate_pixel, InterpolationMode};
pub use nearest::sample_nearest;
