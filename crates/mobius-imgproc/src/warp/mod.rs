//! Geometric transformations of equirectangular images.
//!
//! A Mobius matrix `M` is applied to an image by pulling every output pixel back through
//! `M^-1` and sampling the source there, which pushes the image forward by `M`.
//!
//! # Examples
//!
//! Turning a panorama so that the pixel `(360, 180)` ends up at `(0, 180)`:
//!
//! ```no_run
//! use mobius_imgproc::coords::PixelCoord;
//! use mobius_imgproc::transform::rotation_sending_pixel_to_pixel;
//!
//! let m = rotation_sending_pixel_to_pixel(
//!     PixelCoord::new(360.0, 180.0),
//!     PixelCoord::new(0.0, 180.0),
//!     720,
//! )
//! .unwrap();
//! // Use with apply_transform to resample the image
//! ```

mod mobius;

pub use mobius::{apply_transform, source_pixel_for, WarpOptions};

pub(crate) use mobius::{ensure_sampleable, output_size};
