#![deny(missing_docs)]
//! Image types and traits for equirectangular panoramas

/// image representation for panorama warping.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize, Rgb8Image};
