use mobius_image::{Image, ImageDtype};

use super::bilinear::sample_bilinear;
use super::nearest::sample_nearest;
use crate::coords::PixelCoord;

/// Interpolation mode for the warp operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `pt` - The pixel coordinates to interpolate at.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel value.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    pt: PixelCoord,
    interpolation: InterpolationMode,
) -> [T; C] {
    match interpolation {
        InterpolationMode::Bilinear => sample_bilinear(image, pt),
        InterpolationMode::Nearest => sample_nearest(image, pt),
    }
}
