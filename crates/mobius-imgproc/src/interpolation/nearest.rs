use mobius_image::Image;

use super::clamp::sample_pixel;
use crate::coords::PixelCoord;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `pt` - The pixel coordinates to sample at.
///
/// # Returns
///
/// The value of the nearest pixel, wrapped around the seam and pinned at the poles.
pub fn sample_nearest<T: Copy + Default, const C: usize>(image: &Image<T, C>, pt: PixelCoord) -> [T; C] {
    let x = if pt.x.is_finite() { pt.x.round() } else { 0.0 };
    let y = if pt.y.is_finite() { pt.y.round() } else { 0.0 };
    sample_pixel(image, [x as i64, y as i64])
}
