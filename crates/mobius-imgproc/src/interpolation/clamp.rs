use mobius_image::{Image, ImageSize};

/// Wrap the column around the image width and pin the row to the image height.
///
/// The height is taken as `x_size / 2`, the equirectangular convention.
///
/// # Panics
///
/// Panics if `x_size < 2`, where the image has no row to pin to.
///
/// # Example
///
/// ```
/// use mobius_imgproc::interpolation::clamp;
///
/// assert_eq!(clamp([725, 10], 720), clamp([5, 10], 720));
/// assert_eq!(clamp([-1, -1], 720), [719, 0]);
/// assert_eq!(clamp([3, 360], 720), [3, 359]);
/// ```
pub fn clamp(pt: [i64; 2], x_size: usize) -> [usize; 2] {
    clamp_to_size(pt, ImageSize::equirectangular(x_size))
}

/// Same as [`clamp`] for an explicit image size.
///
/// # Panics
///
/// Panics if the size has no pixels.
pub fn clamp_to_size(pt: [i64; 2], size: ImageSize) -> [usize; 2] {
    assert!(
        size.width > 0 && size.height > 0,
        "cannot clamp into an empty image of size {size}"
    );
    let x = pt[0].rem_euclid(size.width as i64) as usize;
    let y = pt[1].clamp(0, size.height as i64 - 1) as usize;
    [x, y]
}

/// Fetch the pixel at integer coordinates, resolving out of range coordinates with
/// [`clamp_to_size`].
///
/// # Panics
///
/// Panics if the image is empty.
pub fn sample_pixel<T: Copy + Default, const C: usize>(image: &Image<T, C>, pt: [i64; 2]) -> [T; C] {
    let [x, y] = clamp_to_size(pt, image.size());
    let mut pixel = [T::default(); C];
    if let Some(src) = image.pixel(x, y) {
        pixel.copy_from_slice(src);
    }
    pixel
}
