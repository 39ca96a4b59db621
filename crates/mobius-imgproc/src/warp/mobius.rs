use mobius_algebra::Mat2c;
use mobius_image::{Image, ImageDtype, ImageSize};

use crate::{
    coords::{cp1_from_pixel, pixel_from_cp1, PixelCoord},
    error::WarpError,
    interpolation::{interpolate_pixel, InterpolationMode},
    parallel::{self, ExecutionStrategy},
};

/// Options shared by the resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarpOptions {
    /// How the source image is sampled.
    pub interpolation: InterpolationMode,
    /// How the output pixels are scheduled.
    pub strategy: ExecutionStrategy,
}

/// Pull an output pixel back to the source image through `m_inv`.
///
/// # Arguments
///
/// * `m_inv` - The inverse of the transform applied to the image.
/// * `p` - The pixel in the output image.
/// * `out_x_size` - The width of the output image.
/// * `in_x_size` - The width of the source image.
///
/// # Returns
///
/// The (fractional) source pixel whose colour lands on `p`.
#[inline]
pub fn source_pixel_for(
    m_inv: &Mat2c,
    p: PixelCoord,
    out_x_size: usize,
    in_x_size: usize,
) -> PixelCoord {
    let pt = cp1_from_pixel(p, out_x_size);
    pixel_from_cp1(*m_inv * pt, in_x_size)
}

// a single row has no latitude step, the pole rows need at least two
fn is_sampleable(size: ImageSize) -> bool {
    size.width > 0 && size.height > 1
}

// output size of a resampling operation
pub(crate) fn output_size<T, const C: usize>(
    src: &Image<T, C>,
    out_width: Option<usize>,
) -> Result<ImageSize, WarpError> {
    let size = out_width.map_or(src.size(), ImageSize::equirectangular);
    if !is_sampleable(size) {
        return Err(WarpError::InvalidImageSize(size));
    }
    Ok(size)
}

pub(crate) fn ensure_sampleable<T, const C: usize>(src: &Image<T, C>) -> Result<(), WarpError> {
    if !is_sampleable(src.size()) {
        return Err(WarpError::InvalidImageSize(src.size()));
    }
    Ok(())
}

/// Applies a Mobius transformation to an equirectangular image.
///
/// # Arguments
///
/// * `m` - The transformation pushing the source forward onto the output.
/// * `src` - The input image with shape (height, width, channels).
/// * `out_width` - The width of the output, or `None` to keep the size of the source.
///   The output height is half of the width.
/// * `options` - The interpolation mode and the execution strategy.
///
/// # Returns
///
/// A freshly allocated output image.
///
/// # Errors
///
/// Fails if `m` is singular or if either image would have fewer than two rows.
///
/// # Example
///
/// ```
/// use mobius_algebra::Mat2c;
/// use mobius_image::{Image, ImageSize};
/// use mobius_imgproc::warp::{apply_transform, WarpOptions};
///
/// let src = Image::<u8, 3>::from_size_val(ImageSize::equirectangular(16), 120).unwrap();
///
/// let dst = apply_transform(&Mat2c::IDENTITY, &src, Some(32), &WarpOptions::default()).unwrap();
///
/// assert_eq!(dst.size().width, 32);
/// assert_eq!(dst.size().height, 16);
/// assert!(dst.as_slice().iter().all(|&v| v == 120));
/// ```
pub fn apply_transform<T: ImageDtype, const C: usize>(
    m: &Mat2c,
    src: &Image<T, C>,
    out_width: Option<usize>,
    options: &WarpOptions,
) -> Result<Image<T, C>, WarpError> {
    ensure_sampleable(src)?;

    // to push the image forward by m, the output pixels are pulled back by m^-1
    let m_inv = m.inverse()?;

    let out_size = output_size(src, out_width)?;
    let mut dst = Image::from_size_val(out_size, T::default())?;

    let (in_x_size, out_x_size) = (src.width(), out_size.width);

    log::debug!(
        "applying mobius transform {} -> {} ({:?})",
        src.size(),
        out_size,
        options
    );

    parallel::par_iter_pixels(&mut dst, options.strategy, |x, y, dst_pixel| {
        let pt = source_pixel_for(&m_inv, PixelCoord::from((x, y)), out_x_size, in_x_size);
        dst_pixel.copy_from_slice(&interpolate_pixel(src, pt, options.interpolation));
    })?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{rotation_sending_pixel_to_pixel, zoom_at_pixel};
    use approx::assert_abs_diff_eq;
    use mobius_algebra::{AlgebraError, Complex};

    fn gradient(width: usize) -> Image<u8, 3> {
        let size = ImageSize::equirectangular(width);
        Image::from_fn(size, |x, y| [(x % 256) as u8, (y % 256) as u8, 7])
    }

    #[test]
    fn identity_keeps_the_image() -> Result<(), WarpError> {
        let src = gradient(64);
        for interpolation in [InterpolationMode::Bilinear, InterpolationMode::Nearest] {
            let options = WarpOptions {
                interpolation,
                strategy: ExecutionStrategy::Serial,
            };
            let dst = apply_transform(&Mat2c::IDENTITY, &src, None, &options)?;
            assert_eq!(dst, src);
        }
        Ok(())
    }

    #[test]
    fn source_pixel_identity() {
        let p = PixelCoord::new(13.0, 7.0);
        let back = source_pixel_for(&Mat2c::IDENTITY, p, 64, 64);
        assert_abs_diff_eq!(back.x, 13.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, 7.0, epsilon = 1e-9);

        // a source of twice the width maps to twice the column
        let back = source_pixel_for(&Mat2c::IDENTITY, PixelCoord::new(12.0, 0.0), 64, 128);
        assert_abs_diff_eq!(back.x, 24.5, epsilon = 1e-9);
    }

    #[test]
    fn rotation_moves_pixels() -> Result<(), WarpError> {
        let (p, q) = (PixelCoord::new(20.0, 16.0), PixelCoord::new(40.0, 10.0));
        let m = rotation_sending_pixel_to_pixel(p, q, 64)?;
        let m_inv = m.inverse()?;
        let back = source_pixel_for(&m_inv, q, 64, 64);
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), WarpError> {
        let src = gradient(64);
        let m = zoom_at_pixel(PixelCoord::new(30.0, 15.0), 3.0, 64)?;
        let serial = apply_transform(
            &m,
            &src,
            None,
            &WarpOptions {
                strategy: ExecutionStrategy::Serial,
                ..Default::default()
            },
        )?;
        let parallel = apply_transform(&m, &src, None, &WarpOptions::default())?;
        assert_eq!(serial, parallel);
        Ok(())
    }

    #[test]
    fn singular_transform_fails() {
        let zero = Mat2c::new(Complex::ZERO, Complex::ONE, Complex::ZERO, Complex::ZERO);
        let res = apply_transform(&zero, &gradient(16), None, &WarpOptions::default());
        assert!(matches!(
            res,
            Err(WarpError::Algebra(AlgebraError::SingularMatrix(_)))
        ));
    }

    #[test]
    fn empty_sizes_fail() -> Result<(), WarpError> {
        let empty = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        assert_eq!(
            apply_transform(&Mat2c::IDENTITY, &empty, None, &WarpOptions::default()),
            Err(WarpError::InvalidImageSize([0, 0].into()))
        );
        assert_eq!(
            apply_transform(&Mat2c::IDENTITY, &gradient(16), Some(1), &WarpOptions::default()),
            Err(WarpError::InvalidImageSize([1, 0].into()))
        );
        Ok(())
    }

    #[test]
    fn single_row_sizes_fail() -> Result<(), WarpError> {
        // 2x1 is a 2:1 panorama, but its only row has no latitude
        let tiny = Image::<u8, 3>::from_size_val([2, 1].into(), 9)?;
        assert_eq!(
            apply_transform(&Mat2c::IDENTITY, &tiny, None, &WarpOptions::default()),
            Err(WarpError::InvalidImageSize([2, 1].into()))
        );
        assert_eq!(
            apply_transform(&Mat2c::IDENTITY, &gradient(16), Some(2), &WarpOptions::default()),
            Err(WarpError::InvalidImageSize([2, 1].into()))
        );

        // two rows are the two poles
        let dst = apply_transform(&Mat2c::IDENTITY, &gradient(16), Some(4), &WarpOptions::default())?;
        assert_eq!(dst.size(), ImageSize::equirectangular(4));
        Ok(())
    }
}
