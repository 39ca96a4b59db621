use mobius_image::{Image, ImageDtype};

use super::clamp::sample_pixel;
use crate::coords::PixelCoord;

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `pt` - The pixel coordinates to interpolate at.
///
/// # Returns
///
/// The interpolated pixel values. Each of the four neighbours is fetched through
/// [`super::clamp`], so interpolation across the left/right seam blends both edges of the
/// panorama. Non-finite coordinates fall back to the origin pixel.
///
/// # Example
///
/// ```
/// use mobius_image::Image;
/// use mobius_imgproc::coords::PixelCoord;
/// use mobius_imgproc::interpolation::sample_bilinear;
///
/// let image = Image::<f32, 1>::new([4, 2].into(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
///
/// assert_eq!(sample_bilinear(&image, PixelCoord::new(0.5, 0.5)), [2.5]);
/// // halfway between the last and the first column
/// assert_eq!(sample_bilinear(&image, PixelCoord::new(3.5, 0.0)), [1.5]);
/// ```
pub fn sample_bilinear<T: ImageDtype, const C: usize>(image: &Image<T, C>, pt: PixelCoord) -> [T; C] {
    let (u, v) = if pt.x.is_finite() && pt.y.is_finite() {
        (pt.x, pt.y)
    } else {
        (0.0, 0.0)
    };

    // integer part of the coordinates
    let (u0, v0) = (u.floor(), v.floor());
    let (iu, iv) = (u0 as i64, v0 as i64);

    // fractional part of the coordinates
    let frac_u = u - u0;
    let frac_v = v - v0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let p00 = sample_pixel(image, [iu, iv]);
    let p01 = sample_pixel(image, [iu, iv.saturating_add(1)]);
    let p10 = sample_pixel(image, [iu.saturating_add(1), iv]);
    let p11 = sample_pixel(image, [iu.saturating_add(1), iv.saturating_add(1)]);

    let mut pixel = [T::default(); C];
    for k in 0..C {
        let (v00, v01): (f64, f64) = (p00[k].into(), p01[k].into());
        let (v10, v11): (f64, f64) = (p10[k].into(), p11[k].into());
        let value = frac_uu * (frac_vv * v00 + frac_v * v01) + frac_u * (frac_vv * v10 + frac_v * v11);
        pixel[k] = T::from_f64(value);
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobius_image::ImageError;

    #[test]
    fn bilinear_on_grid_points() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_fn([8, 4].into(), |x, y| [x as u8, y as u8, 200]);
        for (x, y) in [(0, 0), (3, 2), (7, 3)] {
            let px = sample_bilinear(&image, PixelCoord::new(x as f64, y as f64));
            assert_eq!(px, [x as u8, y as u8, 200]);
        }
        Ok(())
    }

    #[test]
    fn bilinear_wraps_the_seam() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([4, 2].into(), vec![0, 0, 0, 100, 0, 0, 0, 100])?;
        // a quarter of the way from the last column into the first one
        assert_eq!(sample_bilinear(&image, PixelCoord::new(3.25, 0.0)), [75]);
        assert_eq!(sample_bilinear(&image, PixelCoord::new(-0.75, 0.0)), [75]);
        Ok(())
    }

    #[test]
    fn bilinear_pins_the_poles() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([4, 2].into(), vec![0., 1., 2., 3., 4., 5., 6., 7.])?;
        assert_eq!(sample_bilinear(&image, PixelCoord::new(1.0, -3.0)), [1.0]);
        assert_eq!(sample_bilinear(&image, PixelCoord::new(1.0, 1.5)), [5.0]);
        Ok(())
    }

    #[test]
    fn bilinear_survives_non_finite_input() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([4, 2].into(), vec![9, 0, 0, 0, 0, 0, 0, 0])?;
        assert_eq!(sample_bilinear(&image, PixelCoord::new(f64::NAN, 1.0)), [9]);
        assert_eq!(sample_bilinear(&image, PixelCoord::new(1e300, -1e300)).len(), 1);
        Ok(())
    }
}
