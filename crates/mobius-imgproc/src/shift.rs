use mobius_image::Image;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::error::WarpError;

/// Rotate a panorama around its vertical axis by a whole number of pixels.
///
/// The two vertical slices split at `|from_x - to_x|` columns are swapped. When
/// `from_x > to_x` the content moves left: input column `x` lands on output column
/// `(x - d) mod W`. Otherwise it moves right and lands on `(x + d) mod W`. This is the
/// exact, longitude-only special case of a rotation and does not resample.
///
/// # Arguments
///
/// * `src` - The source panorama.
/// * `from_x` - The column to move.
/// * `to_x` - The column it should end up at.
///
/// # Examples
///
/// ```rust
/// use mobius_image::Image;
/// use mobius_imgproc::shift::shift_longitude;
///
/// let image = Image::<_, 1>::new([4, 2].into(), vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
/// ]).unwrap();
///
/// let shifted = shift_longitude(&image, 3, 2).unwrap();
///
/// assert_eq!(shifted.as_slice(), &[1u8, 2, 3, 0, 5, 6, 7, 4]);
/// ```
pub fn shift_longitude<T, const C: usize>(
    src: &Image<T, C>,
    from_x: usize,
    to_x: usize,
) -> Result<Image<T, C>, WarpError>
where
    T: Copy + Send + Sync,
{
    let cols = src.cols();
    if cols == 0 || src.rows() == 0 {
        return Err(WarpError::InvalidImageSize(src.size()));
    }

    let dist = from_x.abs_diff(to_x) % cols;

    // column of the source that becomes the first column of the output
    let split = (if from_x > to_x { dist } else { cols - dist }) % cols;

    let mut dst = src.clone();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            let src_row = &src_data[i * cols * C..(i + 1) * cols * C];
            let (left, right) = src_row.split_at(split * C);

            // paste the right slice first, then the left one after it
            dst_row[..right.len()].copy_from_slice(right);
            dst_row[right.len()..].copy_from_slice(left);
        });

    log::debug!("shifted longitude by {dist} columns ({from_x} -> {to_x})");

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use mobius_image::{Image, ImageSize};

    use crate::error::WarpError;

    fn columns(width: usize) -> Image<u16, 2> {
        Image::from_fn(ImageSize::equirectangular(width), |x, y| {
            [x as u16, (x * 31 + y) as u16]
        })
    }

    #[test]
    fn shift_left() -> Result<(), WarpError> {
        let (w, h) = (720, 360);
        let image = columns(w);
        let shifted = super::shift_longitude(&image, 400, 100)?;

        for y in [0, 17, h - 1] {
            for x in 0..w {
                let out_x = (x + w - 300) % w;
                assert_eq!(shifted.pixel(out_x, y), image.pixel(x, y), "{x} {y}");
            }
        }
        Ok(())
    }

    #[test]
    fn shift_right() -> Result<(), WarpError> {
        let w = 40;
        let image = columns(w);
        let shifted = super::shift_longitude(&image, 5, 12)?;
        for x in 0..w {
            assert_eq!(shifted.pixel((x + 7) % w, 3), image.pixel(x, 3));
        }
        Ok(())
    }

    #[test]
    fn shift_is_undone_by_the_reverse_shift() -> Result<(), WarpError> {
        let image = columns(40);
        let there = super::shift_longitude(&image, 30, 3)?;
        let back = super::shift_longitude(&there, 3, 30)?;
        assert_eq!(back, image);
        Ok(())
    }

    #[test]
    fn shift_by_whole_turns() -> Result<(), WarpError> {
        let image = columns(40);
        assert_eq!(super::shift_longitude(&image, 9, 9)?, image);
        assert_eq!(super::shift_longitude(&image, 80, 0)?, image);
        assert_eq!(
            super::shift_longitude(&image, 41, 0)?,
            super::shift_longitude(&image, 1, 0)?
        );
        Ok(())
    }
}
