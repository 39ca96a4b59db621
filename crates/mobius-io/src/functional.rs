use std::path::Path;

use mobius_image::{Image, ImageSize, Rgb8Image};

use crate::error::IoError;

/// Reads an RGB8 image from the given file path.
///
/// The method tries to read from any image format supported by the image crate and
/// converts the pixels to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
///
/// # Example
///
/// ```no_run
/// use mobius_image::Image;
/// use mobius_io::functional as F;
///
/// let image: Image<u8, 3> = F::read_image_any_rgb8("panorama.jpg").unwrap();
///
/// assert_eq!(image.num_channels(), 3);
/// ```
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Rgb8Image, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    if !size.is_equirectangular() {
        log::warn!(
            "{} is {} and not a 2:1 equirectangular panorama",
            file_path.display(),
            size
        );
    }

    let image = Image::new(size, img.into_rgb8().into_raw())?;

    Ok(image)
}

// the image crate buffer sharing the pixels of `image`
fn to_rgb_buffer(image: &Rgb8Image) -> Result<image::RgbImage, IoError> {
    let size = image.size();
    let [width, height]: [u32; 2] = size.into();
    image::RgbImage::from_raw(width, height, image.as_slice().to_vec())
        .ok_or_else(|| IoError::EncodeError(format!("invalid buffer for an image of size {size}")))
}

/// Writes the given RGB8 image as PNG to the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG image.
/// * `image` - The image containing the pixel data.
pub fn write_image_png_rgb8(file_path: impl AsRef<Path>, image: &Rgb8Image) -> Result<(), IoError> {
    let buffer = to_rgb_buffer(image)?;
    buffer
        .save_with_format(file_path, image::ImageFormat::Png)
        .map_err(IoError::ImageEncodeError)?;
    Ok(())
}

/// Writes the given RGB8 image to the given file path.
///
/// The format is deduced from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the image.
/// * `image` - The image containing the pixel data.
pub fn write_image_any_rgb8(file_path: impl AsRef<Path>, image: &Rgb8Image) -> Result<(), IoError> {
    let buffer = to_rgb_buffer(image)?;
    buffer.save(file_path).map_err(IoError::ImageEncodeError)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::IoError;
    use crate::functional::{read_image_any_rgb8, write_image_any_rgb8, write_image_png_rgb8};
    use mobius_image::{Image, ImageSize};

    fn sample() -> Image<u8, 3> {
        Image::from_fn(ImageSize::equirectangular(64), |x, y| {
            [(4 * x) as u8, (8 * y) as u8, 77]
        })
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("panorama.png");

        let image = sample();
        write_image_png_rgb8(&file_path, &image)?;

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn write_jpeg_from_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("panorama.jpg");

        write_image_any_rgb8(&file_path, &sample())?;

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.size(), ImageSize::equirectangular(64));
        Ok(())
    }

    #[test]
    fn write_unknown_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("panorama.xyz");

        let res = write_image_any_rgb8(&file_path, &sample());
        assert!(matches!(res, Err(IoError::ImageEncodeError(_))));
        assert!(res
            .unwrap_err()
            .to_string()
            .starts_with("Failed to encode the image."));
        Ok(())
    }

    #[test]
    fn write_png_to_missing_dir() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("missing").join("panorama.png");

        let res = write_image_png_rgb8(&file_path, &sample());
        assert!(matches!(res, Err(IoError::ImageEncodeError(_))));
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any_rgb8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }
}
