use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use mobius_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 20,
///   height: 10,
/// };
///
/// assert_eq!(image_size.width, 20);
/// assert_eq!(image_size.height, 10);
/// assert!(image_size.is_equirectangular());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Size of an equirectangular image with the given width, i.e. `width x width / 2`.
    pub fn equirectangular(width: usize) -> Self {
        ImageSize {
            width,
            height: width / 2,
        }
    }

    /// Whether the size has the 2:1 aspect ratio of an equirectangular panorama.
    pub fn is_equirectangular(&self) -> bool {
        self.height > 0 && self.width == 2 * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Trait for image data types.
///
/// Send and Sync is required to fill the output rows in parallel.
pub trait ImageDtype: Copy + Default + Into<f64> + Send + Sync {
    /// Convert a f64 value to the image data type.
    fn from_f64(x: f64) -> Self;
}

impl ImageDtype for f32 {
    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl ImageDtype for f64 {
    fn from_f64(x: f64) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major and interleaved, i.e. with shape (H, W, C).
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

/// An 8-bit RGB image, the format of the panoramas this crate works with.
pub type Rgb8Image = Image<u8, 3>;

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use mobius_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 20,
    ///       height: 10,
    ///    },
    ///    vec![0u8; 20 * 10 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 20);
    /// assert_eq!(image.size().height, 10);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use mobius_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(ImageSize::equirectangular(8), 7u8).unwrap();
    ///
    /// assert_eq!(image.size().height, 4);
    /// assert_eq!(image.get_pixel(7, 3, 2), Ok(7));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Create a new image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(size: ImageSize, f: impl Fn(usize, usize) -> [T; CHANNELS]) -> Self
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(size.width * size.height * CHANNELS);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self { size, data }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the raw pixel data, row-major with interleaved channels.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the raw pixel data mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get all the channels of the pixel at `(x, y)`, or `None` outside the grid.
    ///
    /// This is raw grid access; wraparound and pinning belong to the samplers.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y * self.width() + x) * CHANNELS;
        self.data.get(offset..offset + CHANNELS)
    }

    /// Mutable variant of [`Image::pixel`].
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y * self.width() + x) * CHANNELS;
        self.data.get_mut(offset..offset + CHANNELS)
    }

    /// Get a row of the image as a slice of interleaved pixels.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        let stride = self.width() * CHANNELS;
        self.data.get(y * stride..(y + 1) * stride)
    }

    /// Get the value of one channel of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel or the channel is out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        self.pixel(x, y)
            .map(|px| px[ch])
            .ok_or(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ))
    }

    /// Set the value of one channel of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel or the channel is out of bounds, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        let (width, height) = (self.width(), self.height());
        let px = self
            .pixel_mut(x, y)
            .ok_or(ImageError::PixelIndexOutOfBounds(x, y, width, height))?;
        px[ch] = val;

        Ok(())
    }
}
