//! Frames of an infinite zoom loop between two panoramas.
//!
//! The zoom center is rotated to the zero of CP1, where `z -> k z` is a zoom by `k`. In the
//! logarithmic coordinate `w = ln z` that zoom is the translation `w -> w + ln k`, so the
//! whole sequence of nested copies tiles the real axis with period `ln k`. Every output
//! pixel is assigned to one copy, its *level*, and is sampled either from the outer image
//! (levels `>= 0`) or from the inner image (levels `< 0`) after being wrapped back into the
//! first nested tile.

use mobius_algebra::{Complex, Cp1Point, DVec3, Mat2c};
use mobius_image::{Image, ImageDtype};

use crate::{
    coords::{cp1_from_pixel, pixel_from_cp1, sphere_from_pixel, PixelCoord},
    error::WarpError,
    interpolation::interpolate_pixel,
    parallel,
    transform::rotation_sending_point_to_point,
    warp::{ensure_sampleable, output_size, WarpOptions},
};

/// How the pixels nested deeper than the first inner copy are wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeepLevels {
    /// Every negative level is wrapped by the same formula, which moves it exactly one
    /// tile outwards.
    #[default]
    Uniform,

    /// Levels below `-(depth + 1)` are clamped to it, so all of them reuse the same tile.
    ///
    /// With `depth = 3` the four innermost copies are distinct and everything deeper
    /// repeats the fourth.
    Saturate {
        /// Number of distinct nested copies after the first one.
        depth: u32,
    },
}

/// Parameters of one zoom loop frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLoopParams {
    /// The zoom center, in pixel coordinates of the outer image.
    pub center: PixelCoord,
    /// The zoom factor between two consecutive copies.
    pub factor: f64,
    /// Offset of the seam between copies, in units of the log coordinate.
    pub cutoff: f64,
    /// Position inside the loop, from `0` to `1`.
    pub loop_value: f64,
    /// Wrapping of the deep levels.
    pub deep_levels: DeepLevels,
}

impl ZoomLoopParams {
    /// Create validated zoom loop parameters with [`DeepLevels::Uniform`].
    ///
    /// # Errors
    ///
    /// Fails if `factor` is not a finite number greater than one, if `cutoff` is not
    /// finite, or if `loop_value` is outside of `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// use mobius_imgproc::coords::PixelCoord;
    /// use mobius_imgproc::zoom::ZoomLoopParams;
    ///
    /// let params = ZoomLoopParams::new(PixelCoord::new(360.0, 180.0), 4.0, 0.5, 0.0).unwrap();
    /// assert!((params.log_factor() - 4f64.ln()).abs() < 1e-15);
    ///
    /// assert!(ZoomLoopParams::new(PixelCoord::new(360.0, 180.0), 1.0, 0.5, 0.0).is_err());
    /// ```
    pub fn new(
        center: PixelCoord,
        factor: f64,
        cutoff: f64,
        loop_value: f64,
    ) -> Result<Self, WarpError> {
        let params = Self {
            center,
            factor,
            cutoff,
            loop_value,
            deep_levels: DeepLevels::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameters of a struct built field by field.
    ///
    /// # Errors
    ///
    /// Same as [`ZoomLoopParams::new`].
    pub fn validate(&self) -> Result<(), WarpError> {
        if !(self.factor.is_finite() && self.factor > 1.0) {
            return Err(WarpError::InvalidLoopFactor(self.factor));
        }
        if !self.cutoff.is_finite() {
            return Err(WarpError::InvalidCutoff(self.cutoff));
        }
        if !(0.0..=1.0).contains(&self.loop_value) {
            return Err(WarpError::InvalidLoopValue(self.loop_value));
        }
        Ok(())
    }

    /// Replace the wrapping of the deep levels.
    pub fn with_deep_levels(self, deep_levels: DeepLevels) -> Self {
        Self {
            deep_levels,
            ..self
        }
    }

    /// Replace the position inside the loop.
    ///
    /// # Errors
    ///
    /// Fails if `loop_value` is outside of `[0, 1]`.
    pub fn with_loop_value(self, loop_value: f64) -> Result<Self, WarpError> {
        let params = Self { loop_value, ..self };
        params.validate()?;
        Ok(params)
    }

    /// The period `ln k` of the log coordinate.
    #[inline]
    pub fn log_factor(&self) -> f64 {
        self.factor.ln()
    }
}

/// The image a zoom loop pixel is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomSource {
    /// The outer image, for levels `>= 0`.
    Outer,
    /// The inner image, for levels `< 0`.
    Inner,
}

/// Where a pixel of a zoom loop frame takes its colour from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSample {
    /// The nested copy the pixel belongs to.
    pub level: i64,
    /// The image to sample.
    pub source: ZoomSource,
    /// The pixel to sample, in coordinates of that image.
    pub pixel: PixelCoord,
}

/// Level of the nested copy containing the log coordinate with real part `re`.
///
/// The zoom center (`re = -inf`) saturates to `i64::MIN` and its antipode (`re = inf`) to
/// `i64::MAX`. A NaN lands on level `0`.
#[inline]
pub fn zoom_level_for(re: f64, log_factor: f64, cutoff: f64) -> i64 {
    // float to int casts saturate
    ((re + cutoff) / log_factor).floor() as i64
}

/// Wrap the real part of a log coordinate of a negative level into its tile.
///
/// The result is `((re + cutoff) mod ln k) - cutoff + (level + 1) ln k`, where the level has
/// been clamped first for [`DeepLevels::Saturate`].
pub fn wrap_log_real(
    re: f64,
    level: i64,
    log_factor: f64,
    cutoff: f64,
    deep_levels: DeepLevels,
) -> f64 {
    let level = match deep_levels {
        DeepLevels::Uniform => level,
        DeepLevels::Saturate { depth } => level.max(-(i64::from(depth) + 1)),
    };

    (re + cutoff).rem_euclid(log_factor) - cutoff + level.saturating_add(1) as f64 * log_factor
}

/// Compute where the output pixel `p` of a zoom loop frame is sampled.
///
/// # Arguments
///
/// * `rot` - The rotation sending the zoom center to the zero of CP1.
/// * `rot_inv` - The inverse of `rot`.
/// * `params` - The zoom loop parameters.
/// * `p` - The pixel in the output image.
/// * `out_x_size` - The width of the output image.
/// * `outer_x_size` - The width of the outer image.
/// * `inner_x_size` - The width of the inner image.
pub fn zoom_sample_for(
    rot: &Mat2c,
    rot_inv: &Mat2c,
    params: &ZoomLoopParams,
    p: PixelCoord,
    out_x_size: usize,
    outer_x_size: usize,
    inner_x_size: usize,
) -> ZoomSample {
    let log_k = params.log_factor();
    let pt = cp1_from_pixel(p, out_x_size);

    let mut w = (*rot * pt).ratio().ln();
    w.re += params.loop_value * log_k;

    let level = zoom_level_for(w.re, log_k, params.cutoff);
    let (source, x_size) = if level >= 0 {
        (ZoomSource::Outer, outer_x_size)
    } else {
        (ZoomSource::Inner, inner_x_size)
    };

    // the center and its antipode are fixed by every zoom
    if !w.is_finite() {
        return ZoomSample {
            level,
            source,
            pixel: pixel_from_cp1(pt, x_size),
        };
    }

    if level < 0 {
        w.re = wrap_log_real(w.re, level, log_k, params.cutoff, params.deep_levels);
    }

    let moved = Cp1Point::new(w.exp(), Complex::ONE);

    ZoomSample {
        level,
        source,
        pixel: pixel_from_cp1(*rot_inv * moved, x_size),
    }
}

/// Render one frame of a zoom loop from `outer` into `inner`.
///
/// # Arguments
///
/// * `outer` - The image of level `0`, which also sets the pixel scale of the center.
/// * `inner` - The image seen through the nested copies.
/// * `params` - The zoom loop parameters.
/// * `out_width` - The width of the output, or `None` to keep the size of `outer`.
/// * `options` - The interpolation mode and the execution strategy.
///
/// # Errors
///
/// Fails if `params` does not pass [`ZoomLoopParams::validate`], or if either source
/// image or the output would have fewer than two rows.
///
/// # Example
///
/// ```
/// use mobius_image::{Image, ImageSize};
/// use mobius_imgproc::coords::PixelCoord;
/// use mobius_imgproc::warp::WarpOptions;
/// use mobius_imgproc::zoom::{zoom_loop_frame, ZoomLoopParams};
///
/// let outer = Image::<u8, 3>::from_size_val(ImageSize::equirectangular(32), 10).unwrap();
/// let inner = Image::<u8, 3>::from_size_val(ImageSize::equirectangular(32), 200).unwrap();
/// let params = ZoomLoopParams::new(PixelCoord::new(16.0, 8.0), 2.0, 0.0, 0.25).unwrap();
///
/// let frame = zoom_loop_frame(&outer, &inner, &params, None, &WarpOptions::default()).unwrap();
///
/// assert_eq!(frame.size(), outer.size());
/// ```
pub fn zoom_loop_frame<T: ImageDtype, const C: usize>(
    outer: &Image<T, C>,
    inner: &Image<T, C>,
    params: &ZoomLoopParams,
    out_width: Option<usize>,
    options: &WarpOptions,
) -> Result<Image<T, C>, WarpError> {
    params.validate()?;
    ensure_sampleable(outer)?;
    ensure_sampleable(inner)?;

    let center = sphere_from_pixel(params.center, outer.width());
    let rot = rotation_sending_point_to_point(center, DVec3::NEG_Z)?;
    let rot_inv = rot.inverse()?;

    let out_size = output_size(outer, out_width)?;
    let mut dst = Image::from_size_val(out_size, T::default())?;

    let (out_x_size, outer_x_size, inner_x_size) =
        (out_size.width, outer.width(), inner.width());

    log::debug!(
        "rendering zoom loop frame {} at t = {} ({:?})",
        out_size,
        params.loop_value,
        params
    );

    parallel::par_iter_pixels(&mut dst, options.strategy, |x, y, dst_pixel| {
        let sample = zoom_sample_for(
            &rot,
            &rot_inv,
            params,
            PixelCoord::from((x, y)),
            out_x_size,
            outer_x_size,
            inner_x_size,
        );
        let src = match sample.source {
            ZoomSource::Outer => outer,
            ZoomSource::Inner => inner,
        };
        dst_pixel.copy_from_slice(&interpolate_pixel(src, sample.pixel, options.interpolation));
    })?;

    Ok(dst)
}
