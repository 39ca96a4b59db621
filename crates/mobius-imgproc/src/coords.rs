//! Coordinate spaces of an equirectangular panorama.
//!
//! Four spaces are connected here:
//!
//! - pixel coordinates of an image of width `x_size` and height `x_size / 2`,
//! - angles: longitude in `[0, 2pi)` and latitude in `[-pi/2, pi/2]`,
//! - the unit sphere in R^3,
//! - the complex projective line CP1, where the south pole is `[0 : 1]` and the north pole
//!   is `[1 : 0]`.
//!
//! # Example
//!
//! ```
//! use mobius_imgproc::coords::{cp1_from_pixel, pixel_from_cp1, PixelCoord};
//!
//! let p = PixelCoord::new(100.0, 40.0);
//! let back = pixel_from_cp1(cp1_from_pixel(p, 720), 720);
//!
//! assert!((back.x - p.x).abs() < 1e-9);
//! assert!((back.y - p.y).abs() < 1e-9);
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use mobius_algebra::{Complex, Cp1Point, DVec3};

/// A point in pixel space of an equirectangular image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelCoord {
    /// Column, growing with the longitude.
    pub x: f64,
    /// Row, growing from the south pole to the north pole.
    pub y: f64,
}

impl PixelCoord {
    /// Create a pixel coordinate.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for PixelCoord {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<(usize, usize)> for PixelCoord {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

/// A point in angle space, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    /// Longitude in `[0, 2pi)`.
    pub lon: f64,
    /// Latitude in `[-pi/2, pi/2]`.
    pub lat: f64,
}

impl Angles {
    /// Create an angle pair.
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

// height of an equirectangular image of the given width
#[inline]
fn y_size(x_size: usize) -> f64 {
    (x_size / 2) as f64
}

/// Map pixel coordinates to the `(0, 2pi) x (-pi/2, pi/2)` rectangle.
///
/// Pixel centers are sampled at half-integer longitudes, while the first and last rows sit
/// exactly on the poles.
#[inline]
pub fn angles_from_pixel(p: PixelCoord, x_size: usize) -> Angles {
    Angles {
        lon: (p.x + 0.5) * TAU / x_size as f64,
        lat: p.y * PI / (y_size(x_size) - 1.0) - FRAC_PI_2,
    }
}

/// Map angles to pixel coordinates, the inverse of [`angles_from_pixel`].
#[inline]
pub fn pixel_from_angles(a: Angles, x_size: usize) -> PixelCoord {
    PixelCoord {
        x: a.lon * x_size as f64 / TAU - 0.5,
        y: (a.lat + FRAC_PI_2) * (y_size(x_size) - 1.0) / PI,
    }
}

/// Equirectangular projection of a point of the sphere.
pub fn angles_from_sphere(v: DVec3) -> Angles {
    let mut lon = v.y.atan2(v.x);
    if lon < 0.0 {
        lon += TAU;
    }
    // a tiny negative angle rounds up to exactly 2pi
    if lon >= TAU {
        lon = 0.0;
    }
    let r = v.x.hypot(v.y);
    Angles {
        lon,
        lat: v.z.atan2(r),
    }
}

/// Inverse of the equirectangular projection.
#[inline]
pub fn sphere_from_angles(a: Angles) -> DVec3 {
    let (sin_lat, cos_lat) = a.lat.sin_cos();
    let (sin_lon, cos_lon) = a.lon.sin_cos();
    DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Map a point of the sphere to CP1.
///
/// The chart is chosen from the hemisphere so that both components stay bounded.
#[inline]
pub fn cp1_from_sphere(v: DVec3) -> Cp1Point {
    if v.z < 0.0 {
        Cp1Point::new(Complex::new(v.x, v.y), Complex::from_real(1.0 - v.z))
    } else {
        Cp1Point::new(Complex::from_real(1.0 + v.z), Complex::new(v.x, -v.y))
    }
}

/// Map a point of CP1 back to the sphere.
///
/// Divides by the component of larger magnitude, which keeps the computation well
/// conditioned near both poles.
pub fn sphere_from_cp1(p: Cp1Point) -> DVec3 {
    if p.z2.norm() > p.z1.norm() {
        let u = p.z1 / p.z2;
        let denom = 1.0 + u.norm_sqr();
        DVec3::new(
            2.0 * u.re / denom,
            2.0 * u.im / denom,
            (denom - 2.0) / denom,
        )
    } else {
        let u = (p.z2 / p.z1).conj();
        let denom = 1.0 + u.norm_sqr();
        DVec3::new(
            2.0 * u.re / denom,
            2.0 * u.im / denom,
            (2.0 - denom) / denom,
        )
    }
}

/// Map pixel coordinates to the sphere.
#[inline]
pub fn sphere_from_pixel(p: PixelCoord, x_size: usize) -> DVec3 {
    sphere_from_angles(angles_from_pixel(p, x_size))
}

/// Map a point of the sphere to pixel coordinates.
#[inline]
pub fn pixel_from_sphere(v: DVec3, x_size: usize) -> PixelCoord {
    pixel_from_angles(angles_from_sphere(v), x_size)
}

/// Map pixel coordinates to CP1.
#[inline]
pub fn cp1_from_pixel(p: PixelCoord, x_size: usize) -> Cp1Point {
    cp1_from_sphere(sphere_from_pixel(p, x_size))
}

/// Map a point of CP1 to pixel coordinates.
#[inline]
pub fn pixel_from_cp1(p: Cp1Point, x_size: usize) -> PixelCoord {
    pixel_from_sphere(sphere_from_cp1(p), x_size)
}
