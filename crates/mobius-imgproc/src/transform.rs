//! Projective matrices built from geometric constraints.
//!
//! All matrices act on CP1 and are only meaningful up to a non-zero scalar. The builders
//! return determinant-one representatives.

use mobius_algebra::{Complex, Cp1Point, DVec3, Mat2c};

use crate::coords::{cp1_from_pixel, cp1_from_sphere, sphere_from_pixel, PixelCoord};
use crate::error::WarpError;

/// Points whose dot product is within this distance of `1` are treated as equal.
const COINCIDENT_TOLERANCE: f64 = 1e-10;

/// Points whose dot product is within this distance of `-1` are treated as antipodal.
const ANTIPODAL_TOLERANCE: f64 = 1e-10;

/// Relative tolerance under which two CP1 points count as the same constraint point.
const DISTINCT_TOLERANCE: f64 = 1e-12;

/// A point is parallel to the reference axis when `|p . axis| > 1 - PARALLEL_TOLERANCE`.
const PARALLEL_TOLERANCE: f64 = 1e-4;

/// Return the matrix sending infinity `[1 : 0]`, zero `[0 : 1]` and one `[1 : 1]` to
/// `p`, `q` and `r`.
///
/// # Errors
///
/// Returns [`WarpError::DegenerateConfiguration`] if two of the points are projectively
/// equal.
///
/// # Example
///
/// ```
/// use mobius_algebra::{Complex, Cp1Point};
/// use mobius_imgproc::transform::map_canonical_triple_to;
///
/// let p = Cp1Point::from_ratio(Complex::new(2.0, 0.0));
/// let q = Cp1Point::from_ratio(Complex::new(0.0, 1.0));
/// let r = Cp1Point::from_ratio(Complex::new(-1.0, 0.0));
/// let m = map_canonical_triple_to(p, q, r).unwrap();
///
/// assert!((m * Cp1Point::INFINITY).projectively_eq(&p, 1e-12));
/// assert!((m * Cp1Point::ZERO).projectively_eq(&q, 1e-12));
/// assert!((m * Cp1Point::ONE).projectively_eq(&r, 1e-12));
/// ```
pub fn map_canonical_triple_to(
    p: Cp1Point,
    q: Cp1Point,
    r: Cp1Point,
) -> Result<Mat2c, WarpError> {
    if p.projectively_eq(&q, DISTINCT_TOLERANCE)
        || p.projectively_eq(&r, DISTINCT_TOLERANCE)
        || q.projectively_eq(&r, DISTINCT_TOLERANCE)
    {
        return Err(WarpError::DegenerateConfiguration);
    }

    let basis_inv = Mat2c::from_cols(p, q)
        .inverse()
        .map_err(|_| WarpError::DegenerateConfiguration)?;

    // coordinates of r in the basis (p, q)
    let coeffs = basis_inv * r;
    let (mu, lambda) = (coeffs.z1, coeffs.z2);

    Ok(Mat2c::from_cols(p.scale(mu), q.scale(lambda)))
}

/// Return the matrix sending the three points `src` to the three points `dst`, in order.
///
/// Any two triples of pairwise distinct points determine exactly one such transform.
///
/// # Errors
///
/// Returns [`WarpError::DegenerateConfiguration`] if either triple has repeated points.
pub fn map_triple_to_triple(src: [Cp1Point; 3], dst: [Cp1Point; 3]) -> Result<Mat2c, WarpError> {
    let from_canonical = map_canonical_triple_to(src[0], src[1], src[2])?;
    let to_dst = map_canonical_triple_to(dst[0], dst[1], dst[2])?;

    let to_canonical = from_canonical
        .inverse()
        .map_err(|_| WarpError::DegenerateConfiguration)?;

    (to_dst * to_canonical)
        .normalized()
        .map_err(|_| WarpError::DegenerateConfiguration)
}

/// Same as [`map_triple_to_triple`] with the points given as pixel coordinates of an image
/// of width `x_size`.
pub fn map_triple_to_triple_pixel(
    src: [PixelCoord; 3],
    dst: [PixelCoord; 3],
    x_size: usize,
) -> Result<Mat2c, WarpError> {
    map_triple_to_triple(
        src.map(|p| cp1_from_pixel(p, x_size)),
        dst.map(|p| cp1_from_pixel(p, x_size)),
    )
}

/// Return a unit vector perpendicular to both `p` and `q`.
///
/// When the points are antipodal their cross product vanishes and any vector
/// perpendicular to `p` works: `p x e_x` is used, or `p x e_y` when `p` is parallel to
/// `e_x`. Either way the result is also perpendicular to `q = -p`.
pub fn perpendicular_to(p: DVec3, q: DVec3) -> DVec3 {
    if (p.dot(q) + 1.0).abs() >= ANTIPODAL_TOLERANCE {
        if let Some(r) = p.cross(q).try_normalize() {
            return r;
        }
    }

    log::debug!("using a reference axis for the antipodal pair {p} -> {q}");

    let axis = if p.dot(DVec3::X).abs() > 1.0 - PARALLEL_TOLERANCE {
        DVec3::Y
    } else {
        DVec3::X
    };

    // NaN for a zero input, which the triple construction reports as degenerate
    p.cross(axis).normalize()
}

/// Return the matrix rotating the sphere so that `p` lands on `q`.
///
/// Two points leave the rotation about the `p, q` axis free, so a third point `r`
/// perpendicular to both is held fixed together with `-r`. If `p` and `q` coincide the
/// identity is returned.
///
/// # Errors
///
/// Returns [`WarpError::DegenerateConfiguration`] for inputs that are not unit vectors.
///
/// # Example
///
/// ```
/// use mobius_algebra::DVec3;
/// use mobius_imgproc::coords::{cp1_from_sphere, sphere_from_cp1};
/// use mobius_imgproc::transform::rotation_sending_point_to_point;
///
/// let m = rotation_sending_point_to_point(DVec3::X, DVec3::Y).unwrap();
/// let moved = sphere_from_cp1(m * cp1_from_sphere(DVec3::X));
///
/// assert!(moved.abs_diff_eq(DVec3::Y, 1e-9));
/// ```
pub fn rotation_sending_point_to_point(p: DVec3, q: DVec3) -> Result<Mat2c, WarpError> {
    if (p.dot(q) - 1.0).abs() < COINCIDENT_TOLERANCE {
        return Ok(Mat2c::IDENTITY);
    }

    let r = perpendicular_to(p, q);
    let (cp1_r, cp1_mr) = (cp1_from_sphere(r), cp1_from_sphere(-r));

    map_triple_to_triple(
        [cp1_from_sphere(p), cp1_r, cp1_mr],
        [cp1_from_sphere(q), cp1_r, cp1_mr],
    )
}

/// Same as [`rotation_sending_point_to_point`] for pixel coordinates of an image of width
/// `x_size`.
pub fn rotation_sending_pixel_to_pixel(
    p: PixelCoord,
    q: PixelCoord,
    x_size: usize,
) -> Result<Mat2c, WarpError> {
    rotation_sending_point_to_point(sphere_from_pixel(p, x_size), sphere_from_pixel(q, x_size))
}

/// Return the matrix zooming in on `p` by `factor`.
///
/// The magnification is exactly `factor` at `p` only; it decays with the distance to
/// `p`, and the antipode of `p` is demagnified by `1 / factor`. A conformal map of the
/// sphere cannot scale a whole region uniformly.
///
/// # Errors
///
/// Returns [`WarpError::InvalidZoomFactor`] when `factor` is zero or not finite.
pub fn zoom_at_point(p: DVec3, factor: f64) -> Result<Mat2c, WarpError> {
    if factor == 0.0 || !factor.is_finite() {
        return Err(WarpError::InvalidZoomFactor(factor));
    }

    // the south pole is the zero of CP1, where diag(factor, 1) scales
    let rot = rotation_sending_point_to_point(p, DVec3::NEG_Z)?;
    let rot_inv = rot.inverse()?;
    let scale = Mat2c::diagonal(Complex::from_real(factor), Complex::ONE);

    Ok(rot_inv * scale * rot)
}

/// Same as [`zoom_at_point`] for pixel coordinates of an image of width `x_size`.
pub fn zoom_at_pixel(p: PixelCoord, factor: f64, x_size: usize) -> Result<Mat2c, WarpError> {
    zoom_at_point(sphere_from_pixel(p, x_size), factor)
}
