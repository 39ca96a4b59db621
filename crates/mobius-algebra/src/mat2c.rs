//! 2x2 complex matrix acting on CP1.

use crate::{AlgebraError, Complex, Cp1Point};

/// Relative size of the determinant under which a matrix is treated as singular.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// 2x2 complex matrix `[[a, b], [c, d]]`.
///
/// An invertible matrix acts on CP1 as the Mobius transformation `z -> (az + b) / (cz + d)`.
/// Matrices that differ by a non-zero scalar act identically, so only the class in
/// PSL(2, C) is meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2c {
    /// Row 0, column 0.
    pub a: Complex,
    /// Row 0, column 1.
    pub b: Complex,
    /// Row 1, column 0.
    pub c: Complex,
    /// Row 1, column 1.
    pub d: Complex,
}

impl Mat2c {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        a: Complex::ONE,
        b: Complex::ZERO,
        c: Complex::ZERO,
        d: Complex::ONE,
    };

    /// Create a matrix from its entries in row-major order.
    #[inline]
    pub const fn new(a: Complex, b: Complex, c: Complex, d: Complex) -> Self {
        Self { a, b, c, d }
    }

    /// Create a matrix whose columns are the homogeneous components of two points.
    #[inline]
    pub fn from_cols(p: Cp1Point, q: Cp1Point) -> Self {
        Self::new(p.z1, q.z1, p.z2, q.z2)
    }

    /// Diagonal matrix `diag(x, y)`, i.e. the map `z -> (x / y) z`.
    #[inline]
    pub const fn diagonal(x: Complex, y: Complex) -> Self {
        Self::new(x, Complex::ZERO, Complex::ZERO, y)
    }

    /// Determinant `ad - bc`.
    #[inline]
    pub fn determinant(&self) -> Complex {
        self.a * self.d - self.b * self.c
    }

    /// Multiply every entry by the same scalar.
    #[inline]
    pub fn scale(&self, k: Complex) -> Self {
        Self::new(self.a * k, self.b * k, self.c * k, self.d * k)
    }

    /// Inverse matrix.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::SingularMatrix`] when the determinant vanishes relative to
    /// the magnitude of the entries.
    ///
    /// # Example
    ///
    /// ```
    /// use mobius_algebra::{Complex, Mat2c};
    ///
    /// let m = Mat2c::diagonal(Complex::from_real(2.0), Complex::from_real(4.0));
    /// let m_inv = m.inverse().unwrap();
    ///
    /// assert_eq!(m * m_inv, Mat2c::IDENTITY);
    /// ```
    pub fn inverse(&self) -> Result<Self, AlgebraError> {
        let det = self.determinant();
        let scale = self.a.norm() * self.d.norm() + self.b.norm() * self.c.norm();

        if !(det.norm() > SINGULAR_TOLERANCE * scale) {
            return Err(AlgebraError::SingularMatrix(det.norm()));
        }

        let inv_det = Complex::ONE / det;
        Ok(Self::new(self.d, -self.b, -self.c, self.a).scale(inv_det))
    }

    /// Representative of the same Mobius transformation with unit determinant.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::SingularMatrix`] for a zero determinant.
    pub fn normalized(&self) -> Result<Self, AlgebraError> {
        let det = self.determinant();
        if det.is_zero() || !det.is_finite() {
            return Err(AlgebraError::SingularMatrix(det.norm()));
        }
        Ok(self.scale(Complex::ONE / det.sqrt()))
    }

    /// Whether both matrices describe the same Mobius transformation.
    pub fn projectively_eq(&self, other: &Mat2c, tolerance: f64) -> bool {
        let lhs = [self.a, self.b, self.c, self.d];
        let rhs = [other.a, other.b, other.c, other.d];

        // pick the largest entry of `other` to fix the scalar
        let (k, pivot) = rhs
            .iter()
            .enumerate()
            .fold((0, 0.0), |(k, best), (i, z)| {
                if z.norm() > best {
                    (i, z.norm())
                } else {
                    (k, best)
                }
            });

        if pivot == 0.0 {
            return false;
        }

        let lambda = lhs[k] / rhs[k];
        let size = lhs.iter().map(|z| z.norm()).fold(0.0, f64::max);

        lhs.iter()
            .zip(rhs.iter())
            .all(|(l, r)| (*l - *r * lambda).norm() <= tolerance * size)
    }
}

// Matrix-matrix multiplication
impl std::ops::Mul<Mat2c> for Mat2c {
    type Output = Mat2c;

    #[inline]
    fn mul(self, rhs: Mat2c) -> Self::Output {
        Mat2c::new(
            self.a * rhs.a + self.b * rhs.c,
            self.a * rhs.b + self.b * rhs.d,
            self.c * rhs.a + self.d * rhs.c,
            self.c * rhs.b + self.d * rhs.d,
        )
    }
}

// Matrix-vector multiplication
impl std::ops::Mul<Cp1Point> for Mat2c {
    type Output = Cp1Point;

    #[inline]
    fn mul(self, rhs: Cp1Point) -> Self::Output {
        Cp1Point::new(
            self.a * rhs.z1 + self.b * rhs.z2,
            self.c * rhs.z1 + self.d * rhs.z2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Mat2c;
    use crate::{AlgebraError, Complex, Cp1Point};
    use approx::assert_abs_diff_eq;

    fn sample() -> Mat2c {
        Mat2c::new(
            Complex::new(1.0, 2.0),
            Complex::new(0.5, -1.0),
            Complex::new(-2.0, 0.25),
            Complex::new(3.0, 1.0),
        )
    }

    #[test]
    fn inverse_roundtrip() -> Result<(), AlgebraError> {
        let m = sample();
        let id = m * m.inverse()?;
        assert!(id.projectively_eq(&Mat2c::IDENTITY, 1e-12));
        assert_abs_diff_eq!(id.a.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(id.b.norm(), 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn singular_matrix_fails() {
        let p = Cp1Point::new(Complex::new(1.0, 1.0), Complex::new(2.0, 0.0));
        let m = Mat2c::from_cols(p, p.scale(Complex::new(0.0, 3.0)));
        assert!(matches!(m.inverse(), Err(AlgebraError::SingularMatrix(_))));
        assert!(Mat2c::new(Complex::ZERO, Complex::ZERO, Complex::ZERO, Complex::ZERO)
            .inverse()
            .is_err());
    }

    #[test]
    fn normalized_has_unit_determinant() -> Result<(), AlgebraError> {
        let m = sample().normalized()?;
        let det = m.determinant();
        assert_abs_diff_eq!(det.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(det.im, 0.0, epsilon = 1e-12);
        assert!(m.projectively_eq(&sample(), 1e-12));
        Ok(())
    }

    #[test]
    fn action_on_points() {
        // z -> 1 / z swaps zero and infinity and fixes one
        let m = Mat2c::new(Complex::ZERO, Complex::ONE, Complex::ONE, Complex::ZERO);
        assert!((m * Cp1Point::ZERO).projectively_eq(&Cp1Point::INFINITY, 0.0));
        assert!((m * Cp1Point::INFINITY).projectively_eq(&Cp1Point::ZERO, 0.0));
        assert!((m * Cp1Point::ONE).projectively_eq(&Cp1Point::ONE, 0.0));
    }

    #[test]
    fn composition_matches_sequential_application() {
        let m = sample();
        let n = Mat2c::diagonal(Complex::new(0.0, 2.0), Complex::ONE);
        let p = Cp1Point::from_ratio(Complex::new(0.3, 0.7));
        assert!(((m * n) * p).projectively_eq(&(m * (n * p)), 1e-12));
    }
}
