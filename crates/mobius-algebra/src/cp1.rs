//! Homogeneous coordinates on the complex projective line.

use crate::Complex;

/// A point `[z1 : z2]` of the complex projective line CP1.
///
/// `(z1, z2)` and `(lambda * z1, lambda * z2)` denote the same point for every non-zero
/// `lambda`. The pair `(0, 0)` is not a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cp1Point {
    /// First homogeneous component.
    pub z1: Complex,
    /// Second homogeneous component.
    pub z2: Complex,
}

impl Cp1Point {
    /// The point at infinity `[1 : 0]`.
    pub const INFINITY: Self = Self {
        z1: Complex::ONE,
        z2: Complex::ZERO,
    };

    /// The origin `[0 : 1]`.
    pub const ZERO: Self = Self {
        z1: Complex::ZERO,
        z2: Complex::ONE,
    };

    /// The point `[1 : 1]`.
    pub const ONE: Self = Self {
        z1: Complex::ONE,
        z2: Complex::ONE,
    };

    /// Create a point from its homogeneous components.
    #[inline]
    pub const fn new(z1: Complex, z2: Complex) -> Self {
        Self { z1, z2 }
    }

    /// The point `[z : 1]` of the affine chart.
    #[inline]
    pub const fn from_ratio(z: Complex) -> Self {
        Self {
            z1: z,
            z2: Complex::ONE,
        }
    }

    /// The affine coordinate `z1 / z2`.
    ///
    /// The result is not finite for the point at infinity.
    #[inline]
    pub fn ratio(&self) -> Complex {
        self.z1 / self.z2
    }

    /// Multiply both components by the same scalar.
    #[inline]
    pub fn scale(&self, lambda: Complex) -> Self {
        Self::new(self.z1 * lambda, self.z2 * lambda)
    }

    /// Euclidean norm of the pair in C^2.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.z1.norm().hypot(self.z2.norm())
    }

    /// Whether both components vanish, i.e. the pair does not describe a point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.z1.is_zero() && self.z2.is_zero()
    }

    /// Projective equality: `z1 * w2 - z2 * w1` vanishes relative to the size of both pairs.
    pub fn projectively_eq(&self, other: &Cp1Point, tolerance: f64) -> bool {
        let cross = self.z1 * other.z2 - self.z2 * other.z1;
        cross.norm() <= tolerance * self.norm() * other.norm()
    }
}
