#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Mobius Algebra
//!
//! The algebraic layer under the panorama warps:
//!
//! - [`Complex`]: double precision complex numbers with the principal logarithm.
//! - [`Cp1Point`]: homogeneous coordinates on the complex projective line.
//! - [`Mat2c`]: invertible 2x2 complex matrices acting on CP1 as Mobius transformations.
//!
//! ## Example
//!
//! ```rust
//! use mobius_algebra::{Complex, Cp1Point, Mat2c};
//!
//! // z -> 2z fixes zero and infinity
//! let m = Mat2c::diagonal(Complex::from_real(2.0), Complex::ONE);
//! let p = m * Cp1Point::from_ratio(Complex::new(1.0, 1.0));
//!
//! assert_eq!(p.ratio(), Complex::new(2.0, 2.0));
//! assert!((m * Cp1Point::ZERO).projectively_eq(&Cp1Point::ZERO, 1e-12));
//! ```

/// Complex numbers.
pub mod complex;

/// Points of the complex projective line.
pub mod cp1;

/// Error types for the algebra module.
pub mod error;

/// 2x2 complex matrices.
pub mod mat2c;

pub use complex::Complex;
pub use cp1::Cp1Point;
pub use error::AlgebraError;
pub use mat2c::Mat2c;

// 3-vectors on the sphere use the glam double precision type directly
pub use glam::DVec3;
