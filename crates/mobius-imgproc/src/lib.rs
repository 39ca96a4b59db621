#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// conversions between pixel, angle, sphere and CP1 coordinates.
pub mod coords;

/// Error types for the warping operations.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// whole-pixel longitude rotation of panoramas.
pub mod shift;

/// construction of projective matrices from geometric constraints.
pub mod transform;

/// image geometric transformations module.
pub mod warp;

/// infinite zoom loop compositing.
pub mod zoom;

pub use crate::error::WarpError;
