#![deny(missing_docs)]
//! Image file input and output for panoramas

/// Error types for the io module.
pub mod error;

/// High-level read and write functions for images.
pub mod functional;

pub use crate::error::IoError;
