use mobius_algebra::AlgebraError;
use mobius_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;

/// An error type for the warping operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// Two of the constraint points coincide on CP1, so no transform realizes them.
    #[error("Constraint points are not pairwise distinct on CP1")]
    DegenerateConfiguration,

    /// The zoom factor cannot produce an invertible matrix.
    #[error("Zoom factor must be finite and non-zero, got {0}")]
    InvalidZoomFactor(f64),

    /// The zoom factor of a zoom loop must be greater than one.
    #[error("Zoom loop factor must be finite and greater than one, got {0}")]
    InvalidLoopFactor(f64),

    /// The loop value of a zoom loop is outside of `[0, 1]`.
    #[error("Zoom loop value must lie in [0, 1], got {0}")]
    InvalidLoopValue(f64),

    /// The zoom cutoff is not a finite number.
    #[error("Zoom cutoff must be finite, got {0}")]
    InvalidCutoff(f64),

    /// The image has no pixels to sample from or to write to.
    #[error("Cannot warp an image of size {0}")]
    InvalidImageSize(ImageSize),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the matrix algebra.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    /// Error from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
