use rayon::prelude::*;
use thiserror::Error;

use mobius_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the per-pixel loops are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// Each task owns one disjoint row of the output buffer.
    #[default]
    ParallelRows,

    /// Use the global Rayon thread pool to process every pixel in parallel.
    ParallelPixels,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run rows on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Fill every pixel of `dst` with `f(x, y, pixel)` using the given strategy.
///
/// The closure only ever sees the channels of its own pixel, so the writes are
/// disjoint by construction.
///
/// # Example
///
/// ```
/// use mobius_image::Image;
/// use mobius_imgproc::parallel::{par_iter_pixels, ExecutionStrategy};
///
/// let mut image = Image::<u8, 1>::from_size_val([3, 2].into(), 0).unwrap();
/// par_iter_pixels(&mut image, ExecutionStrategy::ParallelRows, |x, y, px| {
///     px[0] = (10 * y + x) as u8;
/// })
/// .unwrap();
///
/// assert_eq!(image.as_slice(), &[0, 1, 2, 10, 11, 12]);
/// ```
pub fn par_iter_pixels<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T: Send + Sync,
{
    let cols = dst.cols();
    let stride = cols * C;
    if stride == 0 {
        return Ok(());
    }

    let row_op = |(y, row): (usize, &mut [T])| {
        row.chunks_exact_mut(C)
            .enumerate()
            .for_each(|(x, pixel)| f(x, y, pixel));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            dst.as_slice_mut()
                .chunks_exact_mut(stride)
                .enumerate()
                .for_each(row_op);
        }
        ExecutionStrategy::ParallelRows => {
            dst.as_slice_mut()
                .par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(row_op);
        }
        ExecutionStrategy::ParallelPixels => {
            dst.as_slice_mut()
                .par_chunks_exact_mut(C)
                .enumerate()
                .for_each(|(i, pixel)| f(i % cols, i / cols, pixel));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.as_slice_mut()
                    .par_chunks_exact_mut(stride)
                    .enumerate()
                    .for_each(row_op);
            });
        }
    }

    Ok(())
}
