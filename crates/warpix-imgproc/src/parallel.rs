use rayon::prelude::*;

use warpix_image::{RgbaImage, CHANNELS};

/// Number of destination pixels from which [`ExecutionStrategy::Auto`] uses the rayon pool.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 100_000;

/// Controls how row-wise operations are executed.
///
/// Rows are always written through disjoint slices, so the output does not depend
/// on the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Split the rows over the global rayon thread pool.
    Parallel,

    /// Parallel from [`PARALLEL_PIXEL_THRESHOLD`] pixels on, serial below.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether an operation over `num_pixels` pixels should run on the thread pool.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= PARALLEL_PIXEL_THRESHOLD,
        }
    }
}

/// Apply a function to each row of a row-major buffer.
///
/// # Arguments
///
/// * `data` - The buffer, holding at least `rows * stride` elements.
/// * `stride` - The distance in elements between the start of two rows.
/// * `rows` - The number of rows to visit.
/// * `row_len` - The number of leading elements of each row handed to `f`.
/// * `strategy` - The execution strategy.
/// * `f` - Called with the row index and the row elements.
///
/// # Panics
///
/// Panics if `data` holds fewer than `rows * stride` elements or if `row_len`
/// is larger than `stride`.
pub fn for_each_row_mut<T: Send>(
    data: &mut [T],
    stride: usize,
    rows: usize,
    row_len: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) {
    if stride == 0 || rows == 0 {
        return;
    }

    let data = &mut data[..stride * rows];
    let num_pixels = rows * row_len / CHANNELS;

    if strategy.is_parallel(num_pixels) {
        data.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(r, row)| f(r, &mut row[..row_len]));
    } else {
        data.chunks_mut(stride)
            .enumerate()
            .for_each(|(r, row)| f(r, &mut row[..row_len]));
    }
}

/// Apply a function to each pixel row of an image.
///
/// `f` receives the row index relative to the top of the image and the
/// `width * 4` bytes of the row, stride padding excluded.
pub fn for_each_image_row_mut(
    image: &mut RgbaImage,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [u8]) + Send + Sync,
) {
    let (stride, rows, row_len) = (image.stride(), image.height(), image.width() * CHANNELS);
    if row_len == 0 {
        return;
    }
    for_each_row_mut(image.as_slice_mut(), stride, rows, row_len, strategy, f);
}
