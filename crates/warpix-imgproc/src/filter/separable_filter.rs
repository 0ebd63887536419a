use std::ops::{AddAssign, Mul};

use num_traits::Zero;
use warpix_image::{ImageError, RgbaImage, CHANNELS};

use super::kernels::kernel_radius;
use crate::parallel::{self, ExecutionStrategy};

/// Numeric type used to accumulate the weighted channel sums.
pub(crate) trait Accumulator:
    Copy + Zero + AddAssign + Mul<Output = Self> + Send + Sync
{
    /// Convert a channel value into the accumulator type.
    fn from_u8(val: u8) -> Self;
}

impl Accumulator for f64 {
    fn from_u8(val: u8) -> Self {
        val as f64
    }
}

impl Accumulator for u64 {
    fn from_u8(val: u8) -> Self {
        val as u64
    }
}

/// A separable 2D filter that applies a vertical and then a horizontal 1D convolution.
///
/// A tap that falls outside the image adds its weight to the centre tap instead.
pub(crate) struct SeparableFilter<T> {
    kernel_x: Vec<T>,
    kernel_y: Vec<T>,
    radius: usize,
}

impl<T: Accumulator> SeparableFilter<T> {
    /// Create a new separable filter with the given kernels.
    ///
    /// # Arguments
    ///
    /// * `kernel_x` - The horizontal convolution kernel
    /// * `kernel_y` - The vertical convolution kernel
    pub fn new(kernel_x: Vec<T>, kernel_y: Vec<T>) -> Result<Self, ImageError> {
        let radius = kernel_radius(kernel_x.len(), kernel_y.len())?;
        Ok(Self {
            kernel_x,
            kernel_y,
            radius,
        })
    }

    /// Apply the filter to an image with execution strategy control.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image, not empty.
    /// * `dst` - The destination image, with the same size as the source.
    /// * `strategy` - The execution strategy.
    /// * `finalize` - Turns an accumulated channel into the output value.
    pub fn apply(
        &self,
        src: &RgbaImage,
        dst: &mut RgbaImage,
        strategy: ExecutionStrategy,
        finalize: impl Fn(T) -> u8 + Send + Sync,
    ) {
        let (width, height) = (src.width(), src.height());
        let row_len = width * CHANNELS;
        let r = self.radius;

        log::trace!("separable filter radius {r} on {width}x{height}, {strategy:?}");

        let src_data = src.as_slice();
        let src_stride = src.stride();
        let sample = |x: usize, y: usize| &src_data[y * src_stride + x * CHANNELS..][..CHANNELS];

        // vertical pass into the intermediate buffer
        let mut temp = vec![T::zero(); row_len * height];
        parallel::for_each_row_mut(&mut temp, row_len, height, row_len, strategy, |y, row| {
            for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let mut acc = [T::zero(); CHANNELS];
                let mut k0 = self.kernel_y[r];
                for i in 1..=r {
                    let (k_above, k_below) = (self.kernel_y[r - i], self.kernel_y[r + i]);
                    if y >= i {
                        accumulate(&mut acc, sample(x, y - i), k_above);
                    } else {
                        k0 += k_above;
                    }
                    if y + i < height {
                        accumulate(&mut acc, sample(x, y + i), k_below);
                    } else {
                        k0 += k_below;
                    }
                }
                accumulate(&mut acc, sample(x, y), k0);
                out.copy_from_slice(&acc);
            }
        });

        // horizontal pass into the destination
        let temp = &temp;
        parallel::for_each_image_row_mut(dst, strategy, |y, row| {
            let temp_row = &temp[y * row_len..][..row_len];
            let tap = |x: usize| &temp_row[x * CHANNELS..][..CHANNELS];
            for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let mut acc = [T::zero(); CHANNELS];
                let mut k0 = self.kernel_x[r];
                for i in 1..=r {
                    let (k_left, k_right) = (self.kernel_x[r - i], self.kernel_x[r + i]);
                    if x >= i {
                        accumulate_acc(&mut acc, tap(x - i), k_left);
                    } else {
                        k0 += k_left;
                    }
                    if x + i < width {
                        accumulate_acc(&mut acc, tap(x + i), k_right);
                    } else {
                        k0 += k_right;
                    }
                }
                accumulate_acc(&mut acc, tap(x), k0);
                for (o, &a) in out.iter_mut().zip(acc.iter()) {
                    *o = finalize(a);
                }
            }
        });
    }
}

#[inline]
fn accumulate<T: Accumulator>(acc: &mut [T; CHANNELS], pixel: &[u8], k: T) {
    for (a, &p) in acc.iter_mut().zip(pixel) {
        *a += T::from_u8(p) * k;
    }
}

#[inline]
fn accumulate_acc<T: Accumulator>(acc: &mut [T; CHANNELS], pixel: &[T], k: T) {
    for (a, &p) in acc.iter_mut().zip(pixel) {
        *a += p * k;
    }
}
