use std::sync::atomic::{AtomicU64, Ordering};

use warpix_image::{ImageError, RgbaImage};

use super::convolution::check_filter_geometry;
use super::kernels;
use super::separable_filter::SeparableFilter;
use crate::parallel::ExecutionStrategy;

// bit pattern of 0.5f64
static DEFAULT_STD_DEV: AtomicU64 = AtomicU64::new(0x3FE0_0000_0000_0000);

/// The process-wide standard deviation used by [`BlurOptions::default`]. Initially `0.5`.
pub fn default_std_dev() -> f64 {
    f64::from_bits(DEFAULT_STD_DEV.load(Ordering::Relaxed))
}

/// Set the process-wide standard deviation used by [`BlurOptions::default`].
///
/// # Errors
///
/// `InvalidArgument` unless `0 < std_dev <= 1024`.
pub fn set_default_std_dev(std_dev: f64) -> Result<(), ImageError> {
    validate_std_dev(std_dev)?;
    DEFAULT_STD_DEV.store(std_dev.to_bits(), Ordering::Relaxed);
    Ok(())
}

// beyond this the 2D fixed-point weight sum no longer fits the u64 accumulator
const MAX_STD_DEV: f64 = 1024.0;

fn validate_std_dev(std_dev: f64) -> Result<(), ImageError> {
    if !(std_dev > 0.0 && std_dev <= MAX_STD_DEV) {
        return Err(ImageError::InvalidArgument(format!(
            "standard deviation must be in (0, {MAX_STD_DEV}], got {std_dev}"
        )));
    }
    Ok(())
}

/// Options for [`gaussian_blur`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlurOptions {
    /// The standard deviation of the gaussian, in pixels.
    pub std_dev: f64,
    /// The kernel radius. Zero derives it as `ceil(6 * std_dev)`.
    pub size: usize,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            std_dev: default_std_dev(),
            size: 0,
        }
    }
}

impl BlurOptions {
    /// The kernel radius these options resolve to.
    pub fn radius(&self) -> usize {
        if self.size == 0 {
            (6.0 * self.std_dev).ceil() as usize
        } else {
            self.size
        }
    }
}

/// Blur an image using a gaussian blur filter
///
/// The kernel is evaluated in 16.16 fixed point and accumulated in 64-bit integers,
/// so the output does not depend on the platform's floating point rounding.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, with the same size as the source.
/// * `options` - The standard deviation and kernel radius.
///
/// # Errors
///
/// * `InvalidArgument` unless `0 < std_dev <= 1024`.
/// * `InvalidImageSize` if the images differ in size.
///
/// # Example
///
/// ```
/// use warpix_image::{Rect, Rgba, RgbaImage};
/// use warpix_imgproc::filter::{gaussian_blur, BlurOptions};
///
/// let mut src = RgbaImage::from_bounds(Rect::new(0, 0, 3, 3));
/// src.set(1, 1, Rgba::new(0xff, 0, 0, 0)).unwrap();
/// let mut dst = RgbaImage::from_bounds(Rect::new(0, 0, 3, 3));
///
/// let options = BlurOptions { std_dev: 0.34, size: 1 };
/// gaussian_blur(&src, &mut dst, &options).unwrap();
///
/// assert_eq!(dst.get(1, 1).unwrap().r, 0xf2);
/// assert_eq!(dst.get(1, 0).unwrap().r, 0x03);
/// ```
pub fn gaussian_blur(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    options: &BlurOptions,
) -> Result<(), ImageError> {
    gaussian_blur_with_strategy(src, dst, options, ExecutionStrategy::default())
}

/// Blur an image using a gaussian blur filter and the given execution strategy.
///
/// See [`gaussian_blur`].
pub fn gaussian_blur_with_strategy(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    options: &BlurOptions,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    validate_std_dev(options.std_dev)?;

    if !check_filter_geometry(src, dst)? {
        return Ok(());
    }

    let half = kernels::gaussian_kernel_1d(options.std_dev, options.radius());

    // the 2D weights sum to the square of the 1D sum
    let sum_1d = 2 * half[1..].iter().sum::<u64>() + half[0];
    let k_sum = sum_1d * sum_1d;

    let kernel = half[1..]
        .iter()
        .rev()
        .chain(half.iter())
        .copied()
        .collect::<Vec<_>>();

    let filter = SeparableFilter::new(kernel.clone(), kernel)?;
    filter.apply(src, dst, strategy, |acc| {
        ((acc + k_sum / 2) / k_sum).min(255) as u8
    });

    Ok(())
}
