use warpix_image::{ImageError, RgbaImage, CHANNELS};

use super::kernels::{FullKernel, Kernel};
use super::separable_filter::SeparableFilter;
use crate::parallel::{self, ExecutionStrategy};

/// Round an accumulated channel to the nearest byte, saturating at 0 and 255.
#[inline]
pub(crate) fn round_channel(val: f64) -> u8 {
    (val + 0.5).clamp(0.0, 255.0) as u8
}

/// Check that a filter can map `src` onto `dst`.
///
/// Returns `false` if either image is empty, in which case there is nothing to do.
pub(crate) fn check_filter_geometry(
    src: &RgbaImage,
    dst: &RgbaImage,
) -> Result<bool, ImageError> {
    if src.is_empty() || dst.is_empty() {
        log::debug!("filter skipped, src {} dst {}", src.bounds(), dst.bounds());
        return Ok(false);
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }
    Ok(true)
}

/// Convolve an image with a kernel.
///
/// Taps that fall outside the source are replaced axis by axis: a missing row samples
/// the centre row and a missing column samples the centre column. The border keeps its
/// brightness, and a separable kernel gives the same result as its expanded full kernel.
/// Output channels are rounded to the nearest integer and saturated to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, with the same size as the source. The origins may differ.
/// * `kernel` - The kernel, separable or full.
///
/// # Errors
///
/// * `InvalidKernelLength` if a separable kernel has mismatched or even lengths.
/// * `InvalidImageSize` if the images differ in size.
///
/// Empty images leave the destination untouched.
///
/// # Example
///
/// ```
/// use warpix_image::{ImageSize, Rgba, RgbaImage};
/// use warpix_imgproc::filter::{convolve, SeparableKernel};
///
/// let size = ImageSize { width: 4, height: 3 };
/// let src = RgbaImage::from_size_val(size, Rgba::new(10, 20, 30, 255));
/// let mut dst = RgbaImage::from_size_val(size, Rgba::default());
///
/// convolve(&src, &mut dst, &SeparableKernel::box_blur(3).into()).unwrap();
/// assert_eq!(dst.get(1, 1).unwrap(), Rgba::new(10, 20, 30, 255));
/// ```
pub fn convolve(src: &RgbaImage, dst: &mut RgbaImage, kernel: &Kernel) -> Result<(), ImageError> {
    convolve_with_strategy(src, dst, kernel, ExecutionStrategy::default())
}

/// Convolve an image with a kernel using the given execution strategy.
///
/// See [`convolve`].
pub fn convolve_with_strategy(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    match kernel {
        Kernel::Separable(kernel) => {
            let filter = SeparableFilter::new(kernel.x.clone(), kernel.y.clone())?;
            if check_filter_geometry(src, dst)? {
                filter.apply(src, dst, strategy, round_channel);
            }
        }
        Kernel::Full(kernel) => {
            if check_filter_geometry(src, dst)? {
                full_filter(src, dst, kernel, strategy);
            }
        }
    }
    Ok(())
}

/// Single pass 2D convolution, same size images.
fn full_filter(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    kernel: &FullKernel,
    strategy: ExecutionStrategy,
) {
    let (width, height) = (src.width(), src.height());
    let (size, r) = (kernel.size(), kernel.radius());
    let weights = kernel.weights();

    log::trace!("full filter radius {r} on {width}x{height}, {strategy:?}");

    let src_data = src.as_slice();
    let src_stride = src.stride();
    let sample = |x: usize, y: usize| &src_data[y * src_stride + x * CHANNELS..][..CHANNELS];

    parallel::for_each_image_row_mut(dst, strategy, |y, row| {
        for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let mut acc = [0.0f64; CHANNELS];

            for ky in 0..size {
                // a missing row is replaced by the centre row
                let sy = match (y + ky).checked_sub(r) {
                    Some(sy) if sy < height => sy,
                    _ => y,
                };
                for kx in 0..size {
                    let sx = match (x + kx).checked_sub(r) {
                        Some(sx) if sx < width => sx,
                        _ => x,
                    };
                    let k = weights[ky * size + kx];
                    for (a, &p) in acc.iter_mut().zip(sample(sx, sy)) {
                        *a += p as f64 * k;
                    }
                }
            }

            for (o, &a) in out.iter_mut().zip(acc.iter()) {
                *o = round_channel(a);
            }
        }
    });
}
