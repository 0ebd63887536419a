use warpix_image::{RgbaImage, CHANNELS};

/// Kernel for nearest neighbor interpolation
///
/// Picks the pixel whose centre is closest to `(u, v)`. A point exactly halfway
/// between two centres resolves to the lower index.
///
/// # Arguments
///
/// * `image` - The input image, not empty.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation(
    image: &RgbaImage,
    u: f64,
    v: f64,
) -> [u8; CHANNELS] {
    let bounds = image.bounds();

    let iu = nearest_index(u - bounds.min_x as f64, image.width());
    let iv = nearest_index(v - bounds.min_y as f64, image.height());

    let base = iv * image.stride() + iu * CHANNELS;

    let mut pixel = [0u8; CHANNELS];
    pixel.copy_from_slice(&image.as_slice()[base..base + CHANNELS]);
    pixel
}

/// Index of the pixel centre `i + 0.5` closest to `s`, clamped to `[0, len)`.
fn nearest_index(s: f64, len: usize) -> usize {
    ((s - 1.0).ceil().max(0.0) as usize).min(len - 1)
}
