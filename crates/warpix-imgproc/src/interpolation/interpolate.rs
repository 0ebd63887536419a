use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use warpix_image::{ImageError, Rgba, RgbaImage, CHANNELS};

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Sample one pixel without validating the inputs.
///
/// `image` must not be empty and `(u, v)` must lie within its closed bounds.
#[inline]
pub(crate) fn interpolate_unchecked(
    image: &RgbaImage,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> [u8; CHANNELS] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image.
/// * `u` - The x coordinate of the pixel to interpolate. Pixel `x` has its centre at `x + 0.5`.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel. Coordinates outside the image are clamped to its bounds.
///
/// # Errors
///
/// `InvalidArgument` if the image is empty or a coordinate is NaN.
///
/// # Example
///
/// ```
/// use warpix_image::{Rect, Rgba, RgbaImage};
/// use warpix_imgproc::interpolation::{interpolate_pixel, InterpolationMode};
///
/// let image = RgbaImage::from_channels(Rect::new(0, 0, 2, 1), 1, &[0, 100]).unwrap();
///
/// let p = interpolate_pixel(&image, 1.0, 0.5, InterpolationMode::Bilinear).unwrap();
/// assert_eq!(p, Rgba::new(50, 50, 50, 255));
/// ```
pub fn interpolate_pixel(
    image: &RgbaImage,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> Result<Rgba, ImageError> {
    if image.is_empty() {
        return Err(ImageError::InvalidArgument(
            "cannot interpolate an empty image".to_string(),
        ));
    }
    if u.is_nan() || v.is_nan() {
        return Err(ImageError::InvalidArgument(format!(
            "cannot interpolate at ({u}, {v})"
        )));
    }

    let bounds = image.bounds();
    let u = u.clamp(bounds.min_x as f64, bounds.max_x as f64);
    let v = v.clamp(bounds.min_y as f64, bounds.max_y as f64);

    Ok(interpolate_unchecked(image, u, v, interpolation).into())
}
