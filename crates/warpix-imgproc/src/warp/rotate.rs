use warpix_image::{ImageError, RgbaImage};

use super::affine::{transform_center, Affine};
use crate::interpolation::InterpolationMode;

/// Options for [`rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotateOptions {
    /// The rotation angle in radians, clockwise with the y axis pointing down.
    pub angle: f64,
}

/// Rotate an image about its centre onto the centre of the destination.
///
/// Uses bilinear interpolation. Destination pixels that map outside the source are
/// left untouched.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `options` - The rotation angle.
pub fn rotate(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    options: &RotateOptions,
) -> Result<(), ImageError> {
    let m = Affine::IDENTITY.rotate(options.angle);
    transform_center(src, dst, &m, InterpolationMode::Bilinear)
}
