use std::f64::consts::FRAC_PI_2;

use warpix_image::{ImageError, ImageSize, RgbaImage};

use super::affine::{transform_center, Affine};
use crate::interpolation::InterpolationMode;

/// The eight EXIF image orientations.
///
/// Each variant names the transformation that brings the stored pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// EXIF 1, already upright.
    #[default]
    Identity,
    /// EXIF 2, mirror left to right.
    FlipHorizontal,
    /// EXIF 3, rotate by 180 degrees.
    Rotate180,
    /// EXIF 4, mirror top to bottom.
    FlipVertical,
    /// EXIF 5, mirror along the main diagonal.
    Transpose,
    /// EXIF 6, rotate by 90 degrees clockwise.
    Rotate90,
    /// EXIF 7, mirror along the anti-diagonal.
    Transverse,
    /// EXIF 8, rotate by 90 degrees counter-clockwise.
    Rotate270,
}

impl Orientation {
    /// Parse an EXIF orientation tag value, `1..=8`.
    pub fn from_exif(value: u16) -> Option<Orientation> {
        let orientation = match value {
            1 => Orientation::Identity,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => return None,
        };
        Some(orientation)
    }

    /// The EXIF orientation tag value.
    pub fn to_exif(self) -> u16 {
        match self {
            Orientation::Identity => 1,
            Orientation::FlipHorizontal => 2,
            Orientation::Rotate180 => 3,
            Orientation::FlipVertical => 4,
            Orientation::Transpose => 5,
            Orientation::Rotate90 => 6,
            Orientation::Transverse => 7,
            Orientation::Rotate270 => 8,
        }
    }

    /// The transformation to apply about the image centre.
    pub fn to_affine(self) -> Affine {
        let m = Affine::IDENTITY;
        match self {
            Orientation::Identity => m,
            Orientation::FlipHorizontal => m.scale(-1.0, 1.0),
            Orientation::Rotate180 => m.scale(-1.0, -1.0),
            Orientation::FlipVertical => m.scale(1.0, -1.0),
            Orientation::Transpose => m.rotate(FRAC_PI_2).scale(-1.0, 1.0),
            Orientation::Rotate90 => m.rotate(FRAC_PI_2),
            Orientation::Transverse => m.rotate(-FRAC_PI_2).scale(-1.0, 1.0),
            Orientation::Rotate270 => m.rotate(-FRAC_PI_2),
        }
    }

    /// Whether the orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90
                | Orientation::Transverse
                | Orientation::Rotate270
        )
    }

    /// The size of an image of `size` once oriented.
    pub fn oriented_size(self, size: ImageSize) -> ImageSize {
        if self.swaps_axes() {
            ImageSize {
                width: size.height,
                height: size.width,
            }
        } else {
            size
        }
    }
}

/// Bring an image upright according to its EXIF orientation.
///
/// Pixels are moved without interpolation, so the output is an exact permutation of
/// the input.
///
/// # Arguments
///
/// * `src` - The source image, as stored.
/// * `dst` - The destination image, of size `orientation.oriented_size(src.size())`.
/// * `orientation` - The orientation of the source.
///
/// # Errors
///
/// `InvalidArgument` if the destination does not have the oriented size.
pub fn orient(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    orientation: Orientation,
) -> Result<(), ImageError> {
    let expected = orientation.oriented_size(src.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidArgument(format!(
            "destination size {} does not match oriented size {expected}",
            dst.size()
        )));
    }

    transform_center(
        src,
        dst,
        &orientation.to_affine(),
        InterpolationMode::Nearest,
    )
}
