use warpix_image::{ImageError, RgbaImage};

use crate::interpolation::InterpolationMode;
use crate::warp::{transform_center, Affine};

/// Resize an image to fill the destination.
///
/// The source is stretched independently along each axis so that its bounds map onto
/// the destination bounds.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image. Its size sets the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use warpix_image::{ImageSize, Rgba, RgbaImage};
/// use warpix_imgproc::interpolation::InterpolationMode;
/// use warpix_imgproc::resize::resize;
///
/// let image = RgbaImage::from_size_val(ImageSize { width: 4, height: 5 }, Rgba::new(7, 7, 7, 255));
/// let mut image_resized = RgbaImage::from_size_val(ImageSize { width: 2, height: 3 }, Rgba::default());
///
/// resize(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.get(1, 2).unwrap(), Rgba::new(7, 7, 7, 255));
/// ```
pub fn resize(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.is_empty() || dst.is_empty() {
        log::debug!("resize skipped, src {} dst {}", src.bounds(), dst.bounds());
        return Ok(());
    }

    let sx = dst.width() as f64 / src.width() as f64;
    let sy = dst.height() as f64 / src.height() as f64;

    transform_center(src, dst, &Affine::IDENTITY.scale(sx, sy), interpolation)
}

/// Scale an image to fit the destination exactly, with bilinear interpolation.
pub fn scale(src: &RgbaImage, dst: &mut RgbaImage) -> Result<(), ImageError> {
    resize(src, dst, InterpolationMode::Bilinear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpix_image::{Rect, CHANNELS};

    fn red(image: &RgbaImage) -> Vec<u8> {
        image.as_slice().iter().step_by(CHANNELS).copied().collect()
    }

    fn checker() -> Result<RgbaImage, ImageError> {
        let data = [[0x80u8; 4], [0x00; 4], [0x00; 4], [0x80; 4]].concat();
        RgbaImage::from_channels(Rect::new(0, 0, 2, 2), 4, &data)
    }

    #[test]
    fn test_scale_down() -> Result<(), ImageError> {
        let src = checker()?;
        let mut dst = RgbaImage::from_bounds(Rect::new(0, 0, 1, 1));
        scale(&src, &mut dst)?;
        assert_eq!(dst.as_slice(), &[0x40; 4]);
        Ok(())
    }

    #[test]
    fn test_scale_up() -> Result<(), ImageError> {
        let src = checker()?;
        let mut dst = RgbaImage::from_bounds(Rect::new(5, 5, 9, 9));
        scale(&src, &mut dst)?;

        #[rustfmt::skip]
        assert_eq!(
            red(&dst),
            vec![
                0x80, 0x60, 0x20, 0x00,
                0x60, 0x50, 0x30, 0x20,
                0x20, 0x30, 0x50, 0x60,
                0x00, 0x20, 0x60, 0x80,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_resize_nearest_anisotropic() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let src = RgbaImage::from_channels(
            Rect::new(0, 0, 2, 2),
            1,
            &[
                1, 2,
                3, 4,
            ],
        )?;
        let mut dst = RgbaImage::from_bounds(Rect::new(0, 0, 4, 1));
        resize(&src, &mut dst, InterpolationMode::Nearest)?;

        // each row sample sits on the shared edge and resolves to the upper pixel
        assert_eq!(red(&dst), vec![1, 1, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_resize_empty() -> Result<(), ImageError> {
        let src = checker()?;
        let mut dst = RgbaImage::from_bounds(Rect::new(0, 0, 0, 0));
        resize(&src, &mut dst, InterpolationMode::Bilinear)?;
        Ok(())
    }
}
