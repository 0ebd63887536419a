use warpix_image::{RgbaImage, CHANNELS};

/// Kernel for bilinear interpolation
///
/// Weights the four pixels whose centres surround `(u, v)` by the area of the
/// opposite sub-rectangle. Near the border, or when the neighbours collapse onto
/// one row or column, the interpolation is curtailed to one axis or to a single
/// pixel so that nothing outside the image is ever sampled.
///
/// # Arguments
///
/// * `image` - The input image, not empty.
/// * `u` - The x coordinate, within the closed image bounds.
/// * `v` - The y coordinate, within the closed image bounds.
///
/// # Returns
///
/// The interpolated pixel, rounded half away from zero.
pub(crate) fn bilinear_interpolation(image: &RgbaImage, u: f64, v: f64) -> [u8; CHANNELS] {
    let bounds = image.bounds();
    let width = image.width() as f64;
    let height = image.height() as f64;

    // work in coordinates local to the bounds
    let sx = u - bounds.min_x as f64;
    let sy = v - bounds.min_y as f64;

    let low_x = (sx - 0.5).floor().clamp(0.0, width - 1.0);
    let low_y = (sy - 0.5).floor().clamp(0.0, height - 1.0);
    let high_x = (sx - 0.5).ceil().clamp(0.0, width - 1.0);
    let high_y = (sy - 0.5).ceil().clamp(0.0, height - 1.0);

    // In the names below the first digit is the row (0 top, 1 bottom) and the
    // second the column (0 left, 1 right) of the neighbour.
    let x00 = low_x + 0.5;
    let y00 = low_y + 0.5;
    let x01 = high_x + 0.5;
    let y01 = low_y + 0.5;
    let x10 = low_x + 0.5;
    let y10 = high_y + 0.5;
    let x11 = high_x + 0.5;
    let y11 = high_y + 0.5;

    let (mut w00, mut w01, mut w10, mut w11) = (0.0, 0.0, 0.0, 0.0);

    if low_x == high_x && low_y == high_y {
        w00 = 1.0;
    } else if sy <= 0.5 && sx <= 0.5 {
        w00 = 1.0;
    } else if height - sy <= 0.5 && width - sx <= 0.5 {
        w11 = 1.0;
    } else if sy <= 0.5 || low_y == high_y {
        w00 = x01 - sx;
        w01 = sx - x00;
    } else if sx <= 0.5 || low_x == high_x {
        w00 = y10 - sy;
        w10 = sy - y00;
    } else if height - sy <= 0.5 {
        w10 = x11 - sx;
        w11 = sx - x10;
    } else if width - sx <= 0.5 {
        w01 = y11 - sy;
        w11 = sy - y01;
    } else {
        w00 = (x01 - sx) * (y10 - sy);
        w01 = (sx - x00) * (y11 - sy);
        w10 = (x11 - sx) * (sy - y00);
        w11 = (sx - x10) * (sy - y01);
    }

    let stride = image.stride();
    let offset = |x: f64, y: f64| y as usize * stride + x as usize * CHANNELS;

    let data = image.as_slice();
    let p00 = &data[offset(low_x, low_y)..][..CHANNELS];
    let p01 = &data[offset(high_x, low_y)..][..CHANNELS];
    let p10 = &data[offset(low_x, high_y)..][..CHANNELS];
    let p11 = &data[offset(high_x, high_y)..][..CHANNELS];

    let mut pixel = [0u8; CHANNELS];
    for k in 0..CHANNELS {
        let val = p00[k] as f64 * w00
            + p01[k] as f64 * w01
            + p10[k] as f64 * w10
            + p11[k] as f64 * w11;
        pixel[k] = (val + 0.5) as u8;
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::bilinear_interpolation;
    use warpix_image::{ImageError, Rect, RgbaImage};

    fn checker(bounds: Rect) -> Result<RgbaImage, ImageError> {
        let data = [[0x80u8; 4], [0x00; 4], [0x00; 4], [0x80; 4]].concat();
        RgbaImage::from_channels(bounds, 4, &data)
    }

    #[test]
    fn bilinear_pixel_centres_are_exact() -> Result<(), ImageError> {
        let image = checker(Rect::new(0, 0, 2, 2))?;
        assert_eq!(bilinear_interpolation(&image, 0.5, 0.5)[0], 0x80);
        assert_eq!(bilinear_interpolation(&image, 1.5, 0.5)[0], 0x00);
        assert_eq!(bilinear_interpolation(&image, 0.5, 1.5)[0], 0x00);
        assert_eq!(bilinear_interpolation(&image, 1.5, 1.5)[0], 0x80);
        Ok(())
    }

    #[test]
    fn bilinear_interior_average() -> Result<(), ImageError> {
        let image = checker(Rect::new(0, 0, 2, 2))?;
        assert_eq!(bilinear_interpolation(&image, 1.0, 1.0), [0x40; 4]);
        Ok(())
    }

    #[test]
    fn bilinear_edges_collapse_to_one_axis() -> Result<(), ImageError> {
        let image = checker(Rect::new(0, 0, 2, 2))?;
        // top edge: interpolate along x only
        assert_eq!(bilinear_interpolation(&image, 1.0, 0.25)[0], 0x40);
        assert_eq!(bilinear_interpolation(&image, 0.75, 0.25)[0], 0x60);
        // left edge: interpolate along y only
        assert_eq!(bilinear_interpolation(&image, 0.25, 0.75)[0], 0x60);
        // bottom and right edges
        assert_eq!(bilinear_interpolation(&image, 1.25, 1.75)[0], 0x60);
        assert_eq!(bilinear_interpolation(&image, 1.75, 1.25)[0], 0x60);
        Ok(())
    }

    #[test]
    fn bilinear_corners_take_nearest_pixel() -> Result<(), ImageError> {
        let image = checker(Rect::new(0, 0, 2, 2))?;
        assert_eq!(bilinear_interpolation(&image, 0.1, 0.2)[0], 0x80);
        assert_eq!(bilinear_interpolation(&image, 1.9, 1.8)[0], 0x80);
        Ok(())
    }

    #[test]
    fn bilinear_respects_origin() -> Result<(), ImageError> {
        let image = checker(Rect::new(10, -4, 12, -2))?;
        assert_eq!(bilinear_interpolation(&image, 11.0, -3.0)[0], 0x40);
        assert_eq!(bilinear_interpolation(&image, 10.5, -3.5)[0], 0x80);
        Ok(())
    }

    #[test]
    fn bilinear_single_pixel() -> Result<(), ImageError> {
        let image = RgbaImage::from_channels(Rect::new(0, 0, 1, 1), 4, &[1, 2, 3, 4])?;
        assert_eq!(bilinear_interpolation(&image, 0.9, 0.1), [1, 2, 3, 4]);
        Ok(())
    }
}
