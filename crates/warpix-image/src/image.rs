use crate::error::ImageError;

/// Number of bytes per pixel in an [`RgbaImage`].
pub const CHANNELS: usize = 4;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use warpix_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A half-open rectangle `[min_x, max_x) x [min_y, max_y)` in pixel coordinates.
///
/// Pixel `(x, y)` covers the unit square whose centre is `(x + 0.5, y + 0.5)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Inclusive left edge.
    pub min_x: i32,
    /// Inclusive top edge.
    pub min_y: i32,
    /// Exclusive right edge.
    pub max_x: i32,
    /// Exclusive bottom edge.
    pub max_y: i32,
}

impl Rect {
    /// Create a rectangle from two corners, swapping them if needed so that `min <= max`.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Create a rectangle anchored at the origin.
    ///
    /// Sizes past `i32::MAX` saturate.
    pub fn from_size(size: ImageSize) -> Self {
        let clamp = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(size.width), clamp(size.height))
    }

    /// Width of the rectangle in pixels.
    pub fn width(&self) -> usize {
        (self.max_x as i64 - self.min_x as i64).max(0) as usize
    }

    /// Height of the rectangle in pixels.
    pub fn height(&self) -> usize {
        (self.max_y as i64 - self.min_y as i64).max(0) as usize
    }

    /// The size of the rectangle.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Whether the rectangle contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Whether the integer pixel `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Whether the real point `(x, y)` lies inside the half-open rectangle.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x as f64
            && x < self.max_x as f64
            && y >= self.min_y as f64
            && y < self.max_y as f64
    }

    /// The geometric centre of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            self.min_x as f64 + self.width() as f64 / 2.0,
            self.min_y as f64 + self.height() as f64 / 2.0,
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// A straight (non premultiplied) 8-bit RGBA pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Create a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The channels in memory order.
    pub const fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; CHANNELS]> for Rgba {
    fn from(p: [u8; CHANNELS]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
}

impl From<Rgba> for [u8; CHANNELS] {
    fn from(p: Rgba) -> Self {
        p.to_array()
    }
}

/// An 8-bit RGBA raster.
///
/// The image covers the rectangle `bounds` and stores its pixels row by row,
/// `stride` bytes apart. Channel `c` of pixel `(x, y)` lives at byte
/// `(y - min_y) * stride + (x - min_x) * 4 + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbaImage {
    bounds: Rect,
    stride: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Create a new image from raw pixel data.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The rectangle covered by the image.
    /// * `stride` - The distance in bytes between vertically adjacent pixels.
    /// * `data` - The pixel store, at least `stride * height` bytes long.
    ///
    /// # Errors
    ///
    /// If the stride is shorter than a row, or the store is shorter than the image,
    /// an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpix_image::{Rect, RgbaImage};
    ///
    /// let image = RgbaImage::new(Rect::new(0, 0, 2, 3), 12, vec![0u8; 12 * 3]).unwrap();
    ///
    /// assert_eq!(image.width(), 2);
    /// assert_eq!(image.height(), 3);
    /// assert_eq!(image.stride(), 12);
    /// ```
    pub fn new(bounds: Rect, stride: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let row_len = bounds.width() * CHANNELS;
        if stride < row_len {
            return Err(ImageError::InvalidStride(stride, row_len));
        }

        let expected = stride * bounds.height();
        if data.len() < expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            bounds,
            stride,
            data,
        })
    }

    /// Create a zeroed, tightly packed image covering `bounds`.
    pub fn from_bounds(bounds: Rect) -> Self {
        let stride = bounds.width() * CHANNELS;
        Self {
            bounds,
            stride,
            data: vec![0u8; stride * bounds.height()],
        }
    }

    /// Create an image anchored at the origin with every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpix_image::{ImageSize, Rgba, RgbaImage};
    ///
    /// let image = RgbaImage::from_size_val([4, 2].into(), Rgba::new(1, 2, 3, 4));
    ///
    /// assert_eq!(image.size(), ImageSize { width: 4, height: 2 });
    /// assert_eq!(image.get(3, 1).unwrap(), Rgba::new(1, 2, 3, 4));
    /// ```
    pub fn from_size_val(size: ImageSize, val: Rgba) -> Self {
        let mut image = Self::from_bounds(Rect::from_size(size));
        image.fill(val);
        image
    }

    /// Convert interleaved 8-bit pixels of another layout into RGBA.
    ///
    /// Supported layouts are gray (1 channel), gray + alpha (2), RGB (3) and RGBA (4).
    /// Missing alpha is opaque.
    ///
    /// # Errors
    ///
    /// `Unsupported` for any other channel count, `InvalidChannelShape` when `data` does
    /// not hold exactly `width * height * channels` bytes.
    pub fn from_channels(bounds: Rect, channels: usize, data: &[u8]) -> Result<Self, ImageError> {
        if !(1..=CHANNELS).contains(&channels) {
            return Err(ImageError::Unsupported(format!(
                "cannot convert {channels}-channel pixels to RGBA"
            )));
        }

        let expected = bounds.width() * bounds.height() * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        let mut image = Self::from_bounds(bounds);
        image
            .data
            .chunks_exact_mut(CHANNELS)
            .zip(data.chunks_exact(channels))
            .for_each(|(dst, src)| {
                let rgba = match *src {
                    [v] => [v, v, v, 255],
                    [v, a] => [v, v, v, a],
                    [r, g, b] => [r, g, b, 255],
                    [r, g, b, a] => [r, g, b, a],
                    _ => unreachable!("channel count checked above"),
                };
                dst.copy_from_slice(&rgba);
            });

        Ok(image)
    }

    /// The rectangle covered by the image.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.bounds.size()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// The distance in bytes between vertically adjacent pixels.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// The byte offset of pixel `(x, y)`, or `None` when it is outside the bounds.
    pub fn pixel_offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        Some(
            (y as i64 - self.bounds.min_y as i64) as usize * self.stride
                + (x as i64 - self.bounds.min_x as i64) as usize * CHANNELS,
        )
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// `PixelIndexOutOfBounds` if `(x, y)` is outside the bounds.
    pub fn get(&self, x: i32, y: i32) -> Result<Rgba, ImageError> {
        let off = self
            .pixel_offset(x, y)
            .ok_or(ImageError::PixelIndexOutOfBounds(x, y, self.bounds))?;
        let p = &self.data[off..off + CHANNELS];
        Ok(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Write the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// `PixelIndexOutOfBounds` if `(x, y)` is outside the bounds.
    pub fn set(&mut self, x: i32, y: i32, val: Rgba) -> Result<(), ImageError> {
        let off = self
            .pixel_offset(x, y)
            .ok_or(ImageError::PixelIndexOutOfBounds(x, y, self.bounds))?;
        self.data[off..off + CHANNELS].copy_from_slice(&val.to_array());
        Ok(())
    }

    /// The `width * 4` pixel bytes of row `y`, without stride padding.
    pub fn row(&self, y: i32) -> Option<&[u8]> {
        let off = self.pixel_offset(self.bounds.min_x, y)?;
        Some(&self.data[off..off + self.width() * CHANNELS])
    }

    /// Set every pixel to `val`. Padding bytes are left untouched.
    pub fn fill(&mut self, val: Rgba) {
        let row_len = self.width() * CHANNELS;
        if row_len == 0 {
            return;
        }
        let px = val.to_array();
        let height = self.height();
        self.data
            .chunks_mut(self.stride)
            .take(height)
            .for_each(|row| {
                row[..row_len]
                    .chunks_exact_mut(CHANNELS)
                    .for_each(|dst| dst.copy_from_slice(&px));
            });
    }

    /// The raw pixel store, including stride padding.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The mutable raw pixel store, including stride padding.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its pixel store.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{ImageSize, Rect, Rgba, RgbaImage};
    use crate::ImageError;

    #[test]
    fn rect_basics() {
        let r = Rect::new(3, 4, -1, 2);
        assert_eq!(r, Rect::new(-1, 2, 3, 4));
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 2);
        assert_eq!(r.center(), (1.0, 3.0));
        assert!(r.contains(-1, 2));
        assert!(!r.contains(3, 2));
        assert!(r.contains_point(2.999, 3.999));
        assert!(!r.contains_point(3.0, 3.0));
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn rect_extreme_coordinates() {
        let r = Rect::new(i32::MIN, 0, i32::MAX, 1);
        assert_eq!(r.width(), u32::MAX as usize);
        assert_eq!(r.height(), 1);

        let huge = ImageSize {
            width: usize::MAX,
            height: 3,
        };
        assert_eq!(Rect::from_size(huge), Rect::new(0, 0, i32::MAX, 3));
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = RgbaImage::new(Rect::new(0, 0, 10, 20), 40, vec![0u8; 40 * 20])?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert!(!image.is_empty());
        Ok(())
    }

    #[test]
    fn image_invalid_stride() {
        let res = RgbaImage::new(Rect::new(0, 0, 10, 2), 39, vec![0u8; 80]);
        assert_eq!(res, Err(ImageError::InvalidStride(39, 40)));
    }

    #[test]
    fn image_short_store() {
        let res = RgbaImage::new(Rect::new(0, 0, 2, 2), 8, vec![0u8; 15]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(15, 16)));
    }

    #[test]
    fn image_get_set_with_origin_and_padding() -> Result<(), ImageError> {
        let mut image = RgbaImage::new(Rect::new(-2, 5, 1, 7), 16, vec![0u8; 32])?;
        image.set(-2, 5, Rgba::new(1, 2, 3, 4))?;
        image.set(0, 6, Rgba::new(5, 6, 7, 8))?;

        assert_eq!(image.get(-2, 5)?, Rgba::new(1, 2, 3, 4));
        assert_eq!(image.get(0, 6)?, Rgba::new(5, 6, 7, 8));
        assert_eq!(&image.as_slice()[..4], &[1, 2, 3, 4]);
        assert_eq!(&image.as_slice()[24..28], &[5, 6, 7, 8]);
        assert_eq!(image.row(6).map(|r| r.len()), Some(12));

        Ok(())
    }

    #[test]
    fn image_out_of_bounds() {
        let mut image = RgbaImage::from_bounds(Rect::new(0, 0, 2, 2));
        let bounds = image.bounds();
        assert_eq!(
            image.get(2, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, bounds))
        );
        assert_eq!(
            image.set(0, -1, Rgba::default()),
            Err(ImageError::PixelIndexOutOfBounds(0, -1, bounds))
        );
        assert!(image.row(2).is_none());
    }

    #[test]
    fn image_fill_keeps_padding() -> Result<(), ImageError> {
        let mut image = RgbaImage::new(Rect::new(0, 0, 1, 2), 6, vec![9u8; 12])?;
        image.fill(Rgba::new(1, 1, 1, 1));
        assert_eq!(image.as_slice(), &[1, 1, 1, 1, 9, 9, 1, 1, 1, 1, 9, 9]);
        Ok(())
    }

    #[test]
    fn image_from_channels() -> Result<(), ImageError> {
        let bounds = Rect::from_size(ImageSize {
            width: 2,
            height: 1,
        });

        let gray = RgbaImage::from_channels(bounds, 1, &[10, 20])?;
        assert_eq!(gray.get(1, 0)?, Rgba::new(20, 20, 20, 255));

        let gray_alpha = RgbaImage::from_channels(bounds, 2, &[10, 0, 20, 128])?;
        assert_eq!(gray_alpha.get(0, 0)?, Rgba::new(10, 10, 10, 0));

        let rgb = RgbaImage::from_channels(bounds, 3, &[1, 2, 3, 4, 5, 6])?;
        assert_eq!(rgb.get(1, 0)?, Rgba::new(4, 5, 6, 255));

        let rgba = RgbaImage::from_channels(bounds, 4, &[1, 2, 3, 4, 5, 6, 7, 8])?;
        assert_eq!(rgba.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);

        Ok(())
    }

    #[test]
    fn image_from_channels_unsupported() {
        let bounds = Rect::new(0, 0, 1, 1);
        assert!(matches!(
            RgbaImage::from_channels(bounds, 5, &[0; 5]),
            Err(ImageError::Unsupported(_))
        ));
        assert_eq!(
            RgbaImage::from_channels(bounds, 3, &[0; 4]),
            Err(ImageError::InvalidChannelShape(4, 3))
        );
    }
}
