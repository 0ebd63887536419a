use crate::image::Rect;

/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when an argument is outside of its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error when the separable kernel axes are empty, differ in length or are even.
    #[error("Invalid kernel length: x={0}, y={1}. Both must have the same odd length")]
    InvalidKernelLength(usize, usize),

    /// Error when a full kernel does not have an odd square number of weights.
    #[error("Invalid kernel size: {0} weights is not an odd square")]
    InvalidKernelSize(usize),

    /// Error when the requested operation or pixel layout is not supported.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Error when a pixel coordinate falls outside of the image bounds.
    #[error("Pixel ({0}, {1}) is out of bounds {2}")]
    PixelIndexOutOfBounds(i32, i32, Rect),

    /// Error when the source and destination sizes do not match.
    #[error("Invalid image size: source {0}x{1}, destination {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the row stride is smaller than a row of pixels.
    #[error("Stride ({0}) is smaller than the row length in bytes ({1})")]
    InvalidStride(usize, usize),

    /// Error when the data length does not cover the image.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),
}
