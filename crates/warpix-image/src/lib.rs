#![deny(missing_docs)]
//! RGBA raster buffers with rectangular bounds and row stride

/// image representation for resampling and filtering.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{ImageSize, Rect, Rgba, RgbaImage, CHANNELS};
