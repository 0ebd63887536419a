//! Pixel interpolation methods for image transformations.
//!
//! Both modes use the pixel-centre convention: pixel `(i, j)` covers the unit
//! square centred on `(i + 0.5, j + 0.5)`.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Area-weighted average of the four surrounding pixel centres,
//!   curtailed to one axis near the image border

mod bilinear;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
