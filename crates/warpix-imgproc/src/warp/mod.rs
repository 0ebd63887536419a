//! Geometric image transformations using affine warps.
//!
//! This module provides functions for applying 2D transformations to images:
//!
//! - Affine matrix algebra (translation, scaling, rotation, shearing, inversion)
//! - Resampling through an affine matrix, optionally pinned to the image centres
//! - Rotation about the image centre
//! - EXIF orientation correction
//!
//! # Examples
//!
//! Rotating an image by 45 degrees about its centre:
//!
//! ```no_run
//! use std::f64::consts::FRAC_PI_4;
//! use warpix_image::{Rect, RgbaImage};
//! use warpix_imgproc::interpolation::InterpolationMode;
//! use warpix_imgproc::warp::{transform_center, Affine};
//!
//! let src = RgbaImage::from_bounds(Rect::new(0, 0, 256, 256));
//! let mut dst = RgbaImage::from_bounds(Rect::new(0, 0, 256, 256));
//!
//! let m = Affine::IDENTITY.rotate(FRAC_PI_4);
//! transform_center(&src, &mut dst, &m, InterpolationMode::Bilinear).unwrap();
//! ```

mod affine;
mod orientation;
mod rotate;

pub use affine::{
    transform, transform_center, transform_center_with_strategy, transform_with_strategy,
    Affine,
};
pub use orientation::{orient, Orientation};
pub use rotate::{rotate, RotateOptions};
