//! Filter operations
//!
//! Convolution with separable or full kernels, and a fixed-point gaussian blur.

mod convolution;
pub use convolution::{convolve, convolve_with_strategy};

/// Filter kernels
pub mod kernels;
pub use kernels::{FullKernel, Kernel, SeparableKernel};

mod ops;
pub use ops::*;

mod separable_filter;
