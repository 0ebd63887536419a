#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use warpix_image as image;

#[doc(inline)]
pub use warpix_imgproc as imgproc;
