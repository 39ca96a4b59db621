#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use mobius_algebra as algebra;

#[doc(inline)]
pub use mobius_image as image;

#[doc(inline)]
pub use mobius_imgproc as imgproc;

#[doc(inline)]
pub use mobius_io as io;
