//! Image resampling and HTML embedding helpers.
//!
//! # Structure
//!
//! - [`PixelArray`] - HxW / HxWxC numeric arrays and conversion to/from images
//! - [`resample`] - per-channel resizing with a named filter
//! - [`EmbeddedImage`] - `<img>` tags with base64 `data:` URIs

mod array;
mod embed;
mod error;
mod resample;

pub use array::PixelArray;
pub use embed::{EmbeddedImage, NEAREST_STYLE};
pub use error::ImageError;
pub use resample::{resample, ResampleMethod};
