//! docangle-core - Raster types for document skew estimation
//!
//! This crate provides the data model shared by every other crate in the
//! workspace:
//!
//! - [`PixelBuffer`] - 8-bit grayscale raster with explicit stride
//! - [`RgbBuffer`] - packed 24-bit colour raster, convertible to gray
//! - [`Error`] / [`Result`] - core error type

pub mod buffer;
pub mod error;
pub mod rgb;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use rgb::{RgbBuffer, luma};
