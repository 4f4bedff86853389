//! docangle-io - Image I/O for docangle
//!
//! - Decoding of every format the `image` crate supports, to RGB or gray
//! - PNG output through the `png` crate
//! - JPEG output through the `jpeg-encoder` crate, quality and chroma
//!   subsampling selectable
//! - An `image`-backed [`docangle_transform::Resizer`]

mod decode;
mod error;
mod format;
pub mod jpeg;
pub mod png;
mod resize;

pub use decode::{decode_gray, decode_rgb, read_gray, read_rgb};
pub use error::{IoError, IoResult};
pub use format::ImageFormat;
pub use crate::jpeg::{
    ChromaSampling, DEFAULT_JPEG_QUALITY, JpegOptions, encode_jpeg_gray, encode_jpeg_rgb,
};
pub use crate::png::{read_png, write_png, write_png_rgb};
pub use resize::ImageResizer;

use docangle_core::{PixelBuffer, RgbBuffer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode an RGB buffer in memory.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats other than PNG and
/// JPEG.
pub fn encode_rgb(buf: &RgbBuffer, format: ImageFormat, jpeg: &JpegOptions) -> IoResult<Vec<u8>> {
    match format {
        ImageFormat::Jpeg => encode_jpeg_rgb(buf, jpeg),
        ImageFormat::Png => {
            let mut out = Vec::new();
            write_png_rgb(buf, &mut out)?;
            Ok(out)
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write {:?}",
            other
        ))),
    }
}

/// Encode a gray buffer in memory.
pub fn encode_gray(buf: &PixelBuffer, format: ImageFormat, jpeg: &JpegOptions) -> IoResult<Vec<u8>> {
    match format {
        ImageFormat::Jpeg => encode_jpeg_gray(buf, jpeg),
        ImageFormat::Png => {
            let mut out = Vec::new();
            write_png(buf, &mut out)?;
            Ok(out)
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write {:?}",
            other
        ))),
    }
}

/// Write a gray buffer to a file.
pub fn write_image<P: AsRef<Path>>(buf: &PixelBuffer, path: P, format: ImageFormat) -> IoResult<()> {
    let data = encode_gray(buf, format, &JpegOptions::default())?;
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&data)?;
    file.flush()?;
    Ok(())
}
