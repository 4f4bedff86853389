//! Decoding through the `image` crate
//!
//! Every format the `image` crate was built with can be read. Colour input
//! is converted to 8-bit RGB first; gray buffers are derived from it with
//! the fixed-point luma weights of [`docangle_core::luma`].

use crate::{IoError, IoResult};
use docangle_core::{PixelBuffer, RgbBuffer};
use image::{DynamicImage, ImageError, ImageReader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

fn map_image_error(err: ImageError) -> IoError {
    match err {
        ImageError::IoError(e) => IoError::Io(e),
        ImageError::Unsupported(e) => IoError::UnsupportedFormat(e.to_string()),
        e => IoError::Decode(e.to_string()),
    }
}

fn to_rgb_buffer(img: DynamicImage) -> IoResult<RgbBuffer> {
    let rgb = img.into_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RgbBuffer::from_raw(width, height, rgb.into_raw())?)
}

/// Read an image file as RGB.
pub fn read_rgb<P: AsRef<Path>>(path: P) -> IoResult<RgbBuffer> {
    let path = path.as_ref();
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(map_image_error)?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    to_rgb_buffer(img)
}

/// Read an image file as 8-bit gray.
pub fn read_gray<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    Ok(read_rgb(path)?.to_gray())
}

/// Decode an in-memory image as RGB.
pub fn decode_rgb(data: &[u8]) -> IoResult<RgbBuffer> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()
        .map_err(map_image_error)?;
    to_rgb_buffer(img)
}

/// Decode an in-memory image as 8-bit gray.
pub fn decode_gray(data: &[u8]) -> IoResult<PixelBuffer> {
    Ok(decode_rgb(data)?.to_gray())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::write_png;

    #[test]
    fn test_decode_png_gray() {
        let mut buf = PixelBuffer::new_filled(8, 4, 255).unwrap();
        buf.set_pixel(3, 2, 17).unwrap();
        let mut bytes = Vec::new();
        write_png(&buf, &mut bytes).unwrap();

        let gray = decode_gray(&bytes).unwrap();
        assert_eq!(gray, buf);
        let rgb = decode_rgb(&bytes).unwrap();
        assert_eq!(rgb.get_rgb(3, 2), Some([17, 17, 17]));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_rgb(b"definitely not an image").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_rgb("/nonexistent/scan.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
