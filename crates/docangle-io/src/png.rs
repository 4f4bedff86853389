//! PNG encoding and decoding with the `png` crate
//!
//! Used for lossless gray output (regression files, debug dumps) and for
//! colour output when the destination asks for PNG.

use crate::{IoError, IoResult};
use docangle_core::{PixelBuffer, RgbBuffer, luma};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read an 8-bit PNG as gray.
///
/// Gray images are returned as-is; RGB and RGBA images are converted with
/// the fixed-point luma weights (alpha is ignored).
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::Decode(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let (width, height) = (info.width, info.height);
    let (color_type, bit_depth) = (info.color_type, info.bit_depth);
    let samples = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::Decode(format!("PNG frame error: {}", e)))?;

    let line_size = output_info.line_size;
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &buf[y * line_size..y * line_size + width as usize * samples];
        if samples == 1 {
            data.extend_from_slice(row);
        } else {
            data.extend(row.chunks_exact(samples).map(|p| luma(p[0], p[1], p[2])));
        }
    }
    Ok(PixelBuffer::from_raw(width, height, data)?)
}

/// Write a gray buffer as an 8-bit grayscale PNG.
pub fn write_png<W: Write>(buf: &PixelBuffer, writer: W) -> IoResult<()> {
    let mut data = Vec::with_capacity(buf.width() as usize * buf.height() as usize);
    for y in 0..buf.height() {
        data.extend_from_slice(buf.row(y));
    }
    encode(writer, buf.width(), buf.height(), ColorType::Grayscale, &data)
}

/// Write an RGB buffer as an 8-bit RGB PNG.
pub fn write_png_rgb<W: Write>(buf: &RgbBuffer, writer: W) -> IoResult<()> {
    encode(writer, buf.width(), buf.height(), ColorType::Rgb, buf.data())
}

fn encode<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color_type: ColorType,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::Encode(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::Encode(format!("PNG finish error: {}", e)))?;
    Ok(())
}
