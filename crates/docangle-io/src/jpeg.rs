//! JPEG encoding with the `jpeg-encoder` crate
//!
//! Straightened pages are written at quality 95 without chroma
//! subsampling (4:4:4) by default, so thin strokes keep their colour.

use crate::{IoError, IoResult};
use docangle_core::{PixelBuffer, RgbBuffer};
use jpeg_encoder::{ColorType, Encoder, SamplingFactor};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Chroma subsampling for colour JPEG output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromaSampling {
    /// Full resolution chroma
    #[default]
    Yuv444,
    /// Horizontal halving
    Yuv422,
    /// Horizontal and vertical halving
    Yuv420,
}

impl ChromaSampling {
    fn factor(self) -> SamplingFactor {
        match self {
            ChromaSampling::Yuv444 => SamplingFactor::R_4_4_4,
            ChromaSampling::Yuv422 => SamplingFactor::R_4_2_2,
            ChromaSampling::Yuv420 => SamplingFactor::R_4_2_0,
        }
    }
}

/// Options for JPEG output
#[derive(Debug, Clone)]
pub struct JpegOptions {
    /// Quality 1-100 (default: 95)
    pub quality: u8,
    /// Chroma subsampling (default: 4:4:4)
    pub sampling: ChromaSampling,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            sampling: ChromaSampling::Yuv444,
        }
    }
}

impl JpegOptions {
    /// Set the quality
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Set the chroma subsampling
    pub fn with_sampling(mut self, sampling: ChromaSampling) -> Self {
        self.sampling = sampling;
        self
    }

    fn validate(&self) -> IoResult<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(IoError::Encode(format!(
                "JPEG quality must be in 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

fn dimensions(width: u32, height: u32) -> IoResult<(u16, u16)> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(IoError::Encode(format!(
            "image {}x{} exceeds JPEG size limit of 65535",
            width, height
        ))),
    }
}

/// Encode an RGB buffer as JPEG.
pub fn encode_jpeg_rgb(buf: &RgbBuffer, options: &JpegOptions) -> IoResult<Vec<u8>> {
    options.validate()?;
    let (width, height) = dimensions(buf.width(), buf.height())?;
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, options.quality);
    encoder.set_sampling_factor(options.sampling.factor());
    encoder
        .encode(buf.data(), width, height, ColorType::Rgb)
        .map_err(|e| IoError::Encode(format!("JPEG encode error: {}", e)))?;
    Ok(out)
}

/// Encode a gray buffer as single-channel JPEG.
pub fn encode_jpeg_gray(buf: &PixelBuffer, options: &JpegOptions) -> IoResult<Vec<u8>> {
    options.validate()?;
    let (width, height) = dimensions(buf.width(), buf.height())?;
    let packed = buf.to_contiguous();
    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, options.quality);
    encoder
        .encode(packed.data(), width, height, ColorType::Luma)
        .map_err(|e| IoError::Encode(format!("JPEG encode error: {}", e)))?;
    Ok(out)
}
