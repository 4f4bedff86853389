//! [`Resizer`] backed by `image::imageops`

use docangle_core::PixelBuffer;
use docangle_transform::{Resizer, TransformError, TransformResult};
use image::GrayImage;
use image::imageops::{self, FilterType};

/// Resizer that delegates to the `image` crate's resampling filters.
#[derive(Debug, Clone, Copy)]
pub struct ImageResizer {
    filter: FilterType,
}

impl ImageResizer {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for ImageResizer {
    /// Bilinear (triangle) filtering.
    fn default() -> Self {
        Self::new(FilterType::Triangle)
    }
}

impl Resizer for ImageResizer {
    fn resize(&self, src: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer> {
        let packed = src.to_contiguous();
        let img = GrayImage::from_raw(src.width(), src.height(), packed.into_raw()).ok_or_else(
            || TransformError::InvalidParameters("source does not match its dimensions".into()),
        )?;
        let out = imageops::resize(&img, width, height, self.filter);
        let (w, h) = out.dimensions();
        Ok(PixelBuffer::from_raw(w, h, out.into_raw())?)
    }
}
