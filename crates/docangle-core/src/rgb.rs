//! RGB rasters and luma conversion
//!
//! Decoded colour pages are kept as packed 24-bit RGB so that the
//! straightened output can be written in colour, while estimation runs on
//! the [`PixelBuffer`] produced by [`RgbBuffer::to_gray`].

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Fixed-point luma weights (sum = 1024): 0.299 R + 0.587 G + 0.114 B.
const LUMA_R: u32 = 306;
const LUMA_G: u32 = 601;
const LUMA_B: u32 = 117;

/// Packed 8-bit-per-channel RGB raster (3 bytes per pixel, no padding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Create a new buffer with every pixel set to `(r, g, b)`.
    pub fn new_filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        let data = rgb.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap packed RGB data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len() != width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(Error::InvalidDimension { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get the RGB triple at (x, y), or `None` when out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Set the RGB triple at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
        Ok(())
    }

    /// Convert to grayscale with fixed-point ITU-R 601 luma weights.
    pub fn to_gray(&self) -> PixelBuffer {
        let gray: Vec<u8> = self
            .data
            .chunks_exact(3)
            .map(|p| luma(p[0], p[1], p[2]))
            .collect();
        PixelBuffer::from_parts(self.width, self.height, gray)
    }
}

impl PixelBuffer {
    /// Expand to RGB by replicating the gray channel.
    pub fn to_rgb(&self) -> RgbBuffer {
        let mut data = Vec::with_capacity(self.width() as usize * self.height() as usize * 3);
        for y in 0..self.height() {
            for &v in self.row(y) {
                data.extend_from_slice(&[v, v, v]);
            }
        }
        RgbBuffer {
            width: self.width(),
            height: self.height(),
            data,
        }
    }
}

/// Luma of one RGB pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b)) >> 10) as u8
}
