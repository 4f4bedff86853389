//! PixelBuffer - 8-bit grayscale raster
//!
//! `PixelBuffer` is the image type every estimation stage operates on.
//!
//! # Pixel layout
//!
//! - One byte per pixel, 0 = black, 255 = white
//! - Rows are stored top to bottom, `stride` bytes apart
//! - A buffer is *contiguous* when `stride == width`; the skew engine only
//!   accepts contiguous buffers, see [`PixelBuffer::is_contiguous`]
//!
//! # Ownership model
//!
//! A buffer owns its pixel data outright. Estimation borrows it immutably
//! for the whole call; transforms always allocate a new buffer.

use crate::error::{Error, Result};

/// 8-bit grayscale raster with explicit width, height and stride.
///
/// # Examples
///
/// ```
/// use docangle_core::PixelBuffer;
///
/// let buf = PixelBuffer::new_filled(640, 480, 255).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.height(), 480);
/// assert!(buf.is_contiguous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer with every pixel set to 0 (black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the pixel count does not fit in memory addressing.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new buffer with every pixel set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u8) -> Result<Self> {
        let len = Self::checked_len(width, height, width)?;
        Ok(Self {
            width,
            height,
            stride: width,
            data: vec![value; len],
        })
    }

    /// Wrap unpadded row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_raw_with_stride(width, height, width, data)
    }

    /// Wrap row-major pixel data whose rows are `stride` bytes apart.
    ///
    /// Padded buffers are accepted here so that decoder output can be
    /// wrapped without copying; call [`PixelBuffer::to_contiguous`] before
    /// handing such a buffer to the skew engine.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride < width`
    /// - [`Error::DataLength`] if `data.len() != stride * height`
    pub fn from_raw_with_stride(width: u32, height: u32, stride: u32, data: Vec<u8>) -> Result<Self> {
        if stride < width {
            return Err(Error::InvalidStride { width, stride });
        }
        let expected = Self::checked_len(width, height, stride)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Wrap data already known to hold `width * height` bytes.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            stride: width,
            data,
        }
    }

    fn checked_len(width: u32, height: u32, stride: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (stride as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the distance between the starts of two rows, in bytes.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Check whether rows are packed without padding (`stride == width`).
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width
    }

    /// Raw pixel storage, including any row padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel storage, including any row padding.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its storage.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get one row of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Get one mutable row of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride as usize;
        &mut self.data[start..start + self.width as usize]
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without coordinate validation.
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the storage.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.stride as usize + x as usize]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without coordinate validation.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        self.data[y as usize * self.stride as usize + x as usize] = val;
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Fill the rectangle `[x0, x1) x [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            self.row_mut(y)[x0 as usize..x1 as usize].fill(value);
        }
    }

    /// Return an unpadded copy of this buffer.
    ///
    /// Contiguous buffers are cloned as-is.
    pub fn to_contiguous(&self) -> PixelBuffer {
        if self.is_contiguous() {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            stride: self.width,
            data,
        }
    }

    /// Compare pixel content, ignoring row padding.
    pub fn equals(&self, other: &PixelBuffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && (0..self.height).all(|y| self.row(y) == other.row(y))
    }

    /// Mean intensity over all pixels.
    pub fn mean(&self) -> f64 {
        let total: u64 = (0..self.height)
            .map(|y| self.row(y).iter().map(|&v| u64::from(v)).sum::<u64>())
            .sum();
        total as f64 / (self.width as f64 * self.height as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filled() {
        let buf = PixelBuffer::new_filled(4, 3, 200).unwrap();
        assert_eq!((buf.width(), buf.height(), buf.stride()), (4, 3, 4));
        assert!(buf.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 10),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(PixelBuffer::new(10, 0).is_err());
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(4, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataLength {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_stride_smaller_than_width() {
        let err = PixelBuffer::from_raw_with_stride(8, 2, 6, vec![0; 12]).unwrap_err();
        assert!(matches!(err, Error::InvalidStride { width: 8, stride: 6 }));
    }

    #[test]
    fn test_padded_rows() {
        // 3x2 image, stride 4, padding bytes = 99
        let data = vec![1, 2, 3, 99, 4, 5, 6, 99];
        let buf = PixelBuffer::from_raw_with_stride(3, 2, 4, data).unwrap();
        assert!(!buf.is_contiguous());
        assert_eq!(buf.row(1), &[4, 5, 6]);
        assert_eq!(buf.get_pixel(2, 1), Some(6));

        let packed = buf.to_contiguous();
        assert!(packed.is_contiguous());
        assert_eq!(packed.data(), &[1, 2, 3, 4, 5, 6]);
        assert!(packed.equals(&buf));
    }

    #[test]
    fn test_get_set_pixel_bounds() {
        let mut buf = PixelBuffer::new(5, 5).unwrap();
        buf.set_pixel(4, 4, 77).unwrap();
        assert_eq!(buf.get_pixel(4, 4), Some(77));
        assert_eq!(buf.get_pixel(5, 0), None);
        assert!(buf.set_pixel(0, 5, 1).is_err());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = PixelBuffer::new_filled(6, 4, 255).unwrap();
        buf.fill_rect(4, 2, 100, 100, 0);
        assert_eq!(buf.row(3), &[255, 255, 255, 255, 0, 0]);
        assert_eq!(buf.row(1), &[255; 6]);
    }

    #[test]
    fn test_mean() {
        let mut buf = PixelBuffer::new_filled(2, 2, 0).unwrap();
        buf.set_pixel_unchecked(0, 0, 200);
        assert!((buf.mean() - 50.0).abs() < 1e-9);
    }
}
