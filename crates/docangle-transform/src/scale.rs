//! Image scaling operations
//!
//! Provides the resampling used to bound the skew engine's workload on
//! large scans:
//! - Sampling (nearest neighbour)
//! - Linear interpolation
//! - Area mapping (box averaging, anti-aliased when shrinking)
//!
//! The engine reaches resampling only through the [`Resizer`] trait, so an
//! application can plug in another implementation (for example one backed
//! by the `image` crate). Whatever the implementation, [`downscale`]
//! validates that the result has the requested size and unpadded rows.

use crate::{TransformError, TransformResult};
use docangle_core::PixelBuffer;
use std::borrow::Cow;
use tracing::debug;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbour sampling (fastest, aliased results)
    Sampling,
    /// Bilinear interpolation (good for upscaling)
    Linear,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
    /// Area mapping when shrinking, linear otherwise
    #[default]
    Auto,
}

/// Image resize primitive.
///
/// Implementations must return a buffer of exactly `width` x `height`
/// pixels with unpadded rows.
pub trait Resizer: Send + Sync {
    fn resize(&self, src: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer>;
}

impl Resizer for ScaleMethod {
    fn resize(&self, src: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer> {
        scale_to_size(src, width, height, *self)
    }
}

/// Scale an image to a specific size
///
/// # Arguments
/// * `buf` - Input image
/// * `width` - Target width (> 0)
/// * `height` - Target height (> 0)
/// * `method` - Scaling algorithm to use
pub fn scale_to_size(
    buf: &PixelBuffer,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "target size {width}x{height} is empty"
        )));
    }
    let method = match method {
        ScaleMethod::Auto if width < buf.width() || height < buf.height() => ScaleMethod::AreaMap,
        ScaleMethod::Auto => ScaleMethod::Linear,
        m => m,
    };
    let data = match method {
        ScaleMethod::Sampling => scale_sampling(buf, width, height),
        ScaleMethod::Linear => scale_linear(buf, width, height),
        ScaleMethod::AreaMap | ScaleMethod::Auto => scale_area_map(buf, width, height),
    };
    Ok(PixelBuffer::from_raw(width, height, data)?)
}

fn scale_sampling(buf: &PixelBuffer, width: u32, height: u32) -> Vec<u8> {
    let (sw, sh) = (buf.width() as u64, buf.height() as u64);
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as u64 {
        let sy = ((2 * y + 1) * sh / (2 * height as u64)).min(sh - 1);
        let row = buf.row(sy as u32);
        for x in 0..width as u64 {
            let sx = ((2 * x + 1) * sw / (2 * width as u64)).min(sw - 1);
            out.push(row[sx as usize]);
        }
    }
    out
}

fn scale_linear(buf: &PixelBuffer, width: u32, height: u32) -> Vec<u8> {
    let sx_ratio = buf.width() as f64 / width as f64;
    let sy_ratio = buf.height() as f64 / height as f64;
    let max_x = (buf.width() - 1) as f64;
    let max_y = (buf.height() - 1) as f64;
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let fy = ((y as f64 + 0.5) * sy_ratio - 0.5).clamp(0.0, max_y);
        let y0 = fy.floor() as u32;
        let y1 = (y0 + 1).min(buf.height() - 1);
        let wy = fy - y0 as f64;
        let (r0, r1) = (buf.row(y0), buf.row(y1));
        for x in 0..width {
            let fx = ((x as f64 + 0.5) * sx_ratio - 0.5).clamp(0.0, max_x);
            let x0 = fx.floor() as usize;
            let x1 = (x0 + 1).min(buf.width() as usize - 1);
            let wx = fx - x0 as f64;
            let top = r0[x0] as f64 * (1.0 - wx) + r0[x1] as f64 * wx;
            let bottom = r1[x0] as f64 * (1.0 - wx) + r1[x1] as f64 * wx;
            out.push((top * (1.0 - wy) + bottom * wy).round() as u8);
        }
    }
    out
}

fn scale_area_map(buf: &PixelBuffer, width: u32, height: u32) -> Vec<u8> {
    let (sw, sh) = (buf.width() as u64, buf.height() as u64);
    let span = |i: u64, n: u64, src: u64| {
        let start = i * src / n;
        let end = ((i + 1) * src / n).max(start + 1).min(src);
        (start, end)
    };
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as u64 {
        let (y0, y1) = span(y, height as u64, sh);
        for x in 0..width as u64 {
            let (x0, x1) = span(x, width as u64, sw);
            let mut sum = 0u64;
            for yy in y0..y1 {
                let row = buf.row(yy as u32);
                sum += row[x0 as usize..x1 as usize]
                    .iter()
                    .map(|&v| u64::from(v))
                    .sum::<u64>();
            }
            let count = (y1 - y0) * (x1 - x0);
            out.push(((sum + count / 2) / count) as u8);
        }
    }
    out
}

/// Uniform scale factor that fits `width` x `height` within `max_dim`.
///
/// Returns 1.0 when `max_dim` is 0 or both dimensions already fit.
pub fn downscale_factor(width: u32, height: u32, max_dim: u32) -> f64 {
    if max_dim == 0 || (width <= max_dim && height <= max_dim) {
        return 1.0;
    }
    let fx = max_dim as f64 / width as f64;
    let fy = max_dim as f64 / height as f64;
    fx.min(fy).min(1.0)
}

/// Shrink a buffer isotropically so that neither dimension exceeds `max_dim`.
///
/// Buffers that already fit are returned borrowed. Otherwise the resize is
/// delegated to `resizer` and its output is checked: the size must match the
/// request and rows must be unpadded.
///
/// # Errors
///
/// - [`TransformError::ResizeOutput`] if the resizer returned the wrong size
/// - [`TransformError::PaddedOutput`] if the resizer returned padded rows
pub fn downscale<'a>(
    buf: &'a PixelBuffer,
    max_dim: u32,
    resizer: &dyn Resizer,
) -> TransformResult<Cow<'a, PixelBuffer>> {
    let factor = downscale_factor(buf.width(), buf.height(), max_dim);
    if factor >= 1.0 {
        return Ok(Cow::Borrowed(buf));
    }
    let width = ((buf.width() as f64 * factor).round() as u32).clamp(1, max_dim);
    let height = ((buf.height() as f64 * factor).round() as u32).clamp(1, max_dim);
    debug!(
        width = buf.width(),
        height = buf.height(),
        new_width = width,
        new_height = height,
        factor,
        "downscaling before skew search"
    );

    let out = resizer.resize(buf, width, height)?;
    if (out.width(), out.height()) != (width, height) {
        return Err(TransformError::ResizeOutput {
            expected: (width, height),
            actual: (out.width(), out.height()),
        });
    }
    if !out.is_contiguous() {
        return Err(TransformError::PaddedOutput {
            width: out.width(),
            stride: out.stride(),
        });
    }
    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PaddingResizer;

    impl Resizer for PaddingResizer {
        fn resize(&self, _src: &PixelBuffer, w: u32, h: u32) -> TransformResult<PixelBuffer> {
            let stride = w + 4;
            Ok(PixelBuffer::from_raw_with_stride(
                w,
                h,
                stride,
                vec![0; (stride * h) as usize],
            )?)
        }
    }

    struct WrongSizeResizer;

    impl Resizer for WrongSizeResizer {
        fn resize(&self, _src: &PixelBuffer, w: u32, h: u32) -> TransformResult<PixelBuffer> {
            Ok(PixelBuffer::new(w + 1, h)?)
        }
    }

    #[test]
    fn test_downscale_factor() {
        assert_eq!(downscale_factor(800, 600, 1000), 1.0);
        assert_eq!(downscale_factor(4000, 3000, 0), 1.0);
        assert!((downscale_factor(2000, 1000, 1000) - 0.5).abs() < 1e-12);
        assert!((downscale_factor(1000, 4000, 1000) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_downscale_keeps_small_buffer_borrowed() {
        let buf = PixelBuffer::new_filled(100, 80, 255).unwrap();
        let out = downscale(&buf, 1000, &ScaleMethod::Auto).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_downscale_preserves_aspect() {
        let buf = PixelBuffer::new_filled(3000, 1500, 255).unwrap();
        let out = downscale(&buf, 1000, &ScaleMethod::Auto).unwrap();
        assert_eq!((out.width(), out.height()), (1000, 500));
        assert!(out.is_contiguous());
    }

    #[test]
    fn test_downscale_rejects_padded_output() {
        let buf = PixelBuffer::new(200, 100).unwrap();
        let err = downscale(&buf, 50, &PaddingResizer).unwrap_err();
        assert!(matches!(err, TransformError::PaddedOutput { width: 50, stride: 54 }));
    }

    #[test]
    fn test_downscale_rejects_wrong_size() {
        let buf = PixelBuffer::new(200, 100).unwrap();
        let err = downscale(&buf, 50, &WrongSizeResizer).unwrap_err();
        assert!(matches!(err, TransformError::ResizeOutput { .. }));
    }

    #[test]
    fn test_area_map_averages() {
        // 4x2 -> 2x1: each output pixel averages a 2x2 block
        let buf = PixelBuffer::from_raw(4, 2, vec![0, 100, 200, 200, 100, 200, 0, 0]).unwrap();
        let out = scale_to_size(&buf, 2, 1, ScaleMethod::AreaMap).unwrap();
        assert_eq!(out.data(), &[100, 100]);
    }

    #[test]
    fn test_sampling_picks_block_centres() {
        let buf = PixelBuffer::from_raw(4, 1, vec![1, 2, 3, 4]).unwrap();
        let out = scale_to_size(&buf, 2, 1, ScaleMethod::Sampling).unwrap();
        assert_eq!(out.data(), &[2, 4]);
    }

    #[test]
    fn test_linear_upscale_uniform() {
        let buf = PixelBuffer::new_filled(3, 3, 77).unwrap();
        let out = scale_to_size(&buf, 7, 5, ScaleMethod::Linear).unwrap();
        assert!(out.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_empty_target_rejected() {
        let buf = PixelBuffer::new(3, 3).unwrap();
        assert!(scale_to_size(&buf, 0, 3, ScaleMethod::Linear).is_err());
    }
}
