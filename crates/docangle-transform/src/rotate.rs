//! Rotation operations
//!
//! This module provides:
//! - The exact 90-degree transpose used by the skew search's landscape pass
//! - Arbitrary-angle rotation about the image centre, for gray and RGB
//!
//! # Rotation Methods
//!
//! - **Sampling**: nearest-neighbour, no new intensities are introduced.
//! - **Bilinear**: Q16 fixed-point bilinear interpolation. Best for output.
//!
//! # Angle convention
//!
//! Angles are in radians. With y pointing down, a positive angle turns the
//! content clockwise on screen: a horizontal source line ends up with
//! slope `tan(angle)`.

use crate::TransformResult;
use docangle_core::{PixelBuffer, RgbBuffer};
use tracing::debug;

/// Below this magnitude (radians) a rotation is a plain copy.
const MIN_ANGLE_TO_ROTATE: f64 = 1.0e-6;

const ONE_Q16: i64 = 1 << 16;

/// Rotation algorithm to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateMethod {
    /// Nearest-neighbour sampling - fastest, keeps edges hard
    Sampling,
    /// Bilinear interpolation
    #[default]
    Bilinear,
}

/// Background fill for pixels that map outside the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateFill {
    /// Fill with white (255)
    #[default]
    White,
    /// Fill with black (0)
    Black,
    /// Fill with a specific intensity
    Value(u8),
}

impl RotateFill {
    /// Intensity written for uncovered pixels.
    pub fn to_value(self) -> u8 {
        match self {
            RotateFill::White => 255,
            RotateFill::Black => 0,
            RotateFill::Value(v) => v,
        }
    }
}

/// Options for arbitrary-angle rotation
#[derive(Debug, Clone, Default)]
pub struct RotateOptions {
    /// Interpolation method
    pub method: RotateMethod,
    /// Background fill
    pub fill: RotateFill,
}

impl RotateOptions {
    /// Create options with a specific method
    pub fn with_method(method: RotateMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Set the background fill
    pub fn fill(mut self, fill: RotateFill) -> Self {
        self.fill = fill;
        self
    }
}

/// Rotate a buffer by 90 degrees as an exact transpose.
///
/// `dst[x * height + y] = src[y * width + x]`: width and height swap, no
/// interpolation takes place and the operation is lossless. Applying it
/// twice returns the original image.
///
/// Padded input is accepted; the output is always contiguous.
pub fn rotate_90(buf: &PixelBuffer) -> TransformResult<PixelBuffer> {
    let w = buf.width() as usize;
    let h = buf.height() as usize;
    let mut dst = vec![0u8; w * h];

    for y in 0..h {
        let row = buf.row(y as u32);
        for (x, &v) in row.iter().enumerate() {
            dst[x * h + y] = v;
        }
    }

    Ok(PixelBuffer::from_raw(h as u32, w as u32, dst)?)
}

/// Output canvas size for a rotation by `radians`.
///
/// Width and height swap when the absolute angle, modulo 180 degrees,
/// lies in (45, 135).
pub fn rotated_canvas(width: u32, height: u32, radians: f64) -> (u32, u32) {
    let degrees = radians.to_degrees().rem_euclid(180.0);
    if degrees > 45.0 && degrees < 135.0 {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate a gray buffer about its centre.
///
/// The output canvas follows [`rotated_canvas`]; uncovered pixels take the
/// fill value from `options`.
///
/// # Example
/// ```
/// use docangle_core::PixelBuffer;
/// use docangle_transform::{rotate, RotateOptions};
///
/// let pix = PixelBuffer::new_filled(100, 60, 255).unwrap();
/// let rotated = rotate(&pix, 2.0f64.to_radians(), &RotateOptions::default()).unwrap();
/// assert_eq!((rotated.width(), rotated.height()), (100, 60));
/// ```
pub fn rotate(
    buf: &PixelBuffer,
    radians: f64,
    options: &RotateOptions,
) -> TransformResult<PixelBuffer> {
    if radians.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(buf.to_contiguous());
    }
    let src = buf.to_contiguous();
    let (dw, dh) = rotated_canvas(src.width(), src.height(), radians);
    debug!(
        width = src.width(),
        height = src.height(),
        out_width = dw,
        out_height = dh,
        degrees = radians.to_degrees(),
        "rotating gray buffer"
    );
    let plane = Plane {
        data: src.data(),
        width: src.width() as usize,
        height: src.height() as usize,
        channels: 1,
    };
    let out = rotate_plane(&plane, dw as usize, dh as usize, radians, options);
    Ok(PixelBuffer::from_raw(dw, dh, out)?)
}

/// Rotate an RGB buffer about its centre.
///
/// Same geometry as [`rotate`]; the fill value is applied to all channels.
pub fn rotate_rgb(
    buf: &RgbBuffer,
    radians: f64,
    options: &RotateOptions,
) -> TransformResult<RgbBuffer> {
    if radians.abs() < MIN_ANGLE_TO_ROTATE {
        return Ok(buf.clone());
    }
    let (dw, dh) = rotated_canvas(buf.width(), buf.height(), radians);
    debug!(
        width = buf.width(),
        height = buf.height(),
        out_width = dw,
        out_height = dh,
        degrees = radians.to_degrees(),
        "rotating rgb buffer"
    );
    let plane = Plane {
        data: buf.data(),
        width: buf.width() as usize,
        height: buf.height() as usize,
        channels: 3,
    };
    let out = rotate_plane(&plane, dw as usize, dh as usize, radians, options);
    Ok(RgbBuffer::from_raw(dw, dh, out)?)
}

/// Interleaved, unpadded source samples.
struct Plane<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
}

fn rotate_plane(
    src: &Plane<'_>,
    dst_w: usize,
    dst_h: usize,
    radians: f64,
    options: &RotateOptions,
) -> Vec<u8> {
    let ch = src.channels;
    let fill = options.fill.to_value();
    let mut out = vec![fill; dst_w * dst_h * ch];

    let (sin_a, cos_a) = radians.sin_cos();
    let cx_src = (src.width as f64 - 1.0) / 2.0;
    let cy_src = (src.height as f64 - 1.0) / 2.0;
    let cx_dst = (dst_w as f64 - 1.0) / 2.0;
    let cy_dst = (dst_h as f64 - 1.0) / 2.0;

    for y in 0..dst_h {
        let y_rel = y as f64 - cy_dst;
        for x in 0..dst_w {
            let x_rel = x as f64 - cx_dst;
            // Inverse mapping: destination back to source
            let sx = x_rel * cos_a + y_rel * sin_a + cx_src;
            let sy = -x_rel * sin_a + y_rel * cos_a + cy_src;

            let dst = &mut out[(y * dst_w + x) * ch..(y * dst_w + x + 1) * ch];
            match options.method {
                RotateMethod::Sampling => sample_nearest(src, sx, sy, dst),
                RotateMethod::Bilinear => sample_bilinear(src, sx, sy, dst),
            }
        }
    }
    out
}

#[inline]
fn sample_nearest(src: &Plane<'_>, sx: f64, sy: f64, dst: &mut [u8]) {
    let xi = sx.round();
    let yi = sy.round();
    if xi < 0.0 || yi < 0.0 || xi >= src.width as f64 || yi >= src.height as f64 {
        return;
    }
    let i = (yi as usize * src.width + xi as usize) * src.channels;
    dst.copy_from_slice(&src.data[i..i + src.channels]);
}

/// Q16 bilinear sample; the 2x2 neighbourhood must lie inside the source.
#[inline]
fn sample_bilinear(src: &Plane<'_>, sx: f64, sy: f64, dst: &mut [u8]) {
    let x0 = sx.floor();
    let y0 = sy.floor();
    if x0 < 0.0 || y0 < 0.0 || x0 >= (src.width as f64 - 1.0) || y0 >= (src.height as f64 - 1.0)
    {
        return;
    }
    let xf = ((sx - x0) * ONE_Q16 as f64) as i64;
    let yf = ((sy - y0) * ONE_Q16 as f64) as i64;
    let w00 = ((ONE_Q16 - xf) * (ONE_Q16 - yf)) >> 16;
    let w10 = (xf * (ONE_Q16 - yf)) >> 16;
    let w01 = ((ONE_Q16 - xf) * yf) >> 16;
    let w11 = (xf * yf) >> 16;

    let ch = src.channels;
    let stride = src.width * ch;
    let p00 = y0 as usize * stride + x0 as usize * ch;
    let p10 = p00 + ch;
    let p01 = p00 + stride;
    let p11 = p01 + ch;
    for c in 0..ch {
        let v = i64::from(src.data[p00 + c]) * w00
            + i64::from(src.data[p10 + c]) * w10
            + i64::from(src.data[p01 + c]) * w01
            + i64::from(src.data[p11 + c]) * w11;
        dst[c] = ((v + 0x8000) >> 16).clamp(0, 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_2x3() -> PixelBuffer {
        // [1, 2]
        // [3, 4]
        // [5, 6]
        PixelBuffer::from_raw(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_rotate_90_transpose() {
        let rotated = rotate_90(&pattern_2x3()).unwrap();

        // Transpose: 3x2
        // [1, 3, 5]
        // [2, 4, 6]
        assert_eq!((rotated.width(), rotated.height()), (3, 2));
        assert_eq!(rotated.data(), &[1, 3, 5, 2, 4, 6]);
    }

    #[test]
    fn test_rotate_90_twice_is_identity() {
        let pix = pattern_2x3();
        let back = rotate_90(&rotate_90(&pix).unwrap()).unwrap();
        assert_eq!(back, pix);
    }

    #[test]
    fn test_rotate_90_padded_input() {
        let padded = PixelBuffer::from_raw_with_stride(2, 2, 3, vec![1, 2, 0, 3, 4, 0]).unwrap();
        let rotated = rotate_90(&padded).unwrap();
        assert!(rotated.is_contiguous());
        assert_eq!(rotated.data(), &[1, 3, 2, 4]);
    }

    #[test]
    fn test_rotated_canvas_swaps() {
        assert_eq!(rotated_canvas(100, 50, 10f64.to_radians()), (100, 50));
        assert_eq!(rotated_canvas(100, 50, 90f64.to_radians()), (50, 100));
        assert_eq!(rotated_canvas(100, 50, (-88.8f64).to_radians()), (50, 100));
        assert_eq!(rotated_canvas(100, 50, 134f64.to_radians()), (50, 100));
        assert_eq!(rotated_canvas(100, 50, 170f64.to_radians()), (100, 50));
    }

    #[test]
    fn test_rotate_zero_is_copy() {
        let pix = pattern_2x3();
        let out = rotate(&pix, 0.0, &RotateOptions::default()).unwrap();
        assert_eq!(out, pix);
    }

    #[test]
    fn test_rotate_uniform_interior_preserved() {
        let pix = PixelBuffer::new_filled(40, 40, 90).unwrap();
        let options = RotateOptions::default().fill(RotateFill::Black);
        let out = rotate(&pix, 3f64.to_radians(), &options).unwrap();
        // Centre stays the source value; the corner is uncovered
        assert_eq!(out.get_pixel(20, 20), Some(90));
        assert_eq!(out.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_rotate_positive_angle_turns_clockwise() {
        // Horizontal line through the centre row
        let mut pix = PixelBuffer::new_filled(101, 101, 255).unwrap();
        pix.fill_rect(0, 50, 101, 51, 0);
        let options = RotateOptions::with_method(RotateMethod::Sampling);
        let out = rotate(&pix, 10f64.to_radians(), &options).unwrap();
        // Right of centre the line moves down, left of centre it moves up
        let dy = (40.0 * 10f64.to_radians().tan()).round() as u32;
        assert_eq!(out.get_pixel(90, 50 + dy), Some(0));
        assert_eq!(out.get_pixel(10, 50 - dy), Some(0));
    }

    #[test]
    fn test_rotate_rgb_quarter_turn_canvas() {
        let rgb = RgbBuffer::new_filled(30, 10, [10, 20, 30]).unwrap();
        let out = rotate_rgb(&rgb, 90f64.to_radians(), &RotateOptions::default()).unwrap();
        assert_eq!((out.width(), out.height()), (10, 30));
        assert_eq!(out.get_rgb(5, 15), Some([10, 20, 30]));
    }
}
