//! Skew correction

use crate::search::{AngleEstimate, estimate_angle};
use crate::{SearchOptions, SkewResult};
use docangle_core::PixelBuffer;
use docangle_transform::{RotateOptions, rotate};

/// Smallest correction, in degrees, that [`find_skew_and_deskew`] applies.
pub const MIN_DESKEW_ANGLE: f64 = 0.1;

/// Rotate `buf` so that the estimated skew is removed.
///
/// The buffer is rotated by `-estimate.degrees` with bilinear interpolation
/// and white fill. Estimates without confidence, or smaller than
/// `min_angle` in magnitude, return an unmodified copy.
pub fn deskew(buf: &PixelBuffer, estimate: &AngleEstimate, min_angle: f64) -> SkewResult<PixelBuffer> {
    if !estimate.is_confident() || estimate.degrees.abs() < min_angle {
        return Ok(buf.to_contiguous());
    }
    let rotated = rotate(buf, (-estimate.degrees).to_radians(), &RotateOptions::default())?;
    Ok(rotated)
}

/// Estimate the skew of `buf` and correct it.
///
/// # Returns
/// Tuple of (deskewed image, estimate)
pub fn find_skew_and_deskew(
    buf: &PixelBuffer,
    options: &SearchOptions,
) -> SkewResult<(PixelBuffer, AngleEstimate)> {
    let estimate = estimate_angle(buf, options)?;
    let deskewed = deskew(buf, &estimate, MIN_DESKEW_ANGLE)?;
    Ok((deskewed, estimate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deskew_without_confidence_is_copy() {
        let buf = PixelBuffer::new_filled(40, 30, 128).unwrap();
        let estimate = AngleEstimate {
            score: 0.0,
            degrees: 2.0,
        };
        assert_eq!(deskew(&buf, &estimate, 0.1).unwrap(), buf);
    }

    #[test]
    fn test_deskew_below_min_angle_is_copy() {
        let mut buf = PixelBuffer::new_filled(40, 30, 255).unwrap();
        buf.fill_rect(10, 10, 30, 12, 0);
        let estimate = AngleEstimate {
            score: 0.5,
            degrees: 0.05,
        };
        assert_eq!(deskew(&buf, &estimate, 0.1).unwrap(), buf);
    }

    #[test]
    fn test_deskew_rotates_confident_estimate() {
        let mut buf = PixelBuffer::new_filled(60, 40, 255).unwrap();
        buf.fill_rect(5, 19, 55, 21, 0);
        let estimate = AngleEstimate {
            score: 0.5,
            degrees: 3.0,
        };
        let out = deskew(&buf, &estimate, 0.1).unwrap();
        assert_eq!((out.width(), out.height()), (60, 40));
        assert_ne!(out, buf);
    }
}
