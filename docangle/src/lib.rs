//! docangle - Skew estimation for scanned documents
//!
//! # Overview
//!
//! docangle measures how far a scanned page is rotated from level and
//! straightens it:
//!
//! - Image I/O (decode any `image`-supported format, write PNG and JPEG)
//! - Gray conversion, downscaling and rotation
//! - Skew estimation by fixed-point line sampling and brute-force search,
//!   including pages whose text runs vertically
//!
//! # Example
//!
//! ```
//! use docangle::{RgbBuffer, straighten};
//! use docangle::skew::SearchOptions;
//!
//! let page = RgbBuffer::new_filled(300, 200, [255, 255, 255]).unwrap();
//! let result = straighten(&page, &SearchOptions::default()).unwrap();
//! // A blank page yields no confident estimate and is left as is
//! assert_eq!(result.correction, 0.0);
//! assert_eq!(result.image, page);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use docangle_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use docangle_io as io;
pub use docangle_skew as skew;
pub use docangle_transform as transform;

use docangle_io::ImageResizer;
use docangle_skew::{AngleEstimate, SearchOptions, SkewResult, estimate_angle_with_resizer};
use docangle_transform::{RotateOptions, rotate_rgb};
use tracing::debug;

/// A straightened page
#[derive(Debug, Clone)]
pub struct Straightened {
    /// The rotated page
    pub image: RgbBuffer,
    /// Estimate the correction was derived from
    pub estimate: AngleEstimate,
    /// Rotation applied, in degrees (the negated skew)
    pub correction: f64,
}

/// Estimate the skew of a colour page and rotate it level.
///
/// The estimate runs on the luma of `page`, downscaled with the `image`
/// crate's triangle filter when it exceeds `options.max_resolution`. The
/// correction is applied to the colour original with bilinear
/// interpolation and white fill. A page without a confident estimate is
/// returned unrotated.
pub fn straighten(page: &RgbBuffer, options: &SearchOptions) -> SkewResult<Straightened> {
    let gray = page.to_gray();
    let report = estimate_angle_with_resizer(&gray, options, &ImageResizer::default())?;
    let estimate = report.estimate;
    let correction = if estimate.is_confident() && estimate.degrees != 0.0 {
        -estimate.degrees
    } else {
        0.0
    };
    debug!(
        skew = estimate.degrees,
        score = estimate.score,
        correction,
        "straightening page"
    );
    let image = rotate_rgb(page, correction.to_radians(), &RotateOptions::default())?;
    Ok(Straightened {
        image,
        estimate,
        correction,
    })
}
