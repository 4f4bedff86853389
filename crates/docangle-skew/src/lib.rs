//! docangle-skew - Document skew estimation
//!
//! This crate estimates how far a scanned page is rotated from level:
//!
//! - Fixed-point line sampling with sub-pixel row blending ([`walk_line`])
//! - Transition-count line scoring ([`score_line`])
//! - Brute-force angle search with a row-transition validity gate and an
//!   optional transposed pass for landscape text ([`estimate_angle`])
//! - Skew correction ([`deskew`])
//!
//! # Example
//!
//! ```
//! use docangle_core::PixelBuffer;
//! use docangle_skew::{SearchOptions, estimate_angle};
//!
//! let page = PixelBuffer::new_filled(400, 300, 255).unwrap();
//! let options = SearchOptions::new().with_range(-2.0, 2.0).with_step(0.1);
//! let estimate = estimate_angle(&page, &options).unwrap();
//! if !estimate.is_confident() {
//!     println!("no text lines found");
//! }
//! ```

pub mod deskew;
mod error;
pub mod line;
pub mod options;
pub mod score;
pub mod search;
pub mod table;

pub use deskew::{MIN_DESKEW_ANGLE, deskew, find_skew_and_deskew};
pub use error::{SkewError, SkewResult};
pub use line::{GEOMETRY_SCALE, LineGeometry, LineStats, MAX_LINE_ANGLE, setup_line, walk_line};
pub use options::{CancelToken, SearchOptions};
pub use score::{count_transitions, score_line};
pub use search::{
    AngleEstimate, CandidateScore, EstimateReport, MAX_CANDIDATES, Orientation, PassLayout,
    PassReport, candidate_angles, candidate_count, estimate_angle, estimate_angle_with_report,
    estimate_angle_with_resizer, pass_layout,
};
pub use table::ScoreTable;
