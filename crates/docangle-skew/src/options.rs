//! Search configuration

use crate::line::MAX_LINE_ANGLE;
use crate::search::{MAX_CANDIDATES, candidate_count};
use crate::{SkewError, SkewResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Cooperative cancellation flag shared between an estimation and its owner.
///
/// Cloning yields a handle to the same flag. The engine polls it once per
/// sampled row.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every estimation holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for skew angle estimation
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// First candidate angle in degrees (default: -2.5)
    pub min_delta: f64,

    /// Last candidate angle in degrees, inclusive (default: 2.5)
    pub max_delta: f64,

    /// Spacing between candidate angles in degrees (default: 0.1)
    pub step: f64,

    /// Also search the transposed buffer for vertical text lines
    /// (default: true)
    pub include_90: bool,

    /// Downscale so that neither dimension exceeds this many pixels;
    /// 0 disables downscaling (default: 1000)
    pub max_resolution: u32,

    /// Blended intensity above which a sample counts as white (default: 200)
    pub white_threshold: u8,

    /// Row score above which a row counts as high when counting row
    /// transitions (default: 0.3)
    pub row_score_threshold: f64,

    /// Minimum number of row transitions for an angle to be eligible
    /// (default: 10)
    pub min_row_transitions: u32,

    /// Score rows on the rayon thread pool (default: true)
    pub parallel: bool,

    /// Abort the estimation once it has run this long (default: none)
    pub timeout: Option<Duration>,

    /// Abort the estimation when this token is cancelled (default: none)
    pub cancel: Option<CancelToken>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_delta: -2.5,
            max_delta: 2.5,
            step: 0.1,
            include_90: true,
            max_resolution: 1000,
            white_threshold: 200,
            row_score_threshold: 0.3,
            min_row_transitions: 10,
            parallel: true,
            timeout: None,
            cancel: None,
        }
    }
}

impl SearchOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate range in degrees
    pub fn with_range(mut self, min_delta: f64, max_delta: f64) -> Self {
        self.min_delta = min_delta;
        self.max_delta = max_delta;
        self
    }

    /// Set the candidate spacing in degrees
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Enable or disable the transposed pass
    pub fn with_include_90(mut self, include_90: bool) -> Self {
        self.include_90 = include_90;
        self
    }

    /// Set the downscale bound (0 disables)
    pub fn with_max_resolution(mut self, max_resolution: u32) -> Self {
        self.max_resolution = max_resolution;
        self
    }

    /// Set the white classification threshold
    pub fn with_white_threshold(mut self, threshold: u8) -> Self {
        self.white_threshold = threshold;
        self
    }

    /// Set the row score threshold used for row transitions
    pub fn with_row_score_threshold(mut self, threshold: f64) -> Self {
        self.row_score_threshold = threshold;
        self
    }

    /// Set the minimum row transitions for eligibility
    pub fn with_min_row_transitions(mut self, count: u32) -> Self {
        self.min_row_transitions = count;
        self
    }

    /// Enable or disable parallel row scoring
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set a timeout for one estimation
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validate options
    pub fn validate(&self) -> SkewResult<()> {
        if !self.min_delta.is_finite() || !self.max_delta.is_finite() {
            return Err(SkewError::InvalidParameter(
                "candidate range must be finite".to_string(),
            ));
        }
        if self.min_delta > self.max_delta {
            return Err(SkewError::InvalidParameter(format!(
                "min_delta ({}) must not exceed max_delta ({})",
                self.min_delta, self.max_delta
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SkewError::InvalidParameter(
                "step must be positive".to_string(),
            ));
        }
        if self.min_delta <= -MAX_LINE_ANGLE || self.max_delta >= MAX_LINE_ANGLE {
            return Err(SkewError::InvalidParameter(format!(
                "candidate range [{}, {}] must lie within (-45, 45) degrees",
                self.min_delta, self.max_delta
            )));
        }
        match candidate_count(self.min_delta, self.max_delta, self.step) {
            Some(n) if n <= MAX_CANDIDATES => {}
            _ => {
                return Err(SkewError::InvalidParameter(format!(
                    "step {} over [{}, {}] yields more than {} candidate angles",
                    self.step, self.min_delta, self.max_delta, MAX_CANDIDATES
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.row_score_threshold) {
            return Err(SkewError::InvalidParameter(
                "row_score_threshold must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
