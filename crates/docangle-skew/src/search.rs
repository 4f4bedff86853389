//! Brute-force angle search
//!
//! # Algorithm Overview
//!
//! 1. **Downscale**: buffers larger than `max_resolution` are shrunk
//!    isotropically; skew is scale invariant.
//!
//! 2. **Sweep**: every sampled row between the vertical paddings walks one
//!    line per candidate angle, starting at the horizontal padding. Each
//!    line is scored by its number of white/black transitions.
//!
//! 3. **Gate**: a candidate is eligible only if its row score sequence
//!    crosses `row_score_threshold` at least `min_row_transitions` times.
//!    Mostly blank bands score high at every angle and fail the gate.
//!
//! 4. **Select**: the eligible candidate with the highest total wins; its
//!    total divided by the number of sampled rows is the confidence.
//!
//! 5. **Transposed pass**: with `include_90` the sweep is repeated on the
//!    transposed buffer. If it scores higher, text runs vertically and the
//!    reported angle is `-90 - angle`.
//!
//! No candidate passing the gate is not an error: the estimate is
//! `score = 0, degrees = 0`.

use crate::line::{LineGeometry, setup_line, walk_line};
use crate::options::{CancelToken, SearchOptions};
use crate::score::score_line;
use crate::table::ScoreTable;
use crate::{SkewError, SkewResult};
use docangle_core::PixelBuffer;
use docangle_transform::{Resizer, ScaleMethod, downscale, downscale_factor, rotate_90};
use rayon::prelude::*;
use std::ops::Range;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Result of skew estimation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleEstimate {
    /// Confidence in `[0, 1]`; 0 means no candidate passed the gate
    pub score: f64,

    /// Skew in degrees. Positive means the content is rotated clockwise
    /// and must be rotated by `-degrees` to straighten it.
    pub degrees: f64,
}

impl AngleEstimate {
    /// Whether any candidate passed the validity gate.
    pub fn is_confident(&self) -> bool {
        self.score > 0.0
    }
}

/// Which buffer orientation produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The buffer as given
    Native,
    /// The 90-degree transpose of the buffer
    Transposed,
}

/// Diagnostics for one candidate angle
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub degrees: f64,
    /// Sum of the row scores
    pub total: f64,
    /// Total divided by the number of sampled rows
    pub normalized: f64,
    pub row_transitions: u32,
    pub eligible: bool,
}

/// Outcome of one orientation pass
#[derive(Debug, Clone)]
pub struct PassReport {
    pub orientation: Orientation,
    /// Dimensions of the searched buffer
    pub width: u32,
    pub height: u32,
    pub pad_x: u32,
    pub pad_y: u32,
    pub rows_sampled: u32,
    /// Best eligible candidate, in this pass's own coordinates
    pub best: AngleEstimate,
    pub candidates: Vec<CandidateScore>,
}

/// Full outcome of an estimation
#[derive(Debug, Clone)]
pub struct EstimateReport {
    /// Final estimate, in the input buffer's coordinates
    pub estimate: AngleEstimate,
    /// Pass the estimate came from
    pub orientation: Orientation,
    /// Downscale factor applied before searching (1.0 if none)
    pub scale: f64,
    pub native: PassReport,
    /// Present when `include_90` was set
    pub transposed: Option<PassReport>,
}

/// Sampling window of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassLayout {
    /// First sampled column
    pub pad_x: u32,
    /// Top and bottom margin, at least one row beyond the steepest drift
    pub pad_y: u32,
    /// Columns walked per line
    pub line_width: u32,
    /// Sampled start rows
    pub rows: Range<u32>,
}

/// Compute the sampling window for a `width` x `height` buffer.
///
/// `pad_x = width / 10` and `pad_y = max(height / 10, drift + 1)`, where
/// `drift` is the largest vertical extent of any candidate line. The extra
/// row covers the adjacent-row blend sample, so no traversal leaves the
/// buffer. Buffers too short for the margins sample no rows.
pub fn pass_layout(width: u32, height: u32, geometries: &[LineGeometry]) -> PassLayout {
    let pad_x = width / 10;
    let line_width = width - 2 * pad_x;
    let drift = geometries
        .iter()
        .map(|g| g.y_extent(line_width))
        .max()
        .unwrap_or(0);
    let pad_y = (height / 10).max(drift + 1);
    let rows = if height > 2 * pad_y {
        pad_y..height - pad_y
    } else {
        pad_y..pad_y
    };
    PassLayout {
        pad_x,
        pad_y,
        line_width,
        rows,
    }
}

/// Largest candidate set a search accepts.
pub const MAX_CANDIDATES: usize = 100_000;

/// Number of candidates from `min` to `max` inclusive, `step` apart.
///
/// Returns `None` for an empty or non-finite range, a non-positive step,
/// or a count that does not fit in `usize`.
pub fn candidate_count(min: f64, max: f64, step: f64) -> Option<usize> {
    if !min.is_finite() || !max.is_finite() || min > max || !step.is_finite() || step <= 0.0 {
        return None;
    }
    let steps = ((max - min) / step + 1e-9).floor();
    if !steps.is_finite() || steps >= usize::MAX as f64 {
        return None;
    }
    (steps as usize).checked_add(1)
}

/// Candidate angles from `min` to `max` inclusive, `step` apart.
///
/// Angles are computed as `min + i * step` so that rounding does not
/// accumulate across the range. Ranges that [`candidate_count`] rejects,
/// or that exceed [`MAX_CANDIDATES`], yield no candidates.
pub fn candidate_angles(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = match candidate_count(min, max, step) {
        Some(n) if n <= MAX_CANDIDATES => n,
        _ => return Vec::new(),
    };
    (0..count)
        .map(|i| (min + i as f64 * step).min(max))
        .collect()
}

/// Estimate the skew angle of a contiguous gray buffer.
///
/// # Errors
///
/// - [`SkewError::InvalidParameter`] if `options` fail validation
/// - [`SkewError::NonContiguousBuffer`] if the buffer has padded rows
/// - [`SkewError::Cancelled`] / [`SkewError::DeadlineExceeded`] when
///   interrupted
///
/// # Example
/// ```
/// use docangle_core::PixelBuffer;
/// use docangle_skew::{SearchOptions, estimate_angle};
///
/// let blank = PixelBuffer::new_filled(200, 200, 255).unwrap();
/// let estimate = estimate_angle(&blank, &SearchOptions::default()).unwrap();
/// assert_eq!(estimate.score, 0.0);
/// assert_eq!(estimate.degrees, 0.0);
/// ```
pub fn estimate_angle(buf: &PixelBuffer, options: &SearchOptions) -> SkewResult<AngleEstimate> {
    Ok(estimate_angle_with_report(buf, options)?.estimate)
}

/// Estimate the skew angle and return per-candidate diagnostics.
pub fn estimate_angle_with_report(
    buf: &PixelBuffer,
    options: &SearchOptions,
) -> SkewResult<EstimateReport> {
    estimate_angle_with_resizer(buf, options, &ScaleMethod::Auto)
}

/// Estimate the skew angle, downscaling through `resizer`.
///
/// The resizer's output is validated: a wrongly sized or padded result is
/// rejected instead of being sampled.
pub fn estimate_angle_with_resizer(
    buf: &PixelBuffer,
    options: &SearchOptions,
    resizer: &dyn Resizer,
) -> SkewResult<EstimateReport> {
    options.validate()?;
    ensure_contiguous(buf)?;
    let budget = Budget::start(options);

    let scale = downscale_factor(buf.width(), buf.height(), options.max_resolution);
    let scaled = downscale(buf, options.max_resolution, resizer)?;
    ensure_contiguous(&scaled)?;

    let candidates = candidate_angles(options.min_delta, options.max_delta, options.step);
    let geometries = candidates
        .iter()
        .map(|&angle| setup_line(angle))
        .collect::<SkewResult<Vec<_>>>()?;

    let search = Search {
        candidates: &candidates,
        geometries: &geometries,
        options,
        budget: &budget,
    };
    let native_pass = || search.run(&scaled, Orientation::Native);
    let transposed_pass = || -> SkewResult<Option<PassReport>> {
        if !options.include_90 {
            return Ok(None);
        }
        let transposed = rotate_90(&scaled)?;
        search.run(&transposed, Orientation::Transposed).map(Some)
    };
    let (native, transposed) = if options.parallel && options.include_90 {
        rayon::join(native_pass, transposed_pass)
    } else {
        (native_pass(), transposed_pass())
    };
    let native = native?;
    let transposed = transposed?;

    let (estimate, orientation) = match &transposed {
        Some(t) if t.best.score > native.best.score => (
            AngleEstimate {
                score: t.best.score,
                degrees: -90.0 - t.best.degrees,
            },
            Orientation::Transposed,
        ),
        _ => (native.best, Orientation::Native),
    };
    debug!(
        degrees = estimate.degrees,
        score = estimate.score,
        ?orientation,
        elapsed_ms = budget.elapsed().as_millis() as u64,
        "skew estimate"
    );

    Ok(EstimateReport {
        estimate,
        orientation,
        scale,
        native,
        transposed,
    })
}

fn ensure_contiguous(buf: &PixelBuffer) -> SkewResult<()> {
    if !buf.is_contiguous() {
        return Err(SkewError::NonContiguousBuffer {
            width: buf.width(),
            stride: buf.stride(),
        });
    }
    Ok(())
}

/// Deadline and cancellation state of one estimation.
struct Budget<'a> {
    started: Instant,
    timeout: Option<Duration>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> Budget<'a> {
    fn start(options: &'a SearchOptions) -> Self {
        Self {
            started: Instant::now(),
            timeout: options.timeout,
            cancel: options.cancel.as_ref(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn check(&self) -> SkewResult<()> {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(SkewError::Cancelled);
        }
        if let Some(timeout) = self.timeout {
            let elapsed = self.elapsed();
            if elapsed > timeout {
                return Err(SkewError::DeadlineExceeded { elapsed });
            }
        }
        Ok(())
    }
}

/// Candidate set shared by both orientation passes.
struct Search<'a> {
    candidates: &'a [f64],
    geometries: &'a [LineGeometry],
    options: &'a SearchOptions,
    budget: &'a Budget<'a>,
}

impl Search<'_> {
    fn run(&self, buf: &PixelBuffer, orientation: Orientation) -> SkewResult<PassReport> {
        let layout = pass_layout(buf.width(), buf.height(), self.geometries);
        let threshold = self.options.white_threshold;

        let score_row = |y: u32| -> SkewResult<Vec<f64>> {
            self.budget.check()?;
            Ok(self
                .geometries
                .iter()
                .map(|g| {
                    let stats = walk_line(buf, layout.pad_x, y, layout.line_width, g, threshold);
                    score_line(&stats)
                })
                .collect())
        };
        let rows: Vec<Vec<f64>> = if self.options.parallel {
            layout
                .rows
                .clone()
                .into_par_iter()
                .map(score_row)
                .collect::<SkewResult<_>>()?
        } else {
            layout
                .rows
                .clone()
                .map(score_row)
                .collect::<SkewResult<_>>()?
        };

        let table = ScoreTable::from_rows(self.geometries.len(), &rows);
        let rows_sampled = table.rows() as u32;
        let mut best = AngleEstimate::default();
        let mut best_total = 0.0;
        let candidates: Vec<CandidateScore> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(i, &degrees)| {
                let total = table.total(i);
                let row_transitions = table.row_transitions(i, self.options.row_score_threshold);
                let eligible = row_transitions >= self.options.min_row_transitions;
                let normalized = if rows_sampled > 0 {
                    total / f64::from(rows_sampled)
                } else {
                    0.0
                };
                trace!(
                    ?orientation,
                    degrees,
                    total,
                    row_transitions,
                    eligible,
                    "candidate"
                );
                if eligible && total > best_total {
                    best_total = total;
                    best = AngleEstimate {
                        score: normalized,
                        degrees,
                    };
                }
                CandidateScore {
                    degrees,
                    total,
                    normalized,
                    row_transitions,
                    eligible,
                }
            })
            .collect();

        debug!(
            ?orientation,
            width = buf.width(),
            height = buf.height(),
            rows = rows_sampled,
            candidates = candidates.len(),
            best_degrees = best.degrees,
            best_score = best.score,
            "search pass complete"
        );

        Ok(PassReport {
            orientation,
            width: buf.width(),
            height: buf.height(),
            pad_x: layout.pad_x,
            pad_y: layout.pad_y,
            rows_sampled,
            best,
            candidates,
        })
    }
}
