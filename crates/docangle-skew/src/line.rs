//! Fixed-point line sampler
//!
//! A candidate text direction is rasterized with integer error accumulation
//! (Bresenham), stepping one column at a time. At each column the pixel on
//! the rasterized row is blended with its vertical neighbour using a Q16.16
//! accumulator that tracks how far the ideal line sits between the two rows.
//! Without the blend, nearby angles produce the same integer staircase and
//! the search loses its sub-degree resolution.
//!
//! # Edge policy
//!
//! The sampler never clamps. A traversal started at `(x, y)` over `width`
//! columns reads rows `y - y_extent - 1 ..= y + y_extent + 1`; the caller
//! must keep that range inside the buffer. The search engine does so through
//! its vertical padding.

use crate::{SkewError, SkewResult};
use docangle_core::PixelBuffer;

/// Scale applied to `cos`/`sin` before rounding to integer line deltas.
pub const GEOMETRY_SCALE: f64 = 10000.0;

/// Largest line angle the sampler can walk, exclusive, in degrees.
pub const MAX_LINE_ANGLE: f64 = 45.0;

const ONE: i32 = 1 << 16;

/// Integer description of one candidate line direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineGeometry {
    dx: i32,
    dy: i32,
    step_y: i32,
    gradient: i32,
}

impl LineGeometry {
    /// Horizontal delta, `round(K * cos(angle))`.
    #[inline]
    pub fn dx(&self) -> i32 {
        self.dx
    }

    /// Absolute vertical delta, `|round(K * sin(angle))|`.
    #[inline]
    pub fn dy(&self) -> i32 {
        self.dy
    }

    /// Direction of a row step: +1 (down) or -1 (up).
    #[inline]
    pub fn step_y(&self) -> i32 {
        self.step_y
    }

    /// Signed slope in Q16.16.
    #[inline]
    pub fn gradient(&self) -> i32 {
        self.gradient
    }

    /// Maximum number of rows a traversal of `width` columns moves away
    /// from its start row.
    pub fn y_extent(&self, width: u32) -> u32 {
        let dx = i64::from(self.dx);
        let num = i64::from(width) * i64::from(self.dy);
        ((num + dx - 1) / dx) as u32
    }
}

/// Compute the line geometry for `angle_degrees`.
///
/// Positive angles descend to the right (image y grows downwards).
///
/// # Errors
///
/// Returns [`SkewError::AngleOutOfRange`] unless the angle lies strictly
/// inside (-45, 45) degrees and its rounded slope is below one.
pub fn setup_line(angle_degrees: f64) -> SkewResult<LineGeometry> {
    if !angle_degrees.is_finite() || angle_degrees.abs() >= MAX_LINE_ANGLE {
        return Err(SkewError::AngleOutOfRange(angle_degrees));
    }
    let radians = angle_degrees.to_radians();
    let dx = (GEOMETRY_SCALE * radians.cos()).round() as i32;
    let dy = (GEOMETRY_SCALE * radians.sin()).round() as i32;
    // dx > |dy| keeps the walk x-major: every iteration advances one column.
    if dy.abs() >= dx {
        return Err(SkewError::AngleOutOfRange(angle_degrees));
    }
    let gradient = ((i64::from(dy) << 16) / i64::from(dx)) as i32;
    Ok(LineGeometry {
        dx,
        dy: dy.abs(),
        step_y: if dy < 0 { -1 } else { 1 },
        gradient,
    })
}

/// Classification counts of one sampled line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Samples whose blended intensity exceeded the white threshold
    pub white: u32,
    /// Samples at or below the white threshold
    pub black: u32,
    /// Number of white/black flips between consecutive samples
    pub transitions: u32,
}

impl LineStats {
    /// Total number of samples taken.
    #[inline]
    pub fn samples(&self) -> u32 {
        self.white + self.black
    }
}

/// Walk one line of `width` columns starting at `(start_x, start_y)`.
///
/// `buf` must be contiguous and the traversal (including the adjacent-row
/// sample) must stay inside it; see the module docs.
///
/// # Panics
///
/// Panics if the traversal leaves the buffer storage.
pub fn walk_line(
    buf: &PixelBuffer,
    start_x: u32,
    start_y: u32,
    width: u32,
    geometry: &LineGeometry,
    white_threshold: u8,
) -> LineStats {
    debug_assert!(buf.is_contiguous());
    debug_assert!(start_x + width <= buf.width());

    let data = buf.data();
    let stride = buf.stride() as isize;
    let threshold = i32::from(white_threshold);
    let LineGeometry {
        dx,
        dy,
        step_y,
        gradient,
    } = *geometry;
    let row_step = step_y as isize * stride;

    let mut line = start_y as isize * stride;
    let mut err = dx - dy;
    let mut blend = 0i32;
    let mut stats = LineStats::default();
    let mut prev_white = None;

    for x in start_x as isize..(start_x + width) as isize {
        let va = i32::from(data[(line + x) as usize]);
        let neighbour = if blend < 0 { line - stride } else { line + stride };
        let vb = i32::from(data[(neighbour + x) as usize]);
        let blended = va + (((vb - va) * blend.abs()) >> 16);

        let white = blended > threshold;
        if white {
            stats.white += 1;
        } else {
            stats.black += 1;
        }
        if prev_white.is_some_and(|p| p != white) {
            stats.transitions += 1;
        }
        prev_white = Some(white);

        let e2 = 2 * err;
        err -= dy;
        if e2 < dx {
            err += dx;
            line += row_step;
            blend -= step_y * ONE;
        }
        blend += gradient;
    }
    stats
}
