//! Error types for docangle-skew

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during skew estimation
#[derive(Debug, Error)]
pub enum SkewError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] docangle_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] docangle_transform::TransformError),

    /// Line geometry requested outside the open interval (-45, 45) degrees
    #[error("line angle out of range: {0} degrees (must be within (-45, 45))")]
    AngleOutOfRange(f64),

    /// Buffer rows are padded; the sampler needs `stride == width`
    #[error("buffer is not contiguous: width {width}, stride {stride}")]
    NonContiguousBuffer { width: u32, stride: u32 },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Estimation cancelled through its cancel token
    #[error("skew estimation cancelled")]
    Cancelled,

    /// Estimation ran past its configured timeout
    #[error("skew estimation exceeded its deadline after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },
}

/// Result type for skew operations
pub type SkewResult<T> = Result<T, SkewError>;
