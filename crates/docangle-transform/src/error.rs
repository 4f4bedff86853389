//! Error types for docangle-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] docangle_core::Error),

    /// Invalid scale factor or target size
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A resizer returned an image of the wrong size
    #[error(
        "resize produced {}x{}, expected {}x{}",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    ResizeOutput {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A resizer returned a padded (non-contiguous) buffer
    #[error("resize produced a padded buffer: width {width}, stride {stride}")]
    PaddedOutput { width: u32, stride: u32 },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
