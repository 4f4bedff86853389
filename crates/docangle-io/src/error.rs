//! I/O error types
//!
//! Each codec maps its library errors into `IoError` so that callers only
//! handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A decoder returned an error
    #[error("decode error: {0}")]
    Decode(String),

    /// An encoder returned an error
    #[error("encode error: {0}")]
    Encode(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] docangle_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
