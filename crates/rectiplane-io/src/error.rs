//! I/O error types

use thiserror::Error;

/// Failure reading or writing a PNG or JPEG raster.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// Neither PNG nor JPEG, or a PNG layout this crate does not decode
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Truncated header or a buffer shorter than the declared raster
    #[error("malformed image data: {0}")]
    InvalidData(String),

    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error(transparent)]
    Core(#[from] rectiplane_core::Error),
}

pub type IoResult<T> = Result<T, IoError>;
