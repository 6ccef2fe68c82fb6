//! Error types for rectiplane-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rectiplane_core::Error),

    /// The four correspondence points do not span a quadrilateral
    #[error("degenerate quadrilateral: {0}")]
    DegenerateQuadrilateral(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
