//! Error types for rectiplane-conic

use thiserror::Error;

/// Errors that can occur during ellipse fitting
#[derive(Debug, Error)]
pub enum ConicError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rectiplane_core::Error),

    /// Wrong number of control points
    #[error("ellipse fit needs exactly {expected} points, got {got}")]
    PointCount { expected: usize, got: usize },

    /// The normal equations have no unique solution (e.g. collinear points)
    #[error("conic normal matrix is singular at column {column}")]
    SingularSystem { column: usize },

    /// The fitted conic is not a real, non-degenerate ellipse
    #[error("fitted conic is not an ellipse: {0}")]
    NotAnEllipse(String),
}

/// Result type for conic operations
pub type ConicResult<T> = Result<T, ConicError>;
