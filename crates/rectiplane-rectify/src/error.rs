//! Error types for rectiplane-rectify

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while deriving corners or rectifying
///
/// None of these are fatal to a [`crate::Session`]: a failed frame leaves
/// the previous output in place and is retried on the next edit.
#[derive(Debug, Error)]
pub enum RectifyError {
    /// Fewer (or more) control points than the mode needs
    #[error("need exactly {needed} control points, got {got}")]
    InsufficientControlPoints { needed: usize, got: usize },

    /// Parallel lines or a collapsed quadrilateral
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The circle-mode points do not define a usable ellipse
    #[error("invalid conic fit: {0}")]
    InvalidConicFit(String),

    /// No source image has been loaded
    #[error("no source image loaded")]
    NoImage,

    /// Homography or resampling error
    #[error("transform error: {0}")]
    Transform(#[from] rectiplane_transform::TransformError),

    /// Ellipse fitting error
    #[error("conic error: {0}")]
    Conic(#[from] rectiplane_conic::ConicError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rectiplane_core::Error),

    /// Configuration could not be read, parsed or validated
    #[error("config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type for rectification operations
pub type RectifyResult<T> = Result<T, RectifyError>;
