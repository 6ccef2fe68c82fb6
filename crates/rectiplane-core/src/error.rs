//! Error types for rectiplane-core
//!
//! Provides a unified error type for the raster, point-array and
//! linear-algebra operations in the core crate. Each variant captures enough
//! context for diagnostics without exposing internal implementation details.

use thiserror::Error;

/// rectiplane core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Raw buffer length does not match the declared raster size
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Operand shapes are incompatible for a matrix/vector operation
    #[error("shape mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A matrix with no rows or no columns
    #[error("empty matrix")]
    EmptyMatrix,

    /// Rows of differing lengths
    #[error("ragged matrix: row {row} has {len} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Linear system has no unique solution (near-zero pivot)
    #[error("singular matrix: pivot {pivot:e} in column {column}")]
    SingularMatrix { column: usize, pivot: f64 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
