//! rectiplane-conic - Ellipse fitting and tangent construction
//!
//! Fits a conic through the five circle-mode control points and answers
//! the geometric queries corner derivation needs:
//!
//! - center / semi-axes / rotation ([`ConicParams`])
//! - topmost and bottommost points ([`EllipseFit::find_y_extrema`])
//! - horizontal slices ([`EllipseFit::find_points_at_y`])
//! - tangent at a point and tangents from an external point
//!
//! # Example
//!
//! ```
//! use rectiplane_conic::EllipseFit;
//! use rectiplane_core::Point;
//!
//! let pts: Vec<Point> = (0..5)
//!     .map(|i| {
//!         let t = std::f64::consts::TAU * i as f64 / 5.0;
//!         Point::new(300.0 + 100.0 * t.cos(), 200.0 + 50.0 * t.sin())
//!     })
//!     .collect();
//! let mut fit = EllipseFit::new(&pts).unwrap();
//! let params = fit.fit().unwrap();
//! assert!((params.h - 300.0).abs() < 1e-3);
//! ```

pub mod coeffs;
pub mod ellipse;
pub mod error;

pub use coeffs::{ConicGeneralForm, ConicParams};
pub use ellipse::{EllipseFit, FIT_POINTS};
pub use error::{ConicError, ConicResult};
