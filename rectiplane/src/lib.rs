//! rectiplane - Perspective rectification for Rust
//!
//! Marks a reference shape on a photograph (a trapezoid by its sides, or a
//! circle by five points on its outline), derives the four corners of the
//! square it stands for, and resamples the photograph onto a square
//! top-down canvas where distances can be measured.
//!
//! # Overview
//!
//! - Points, rasters, linear algebra and line geometry (core types)
//! - Five-point ellipse fitting and tangents ([`conic`])
//! - Homographies, sampling and display rotation ([`transform`])
//! - Corner derivation, sessions and measurement ([`rectify`])
//! - PNG/JPEG loading and PNG writing ([`io`])
//!
//! # Example
//!
//! ```
//! use rectiplane::{Point, PixMut};
//! use rectiplane::rectify::{Mode, derive, rectify};
//!
//! let mut pm = PixMut::new(400, 300).unwrap();
//! pm.fill(0x336699ff);
//! let source = pm.into();
//!
//! // Two points on each side: left, top, right, bottom
//! let pts = [
//!     (100.0, 100.0), (80.0, 200.0),
//!     (130.0, 60.0), (270.0, 60.0),
//!     (300.0, 100.0), (320.0, 200.0),
//!     (280.0, 240.0), (120.0, 240.0),
//! ]
//! .map(Point::from);
//! let d = derive(Mode::Trapezoid, &pts, 200.0).unwrap();
//! let out = rectify(&source, &d.transform_points, 200).unwrap();
//! assert_eq!(out.width(), 200);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rectiplane_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rectiplane_conic as conic;
pub use rectiplane_io as io;
pub use rectiplane_rectify as rectify;
pub use rectiplane_transform as transform;
