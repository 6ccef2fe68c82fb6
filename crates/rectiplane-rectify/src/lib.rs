//! rectiplane-rectify - Perspective rectification from marked reference shapes
//!
//! Turns control points marked on a photograph into four source-image
//! corners, builds the square-to-quadrilateral homography and resamples the
//! photograph onto a square canvas.
//!
//! # Modes
//!
//! | mode | points | corners from |
//! |---|---|---|
//! | [`Mode::Trapezoid`] | 8 (two per side) | [`trapezoid::trapezoid_corners`] |
//! | [`Mode::Circle`] | 5 (on the circle) | [`circle::derive_circle_corners`] |
//!
//! # Modules
//!
//! - [`session`]: interactive state, frame coalescing, preview/full buffers
//! - [`viewport`]: letterbox placement and default point layouts
//! - [`measure`]: real-world distances on the rectified canvas
//! - [`config`]: JSON configuration
//!
//! # Example
//!
//! ```
//! use rectiplane_core::PixMut;
//! use rectiplane_rectify::{RectifyConfig, Session};
//!
//! let mut pm = PixMut::new(320, 240).unwrap();
//! pm.fill(0xffffffff);
//! let mut session = Session::new(RectifyConfig::default());
//! session.load_image(pm.into()).unwrap();
//! assert!(session.full().is_some());
//! ```

pub mod circle;
pub mod config;
mod error;
pub mod measure;
pub mod session;
pub mod trapezoid;
pub mod viewport;

pub use circle::{CIRCLE_POINTS, CircleCorners, StrategyFailure, TangentStrategy, derive_circle_corners};
pub use config::{MeasurementConfig, RectifyConfig, load_config};
pub use error::{RectifyError, RectifyResult};
pub use measure::{MeasureCircle, MeasurementOverlay, Scale, format_measurement, parse_side_length};
pub use session::{Derivation, FrameGate, Mode, Resolution, Session, derive, rectify};
pub use trapezoid::{TRAPEZOID_POINTS, trapezoid_corners};
pub use viewport::Letterbox;
