//! rectiplane-transform - Homography and raster warping
//!
//! This crate provides the geometric transformations applied to rasters:
//!
//! - Closed-form square-to-quadrilateral homography ([`Homography`])
//! - Nearest-pixel projective resampling ([`projective_sampled`])
//! - Display rotation about the image center ([`rotate_about_center`])

mod error;
pub mod projective;
pub mod rotate;

pub use error::{TransformError, TransformResult};
pub use projective::{Homography, projective_sampled, projective_sampled_into};
pub use rotate::rotate_about_center;
