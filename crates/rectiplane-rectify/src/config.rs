//! Session configuration
//!
//! Every field has a default, so a JSON file only needs the values it
//! overrides:
//!
//! ```json
//! { "canvas_size": 800, "measurement": { "radius_max": 400 } }
//! ```

use crate::{RectifyError, RectifyResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    /// Side of the square working canvas and of the full-resolution output.
    pub canvas_size: u32,
    /// Side of the preview output rendered while dragging.
    pub preview_size: u32,
    /// Pointer distance (canvas pixels) that picks up an existing point.
    pub hit_radius: f64,
    #[serde(default)]
    pub measurement: MeasurementConfig,
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            canvas_size: 600,
            preview_size: 200,
            hit_radius: 10.0,
            measurement: MeasurementConfig::default(),
        }
    }
}

/// Measurement overlay on the rectified canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Initial positions of the two distance endpoints.
    pub initial_points: [[f64; 2]; 2],
    pub initial_circle_center: [f64; 2],
    pub initial_radius: f64,
    /// Radius change per wheel notch.
    pub radius_step: f64,
    pub radius_min: f64,
    pub radius_max: f64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            initial_points: [[100.0, 100.0], [200.0, 200.0]],
            initial_circle_center: [300.0, 300.0],
            initial_radius: 50.0,
            radius_step: 5.0,
            radius_min: 10.0,
            radius_max: 300.0,
        }
    }
}

impl RectifyConfig {
    /// Check value ranges. Returns a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.canvas_size == 0 || self.preview_size == 0 {
            return Err(format!(
                "canvas_size and preview_size must be positive, got {} and {}",
                self.canvas_size, self.preview_size
            ));
        }
        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return Err(format!("hit_radius must be non-negative, got {}", self.hit_radius));
        }
        let m = &self.measurement;
        if !(m.radius_min.is_finite() && m.radius_max.is_finite() && m.radius_min <= m.radius_max) {
            return Err(format!(
                "radius range [{}, {}] is empty",
                m.radius_min, m.radius_max
            ));
        }
        if !(m.radius_step.is_finite() && m.radius_step > 0.0) {
            return Err(format!("radius_step must be positive, got {}", m.radius_step));
        }
        Ok(())
    }
}

/// Load and validate a JSON configuration file.
///
/// # Errors
///
/// Returns [`RectifyError::Config`] if the file cannot be read, is not
/// valid JSON for [`RectifyConfig`], or fails [`RectifyConfig::validate`].
pub fn load_config(path: &Path) -> RectifyResult<RectifyConfig> {
    let config_err = |message: String| RectifyError::Config {
        path: path.to_path_buf(),
        message,
    };
    let data = fs::read_to_string(path).map_err(|e| config_err(format!("failed to read: {e}")))?;
    let config: RectifyConfig =
        serde_json::from_str(&data).map_err(|e| config_err(format!("failed to parse: {e}")))?;
    config.validate().map_err(config_err)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RectifyConfig::default();
        assert_eq!(cfg.canvas_size, 600);
        assert_eq!(cfg.preview_size, 200);
        assert_eq!(cfg.hit_radius, 10.0);
        assert_eq!(cfg.measurement.initial_radius, 50.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: RectifyConfig =
            serde_json::from_str(r#"{ "preview_size": 100, "measurement": { "radius_step": 2 } }"#)
                .unwrap();
        assert_eq!(cfg.preview_size, 100);
        assert_eq!(cfg.canvas_size, 600);
        assert_eq!(cfg.measurement.radius_step, 2.0);
        assert_eq!(cfg.measurement.radius_max, 300.0);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut cfg = RectifyConfig::default();
        cfg.measurement.radius_min = 400.0;
        assert!(cfg.validate().is_err());

        let cfg = RectifyConfig {
            canvas_size: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
