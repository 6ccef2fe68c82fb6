//! Measurement on the rectified canvas
//!
//! Once the reference shape has been rectified onto the square canvas, the
//! canvas side corresponds to a known real-world length. Pixel distances on
//! the canvas convert to real-world units with a single scale factor.

use crate::config::MeasurementConfig;
use rectiplane_core::{Point, Pta};

/// Real-world units per canvas pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    meters_per_pixel: f64,
}

impl Scale {
    /// Scale for a canvas of `canvas_size` pixels spanning `side_length`.
    ///
    /// Returns `None` unless `side_length` is a positive finite number and
    /// `canvas_size` is non-zero.
    pub fn from_side_length(side_length: f64, canvas_size: u32) -> Option<Self> {
        if !(side_length.is_finite() && side_length > 0.0) || canvas_size == 0 {
            return None;
        }
        Some(Self {
            meters_per_pixel: side_length / canvas_size as f64,
        })
    }

    pub fn meters_per_pixel(&self) -> f64 {
        self.meters_per_pixel
    }

    /// Convert a canvas length in pixels to real-world units.
    #[inline]
    pub fn to_world(&self, pixels: f64) -> f64 {
        pixels * self.meters_per_pixel
    }
}

/// Parse a side length typed by the user.
///
/// Leading whitespace is skipped and the longest numeric prefix is used,
/// so `"12m"` reads as 12. Anything that is not a positive finite number
/// yields `None`.
pub fn parse_side_length(text: &str) -> Option<f64> {
    let text = text.trim_start();
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Clamp a radius into the range spanned by two bounds.
///
/// The bounds may come in either order. A NaN bound collapses the range
/// onto the other one.
fn clamp_radius(radius: f64, bound_a: f64, bound_b: f64) -> f64 {
    radius.max(bound_a.min(bound_b)).min(bound_a.max(bound_b))
}

/// Format a measurement for display: two decimals, or `-` when unknown.
pub fn format_measurement(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Circle that follows the pointer on the rectified canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureCircle {
    pub center: Point,
    pub radius: f64,
}

/// Two draggable distance endpoints plus a resizable circle.
#[derive(Debug, Clone)]
pub struct MeasurementOverlay {
    points: Pta,
    circle: MeasureCircle,
    dragging: Option<usize>,
    hit_radius: f64,
    radius_step: f64,
    radius_min: f64,
    radius_max: f64,
}

impl MeasurementOverlay {
    pub fn new(config: &MeasurementConfig, hit_radius: f64) -> Self {
        let points = config
            .initial_points
            .iter()
            .map(|&[x, y]| Point::new(x, y))
            .collect();
        let [cx, cy] = config.initial_circle_center;
        Self {
            points,
            circle: MeasureCircle {
                center: Point::new(cx, cy),
                radius: clamp_radius(config.initial_radius, config.radius_min, config.radius_max),
            },
            dragging: None,
            hit_radius,
            radius_step: config.radius_step,
            radius_min: config.radius_min,
            radius_max: config.radius_max,
        }
    }

    /// The two endpoints.
    pub fn points(&self) -> &Pta {
        &self.points
    }

    pub fn circle(&self) -> MeasureCircle {
        self.circle
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Pick up the endpoint under the pointer, if any.
    pub fn pointer_down(&mut self, p: Point) -> Option<usize> {
        self.dragging = self.points.find_within(p, self.hit_radius);
        self.dragging
    }

    /// Move the circle to the pointer and drag the held endpoint along.
    pub fn pointer_move(&mut self, p: Point) {
        self.circle.center = p;
        if let Some(i) = self.dragging {
            // `dragging` only ever holds an index returned by `find_within`
            let _ = self.points.set(i, p);
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = None;
    }

    /// Resize the circle by one step per wheel event.
    ///
    /// A positive `delta_y` (wheel down) shrinks it. The radius stays
    /// within the configured range.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        let step = if delta_y > 0.0 {
            -self.radius_step
        } else {
            self.radius_step
        };
        self.circle.radius = clamp_radius(self.circle.radius + step, self.radius_min, self.radius_max);
        self.circle.radius
    }

    /// Distance between the endpoints in canvas pixels.
    pub fn pixel_distance(&self) -> f64 {
        match (self.points.get(0), self.points.get(1)) {
            (Some(a), Some(b)) => a.distance_to(b),
            _ => 0.0,
        }
    }

    /// Distance between the endpoints in real-world units.
    pub fn distance(&self, scale: Option<Scale>) -> Option<f64> {
        scale.map(|s| s.to_world(self.pixel_distance()))
    }

    /// Circle radius in real-world units.
    pub fn radius(&self, scale: Option<Scale>) -> Option<f64> {
        scale.map(|s| s.to_world(self.circle.radius))
    }
}
