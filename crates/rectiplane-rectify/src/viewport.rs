//! Letterbox placement of the source image on the square canvas
//!
//! The photograph is scaled uniformly to fit the canvas and centered.
//! Control points are edited in canvas coordinates; all geometry runs in
//! source-image coordinates.

use crate::{RectifyError, RectifyResult};
use rectiplane_core::{Point, Pta};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Initial trapezoid side points as fractions of the placed image:
/// left, top, right, then bottom side.
pub const DEFAULT_TRAPEZOID_FRACTIONS: [(f64, f64); 8] = [
    (0.2, 0.3),
    (0.2, 0.7),
    (0.3, 0.2),
    (0.7, 0.2),
    (0.8, 0.3),
    (0.8, 0.7),
    (0.7, 0.8),
    (0.3, 0.8),
];

/// Uniform scale and centering offsets of an image on a square canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    placed_w: f64,
    placed_h: f64,
}

impl Letterbox {
    /// Fit an `image_w` x `image_h` image into a `canvas` x `canvas` square.
    ///
    /// # Errors
    ///
    /// Returns [`RectifyError::Core`] if any size is zero.
    pub fn fit(image_w: u32, image_h: u32, canvas: u32) -> RectifyResult<Self> {
        if image_w == 0 || image_h == 0 || canvas == 0 {
            return Err(RectifyError::Core(rectiplane_core::Error::InvalidDimension {
                width: image_w,
                height: image_h,
            }));
        }
        let s = canvas as f64;
        let scale = (s / image_w as f64).min(s / image_h as f64);
        let placed_w = image_w as f64 * scale;
        let placed_h = image_h as f64 * scale;
        Ok(Self {
            scale,
            offset_x: (s - placed_w) / 2.0,
            offset_y: (s - placed_h) / 2.0,
            placed_w,
            placed_h,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Top-left corner of the placed image on the canvas.
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Size of the placed image on the canvas.
    pub fn placed_size(&self) -> (f64, f64) {
        (self.placed_w, self.placed_h)
    }

    #[inline]
    pub fn canvas_to_image(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    #[inline]
    pub fn image_to_canvas(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    /// Canvas point at fractional position `(fx, fy)` of the placed image.
    pub fn at_fraction(&self, fx: f64, fy: f64) -> Point {
        Point::new(
            self.offset_x + self.placed_w * fx,
            self.offset_y + self.placed_h * fy,
        )
    }

    /// Map a whole point array from canvas to image space.
    pub fn points_to_image(&self, points: &Pta) -> Vec<Point> {
        points.iter().map(|p| self.canvas_to_image(p)).collect()
    }
}

/// The eight starting points of trapezoid mode, in canvas coordinates.
pub fn default_trapezoid_points(lb: &Letterbox) -> Pta {
    DEFAULT_TRAPEZOID_FRACTIONS
        .iter()
        .map(|&(fx, fy)| lb.at_fraction(fx, fy))
        .collect()
}

/// The five starting points of circle mode, in canvas coordinates.
///
/// Evenly spaced on an ellipse centered in the placed image with
/// semi-axes `0.3 * width` and `0.15 * height`, starting at the top.
pub fn default_circle_points(lb: &Letterbox) -> Pta {
    let c = lb.at_fraction(0.5, 0.5);
    let (w, h) = lb.placed_size();
    let (a, b) = (0.3 * w, 0.15 * h);
    (0..5)
        .map(|i| {
            let t = TAU * i as f64 / 5.0 - FRAC_PI_2;
            Point::new(c.x + a * t.cos(), c.y + b * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_fit() {
        let lb = Letterbox::fit(1200, 600, 600).unwrap();
        assert_eq!(lb.scale(), 0.5);
        assert_eq!(lb.offset(), Point::new(0.0, 150.0));
        assert_eq!(lb.placed_size(), (600.0, 300.0));
    }

    #[test]
    fn test_portrait_fit() {
        let lb = Letterbox::fit(300, 400, 600).unwrap();
        assert_eq!(lb.scale(), 1.5);
        assert_eq!(lb.offset(), Point::new(75.0, 0.0));
    }

    #[test]
    fn test_roundtrip() {
        let lb = Letterbox::fit(1024, 768, 600).unwrap();
        let p = Point::new(123.25, 456.5);
        let q = lb.image_to_canvas(lb.canvas_to_image(p));
        assert!(p.distance_to(q) < 1e-9);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Letterbox::fit(0, 10, 600).is_err());
        assert!(Letterbox::fit(10, 10, 0).is_err());
    }

    #[test]
    fn test_default_points() {
        let lb = Letterbox::fit(600, 600, 600).unwrap();
        let trap = default_trapezoid_points(&lb);
        assert_eq!(trap.len(), 8);
        assert!(trap.get(0).unwrap().distance_to(Point::new(120.0, 180.0)) < 1e-9);
        assert!(trap.get(7).unwrap().distance_to(Point::new(180.0, 480.0)) < 1e-9);

        let circle = default_circle_points(&lb);
        assert_eq!(circle.len(), 5);
        let top = circle.get(0).unwrap();
        assert!((top.x - 300.0).abs() < 1e-9);
        assert!((top.y - 210.0).abs() < 1e-9);
    }
}
