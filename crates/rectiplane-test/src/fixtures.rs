//! Synthetic test images and point sets
//!
//! Regression tests build their inputs here instead of loading photographs
//! from disk.

use crate::error::{TestError, TestResult};
use rectiplane_core::{Pix, PixMut, Point, color};

/// Opaque red, top-left quadrant of [`quadrant_pattern`].
pub const QUADRANT_TL: u32 = 0xff00_00ff;
/// Opaque green, top-right quadrant.
pub const QUADRANT_TR: u32 = 0x00ff_00ff;
/// Opaque blue, bottom-right quadrant.
pub const QUADRANT_BR: u32 = 0x0000_ffff;
/// Opaque white, bottom-left quadrant.
pub const QUADRANT_BL: u32 = 0xffff_ffff;

/// Square image split into four solid quadrants.
///
/// Pixels with `x < size/2` and `y < size/2` are [`QUADRANT_TL`], and so on
/// clockwise. Every pixel is opaque, so a transparent output pixel always
/// means "not sampled".
pub fn quadrant_pattern(size: u32) -> TestResult<Pix> {
    if size < 2 {
        return Err(TestError::InvalidFixture(format!(
            "quadrant pattern needs size >= 2, got {size}"
        )));
    }
    let half = size / 2;
    let mut pm = PixMut::new(size, size)?;
    for y in 0..size {
        for x in 0..size {
            let val = match (x < half, y < half) {
                (true, true) => QUADRANT_TL,
                (false, true) => QUADRANT_TR,
                (false, false) => QUADRANT_BR,
                (true, false) => QUADRANT_BL,
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }
    Ok(pm.into())
}

/// Image whose pixel at (x, y) encodes its own coordinates.
///
/// Red holds `x % 256`, green holds `y % 256`, blue and alpha are 255.
/// Useful for checking exactly which source pixel a sampler read.
pub fn coordinate_pattern(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, color::compose_rgb(x as u8, y as u8, 255));
        }
    }
    Ok(pm.into())
}

/// `n` points evenly spaced in parameter on a rotated ellipse.
///
/// The ellipse has center `(h, k)`, semi-axes `a`, `b` and rotation
/// `theta` (radians), and the first point is at parameter `t0`.
pub fn ellipse_points(h: f64, k: f64, a: f64, b: f64, theta: f64, t0: f64, n: usize) -> Vec<Point> {
    let (s, c) = theta.sin_cos();
    (0..n)
        .map(|i| {
            let t = t0 + std::f64::consts::TAU * i as f64 / n as f64;
            let (u, v) = (a * t.cos(), b * t.sin());
            Point::new(h + u * c - v * s, k + u * s + v * c)
        })
        .collect()
}

/// Symmetric trapezoid given as 8 side points (2 per side).
///
/// The top edge spans `top_half_width` around `cx` at `top_y`, the bottom
/// edge spans `bottom_half_width` at `bottom_y`. Sides are listed left,
/// top, right, bottom, and each pair lies strictly inside its edge so
/// corners come from line intersection.
pub fn trapezoid_side_points(
    cx: f64,
    top_y: f64,
    bottom_y: f64,
    top_half_width: f64,
    bottom_half_width: f64,
) -> Vec<Point> {
    let tl = Point::new(cx - top_half_width, top_y);
    let tr = Point::new(cx + top_half_width, top_y);
    let br = Point::new(cx + bottom_half_width, bottom_y);
    let bl = Point::new(cx - bottom_half_width, bottom_y);
    let lerp = |p: Point, q: Point, t: f64| Point::new(p.x + (q.x - p.x) * t, p.y + (q.y - p.y) * t);
    vec![
        lerp(tl, bl, 0.25),
        lerp(tl, bl, 0.75),
        lerp(tl, tr, 0.25),
        lerp(tl, tr, 0.75),
        lerp(tr, br, 0.25),
        lerp(tr, br, 0.75),
        lerp(br, bl, 0.25),
        lerp(br, bl, 0.75),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_pattern() {
        let pix = quadrant_pattern(10).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(QUADRANT_TL));
        assert_eq!(pix.get_pixel(9, 0), Some(QUADRANT_TR));
        assert_eq!(pix.get_pixel(9, 9), Some(QUADRANT_BR));
        assert_eq!(pix.get_pixel(0, 9), Some(QUADRANT_BL));
        assert!(quadrant_pattern(1).is_err());
    }

    #[test]
    fn test_coordinate_pattern() {
        let pix = coordinate_pattern(300, 3).unwrap();
        assert_eq!(pix.get_rgba(257, 2), Some((1, 2, 255, 255)));
    }

    #[test]
    fn test_ellipse_points_lie_on_ellipse() {
        let pts = ellipse_points(3.0, -2.0, 10.0, 5.0, 0.0, 0.0, 5);
        assert_eq!(pts.len(), 5);
        assert!((pts[0].x - 13.0).abs() < 1e-12);
        for p in pts {
            let u = (p.x - 3.0) / 10.0;
            let v = (p.y + 2.0) / 5.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_trapezoid_side_points_layout() {
        let pts = trapezoid_side_points(300.0, 100.0, 500.0, 100.0, 200.0);
        assert_eq!(pts.len(), 8);
        // top side is horizontal
        assert_eq!(pts[2].y, 100.0);
        assert_eq!(pts[3].y, 100.0);
        // bottom side is horizontal
        assert_eq!(pts[6].y, 500.0);
        assert_eq!(pts[7].y, 500.0);
    }
}
