//! Implicit lines and line-line intersection
//!
//! Lines are kept in the homogeneous implicit form `dx*x + dy*y = c`.
//! Trapezoid corners and circle-mode corners are both built by intersecting
//! lines of this form, so both share the same parallel tolerance.

use crate::pta::Point;

/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// The line `dx*x + dy*y = c`.
///
/// `(dx, dy)` is the line normal, not a direction vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCoeffs {
    pub dx: f64,
    pub dy: f64,
    pub c: f64,
}

impl LineCoeffs {
    /// Create a line from its implicit coefficients.
    pub const fn new(dx: f64, dy: f64, c: f64) -> Self {
        Self { dx, dy, c }
    }

    /// Line through two points.
    ///
    /// If `p1 == p2` all coefficients are zero and the line intersects
    /// nothing.
    pub fn through(p1: Point, p2: Point) -> Self {
        let dx = p2.y - p1.y;
        let dy = p1.x - p2.x;
        Self {
            dx,
            dy,
            c: dx * p1.x + dy * p1.y,
        }
    }

    /// The horizontal line at height `y`.
    pub const fn horizontal(y: f64) -> Self {
        Self {
            dx: 0.0,
            dy: 1.0,
            c: y,
        }
    }

    /// The vertical line at abscissa `x`.
    pub const fn vertical(x: f64) -> Self {
        Self {
            dx: 1.0,
            dy: 0.0,
            c: x,
        }
    }

    /// Signed residual `dx*x + dy*y - c`; zero on the line.
    #[inline]
    pub fn eval(&self, p: Point) -> f64 {
        self.dx * p.x + self.dy * p.y - self.c
    }

    /// Intersection with `other` by Cramer's rule.
    ///
    /// Returns `None` when the 2x2 determinant is below
    /// [`PARALLEL_EPSILON`] (parallel or degenerate lines).
    pub fn intersect(&self, other: &LineCoeffs) -> Option<Point> {
        let det = self.dx * other.dy - other.dx * self.dy;
        if det.is_nan() || det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let x = (other.dy * self.c - self.dy * other.c) / det;
        let y = (self.dx * other.c - other.dx * self.c) / det;
        Some(Point::new(x, y))
    }
}

/// Intersection of line `p1 p2` with line `p3 p4`.
///
/// Returns `None` if the lines are parallel (see [`PARALLEL_EPSILON`]).
///
/// # Examples
///
/// ```
/// use rectiplane_core::{Point, line_intersection};
///
/// let p = line_intersection(
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 2.0),
///     Point::new(0.0, 2.0),
///     Point::new(2.0, 0.0),
/// )
/// .unwrap();
/// assert_eq!(p, Point::new(1.0, 1.0));
/// ```
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    LineCoeffs::through(p1, p2).intersect(&LineCoeffs::through(p3, p4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_through_contains_both_points() {
        let l = LineCoeffs::through(pt(1.0, 2.0), pt(4.0, -3.0));
        assert_eq!(l.eval(pt(1.0, 2.0)), 0.0);
        assert_eq!(l.eval(pt(4.0, -3.0)), 0.0);
        assert!(l.eval(pt(0.0, 0.0)) != 0.0);
    }

    #[test]
    fn test_intersection_is_order_symmetric() {
        let cases = [
            (pt(0.0, 0.0), pt(10.0, 3.0), pt(2.0, 8.0), pt(7.0, -4.0)),
            (pt(120.5, 80.25), pt(130.0, 400.0), pt(90.0, 100.0), pt(500.0, 110.0)),
            (pt(-3.0, 1.0), pt(3.0, 1.5), pt(0.0, -5.0), pt(0.1, 5.0)),
        ];
        for (p1, p2, p3, p4) in cases {
            let a = line_intersection(p1, p2, p3, p4).unwrap();
            let b = line_intersection(p2, p1, p4, p3).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parallel_lines_return_none() {
        assert_eq!(
            line_intersection(pt(0.0, 0.0), pt(10.0, 5.0), pt(0.0, 1.0), pt(10.0, 6.0)),
            None
        );
        assert_eq!(
            line_intersection(pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0), pt(3.0, 3.0)),
            None
        );
        assert_eq!(
            LineCoeffs::horizontal(1.0).intersect(&LineCoeffs::horizontal(2.0)),
            None
        );
    }

    #[test]
    fn test_coincident_points_intersect_nothing() {
        let p = pt(3.0, 3.0);
        assert_eq!(line_intersection(p, p, pt(0.0, 0.0), pt(0.0, 1.0)), None);
    }

    #[test]
    fn test_axis_lines() {
        let p = LineCoeffs::vertical(4.0)
            .intersect(&LineCoeffs::horizontal(-2.5))
            .unwrap();
        assert_eq!(p, pt(4.0, -2.5));
        let q = LineCoeffs::through(pt(0.0, 0.0), pt(2.0, 4.0))
            .intersect(&LineCoeffs::horizontal(4.0))
            .unwrap();
        assert!((q.x - 2.0).abs() < 1e-12 && (q.y - 4.0).abs() < 1e-12);
    }
}
