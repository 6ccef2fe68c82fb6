//! Trapezoid mode: corners from four marked side lines

use crate::{RectifyError, RectifyResult};
use rectiplane_core::{Point, line_intersection};

/// Points needed in trapezoid mode (two per side).
pub const TRAPEZOID_POINTS: usize = 8;

/// Intersect consecutive side lines into the four corners.
///
/// Points `2i` and `2i + 1` define side `i` (left, top, right, bottom).
/// Corner `i` is side `i` meeting side `i + 1`, so the result is ordered
/// top-left, top-right, bottom-right, bottom-left. A corner is `None` when
/// its two sides are parallel.
///
/// # Errors
///
/// Returns [`RectifyError::InsufficientControlPoints`] unless exactly
/// [`TRAPEZOID_POINTS`] points are given.
pub fn trapezoid_corners(points: &[Point]) -> RectifyResult<[Option<Point>; 4]> {
    if points.len() != TRAPEZOID_POINTS {
        return Err(RectifyError::InsufficientControlPoints {
            needed: TRAPEZOID_POINTS,
            got: points.len(),
        });
    }
    Ok(std::array::from_fn(|i| {
        let j = (i + 1) % 4;
        line_intersection(points[2 * i], points[2 * i + 1], points[2 * j], points[2 * j + 1])
    }))
}

/// Unwrap all four corners, or report which one is missing.
pub fn complete_corners(corners: &[Option<Point>; 4]) -> RectifyResult<[Point; 4]> {
    let mut out = [Point::default(); 4];
    for (i, c) in corners.iter().enumerate() {
        out[i] = c.ok_or_else(|| {
            RectifyError::DegenerateGeometry(format!("corner {i} has parallel sides"))
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_rectangle_sides() {
        let pts = [
            pt(10.0, 30.0),
            pt(10.0, 70.0),
            pt(30.0, 20.0),
            pt(70.0, 20.0),
            pt(90.0, 30.0),
            pt(90.0, 70.0),
            pt(70.0, 80.0),
            pt(30.0, 80.0),
        ];
        let c = trapezoid_corners(&pts).unwrap();
        assert_eq!(
            c,
            [
                Some(pt(10.0, 20.0)),
                Some(pt(90.0, 20.0)),
                Some(pt(90.0, 80.0)),
                Some(pt(10.0, 80.0)),
            ]
        );
        assert!(complete_corners(&c).is_ok());
    }

    #[test]
    fn test_parallel_sides_leave_gap() {
        // Left side drawn horizontally, parallel to the top side
        let pts = [
            pt(0.0, 20.0),
            pt(5.0, 20.0),
            pt(30.0, 10.0),
            pt(70.0, 10.0),
            pt(90.0, 30.0),
            pt(90.0, 70.0),
            pt(70.0, 80.0),
            pt(30.0, 80.0),
        ];
        let c = trapezoid_corners(&pts).unwrap();
        assert!(c[0].is_none());
        assert!(c[1].is_some());
        assert!(matches!(
            complete_corners(&c),
            Err(RectifyError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_point_count() {
        assert!(matches!(
            trapezoid_corners(&[pt(0.0, 0.0); 7]),
            Err(RectifyError::InsufficientControlPoints { needed: 8, got: 7 })
        ));
    }
}
