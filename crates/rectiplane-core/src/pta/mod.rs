//! Point, Pta - 2D points and point arrays
//!
//! `Pta` holds the user's control points (trapezoid side points, ellipse
//! points, measurement endpoints). Points are addressed by index; there is
//! no handle or reference to an individual point that could go stale when
//! the array is edited.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).

use crate::error::{Error, Result};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Array of points.
///
/// Stores 2D points as parallel x/y coordinate vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pta {
    /// X coordinates
    x: Vec<f64>,
    /// Y coordinates
    y: Vec<f64>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Option<Point> {
        Some(Point::new(*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Replace the point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn set(&mut self, index: usize, p: Point) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        self.x[index] = p.x;
        self.y[index] = p.y;
        Ok(())
    }

    /// Append a point.
    pub fn push(&mut self, p: Point) {
        self.x.push(p.x);
        self.y.push(p.y);
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }

    /// Index of the first point strictly closer than `radius` to `p`.
    ///
    /// Earlier points win when several are in range, which is how a
    /// pointer press picks the point to drag.
    pub fn find_within(&self, p: Point, radius: f64) -> Option<usize> {
        self.iter().position(|q| q.distance_to(p) < radius)
    }

    /// Copy the points out as a vector.
    pub fn to_points(&self) -> Vec<Point> {
        self.iter().collect()
    }
}

impl FromIterator<Point> for Pta {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut pta = Pta::new();
        for p in iter {
            pta.push(p);
        }
        pta
    }
}

impl Extend<Point> for Pta {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.push(p);
        }
    }
}
