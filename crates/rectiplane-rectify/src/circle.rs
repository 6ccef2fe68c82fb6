//! Circle mode: corners of the square circumscribing a marked circle
//!
//! A circle seen in perspective is an ellipse. Five points on it are fitted
//! with [`EllipseFit`]; the square that circumscribes the real circle is
//! recovered from four lines:
//!
//! - two horizontal lines through the topmost and bottommost ellipse points
//! - two tangent lines chosen by the first [`TangentStrategy`] that succeeds
//!
//! Their four intersections are the transform points, ordered like the
//! trapezoid corners.

use crate::{RectifyError, RectifyResult};
use rectiplane_conic::{ConicParams, EllipseFit};
use rectiplane_core::{LineCoeffs, Point};
use thiserror::Error;
use tracing::debug;

/// Points needed in circle mode.
pub const CIRCLE_POINTS: usize = 5;

/// A way of choosing the two side tangents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TangentStrategy {
    /// Tangents through the point where the line joining the y-extrema
    /// meets the vertical reference line.
    VanishingPoint,
    /// Tangents at the ellipse points on the horizontal midline between
    /// the y-extrema.
    Midline,
}

/// Why a [`TangentStrategy`] produced no tangents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrategyFailure {
    #[error("extrema line is parallel to the reference line")]
    NoVanishingPoint,
    #[error("vanishing point is not outside the ellipse")]
    VanishingPointInside,
    #[error("tangent construction produced fewer than two lines")]
    NoTangents,
    #[error("midline does not cross the ellipse")]
    NoMidlineCrossing,
}

impl TangentStrategy {
    /// Strategies in the order they are tried.
    pub const ORDER: [TangentStrategy; 2] = [TangentStrategy::VanishingPoint, TangentStrategy::Midline];

    pub fn name(&self) -> &'static str {
        match self {
            TangentStrategy::VanishingPoint => "vanishing-point",
            TangentStrategy::Midline => "midline",
        }
    }

    /// Produce the two side tangents for `fit`.
    ///
    /// `extrema` is the `(larger y, smaller y)` pair from
    /// [`EllipseFit::find_y_extrema`]; `reference_x` is the abscissa of the
    /// vertical reference line in the same coordinates as the fit.
    pub fn tangents(
        &self,
        fit: &EllipseFit,
        extrema: (Point, Point),
        reference_x: f64,
    ) -> Result<[LineCoeffs; 2], StrategyFailure> {
        let (lower, upper) = extrema;
        match self {
            TangentStrategy::VanishingPoint => {
                let axis = LineCoeffs::through(upper, lower);
                let reference = LineCoeffs::through(
                    Point::new(reference_x, upper.y),
                    Point::new(reference_x, lower.y),
                );
                let vp = axis
                    .intersect(&reference)
                    .ok_or(StrategyFailure::NoVanishingPoint)?;
                if !fit.is_outside(vp) {
                    return Err(StrategyFailure::VanishingPointInside);
                }
                match fit.tangent_lines_through(vp) {
                    [Some(t1), Some(t2)] => Ok([t1, t2]),
                    _ => Err(StrategyFailure::NoTangents),
                }
            }
            TangentStrategy::Midline => {
                let mid_y = 0.5 * (upper.y + lower.y);
                let (left, right) = fit
                    .find_points_at_y(mid_y)
                    .ok_or(StrategyFailure::NoMidlineCrossing)?;
                match (fit.tangent_line_at(left), fit.tangent_line_at(right)) {
                    (Some(t1), Some(t2)) => Ok([t1, t2]),
                    _ => Err(StrategyFailure::NoTangents),
                }
            }
        }
    }
}

/// Result of a successful circle-mode derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCorners {
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corners: [Point; 4],
    /// The strategy whose tangents were used.
    pub strategy: TangentStrategy,
    pub params: ConicParams,
}

/// Derive four transform points from five points on a circle.
///
/// # Arguments
/// * `points` - Exactly [`CIRCLE_POINTS`] points in image coordinates
/// * `reference_x` - Abscissa of the vertical reference line (the canvas
///   midpoint mapped into image coordinates)
///
/// # Errors
///
/// - [`RectifyError::InsufficientControlPoints`] for the wrong point count
/// - [`RectifyError::InvalidConicFit`] if the points do not fit an ellipse
/// - [`RectifyError::DegenerateGeometry`] if every strategy fails or the
///   tangents do not cross the extrema lines
pub fn derive_circle_corners(points: &[Point], reference_x: f64) -> RectifyResult<CircleCorners> {
    if points.len() != CIRCLE_POINTS {
        return Err(RectifyError::InsufficientControlPoints {
            needed: CIRCLE_POINTS,
            got: points.len(),
        });
    }

    let mut fit = EllipseFit::new(points)?;
    let params = fit
        .fit()
        .map_err(|e| RectifyError::InvalidConicFit(e.to_string()))?;
    let extrema = fit
        .find_y_extrema()
        .ok_or_else(|| RectifyError::InvalidConicFit("no y-extrema".to_string()))?;

    let mut chosen = None;
    for strategy in TangentStrategy::ORDER {
        match strategy.tangents(&fit, extrema, reference_x) {
            Ok(lines) => {
                chosen = Some((strategy, lines));
                break;
            }
            Err(reason) => debug!(strategy = strategy.name(), %reason, "tangent strategy failed"),
        }
    }
    let (strategy, [t1, t2]) = chosen.ok_or_else(|| {
        RectifyError::DegenerateGeometry("no tangent strategy succeeded".to_string())
    })?;

    let (lower, upper) = extrema;
    let top = LineCoeffs::horizontal(upper.y);
    let bottom = LineCoeffs::horizontal(lower.y);
    let cross = |a: &LineCoeffs, b: &LineCoeffs| {
        a.intersect(b).ok_or_else(|| {
            RectifyError::DegenerateGeometry("tangent parallel to an extrema line".to_string())
        })
    };
    let (mut tl, mut tr) = (cross(&t1, &top)?, cross(&t2, &top)?);
    if tr.x < tl.x {
        std::mem::swap(&mut tl, &mut tr);
    }
    let (mut bl, mut br) = (cross(&t1, &bottom)?, cross(&t2, &bottom)?);
    if br.x < bl.x {
        std::mem::swap(&mut bl, &mut br);
    }

    debug!(strategy = strategy.name(), ?tl, ?tr, ?br, ?bl, "circle corners");
    Ok(CircleCorners {
        corners: [tl, tr, br, bl],
        strategy,
        params,
    })
}
