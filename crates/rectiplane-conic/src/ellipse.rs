//! Five-point ellipse fit
//!
//! [`EllipseFit`] owns the five control points the user drags in circle
//! mode. [`EllipseFit::fit`] recomputes the conic from scratch; every query
//! after that reads the cached [`ConicGeneralForm`] / [`ConicParams`].

use crate::coeffs::{ConicGeneralForm, ConicParams};
use crate::error::{ConicError, ConicResult};
use rectiplane_core::{Error as CoreError, LineCoeffs, Matrix, Point, Pta, gauss_solve};
use tracing::debug;

/// Number of control points an ellipse fit takes.
pub const FIT_POINTS: usize = 5;

/// Ellipse through five ordered control points.
#[derive(Debug, Clone)]
pub struct EllipseFit {
    points: Pta,
    general: Option<ConicGeneralForm>,
    params: Option<ConicParams>,
}

impl EllipseFit {
    /// Create an unfitted ellipse from exactly five points.
    ///
    /// # Errors
    ///
    /// Returns [`ConicError::PointCount`] for any other number of points.
    pub fn new(points: &[Point]) -> ConicResult<Self> {
        if points.len() != FIT_POINTS {
            return Err(ConicError::PointCount {
                expected: FIT_POINTS,
                got: points.len(),
            });
        }
        Ok(Self {
            points: points.iter().copied().collect(),
            general: None,
            params: None,
        })
    }

    /// Create and fit in one step.
    ///
    /// The returned value is kept even when the fit fails, so the caller
    /// can still move points; check [`EllipseFit::is_valid`].
    pub fn fitted(points: &[Point]) -> ConicResult<Self> {
        let mut fit = Self::new(points)?;
        if let Err(e) = fit.fit() {
            debug!(error = %e, "ellipse fit rejected");
        }
        Ok(fit)
    }

    /// The control points.
    pub fn points(&self) -> &Pta {
        &self.points
    }

    /// Move control point `index`. The cached fit is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ConicError::Core`] if `index >= 5`.
    pub fn set_point(&mut self, index: usize, p: Point) -> ConicResult<()> {
        self.points.set(index, p)?;
        self.general = None;
        self.params = None;
        Ok(())
    }

    /// Fit the conic through the five control points.
    ///
    /// Each point contributes a row `[x², xy, y², x, y]` with target `-1`,
    /// i.e. the constant term is fixed at `F = 1`. The normal equations
    /// `(AᵀA) c = Aᵀ(-1)` give `[A, B, C, D, E]`.
    ///
    /// Fixing `F = 1` cannot represent a conic through the origin, and
    /// conics passing close to it are poorly conditioned. Keep the control
    /// points away from `(0, 0)` (e.g. in canvas or image pixel space).
    ///
    /// # Errors
    ///
    /// - [`ConicError::SingularSystem`] if the normal matrix is singular
    ///   (e.g. collinear points); all cached state is cleared
    /// - [`ConicError::NotAnEllipse`] if `B² - 4AC >= 0`, `A·C <= 0`, or the
    ///   semi-axes are not positive; the general form is kept, the
    ///   parameters are cleared
    pub fn fit(&mut self) -> ConicResult<ConicParams> {
        self.general = None;
        self.params = None;

        let rows: Vec<Vec<f64>> = self
            .points
            .iter()
            .map(|p| vec![p.x * p.x, p.x * p.y, p.y * p.y, p.x, p.y])
            .collect();
        let design = Matrix::from_rows(rows)?;
        let design_t = design.transpose();
        let normal = design_t.mul(&design)?;
        let rhs = design_t.mul_vec(&[-1.0; FIT_POINTS])?;

        let c = gauss_solve(&normal, &rhs).map_err(|e| match e {
            CoreError::SingularMatrix { column, .. } => ConicError::SingularSystem { column },
            other => ConicError::Core(other),
        })?;
        let general = ConicGeneralForm::new(c[0], c[1], c[2], c[3], c[4], 1.0);
        self.general = Some(general);

        let params = general.to_params().ok_or_else(|| {
            ConicError::NotAnEllipse(format!(
                "discriminant {:e}, A*C {:e}",
                general.discriminant(),
                general.a * general.c
            ))
        })?;
        debug!(
            h = params.h,
            k = params.k,
            a = params.a,
            b = params.b,
            theta = params.theta,
            "ellipse fitted"
        );
        self.params = Some(params);
        Ok(params)
    }

    /// The fitted general form, if [`fit`](Self::fit) got that far.
    pub fn general_form(&self) -> Option<&ConicGeneralForm> {
        self.general.as_ref()
    }

    /// The fitted geometric parameters, if the fit produced an ellipse.
    pub fn params(&self) -> Option<&ConicParams> {
        self.params.as_ref()
    }

    /// True when the fit produced an ellipse with positive semi-axes.
    pub fn is_valid(&self) -> bool {
        match (&self.general, &self.params) {
            (Some(g), Some(p)) => p.a > 0.0 && p.b > 0.0 && g.discriminant() < 0.0,
            _ => false,
        }
    }

    /// Conic polynomial at `p`.
    pub fn value_at(&self, p: Point) -> Option<f64> {
        self.general.as_ref().map(|g| g.value_at(p))
    }

    /// Point on the ellipse at parameter `t`.
    pub fn point_at(&self, t: f64) -> Option<Point> {
        self.params.as_ref().map(|p| p.point_at(t))
    }

    /// Topmost and bottommost ellipse points, larger y first.
    pub fn find_y_extrema(&self) -> Option<(Point, Point)> {
        self.params.as_ref().map(ConicParams::y_extrema)
    }

    /// Crossings of the horizontal line at `y`, sorted by x.
    pub fn find_points_at_y(&self, y: f64) -> Option<(Point, Point)> {
        self.general.as_ref()?.points_at_y(y)
    }

    /// Tangent line at `p` from the conic gradient.
    pub fn tangent_line_at(&self, p: Point) -> Option<LineCoeffs> {
        self.general.as_ref().map(|g| g.tangent_at(p))
    }

    /// True if `p` lies strictly outside the ellipse.
    ///
    /// Decided by comparing signs with the conic value at the center, so it
    /// does not depend on the overall sign the `F = 1` normalization gave
    /// the coefficients.
    pub fn is_outside(&self, p: Point) -> bool {
        match (&self.general, &self.params) {
            (Some(g), Some(params)) => g.value_at(p) * g.value_at(params.center()) < 0.0,
            _ => false,
        }
    }

    /// The two tangent lines through an external point.
    ///
    /// Returns `[None, None]` without a valid fit or when `p` is not
    /// outside the ellipse. Otherwise, with `(u, v)` the position of `p` in
    /// the frame where the ellipse is the unit circle, `r = |(u, v)|` and
    /// `φ = atan2(v, u)`, the contact points sit at parameters `φ ± α` with
    /// `α = acos(1/r)`, and each line is the tangent at its contact point.
    pub fn tangent_lines_through(&self, p: Point) -> [Option<LineCoeffs>; 2] {
        let (Some(general), Some(params)) = (&self.general, &self.params) else {
            return [None, None];
        };
        if !self.is_outside(p) {
            return [None, None];
        }
        let (u, v) = params.to_unit_frame(p);
        let r = u.hypot(v);
        let phi = v.atan2(u);
        let alpha = (1.0 / r).clamp(-1.0, 1.0).acos();

        [phi + alpha, phi - alpha].map(|t| {
            let contact = params.point_at(t);
            contact
                .is_finite()
                .then(|| general.tangent_at(contact))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn sample(h: f64, k: f64, a: f64, b: f64, theta: f64) -> Vec<Point> {
        let (s, c) = theta.sin_cos();
        (0..5)
            .map(|i| {
                let t = 0.2 + TAU * i as f64 / 5.0;
                let (u, v) = (a * t.cos(), b * t.sin());
                Point::new(h + u * c - v * s, k + u * s + v * c)
            })
            .collect()
    }

    #[test]
    fn test_point_count_checked() {
        assert!(matches!(
            EllipseFit::new(&[Point::default(); 4]),
            Err(ConicError::PointCount {
                expected: 5,
                got: 4
            })
        ));
    }

    #[test]
    fn test_fit_exact_ellipse() {
        let mut fit = EllipseFit::new(&sample(0.0, 0.0, 10.0, 5.0, 0.0)).unwrap();
        let p = fit.fit().unwrap();
        assert!(fit.is_valid());
        assert!(p.h.abs() < 1e-6 && p.k.abs() < 1e-6);
        assert!((p.a - 10.0).abs() < 1e-4);
        assert!((p.b - 5.0).abs() < 1e-4);
        assert!(fit.general_form().unwrap().discriminant() < 0.0);
    }

    #[test]
    fn test_fit_collinear_is_invalid() {
        let pts: Vec<Point> = (1..=5).map(|i| Point::new(i as f64, i as f64)).collect();
        let mut fit = EllipseFit::new(&pts).unwrap();
        assert!(matches!(fit.fit(), Err(ConicError::SingularSystem { .. })));
        assert!(!fit.is_valid());
        assert!(fit.general_form().is_none());
        assert_eq!(fit.tangent_lines_through(Point::new(100.0, 0.0)), [None, None]);
        assert!(fit.find_y_extrema().is_none());
    }

    #[test]
    fn test_fit_hyperbola_keeps_general_form() {
        // Points on x² - y² = -1 (both branches)
        let pts = [
            Point::new(0.0, 1.0),
            Point::new(1.0, 2f64.sqrt()),
            Point::new(-1.0, 2f64.sqrt()),
            Point::new(2.0, -(5f64.sqrt())),
            Point::new(0.5, -(1.25f64.sqrt())),
        ];
        let mut fit = EllipseFit::new(&pts).unwrap();
        assert!(matches!(fit.fit(), Err(ConicError::NotAnEllipse(_))));
        assert!(fit.general_form().is_some());
        assert!(fit.params().is_none());
        assert!(!fit.is_valid());
    }

    #[test]
    fn test_set_point_clears_fit() {
        let mut fit = EllipseFit::fitted(&sample(50.0, 40.0, 10.0, 5.0, 0.0)).unwrap();
        assert!(fit.is_valid());
        fit.set_point(2, Point::new(0.0, 0.0)).unwrap();
        assert!(!fit.is_valid());
        assert!(fit.set_point(5, Point::default()).is_err());
    }

    #[test]
    fn test_tangents_touch_ellipse() {
        let fit = EllipseFit::fitted(&sample(0.0, 0.0, 10.0, 5.0, 0.0)).unwrap();
        let [l1, l2] = fit.tangent_lines_through(Point::new(20.0, 0.0));
        for line in [l1.unwrap(), l2.unwrap()] {
            // Passes through the external point
            assert!(line.eval(Point::new(20.0, 0.0)).abs() < 1e-9 * line.dx.abs().max(1.0));
            // Substitute x = (c - dy*y)/dx into x²/100 + y²/25 = 1; the
            // resulting quadratic in y has a double root
            let (m, q) = (-line.dy / line.dx, line.c / line.dx);
            let qa = m * m / 100.0 + 1.0 / 25.0;
            let qb = 2.0 * m * q / 100.0;
            let qc = q * q / 100.0 - 1.0;
            let disc = qb * qb - 4.0 * qa * qc;
            assert!(disc.abs() < 1e-9, "discriminant {disc}");
        }
    }

    #[test]
    fn test_contact_points() {
        let fit = EllipseFit::fitted(&sample(0.0, 0.0, 10.0, 5.0, 0.0)).unwrap();
        let [l1, l2] = fit.tangent_lines_through(Point::new(20.0, 0.0));
        let (l1, l2) = (l1.unwrap(), l2.unwrap());
        // Contact points (5, ±4.330) lie on both the ellipse and their line
        let y = 5.0 * (0.75f64).sqrt();
        let hits = [Point::new(5.0, y), Point::new(5.0, -y)];
        assert!(hits.iter().any(|&p| l1.eval(p).abs() < 1e-6));
        assert!(hits.iter().any(|&p| l2.eval(p).abs() < 1e-6));
    }

    #[test]
    fn test_no_tangents_from_inside_or_boundary() {
        let fit = EllipseFit::fitted(&sample(100.0, 100.0, 10.0, 5.0, 0.3)).unwrap();
        assert_eq!(fit.tangent_lines_through(Point::new(100.0, 100.0)), [None, None]);
        assert_eq!(fit.tangent_lines_through(Point::new(103.0, 101.0)), [None, None]);
        assert!(fit.is_outside(Point::new(200.0, 100.0)));
        assert!(!fit.is_outside(Point::new(101.0, 100.0)));
    }

    #[test]
    fn test_outside_test_independent_of_origin() {
        // Origin inside: value at center is positive
        let inside = EllipseFit::fitted(&sample(1.0, 1.0, 10.0, 5.0, 0.0)).unwrap();
        // Origin outside: value at center is negative
        let outside = EllipseFit::fitted(&sample(100.0, 80.0, 10.0, 5.0, 0.0)).unwrap();
        assert!(inside.value_at(Point::new(1.0, 1.0)).unwrap() > 0.0);
        assert!(outside.value_at(Point::new(100.0, 80.0)).unwrap() < 0.0);
        assert!(inside.is_outside(Point::new(30.0, 1.0)));
        assert!(outside.is_outside(Point::new(130.0, 80.0)));
    }

    #[test]
    fn test_points_at_y_through_center() {
        let fit = EllipseFit::fitted(&sample(0.0, 0.0, 10.0, 5.0, 0.0)).unwrap();
        let (l, r) = fit.find_points_at_y(0.0).unwrap();
        assert!((l.x + 10.0).abs() < 1e-6);
        assert!((r.x - 10.0).abs() < 1e-6);
        assert!(fit.find_points_at_y(50.0).is_none());
    }
}
