//! Conic coefficients and geometric ellipse parameters
//!
//! [`ConicGeneralForm`] is the implicit conic
//! `A x² + B xy + C y² + D x + E y + F = 0`; [`ConicParams`] is the
//! center / semi-axes / rotation description of the same curve when it is
//! an ellipse.

use rectiplane_core::{LineCoeffs, Point};

/// General conic `A x² + B xy + C y² + D x + E y + F = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicGeneralForm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ConicGeneralForm {
    /// Create from the six coefficients.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Conic polynomial evaluated at `p`; zero on the curve.
    pub fn value_at(&self, p: Point) -> f64 {
        let (x, y) = (p.x, p.y);
        self.a * x * x + self.b * x * y + self.c * y * y + self.d * x + self.e * y + self.f
    }

    /// `B² - 4AC`; negative for ellipses.
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// True for an ellipse-type quadratic part: `B² - 4AC < 0` and `A·C > 0`.
    pub fn is_ellipse(&self) -> bool {
        self.discriminant() < 0.0 && self.a * self.c > 0.0
    }

    /// Gradient `(∂/∂x, ∂/∂y)` of the conic polynomial at `p`.
    pub fn gradient(&self, p: Point) -> (f64, f64) {
        (
            2.0 * self.a * p.x + self.b * p.y + self.d,
            self.b * p.x + 2.0 * self.c * p.y + self.e,
        )
    }

    /// Tangent line at a point on the conic.
    ///
    /// `Fx·X + Fy·Y = Fx·x + Fy·y` with `(Fx, Fy)` the gradient at `p`.
    /// For a point off the curve this is the line through `p` normal to the
    /// gradient.
    pub fn tangent_at(&self, p: Point) -> LineCoeffs {
        let (fx, fy) = self.gradient(p);
        LineCoeffs::new(fx, fy, fx * p.x + fy * p.y)
    }

    /// Center of the conic, or `None` when `B² - 4AC` is zero.
    pub fn center(&self) -> Option<Point> {
        let den = self.discriminant();
        if den == 0.0 || !den.is_finite() {
            return None;
        }
        let h = (2.0 * self.c * self.d - self.b * self.e) / den;
        let k = (2.0 * self.a * self.e - self.b * self.d) / den;
        Some(Point::new(h, k))
    }

    /// The two crossings of the horizontal line at `y`, sorted by x.
    ///
    /// Solves `A x² + (B y + D) x + (C y² + E y + F) = 0`. Returns `None` if
    /// the discriminant is negative or the equation is not quadratic in x.
    pub fn points_at_y(&self, y: f64) -> Option<(Point, Point)> {
        let qa = self.a;
        let qb = self.b * y + self.d;
        let qc = self.c * y * y + self.e * y + self.f;
        if qa == 0.0 || !qa.is_finite() {
            return None;
        }
        let disc = qb * qb - 4.0 * qa * qc;
        if disc.is_nan() || disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let x1 = (-qb - sq) / (2.0 * qa);
        let x2 = (-qb + sq) / (2.0 * qa);
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        Some((Point::new(lo, y), Point::new(hi, y)))
    }

    /// Convert an ellipse to geometric parameters.
    ///
    /// Returns `None` unless the conic is an ellipse with finite center and
    /// strictly positive, finite semi-axes. The semi-axes are
    /// `sqrt(|-F0 / A'|)` and `sqrt(|-F0 / C'|)` where `F0` is the conic value
    /// at the center and `A'`, `C'` are the second-order coefficients in the
    /// frame rotated by `theta`. The absolute value means an imaginary
    /// ellipse still yields real axes; [`ConicParams::axes_sign_consistent`]
    /// reports when that happened.
    pub fn to_params(&self) -> Option<ConicParams> {
        if !self.is_ellipse() {
            return None;
        }
        let center = self.center()?;
        let theta = if self.b == 0.0 {
            0.0
        } else {
            0.5 * self.b.atan2(self.a - self.c)
        };
        let (s, c) = theta.sin_cos();
        let a_rot = self.a * c * c + self.b * c * s + self.c * s * s;
        let c_rot = self.a * s * s - self.b * c * s + self.c * c * c;
        let f0 = self.value_at(center);

        let sa = -f0 / a_rot;
        let sb = -f0 / c_rot;
        let params = ConicParams {
            h: center.x,
            k: center.y,
            a: sa.abs().sqrt(),
            b: sb.abs().sqrt(),
            theta,
            sign_consistent: sa > 0.0 && sb > 0.0,
        };
        params.is_finite_positive().then_some(params)
    }
}

/// Geometric ellipse: center `(h, k)`, semi-axes `a` (along `theta`) and
/// `b`, rotation `theta` in radians.
///
/// `theta` comes from `½·atan2(B, A - C)` and may point along either
/// principal axis, so `a` is not necessarily the larger semi-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicParams {
    pub h: f64,
    pub k: f64,
    pub a: f64,
    pub b: f64,
    pub theta: f64,
    sign_consistent: bool,
}

impl ConicParams {
    /// Create parameters for a real ellipse.
    pub const fn new(h: f64, k: f64, a: f64, b: f64, theta: f64) -> Self {
        Self {
            h,
            k,
            a,
            b,
            theta,
            sign_consistent: true,
        }
    }

    /// False when the semi-axes were only real after taking an absolute
    /// value, i.e. the fitted conic was an imaginary ellipse.
    pub fn axes_sign_consistent(&self) -> bool {
        self.sign_consistent
    }

    /// The ellipse center.
    pub fn center(&self) -> Point {
        Point::new(self.h, self.k)
    }

    /// Point at parameter `t`:
    /// `(h + a cos t cos θ - b sin t sin θ, k + a cos t sin θ + b sin t cos θ)`.
    pub fn point_at(&self, t: f64) -> Point {
        let (st, ct) = t.sin_cos();
        let (s, c) = self.theta.sin_cos();
        Point::new(
            self.h + self.a * ct * c - self.b * st * s,
            self.k + self.a * ct * s + self.b * st * c,
        )
    }

    /// Topmost and bottommost points, larger y first.
    ///
    /// `t = atan2(b/a, tan θ)` is a stationary point of `y(t)` and `t + π`
    /// is the other one.
    pub fn y_extrema(&self) -> (Point, Point) {
        let t = (self.b / self.a).atan2(self.theta.tan());
        let p1 = self.point_at(t);
        let p2 = self.point_at(t + std::f64::consts::PI);
        if p1.y >= p2.y { (p1, p2) } else { (p2, p1) }
    }

    /// `p` in the ellipse's own frame, scaled so the ellipse is the unit
    /// circle.
    pub fn to_unit_frame(&self, p: Point) -> (f64, f64) {
        let (s, c) = self.theta.sin_cos();
        let (dx, dy) = (p.x - self.h, p.y - self.k);
        let xr = dx * c + dy * s;
        let yr = -dx * s + dy * c;
        (xr / self.a, yr / self.b)
    }

    fn is_finite_positive(&self) -> bool {
        self.h.is_finite()
            && self.k.is_finite()
            && self.theta.is_finite()
            && self.a.is_finite()
            && self.b.is_finite()
            && self.a > 0.0
            && self.b > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x²/100 + y²/25 = 1 scaled so F = 1.
    fn axis_aligned() -> ConicGeneralForm {
        ConicGeneralForm::new(-0.01, 0.0, -0.04, 0.0, 0.0, 1.0)
    }

    #[test]
    fn test_axis_aligned_params() {
        let p = axis_aligned().to_params().unwrap();
        assert!(p.h.abs() < 1e-12 && p.k.abs() < 1e-12);
        assert!((p.a - 10.0).abs() < 1e-12);
        assert!((p.b - 5.0).abs() < 1e-12);
        assert_eq!(p.theta, 0.0);
        assert!(p.axes_sign_consistent());
    }

    #[test]
    fn test_hyperbola_and_parabola_rejected() {
        let hyperbola = ConicGeneralForm::new(1.0, 0.0, -1.0, 0.0, 0.0, 1.0);
        assert!(hyperbola.discriminant() > 0.0);
        assert!(hyperbola.to_params().is_none());
        let parabola = ConicGeneralForm::new(1.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        assert!(parabola.to_params().is_none());
    }

    #[test]
    fn test_imaginary_ellipse_flagged() {
        // x² + y² + 1 = 0 has no real points
        let p = ConicGeneralForm::new(1.0, 0.0, 1.0, 0.0, 0.0, 1.0)
            .to_params()
            .unwrap();
        assert!(!p.axes_sign_consistent());
        assert!((p.a - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_points_at_y() {
        let g = axis_aligned();
        let (l, r) = g.points_at_y(0.0).unwrap();
        assert!((l.x + 10.0).abs() < 1e-12 && (r.x - 10.0).abs() < 1e-12);
        assert!(g.points_at_y(6.0).is_none());
        let (l, r) = g.points_at_y(3.0).unwrap();
        assert!((l.x + 8.0).abs() < 1e-9 && (r.x - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_tangent_at_vertex_is_vertical() {
        let t = axis_aligned().tangent_at(Point::new(10.0, 0.0));
        assert_eq!(t.dy, 0.0);
        assert!((t.c / t.dx - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_extrema() {
        let p = ConicParams::new(2.0, 3.0, 4.0, 1.0, 0.5);
        let (top, bottom) = p.y_extrema();
        assert!(top.y > bottom.y);
        // Symmetric about the center
        assert!((top.x + bottom.x - 4.0).abs() < 1e-12);
        assert!((top.y + bottom.y - 6.0).abs() < 1e-12);
        // No sampled point lies above the reported maximum
        for i in 0..720 {
            let q = p.point_at(i as f64 * std::f64::consts::TAU / 720.0);
            assert!(q.y <= top.y + 1e-9);
            assert!(q.y >= bottom.y - 1e-9);
        }
    }

    #[test]
    fn test_unit_frame() {
        let p = ConicParams::new(1.0, 1.0, 4.0, 2.0, std::f64::consts::FRAC_PI_2);
        let (u, v) = p.to_unit_frame(p.point_at(0.3));
        assert!((u - 0.3f64.cos()).abs() < 1e-12);
        assert!((v - 0.3f64.sin()).abs() < 1e-12);
    }
}
