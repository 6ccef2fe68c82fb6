//! Projective transformations for images
//!
//! A [`Homography`] maps each pixel of the square output canvas back to a
//! position in the source photograph. It is built in closed form from the
//! four corners of the marked quadrilateral and then used for inverse
//! mapping: every destination pixel pulls exactly one source pixel.
//!
//! | function | purpose |
//! |---|---|
//! | [`Homography::from_square`] | square `(0,0)..(w,h)` onto four source corners |
//! | [`Homography::apply`] | map one destination coordinate |
//! | [`projective_sampled`] | resample into a new raster |
//! | [`projective_sampled_into`] | resample into an existing raster |

use crate::{TransformError, TransformResult};
use rectiplane_core::{Pix, PixMut, Point};
use tracing::trace;

/// Relative tolerance for the 2x2 determinant in [`Homography::from_square`].
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Projective transformation coefficients (8 values, `h9 = 1`)
///
/// Defines the mapping:
/// ```text
/// x' = (h1*x + h2*y + h3) / (h7*x + h8*y + 1)
/// y' = (h4*x + h5*y + h6) / (h7*x + h8*y + 1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    coeffs: [f64; 8],
}

impl Default for Homography {
    fn default() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl Homography {
    /// Create from raw coefficients `[h1, ..., h8]`.
    pub fn from_coeffs(coeffs: [f64; 8]) -> Self {
        Self { coeffs }
    }

    /// Get the raw coefficients.
    pub fn coeffs(&self) -> &[f64; 8] {
        &self.coeffs
    }

    /// Map the square `(0,0), (w,0), (w,h), (0,h)` onto `corners`.
    ///
    /// `corners` are the top-left, top-right, bottom-right and bottom-left
    /// analogs in the source image. The perspective terms come from a 2x2
    /// system in the corner differences; the affine terms follow by
    /// back-substitution, and the result is normalized by `w` and `h`.
    ///
    /// # Errors
    ///
    /// - [`TransformError::InvalidParameters`] if `w` or `h` is not a positive
    ///   finite number, or a corner is not finite
    /// - [`TransformError::DegenerateQuadrilateral`] if the 2x2 determinant
    ///   is (near) zero (e.g. collinear corners), if the projective
    ///   denominator vanishes at a square corner, or if any coefficient
    ///   comes out non-finite
    pub fn from_square(w: f64, h: f64, corners: [Point; 4]) -> TransformResult<Self> {
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(TransformError::InvalidParameters(format!(
                "square size must be positive, got {w}x{h}"
            )));
        }
        if corners.iter().any(|p| !p.is_finite()) {
            return Err(TransformError::InvalidParameters(
                "corner coordinates must be finite".to_string(),
            ));
        }

        let [p1, p2, p3, p4] = corners;
        let bx = p1.x - p2.x + p3.x - p4.x;
        let by = p1.y - p2.y + p3.y - p4.y;
        let a11 = p2.x - p3.x;
        let a12 = p4.x - p3.x;
        let a21 = p2.y - p3.y;
        let a22 = p4.y - p3.y;

        let det = a11 * a22 - a12 * a21;
        let scale = a11.abs().max(a12.abs()).max(a21.abs()).max(a22.abs());
        if det.is_nan() || det.abs() <= DEGENERATE_EPSILON * scale * scale {
            return Err(TransformError::DegenerateQuadrilateral(format!(
                "corner determinant {det:e}"
            )));
        }

        let g = (bx * a22 - a12 * by) / det;
        let hh = (a11 * by - bx * a21) / det;

        // Denominator at (0,0), (w,0), (w,h), (0,h)
        for d in [1.0 + g, 1.0 + g + hh, 1.0 + hh] {
            if d.abs() <= DEGENERATE_EPSILON {
                return Err(TransformError::DegenerateQuadrilateral(
                    "three corners are collinear".to_string(),
                ));
            }
        }

        let coeffs = [
            (g * p2.x + p2.x - p1.x) / w,
            (hh * p4.x + p4.x - p1.x) / h,
            p1.x,
            (g * p2.y + p2.y - p1.y) / w,
            (hh * p4.y + p4.y - p1.y) / h,
            p1.y,
            g / w,
            hh / h,
        ];
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(TransformError::DegenerateQuadrilateral(
                "non-finite coefficients".to_string(),
            ));
        }
        trace!(?coeffs, "homography");
        Ok(Self { coeffs })
    }

    /// Map a destination coordinate to the source plane.
    ///
    /// There is no failure mode: a vanishing denominator yields infinite or
    /// NaN coordinates, which samplers treat as out of bounds.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> Point {
        let [h1, h2, h3, h4, h5, h6, h7, h8] = self.coeffs;
        let denom = h7 * x + h8 * y + 1.0;
        Point::new((h1 * x + h2 * y + h3) / denom, (h4 * x + h5 * y + h6) / denom)
    }
}

/// Apply a sampled projective transformation into a new raster.
///
/// # Arguments
/// * `pix` - Source image
/// * `h` - Mapping from destination pixels to source coordinates
/// * `out_w`, `out_h` - Destination size
///
/// # Errors
///
/// Returns [`TransformError::Core`] if the destination size is zero.
pub fn projective_sampled(pix: &Pix, h: &Homography, out_w: u32, out_h: u32) -> TransformResult<Pix> {
    let mut dst = PixMut::new(out_w, out_h)?;
    projective_sampled_into(pix, h, &mut dst);
    Ok(dst.into())
}

/// Apply a sampled projective transformation into an existing raster.
///
/// `dst` is cleared first, then every destination pixel `(x, y)` is mapped
/// through `h`, floored to integer source indices, and copied if it lands
/// inside `[0, w) x [0, h)` of the source. Pixels that map outside (or to a
/// non-finite position) stay transparent. No interpolation is done.
pub fn projective_sampled_into(pix: &Pix, h: &Homography, dst: &mut PixMut) {
    dst.clear();
    let sw = pix.width() as f64;
    let sh = pix.height() as f64;
    let (dw, dh) = (dst.width(), dst.height());

    for y in 0..dh {
        for x in 0..dw {
            let p = h.apply(x as f64, y as f64);
            let sx = p.x.floor();
            let sy = p.y.floor();
            // NaN fails every comparison
            if sx >= 0.0 && sy >= 0.0 && sx < sw && sy < sh {
                let val = pix.get_pixel_unchecked(sx as u32, sy as u32);
                dst.set_pixel_unchecked(x, y, val);
            }
        }
    }
}
