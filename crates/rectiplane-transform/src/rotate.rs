//! Display rotation
//!
//! Rotates a finished raster about its center for presentation. The
//! output keeps the input size; corners rotated out of view are dropped
//! and uncovered areas stay transparent. Rotation never feeds back into
//! the homography.

use crate::TransformResult;
use rectiplane_core::{Pix, PixMut};

/// Rotate `pix` about its center by `radians` (nearest neighbour).
///
/// Positive angles turn the image clockwise on screen (y axis pointing
/// down), matching a canvas `rotate()` call. An angle of zero returns a
/// shared clone without resampling.
///
/// # Errors
///
/// Returns [`crate::TransformError::Core`] if the output raster cannot be
/// created.
pub fn rotate_about_center(pix: &Pix, radians: f64) -> TransformResult<Pix> {
    if radians == 0.0 || !radians.is_finite() {
        return Ok(pix.clone());
    }
    let mut dst = PixMut::new(pix.width(), pix.height())?;
    let (sin_a, cos_a) = radians.sin_cos();
    rotate_by_sampling_impl(pix, &mut dst, cos_a, sin_a);
    Ok(dst.into())
}

// ============================================================================
// Sampling rotation implementation
// ============================================================================

/// Inverse-map every destination pixel center through the rotation.
fn rotate_by_sampling_impl(src: &Pix, dst: &mut PixMut, cos_a: f64, sin_a: f64) {
    let sw = src.width() as f64;
    let sh = src.height() as f64;
    let (cx, cy) = (sw / 2.0, sh / 2.0);

    for i in 0..dst.height() {
        let dy = i as f64 + 0.5 - cy;
        for j in 0..dst.width() {
            let dx = j as f64 + 0.5 - cx;

            let x = (cx + dx * cos_a + dy * sin_a).floor();
            let y = (cy - dx * sin_a + dy * cos_a).floor();

            if x >= 0.0 && y >= 0.0 && x < sw && y < sh {
                let val = src.get_pixel_unchecked(x as u32, y as u32);
                dst.set_pixel_unchecked(j, i, val);
            }
        }
    }
}
