//! Interactive rectification session
//!
//! [`Session`] owns everything the point editor mutates: the loaded image,
//! its letterbox placement, the control points, the derived transform
//! points and the two output rasters. Input handlers take `&mut self`, so
//! there is exactly one writer.
//!
//! # Frame flow
//!
//! ```text
//! pointer_move ──> point edited, FrameGate::request()
//! on_frame     ──> FrameGate::take() ? preview resample : nothing
//! pointer_up   ──> pending frame dropped, full resample
//! ```
//!
//! However many moves arrive between two display ticks, at most one
//! preview is computed per tick.

use crate::circle::{CIRCLE_POINTS, TangentStrategy, derive_circle_corners};
use crate::config::RectifyConfig;
use crate::trapezoid::{TRAPEZOID_POINTS, complete_corners, trapezoid_corners};
use crate::viewport::{Letterbox, default_circle_points, default_trapezoid_points};
use crate::{RectifyError, RectifyResult};
use rectiplane_conic::ConicParams;
use rectiplane_core::{Pix, Point, Pta};
use rectiplane_transform::{Homography, projective_sampled, rotate_about_center};
use tracing::{debug, info, warn};

/// Which reference shape the control points describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Eight points, two on each side of a trapezoid.
    #[default]
    Trapezoid,
    /// Five points on a circle seen in perspective.
    Circle,
}

impl Mode {
    /// Number of control points the mode uses.
    pub fn max_points(&self) -> usize {
        match self {
            Mode::Trapezoid => TRAPEZOID_POINTS,
            Mode::Circle => CIRCLE_POINTS,
        }
    }
}

/// Output raster variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Small raster rendered while dragging.
    Preview,
    /// Canvas-sized raster rendered on release.
    Full,
}

/// Coalesces redraw requests to one per display tick.
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. Returns `true` if this call scheduled it, `false`
    /// if one was already pending.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consume the pending frame, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Geometry derived from the current control points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    /// Source-image correspondences of the output corners.
    pub transform_points: [Option<Point>; 4],
    /// Fitted ellipse (circle mode only).
    pub ellipse: Option<ConicParams>,
    /// Tangent strategy used (circle mode only).
    pub strategy: Option<TangentStrategy>,
}

/// Derive transform points from control points in image coordinates.
///
/// `reference_x` is only used in circle mode.
///
/// # Errors
///
/// Propagates the errors of
/// [`trapezoid_corners`](crate::trapezoid::trapezoid_corners) and
/// [`derive_circle_corners`](crate::circle::derive_circle_corners). In
/// trapezoid mode a parallel pair is not an error; its corner is `None`.
pub fn derive(mode: Mode, points: &[Point], reference_x: f64) -> RectifyResult<Derivation> {
    match mode {
        Mode::Trapezoid => Ok(Derivation {
            transform_points: trapezoid_corners(points)?,
            ..Default::default()
        }),
        Mode::Circle => {
            let out = derive_circle_corners(points, reference_x)?;
            Ok(Derivation {
                transform_points: out.corners.map(Some),
                ellipse: Some(out.params),
                strategy: Some(out.strategy),
            })
        }
    }
}

/// Resample `source` so that `corners` land on the corners of a
/// `size` x `size` square.
///
/// # Errors
///
/// - [`RectifyError::DegenerateGeometry`] if a corner is missing
/// - [`RectifyError::Transform`] if the corners do not define a homography
pub fn rectify(source: &Pix, corners: &[Option<Point>; 4], size: u32) -> RectifyResult<Pix> {
    let corners = complete_corners(corners)?;
    let s = size as f64;
    let h = Homography::from_square(s, s, corners)?;
    Ok(projective_sampled(source, &h, size, size)?)
}

/// Point-editing and rectification state.
#[derive(Debug, Clone)]
pub struct Session {
    config: RectifyConfig,
    mode: Mode,
    image: Option<Pix>,
    letterbox: Option<Letterbox>,
    /// Control points in canvas coordinates.
    points: Pta,
    dragging: Option<usize>,
    gate: FrameGate,
    derivation: Derivation,
    preview: Option<Pix>,
    full: Option<Pix>,
    rotation: f64,
}

impl Session {
    pub fn new(config: RectifyConfig) -> Self {
        Self {
            config,
            mode: Mode::default(),
            image: None,
            letterbox: None,
            points: Pta::new(),
            dragging: None,
            gate: FrameGate::new(),
            derivation: Derivation::default(),
            preview: None,
            full: None,
            rotation: 0.0,
        }
    }

    pub fn config(&self) -> &RectifyConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn image(&self) -> Option<&Pix> {
        self.image.as_ref()
    }

    pub fn letterbox(&self) -> Option<&Letterbox> {
        self.letterbox.as_ref()
    }

    /// Control points in canvas coordinates.
    pub fn points(&self) -> &Pta {
        &self.points
    }

    pub fn transform_points(&self) -> [Option<Point>; 4] {
        self.derivation.transform_points
    }

    /// The fitted ellipse, in circle mode with a valid fit.
    pub fn ellipse(&self) -> Option<&ConicParams> {
        self.derivation.ellipse.as_ref()
    }

    pub fn strategy(&self) -> Option<TangentStrategy> {
        self.derivation.strategy
    }

    pub fn preview(&self) -> Option<&Pix> {
        self.preview.as_ref()
    }

    pub fn full(&self) -> Option<&Pix> {
        self.full.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn frame_pending(&self) -> bool {
        self.gate.is_pending()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the display rotation in radians. Only affects [`presented`].
    ///
    /// [`presented`]: Session::presented
    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
    }

    /// Load a new source image and reset the points for the current mode.
    ///
    /// # Errors
    ///
    /// Returns [`RectifyError::Core`] if the canvas size is zero. Errors
    /// from the first rectification are logged, not returned.
    pub fn load_image(&mut self, image: Pix) -> RectifyResult<()> {
        let lb = Letterbox::fit(image.width(), image.height(), self.config.canvas_size)?;
        info!(
            width = image.width(),
            height = image.height(),
            scale = lb.scale(),
            "image loaded"
        );
        self.image = Some(image);
        self.letterbox = Some(lb);
        self.preview = None;
        self.full = None;
        self.reset_points();
        self.refresh(Resolution::Full);
        Ok(())
    }

    /// Switch mode. Points are replaced by the new mode's defaults.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        info!(?mode, "mode changed");
        self.mode = mode;
        self.reset_points();
        self.refresh(Resolution::Full);
    }

    /// Replace the control points (canvas coordinates) and recompute.
    ///
    /// Points beyond the mode's maximum are ignored.
    pub fn set_points(&mut self, points: &[Point]) {
        self.points = points.iter().copied().take(self.mode.max_points()).collect();
        self.dragging = None;
        self.gate.take();
        self.refresh(Resolution::Full);
    }

    fn reset_points(&mut self) {
        self.dragging = None;
        self.gate.take();
        self.derivation = Derivation::default();
        self.points = match (&self.letterbox, self.mode) {
            (Some(lb), Mode::Trapezoid) => default_trapezoid_points(lb),
            (Some(lb), Mode::Circle) => default_circle_points(lb),
            (None, _) => Pta::new(),
        };
    }

    /// Pick up the point under the pointer, or append a new one.
    ///
    /// Returns the index of the grabbed or appended point.
    pub fn pointer_down(&mut self, p: Point) -> Option<usize> {
        if let Some(i) = self.points.find_within(p, self.config.hit_radius) {
            debug!(index = i, "point grabbed");
            self.dragging = Some(i);
            return Some(i);
        }
        if self.points.len() < self.mode.max_points() {
            self.points.push(p);
            return Some(self.points.len() - 1);
        }
        None
    }

    /// Drag the held point. Returns `true` if a point moved.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(i) = self.dragging else {
            return false;
        };
        if self.points.set(i, p).is_err() {
            self.dragging = None;
            return false;
        }
        self.gate.request();
        true
    }

    /// Release the held point and render at full resolution.
    pub fn pointer_up(&mut self) {
        self.dragging = None;
        self.gate.take();
        self.refresh(Resolution::Full);
    }

    /// Display tick. Renders one preview if a frame was requested.
    ///
    /// Returns `true` if a preview was computed.
    pub fn on_frame(&mut self) -> bool {
        if !self.gate.take() {
            return false;
        }
        self.refresh(Resolution::Preview);
        true
    }

    /// Recompute and log failures; used by the event handlers.
    fn refresh(&mut self, resolution: Resolution) {
        match self.recompute(resolution) {
            Ok(()) => {}
            Err(RectifyError::InsufficientControlPoints { needed, got }) => {
                debug!(needed, got, "waiting for more points");
            }
            Err(RectifyError::NoImage) => {}
            Err(e) => warn!(?resolution, error = %e, "frame skipped"),
        }
    }

    /// Derive transform points and resample into the buffer for
    /// `resolution`.
    ///
    /// On failure the previous buffer is kept. A wrong point count leaves
    /// all state untouched; any other failure also clears the derived
    /// transform points (or keeps the partial trapezoid corners).
    ///
    /// # Errors
    ///
    /// - [`RectifyError::NoImage`] before an image is loaded
    /// - the errors of [`derive`] and [`rectify`]
    pub fn recompute(&mut self, resolution: Resolution) -> RectifyResult<()> {
        let (Some(image), Some(lb)) = (&self.image, &self.letterbox) else {
            return Err(RectifyError::NoImage);
        };
        let image_points = lb.points_to_image(&self.points);
        let reference_x = lb
            .canvas_to_image(Point::new(self.config.canvas_size as f64 / 2.0, 0.0))
            .x;

        let derivation = match derive(self.mode, &image_points, reference_x) {
            Ok(d) => d,
            Err(e @ RectifyError::InsufficientControlPoints { .. }) => return Err(e),
            Err(e) => {
                self.derivation = Derivation::default();
                return Err(e);
            }
        };
        self.derivation = derivation;

        let size = match resolution {
            Resolution::Preview => self.config.preview_size,
            Resolution::Full => self.config.canvas_size,
        };
        let out = rectify(image, &self.derivation.transform_points, size)?;
        debug!(?resolution, size, "rectified");
        match resolution {
            Resolution::Preview => self.preview = Some(out),
            Resolution::Full => self.full = Some(out),
        }
        Ok(())
    }

    /// The buffer for `resolution` with the display rotation applied.
    ///
    /// # Errors
    ///
    /// Returns [`RectifyError::Transform`] if rotation fails.
    pub fn presented(&self, resolution: Resolution) -> RectifyResult<Option<Pix>> {
        let buffer = match resolution {
            Resolution::Preview => &self.preview,
            Resolution::Full => &self.full,
        };
        buffer
            .as_ref()
            .map(|pix| rotate_about_center(pix, self.rotation))
            .transpose()
            .map_err(RectifyError::from)
    }
}
