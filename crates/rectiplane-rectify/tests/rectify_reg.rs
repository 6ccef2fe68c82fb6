//! Rectification regression test
//!
//! Drives a [`Session`] end to end on the synthetic quadrant pattern in
//! both modes, and checks frame coalescing during drags.

use rectiplane_core::{Point, color};
use rectiplane_rectify::{
    Mode, RectifyConfig, RectifyError, Resolution, Session, TangentStrategy, derive_circle_corners,
};
use rectiplane_test::{RegParams, fixtures};

fn quadrant_session() -> Session {
    let mut session = Session::new(RectifyConfig::default());
    // 600x600 on a 600 canvas: canvas and image coordinates coincide
    session
        .load_image(fixtures::quadrant_pattern(600).unwrap())
        .unwrap();
    session
}

#[test]
fn rectify_reg_trapezoid() {
    let mut rp = RegParams::new("rectify_trapezoid");
    let mut session = quadrant_session();

    let pts = fixtures::trapezoid_side_points(300.0, 150.0, 450.0, 100.0, 200.0);
    session.set_points(&pts);

    let expected = [
        Point::new(200.0, 150.0),
        Point::new(400.0, 150.0),
        Point::new(500.0, 450.0),
        Point::new(100.0, 450.0),
    ];
    for (tp, e) in session.transform_points().iter().zip(expected) {
        rp.compare_points(e, tp.unwrap(), 1e-6);
    }

    let full = session.full().unwrap().clone();
    rp.write_pix(&full).unwrap();
    rp.compare_values(600.0, full.width() as f64, 0.0);

    // The trapezoid lies inside the source, so nothing is left transparent
    let opaque = full.data().iter().filter(|&&p| color::alpha(p) == 255).count();
    rp.compare_values(360_000.0, opaque as f64, 0.0);

    // The output center comes from the diagonal crossing at (300, 250),
    // just above the horizontal split of the pattern
    let probes = [
        ((290, 300), fixtures::QUADRANT_TL),
        ((310, 300), fixtures::QUADRANT_TR),
        ((100, 100), fixtures::QUADRANT_TL),
        ((500, 100), fixtures::QUADRANT_TR),
        ((500, 550), fixtures::QUADRANT_BR),
        ((100, 550), fixtures::QUADRANT_BL),
    ];
    for ((x, y), want) in probes {
        rp.compare_values(want as f64, full.get_pixel(x, y).unwrap() as f64, 0.0);
    }

    // A half-turn display rotation swaps diagonal quadrants
    session.set_rotation(std::f64::consts::PI);
    let shown = session.presented(Resolution::Full).unwrap().unwrap();
    rp.write_pix(&shown).unwrap();
    rp.compare_values(
        fixtures::QUADRANT_BR as f64,
        shown.get_pixel(100, 50).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup());
}

#[test]
fn rectify_reg_parallel_sides() {
    let mut session = quadrant_session();
    let before = session.full().unwrap().clone();

    // Left side drawn parallel to the top side
    let mut pts = fixtures::trapezoid_side_points(300.0, 150.0, 450.0, 100.0, 200.0);
    pts[0] = Point::new(150.0, 150.0);
    pts[1] = Point::new(100.0, 150.0);
    session.set_points(&pts);

    assert!(session.transform_points()[0].is_none());
    assert!(matches!(
        session.recompute(Resolution::Full),
        Err(RectifyError::DegenerateGeometry(_))
    ));
    // The last good output stays on screen
    assert_eq!(session.full().unwrap().data(), before.data());
}

#[test]
fn rectify_reg_too_few_points() {
    let mut session = quadrant_session();
    let pts = fixtures::trapezoid_side_points(300.0, 150.0, 450.0, 100.0, 200.0);
    session.set_points(&pts);
    let full = session.full().unwrap().clone();
    let corners = session.transform_points();

    // Five of eight trapezoid points: nothing changes
    session.set_points(&pts[..5]);
    assert_eq!(session.points().len(), 5);
    assert_eq!(session.full().unwrap().data(), full.data());
    assert_eq!(session.transform_points(), corners);
    assert!(session.ellipse().is_none());
    assert!(matches!(
        session.recompute(Resolution::Full),
        Err(RectifyError::InsufficientControlPoints { needed: 8, got: 5 })
    ));
    assert_eq!(session.full().unwrap().data(), full.data());

    // Four of five circle points keep the fitted ellipse and its output
    session.set_mode(Mode::Circle);
    let circle = fixtures::ellipse_points(250.0, 300.0, 150.0, 100.0, 0.0, 0.3, 5);
    session.set_points(&circle);
    let full = session.full().unwrap().clone();
    let corners = session.transform_points();
    let ellipse = *session.ellipse().unwrap();

    session.set_points(&circle[..4]);
    assert_eq!(session.full().unwrap().data(), full.data());
    assert_eq!(session.transform_points(), corners);
    assert_eq!(*session.ellipse().unwrap(), ellipse);
    assert!(matches!(
        session.recompute(Resolution::Full),
        Err(RectifyError::InsufficientControlPoints { needed: 5, got: 4 })
    ));
}

#[test]
fn rectify_reg_circle() {
    let mut rp = RegParams::new("rectify_circle");
    let mut session = quadrant_session();
    session.set_mode(Mode::Circle);
    assert_eq!(session.points().len(), 5);

    // Axis-aligned ellipse whose bounding box is (100, 200)..(400, 400)
    let pts = fixtures::ellipse_points(250.0, 300.0, 150.0, 100.0, 0.0, 0.3, 5);
    session.set_points(&pts);

    let ellipse = *session.ellipse().unwrap();
    rp.compare_values(250.0, ellipse.h, 1e-6);
    rp.compare_values(300.0, ellipse.k, 1e-6);
    rp.compare_values(150.0, ellipse.a.max(ellipse.b), 1e-4);
    rp.compare_values(100.0, ellipse.a.min(ellipse.b), 1e-4);

    let expected = [
        Point::new(100.0, 200.0),
        Point::new(400.0, 200.0),
        Point::new(400.0, 400.0),
        Point::new(100.0, 400.0),
    ];
    for (tp, e) in session.transform_points().iter().zip(expected) {
        rp.compare_points(e, tp.unwrap(), 1e-3);
    }

    let full = session.full().unwrap().clone();
    rp.write_pix(&full).unwrap();
    let probes = [
        ((100, 100), fixtures::QUADRANT_TL),
        ((500, 100), fixtures::QUADRANT_TR),
        ((500, 500), fixtures::QUADRANT_BR),
        ((100, 500), fixtures::QUADRANT_BL),
    ];
    for ((x, y), want) in probes {
        rp.compare_values(want as f64, full.get_pixel(x, y).unwrap() as f64, 0.0);
    }

    // Collinear points: no ellipse, no transform points, output kept
    let flat: Vec<Point> = (0..5).map(|i| Point::new(100.0 + 50.0 * i as f64, 300.0)).collect();
    session.set_points(&flat);
    assert!(session.ellipse().is_none());
    assert!(session.transform_points().iter().all(Option::is_none));
    assert!(session.full().is_some());

    assert!(rp.cleanup());
}

#[test]
fn rectify_reg_strategy_fallback() {
    let tilted = fixtures::ellipse_points(300.0, 250.0, 120.0, 60.0, 0.5, 0.3, 5);

    // Reference line far to the right: vanishing point is outside
    let far = derive_circle_corners(&tilted, 900.0).unwrap();
    assert_eq!(far.strategy, TangentStrategy::VanishingPoint);

    // Reference through the center: vanishing point inside, midline used
    let near = derive_circle_corners(&tilted, 300.0).unwrap();
    assert_eq!(near.strategy, TangentStrategy::Midline);

    // Both strategies share the extrema lines
    assert!((far.corners[0].y - near.corners[0].y).abs() < 1e-9);
    assert!((far.corners[2].y - near.corners[2].y).abs() < 1e-9);
}

#[test]
fn rectify_reg_coalescing() {
    let mut session = quadrant_session();
    let grab = session.points().get(0).unwrap();
    assert_eq!(session.pointer_down(grab), Some(0));
    assert!(session.is_dragging());

    // Many moves before a tick produce a single preview
    for i in 0..25 {
        assert!(session.pointer_move(Point::new(grab.x - i as f64, grab.y)));
    }
    assert!(session.frame_pending());
    assert!(session.preview().is_none());
    assert!(session.on_frame());
    assert!(!session.on_frame());
    let preview = session.preview().unwrap().clone();
    assert_eq!((preview.width(), preview.height()), (200, 200));

    // A move after the tick schedules exactly one more
    session.pointer_move(Point::new(grab.x - 30.0, grab.y));
    assert!(session.on_frame());
    assert!(!session.on_frame());

    // Release drops any pending preview and renders at full size
    session.pointer_move(Point::new(grab.x - 35.0, grab.y));
    session.pointer_up();
    assert!(!session.frame_pending());
    assert!(!session.is_dragging());
    assert!(!session.on_frame());
    assert_eq!(session.full().unwrap().width(), 600);
    assert_eq!(session.points().get(0), Some(Point::new(grab.x - 35.0, grab.y)));
}
