use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn fitted(window: (u32, u32), image: (u32, u32)) -> Viewport {
    let mut vp = Viewport::new();
    vp.resize(
        PixelSize::new(window.0, window.1),
        PixelSize::new(image.0, image.1),
    );
    vp
}

#[test]
fn resize_uses_the_limiting_axis() {
    let vp = fitted((800, 600), (400, 400));
    assert!(approx(vp.fit(), 1.5));
    let vp = fitted((800, 600), (1600, 300));
    assert!(approx(vp.fit(), 0.5));
    // user zoom is untouched by geometry changes
    assert!(approx(vp.scale(), 1.0));
}

#[test]
fn resize_ignores_degenerate_sizes() {
    let mut vp = fitted((800, 600), (400, 400));
    vp.resize(PixelSize::new(0, 600), PixelSize::new(400, 400));
    vp.resize(PixelSize::new(800, 600), PixelSize::new(400, 0));
    assert!(approx(vp.fit(), 1.5));
    assert_eq!(vp.image_size(), PixelSize::new(400, 400));
}

#[test]
fn zoom_drag_to_domain_end_quadruples_scale() {
    let mut vp = fitted((800, 600), (400, 300));
    vp.begin_zoom(100.0);
    vp.update_zoom(400.0);
    assert!(approx(vp.scale(), 4.0));
    vp.update_zoom(250.0);
    assert!(approx(vp.scale(), 2.5));
    vp.end_zoom();
    assert!(vp.gesture().is_none());
    assert!(approx(vp.scale(), 2.5));
}

#[test]
fn zoom_below_domain_hits_exact_floor_with_proportional_offsets() {
    let mut vp = fitted((800, 600), (400, 300));
    vp.begin_pan(Point::new(0.0, 0.0));
    vp.update_pan(Point::new(160.0, 0.0));
    vp.end_pan();
    let before = vp.offset();
    assert!(approx(before.x, 0.2));

    vp.begin_zoom(100.0);
    vp.update_zoom(-50.0);
    assert!(approx(vp.scale(), MIN_SCALE));
    // effective multiplier is MIN_SCALE / anchor scale = 0.1
    assert!(approx(vp.offset().x, before.x * 0.1));
    assert!(approx(vp.offset().y, 0.0));
}

#[test]
fn zoom_multiplier_is_relative_to_the_anchor_snapshot() {
    let mut vp = fitted((800, 600), (400, 300));
    vp.begin_zoom(0.0);
    vp.update_zoom(300.0);
    vp.end_zoom();
    assert!(approx(vp.scale(), 4.0));

    vp.begin_zoom(500.0);
    vp.update_zoom(450.0);
    assert!(approx(vp.scale(), 2.0));
    // floor relative to a larger anchor: 4 * 0 -> 0.1, multiplier 0.025
    vp.update_zoom(-1000.0);
    assert!(approx(vp.scale(), MIN_SCALE));
}

#[test]
fn pan_is_normalized_by_fitted_size_not_zoom() {
    let mut vp = fitted((800, 600), (400, 300)); // fit = 2, on-screen 800x600
    vp.begin_pan(Point::new(10.0, 10.0));
    vp.update_pan(Point::new(90.0, -50.0));
    assert!(approx(vp.offset().x, 0.1));
    assert!(approx(vp.offset().y, -0.1));
    vp.end_pan();

    // zoomed in 4x: the same travel pans by the same fraction
    vp.reset_to_fit();
    vp.begin_zoom(0.0);
    vp.update_zoom(300.0);
    vp.end_zoom();
    vp.begin_pan(Point::new(10.0, 10.0));
    vp.update_pan(Point::new(90.0, -50.0));
    assert!(approx(vp.offset().x, 0.1));
    assert!(approx(vp.offset().y, -0.1));
}

#[test]
fn gestures_are_mutually_exclusive() {
    let mut vp = fitted((800, 600), (400, 300));
    vp.begin_pan(Point::new(0.0, 0.0));
    vp.begin_zoom(0.0);
    assert_eq!(vp.gesture().unwrap().kind, GestureKind::Zoom);

    // pan updates are ignored while zooming
    vp.update_pan(Point::new(400.0, 400.0));
    assert_eq!(vp.offset(), Vec2::ZERO);

    // ending the inactive gesture does not end the active one
    vp.end_pan();
    assert!(vp.gesture().is_some());
    vp.end_zoom();
    assert!(vp.gesture().is_none());
}

#[test]
fn end_without_gesture_is_noop() {
    let mut vp = fitted((800, 600), (400, 300));
    let before = vp.clone();
    vp.end_zoom();
    vp.end_pan();
    vp.end_zoom();
    assert_eq!(vp, before);

    vp.update_zoom(1000.0);
    vp.update_pan(Point::new(5.0, 5.0));
    assert_eq!(vp, before);
}

#[test]
fn reset_to_fit_restores_defaults_mid_gesture() {
    let mut vp = fitted((800, 600), (400, 300));
    vp.begin_pan(Point::new(0.0, 0.0));
    vp.update_pan(Point::new(100.0, 100.0));
    vp.begin_zoom(0.0);
    vp.update_zoom(200.0);
    vp.reset_to_fit();
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.offset(), Vec2::ZERO);
    assert!(vp.gesture().is_none());
    vp.update_zoom(300.0);
    assert_eq!(vp.scale(), 1.0);
}

#[test]
fn visible_rect_centres_fitted_image() {
    let vp = fitted((800, 600), (400, 400)); // fit 1.5 -> 600x600
    let r = vp.visible_rect(PixelSize::new(800, 600));
    assert!(approx(r.x0, 100.0));
    assert!(approx(r.y0, 0.0));
    assert!(approx(r.x1, 700.0));
    assert!(approx(r.y1, 600.0));
}

#[test]
fn visible_rect_tracks_zoom_and_offset() {
    let mut vp = fitted((800, 600), (400, 300)); // fit 2 -> 800x600
    vp.begin_pan(Point::new(0.0, 0.0));
    vp.update_pan(Point::new(80.0, 0.0)); // offset.x = 0.1
    vp.end_pan();
    vp.begin_zoom(0.0);
    vp.update_zoom(100.0); // multiplier 2
    vp.end_zoom();

    assert!(approx(vp.scale(), 2.0));
    assert!(approx(vp.offset().x, 0.2));
    let r = vp.visible_rect(PixelSize::new(800, 600));
    assert!(approx(r.width(), 1600.0));
    assert!(approx(r.height(), 1200.0));
    assert!(approx(r.center().x, 400.0 + 0.2 * 800.0));
    assert!(approx(r.center().y, 300.0));
}

#[test]
fn no_pointer_sequence_breaks_the_floor() {
    let mut vp = fitted((640, 480), (1920, 1080));
    let xs = [-1.0e6, -120.0, 3.0, 1.0e6, f64::NAN, -100.0, 299.0];
    for (i, &x) in xs.iter().enumerate() {
        vp.begin_zoom(0.0);
        vp.update_zoom(x);
        if i % 2 == 0 {
            vp.end_zoom();
        }
        assert!(vp.scale() >= MIN_SCALE - 1e-12);
        assert!(vp.scale().is_finite());
    }
}
