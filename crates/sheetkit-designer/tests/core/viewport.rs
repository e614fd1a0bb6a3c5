use proptest::prelude::*;
use sheetkit_core::{Point, SheetConfig};
use sheetkit_designer::sheet_layout::SheetLayout;
use sheetkit_designer::viewport::Viewport;

fn fitted(width: f64, height: f64) -> Viewport {
    let mut vp = Viewport::new(width, height);
    SheetLayout::compute(&SheetConfig::default(), width, height).apply_to(&mut vp);
    vp
}

#[test]
fn test_paper_y_goes_up_screen_y_goes_down() {
    let vp = fitted(1200.0, 800.0);
    let s0 = vp.paper_to_screen(Point::ORIGIN);
    let s1 = vp.paper_to_screen(Point::new(0.0, 10.0));
    assert!(s1.y < s0.y);
    let s2 = vp.paper_to_screen(Point::new(10.0, 0.0));
    assert!(s2.x > s0.x);
}

#[test]
fn test_device_pixels_follow_ratio() {
    let mut vp = fitted(1200.0, 800.0);
    vp.set_device_pixel_ratio(2.0);
    let p = Point::new(12.5, -40.0);
    let screen = vp.paper_to_screen(p);
    let device = vp.paper_to_device(p);
    assert!((device.x - 2.0 * screen.x).abs() < 1e-9);
    assert!((device.y - 2.0 * screen.y).abs() < 1e-9);
    let back = vp.device_to_paper(device);
    assert!(back.distance_to(&p) < 1e-9);
}

#[test]
fn test_wheel_keeps_cursor_point_fixed() {
    let mut vp = fitted(1200.0, 800.0);
    let cursor = Point::new(900.0, 200.0);
    let before = vp.screen_to_paper(cursor);
    vp.wheel(-120.0, cursor);
    assert!((vp.zoom() - 1.1).abs() < 1e-12);
    let after = vp.screen_to_paper(cursor);
    assert!(before.distance_to(&after) < 1e-9);
}

#[test]
fn test_wheel_clamps_to_limits() {
    let mut vp = fitted(1200.0, 800.0);
    let cursor = Point::new(600.0, 400.0);
    for _ in 0..100 {
        vp.wheel(120.0, cursor);
    }
    assert!((vp.zoom() - 0.1).abs() < 1e-12);
    for _ in 0..200 {
        vp.wheel(-120.0, cursor);
    }
    assert!((vp.zoom() - 5.0).abs() < 1e-12);
}

#[test]
fn test_reset_restores_identity() {
    let mut vp = fitted(1200.0, 800.0);
    vp.wheel(-1.0, Point::new(10.0, 10.0));
    vp.pan_by(30.0, -12.0);
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 0.0);
    assert_eq!(vp.pan_y(), 0.0);
}

proptest! {
    #[test]
    fn paper_screen_round_trip(
        x in -300.0f64..300.0,
        y in -300.0f64..300.0,
        zoom in 0.1f64..5.0,
        pan_x in -500.0f64..500.0,
        pan_y in -500.0f64..500.0,
    ) {
        let mut vp = fitted(1200.0, 800.0);
        vp.set_zoom(zoom);
        vp.set_pan(pan_x, pan_y);
        let p = Point::new(x, y);
        let back = vp.screen_to_paper(vp.paper_to_screen(p));
        prop_assert!(back.distance_to(&p) < 1e-6);
    }
}
