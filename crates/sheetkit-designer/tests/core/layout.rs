use sheetkit_core::{BoundingBox, DrawingView, Line2D, LineType, Point, Projection, ProjectionType};
use sheetkit_designer::layout::{fit_all_sizes, fit_all_views, place_new_view, quadrant_slots};
use sheetkit_settings::LayoutSettings;

fn unbiased() -> LayoutSettings {
    LayoutSettings {
        bias_x_ratio: 0.0,
        bias_y_ratio: 0.0,
        ..LayoutSettings::default()
    }
}

fn box_view(w: f64, h: f64, position: Point) -> DrawingView {
    let lines = vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(w, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(w, 0.0), Point::new(w, h), LineType::VisibleSharp),
    ];
    DrawingView::new(ProjectionType::Front, Projection::from_lines(lines), position)
}

#[test]
fn test_two_by_two_has_equal_gaps() {
    let sizes = [(100.0, 50.0); 4];
    let p = fit_all_sizes(&sizes, 400.0, 300.0, &unbiased());
    assert_eq!(p.len(), 4);
    assert_eq!(p[0], Point::new(-54.0, 29.0));
    assert_eq!(p[1], Point::new(54.0, 29.0));
    assert_eq!(p[2], Point::new(-54.0, -29.0));
    assert_eq!(p[3], Point::new(54.0, -29.0));

    let horizontal_gap = (p[1].x - 50.0) - (p[0].x + 50.0);
    let vertical_gap = (p[0].y - 25.0) - (p[2].y + 25.0);
    assert!((horizontal_gap - 8.0).abs() < 1e-9);
    assert!((vertical_gap - 8.0).abs() < 1e-9);
}

#[test]
fn test_fit_all_is_deterministic() {
    let sizes = [(80.0, 40.0), (30.0, 60.0), (50.0, 50.0)];
    let settings = LayoutSettings::default();
    let a = fit_all_sizes(&sizes, 380.0, 250.0, &settings);
    let b = fit_all_sizes(&sizes, 380.0, 250.0, &settings);
    assert_eq!(a, b);
}

#[test]
fn test_fit_all_views_skips_hidden() {
    let mut hidden = box_view(10.0, 10.0, Point::ORIGIN);
    hidden.visible = false;
    let shown = box_view(20.0, 10.0, Point::new(100.0, 100.0));
    let id = shown.id;

    let placed = fit_all_views(&[hidden, shown], 400.0, 300.0, &unbiased());
    assert_eq!(placed, vec![(id, Point::ORIGIN)]);
}

#[test]
fn test_new_views_fill_quadrants_then_line_up() {
    let (pw, ph) = (420.0, 297.0);
    let slots = quadrant_slots(pw, ph);
    let b = BoundingBox::from_center(Point::ORIGIN, 40.0, 20.0);

    let mut views: Vec<DrawingView> = Vec::new();
    for expected in slots {
        let p = place_new_view(&views, &b, pw, ph, 8.0);
        assert_eq!(p, expected);
        views.push(box_view(40.0, 20.0, p));
    }

    let fifth = place_new_view(&views, &b, pw, ph, 8.0);
    assert!((fifth.x - (slots[3].x + 20.0 + 8.0 + 20.0)).abs() < 1e-9);
    assert_eq!(fifth.y, slots[3].y);
}
