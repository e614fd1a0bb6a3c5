use sheetkit_core::{Drawing, DrawingView, Line2D, LineType, Point, Projection, ProjectionType, SheetConfig};
use sheetkit_designer::snap::{find_snap, snap_candidates, SnapKind};
use sheetkit_settings::SnapSettings;

fn square_drawing(position: Point) -> Drawing {
    let mut drawing = Drawing::new("snap", SheetConfig::default());
    let lines = vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(100.0, 0.0), Point::new(100.0, 100.0), LineType::VisibleSharp),
        Line2D::new(Point::new(100.0, 100.0), Point::new(0.0, 100.0), LineType::VisibleSharp),
        Line2D::new(Point::new(0.0, 100.0), Point::new(0.0, 0.0), LineType::VisibleSharp),
    ];
    drawing.views.push(DrawingView::new(
        ProjectionType::Top,
        Projection::from_lines(lines),
        position,
    ));
    drawing
}

#[test]
fn test_square_has_corners_and_midpoints() {
    let drawing = square_drawing(Point::ORIGIN);
    let candidates = snap_candidates(&drawing.views[0], &SnapSettings::default());
    assert_eq!(candidates.len(), 8);
    let endpoints = candidates
        .iter()
        .filter(|c| c.kind == SnapKind::Endpoint)
        .count();
    assert_eq!(endpoints, 4);
}

#[test]
fn test_snap_reports_paper_point() {
    let drawing = square_drawing(Point::new(30.0, -20.0));
    let settings = SnapSettings::default();

    let corner = find_snap(&drawing, Point::new(-18.0, -68.0), &settings).unwrap();
    assert_eq!(corner.snap.kind, SnapKind::Endpoint);
    assert_eq!(corner.paper_point(), Point::new(-20.0, -70.0));

    let middle = find_snap(&drawing, Point::new(31.0, -69.0), &settings).unwrap();
    assert_eq!(middle.snap.kind, SnapKind::Midpoint);
    assert_eq!(middle.paper_point(), Point::new(30.0, -70.0));
}

#[test]
fn test_disabled_snapping_finds_nothing() {
    let drawing = square_drawing(Point::ORIGIN);
    let settings = SnapSettings {
        enabled: false,
        ..SnapSettings::default()
    };
    assert!(find_snap(&drawing, Point::new(-50.0, -50.0), &settings).is_none());
}
