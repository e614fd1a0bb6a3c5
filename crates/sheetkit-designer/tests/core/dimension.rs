use sheetkit_core::{
    ArrowStyle, DimensionConfig, DimensionKind, DimensionMode, DrawingView, Line2D, LineType,
    Point, Projection, ProjectionType, Segment, SheetConfig,
};
use sheetkit_designer::dimension::{
    auto_dimension, format_label, line_length_dimension, synthesize, with_offset,
};

fn rect_view(w: f64, h: f64) -> DrawingView {
    let lines = vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(w, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(w, 0.0), Point::new(w, h), LineType::VisibleSharp),
        Line2D::new(Point::new(w, h), Point::new(0.0, h), LineType::VisibleSharp),
        Line2D::new(Point::new(0.0, h), Point::new(0.0, 0.0), LineType::VisibleSharp),
    ];
    DrawingView::new(
        ProjectionType::Front,
        Projection::from_lines(lines),
        Point::ORIGIN,
    )
}

#[test]
fn test_auto_mode_examples() {
    let config = DimensionConfig::default();
    let h = synthesize(Point::ORIGIN, Point::new(10.0, 0.0), DimensionMode::Auto, 10.0, &config, None).unwrap();
    assert_eq!(h.kind, DimensionKind::Horizontal);
    assert!((h.value - 10.0).abs() < 1e-9);

    let v = synthesize(Point::ORIGIN, Point::new(0.0, 10.0), DimensionMode::Auto, 10.0, &config, None).unwrap();
    assert_eq!(v.kind, DimensionKind::Vertical);
    assert!((v.value - 10.0).abs() < 1e-9);

    let a = synthesize(Point::ORIGIN, Point::new(10.0, 10.0), DimensionMode::Auto, 10.0, &config, None).unwrap();
    assert_eq!(a.kind, DimensionKind::Aligned);
    assert!((a.value - 200f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_vertical_dimension_goes_right() {
    let config = DimensionConfig::default();
    let d = synthesize(
        Point::new(0.0, 0.0),
        Point::new(5.0, 30.0),
        DimensionMode::Vertical,
        10.0,
        &config,
        None,
    )
    .unwrap();
    // Line sits right of the rightmost point.
    assert!((d.dimension_line.start.x - 15.0).abs() < 1e-9);
    assert!((d.dimension_line.end.x - 15.0).abs() < 1e-9);
    assert!((d.value - 30.0).abs() < 1e-9);
    assert!((d.text_rotation_deg - 90.0).abs() < 1e-9);
}

#[test]
fn test_regeneration_is_idempotent() {
    let config = DimensionConfig::default();
    let d = synthesize(
        Point::new(-3.0, 4.0),
        Point::new(21.0, 17.0),
        DimensionMode::Aligned,
        -6.5,
        &config,
        None,
    )
    .unwrap();
    let again = with_offset(&d, d.offset, &config).unwrap();
    assert_eq!(again, d);
}

#[test]
fn test_arrows_point_outward() {
    let config = DimensionConfig {
        arrow_style: ArrowStyle::Open,
        ..DimensionConfig::default()
    };
    let d = synthesize(Point::ORIGIN, Point::new(40.0, 0.0), DimensionMode::Horizontal, 10.0, &config, None).unwrap();
    assert_eq!(d.dimension_line.start_arrow.direction, Point::new(-1.0, 0.0));
    assert_eq!(d.dimension_line.end_arrow.direction, Point::new(1.0, 0.0));
    assert_eq!(d.dimension_line.start_arrow.style, ArrowStyle::Open);
}

#[test]
fn test_auto_dimension_width_and_height() {
    let view = rect_view(200.0, 100.0);
    let config = DimensionConfig::default();
    let dims = auto_dimension(&view, &config);
    assert_eq!(dims.len(), 2);

    let width = &dims[0];
    assert_eq!(width.kind, DimensionKind::Horizontal);
    assert!((width.value - 200.0).abs() < 1e-9);
    // Offset is max(10, 5% of 200); the width line goes below.
    assert!((width.dimension_line.start.y - (-50.0 - 10.0)).abs() < 1e-9);

    let height = &dims[1];
    assert_eq!(height.kind, DimensionKind::Vertical);
    assert!((height.value - 100.0).abs() < 1e-9);
    assert!((height.dimension_line.start.x - 110.0).abs() < 1e-9);
    assert_eq!(height.view_id, Some(view.id));
}

#[test]
fn test_line_length_dimension_is_aligned() {
    let view = rect_view(60.0, 80.0);
    let line = Segment::new(Point::new(-30.0, -40.0), Point::new(30.0, 40.0));
    let d = line_length_dimension(&line, &view, &DimensionConfig::default()).unwrap();
    assert_eq!(d.kind, DimensionKind::Aligned);
    assert!((d.value - 100.0).abs() < 1e-9);
}

#[test]
fn test_label_uses_real_value() {
    let sheet = SheetConfig::default();
    let config = DimensionConfig {
        show_unit: true,
        ..DimensionConfig::default()
    };
    let d = synthesize(Point::ORIGIN, Point::new(50.0, 0.0), DimensionMode::Horizontal, 10.0, &config, None).unwrap();
    assert_eq!(format_label(&d, &config, &sheet, ProjectionType::Front), "200.00 m");
}
