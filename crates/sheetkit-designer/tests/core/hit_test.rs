use sheetkit_core::{
    Annotation, DimensionConfig, DimensionMode, Drawing, DrawingView, Line2D, LineType, Point,
    Projection, ProjectionType, SheetConfig,
};
use sheetkit_designer::dimension::synthesize;
use sheetkit_designer::hit_test::{
    hit_annotation, hit_dimension, hit_entity, hit_line, AnnotationPart, Hit,
};
use sheetkit_settings::HitTestSettings;

/// 100 mm square view centred on the paper origin.
fn square_drawing() -> Drawing {
    let mut drawing = Drawing::new("hits", SheetConfig::default());
    let lines = vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(100.0, 0.0), Point::new(100.0, 100.0), LineType::VisibleSharp),
        Line2D::new(Point::new(100.0, 100.0), Point::new(0.0, 100.0), LineType::HiddenSharp),
        Line2D::new(Point::new(0.0, 100.0), Point::new(0.0, 0.0), LineType::VisibleSharp),
    ];
    drawing.views.push(DrawingView::new(
        ProjectionType::Front,
        Projection::from_lines(lines),
        Point::ORIGIN,
    ));
    drawing
}

fn add_top_dimension(drawing: &mut Drawing) {
    let view_id = drawing.views[0].id;
    let dim = synthesize(
        Point::new(-50.0, 50.0),
        Point::new(50.0, 50.0),
        DimensionMode::Horizontal,
        10.0,
        &DimensionConfig::default(),
        Some(view_id),
    )
    .unwrap();
    drawing.dimensions.items.push(dim);
}

#[test]
fn test_line_tolerance_is_strict() {
    let drawing = square_drawing();
    let settings = HitTestSettings::default();
    assert!(hit_line(&drawing, Point::new(0.0, -40.0), &settings).is_none());
    let hit = hit_line(&drawing, Point::new(0.0, -40.5), &settings).unwrap();
    assert!((hit.distance - 9.5).abs() < 1e-9);
    assert_eq!(hit.line_type, LineType::VisibleSharp);
}

#[test]
fn test_dimension_beats_view() {
    let mut drawing = square_drawing();
    add_top_dimension(&mut drawing);
    let settings = HitTestSettings::default();

    assert_eq!(
        hit_entity(&drawing, Point::new(0.0, 60.0), &settings),
        Some(Hit::Dimension(0))
    );
    assert_eq!(
        hit_entity(&drawing, Point::new(0.0, 0.0), &settings),
        Some(Hit::View(drawing.views[0].id))
    );
    assert_eq!(hit_entity(&drawing, Point::new(300.0, 300.0), &settings), None);
}

#[test]
fn test_equal_distances_keep_first() {
    let mut drawing = square_drawing();
    add_top_dimension(&mut drawing);
    add_top_dimension(&mut drawing);
    let settings = HitTestSettings::default();
    assert_eq!(hit_dimension(&drawing, Point::new(10.0, 61.0), &settings), Some(0));
}

#[test]
fn test_annotation_anchor_then_box() {
    let mut drawing = square_drawing();
    let note = Annotation::new("NOTE", Point::new(200.0, 100.0), Point::new(150.0, 80.0), None);
    let id = note.id;
    drawing.annotations.items.push(note);
    let settings = HitTestSettings::default();

    let anchor = hit_annotation(&drawing, Point::new(151.0, 80.0), &settings).unwrap();
    assert_eq!(anchor.id, id);
    assert_eq!(anchor.part, AnnotationPart::Anchor);

    let body = hit_annotation(&drawing, Point::new(205.0, 96.0), &settings).unwrap();
    assert_eq!(body.part, AnnotationPart::Box);

    assert!(hit_annotation(&drawing, Point::new(300.0, 0.0), &settings).is_none());
}

#[test]
fn test_entities_of_hidden_views_are_ignored() {
    let mut drawing = square_drawing();
    add_top_dimension(&mut drawing);
    drawing.views[0].visible = false;
    let settings = HitTestSettings::default();
    assert_eq!(hit_entity(&drawing, Point::new(0.0, 60.0), &settings), None);
}
