//! End-to-end: an A3 sheet at 1:4 in metres, a 200 x 100 mm front view and
//! one auto dimension picked on its bottom edge.

use sheetkit_core::{
    DimensionKind, DimensionMode, Drawing, DrawingView, Line2D, LineType, Orientation, PaperSize,
    Point, Projection, ProjectionType, SheetConfig, Unit,
};
use sheetkit_designer::dimension::{drawing_label, real_value};
use sheetkit_designer::interaction::{InteractionController, PointerButton, PointerEvent, Tool};
use sheetkit_designer::renderer::render;
use sheetkit_designer::sheet_layout::SheetLayout;
use sheetkit_designer::store::{DrawingStore, MemoryStore};
use sheetkit_designer::viewport::Viewport;
use sheetkit_settings::EngineSettings;

fn a3_drawing() -> Drawing {
    let sheet = SheetConfig {
        size: PaperSize::A3,
        orientation: Orientation::Landscape,
        scale: 0.25,
        units: Unit::Meter,
        ..SheetConfig::default()
    };
    let mut drawing = Drawing::new("bracket", sheet);
    drawing.dimensions.config.show_unit = true;

    let (w, h) = (200.0, 100.0);
    let lines = vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(w, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(w, 0.0), Point::new(w, h), LineType::VisibleSharp),
        Line2D::new(Point::new(w, h), Point::new(0.0, h), LineType::VisibleSharp),
        Line2D::new(Point::new(0.0, h), Point::new(0.0, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(50.0, 0.0), Point::new(50.0, h), LineType::HiddenSharp),
    ];
    drawing.views.push(DrawingView::new(
        ProjectionType::Front,
        Projection::from_lines(lines),
        Point::ORIGIN,
    ));
    drawing
}

#[test]
fn test_auto_dimension_on_a3_sheet() {
    let drawing = a3_drawing();
    let mut viewport = Viewport::new(1400.0, 1000.0);
    SheetLayout::compute(&drawing.sheet, 1400.0, 1000.0).apply_to(&mut viewport);
    let mut store = MemoryStore::new(drawing);
    let mut controller = InteractionController::new(viewport, EngineSettings::default());
    controller.set_tool(Tool::Dimension(DimensionMode::Auto));

    // Projection (0,0) and (200,0) are view-local (-100,-50) and (100,-50).
    for paper in [Point::new(-100.0, -50.0), Point::new(100.0, -50.0)] {
        let screen = controller.viewport().paper_to_screen(paper);
        controller.pointer_down(&mut store, PointerEvent::new(screen, PointerButton::Left));
    }

    let drawing = store.drawing();
    assert_eq!(drawing.dimensions.items.len(), 1);
    let dim = &drawing.dimensions.items[0];
    assert_eq!(dim.kind, DimensionKind::Horizontal);
    assert!((dim.value - 200.0).abs() < 1e-9);
    assert!((real_value(dim, drawing) - 800.0).abs() < 1e-9);
    assert_eq!(drawing_label(dim, drawing), "800.00 m");

    let image = render(drawing, &controller.render_state(), controller.viewport());
    assert_eq!((image.width(), image.height()), (1400, 1000));
}
