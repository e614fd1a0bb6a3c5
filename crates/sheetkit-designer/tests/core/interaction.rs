use sheetkit_core::{
    DimensionConfig, DimensionKind, DimensionMode, Drawing, DrawingView, Line2D, LineType, Point,
    Projection, ProjectionType, SheetConfig,
};
use sheetkit_designer::dimension::synthesize;
use sheetkit_designer::interaction::{
    InteractionController, InteractionState, Key, PointerButton, PointerEvent, Selection, Tool,
};
use sheetkit_designer::sheet_layout::SheetLayout;
use sheetkit_designer::store::{DrawingStore, MemoryStore};
use sheetkit_designer::viewport::Viewport;
use sheetkit_settings::EngineSettings;

fn square_drawing() -> Drawing {
    let mut drawing = Drawing::new("interaction", SheetConfig::default());
    let lines = vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), LineType::VisibleSharp),
        Line2D::new(Point::new(100.0, 0.0), Point::new(100.0, 100.0), LineType::VisibleSharp),
        Line2D::new(Point::new(100.0, 100.0), Point::new(0.0, 100.0), LineType::VisibleSharp),
        Line2D::new(Point::new(0.0, 100.0), Point::new(0.0, 0.0), LineType::VisibleSharp),
    ];
    drawing.views.push(DrawingView::new(
        ProjectionType::Front,
        Projection::from_lines(lines),
        Point::ORIGIN,
    ));
    drawing
}

fn with_top_dimension(mut drawing: Drawing) -> Drawing {
    let dim = synthesize(
        Point::new(-50.0, 50.0),
        Point::new(50.0, 50.0),
        DimensionMode::Horizontal,
        10.0,
        &DimensionConfig::default(),
        Some(drawing.views[0].id),
    )
    .unwrap();
    drawing.dimensions.items.push(dim);
    drawing
}

fn controller() -> InteractionController {
    let mut viewport = Viewport::new(1200.0, 800.0);
    SheetLayout::compute(&SheetConfig::default(), 1200.0, 800.0).apply_to(&mut viewport);
    InteractionController::new(viewport, EngineSettings::default())
}

fn click(c: &InteractionController, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(c.viewport().paper_to_screen(Point::new(x, y)), PointerButton::Left)
}

fn move_to(c: &mut InteractionController, store: &mut MemoryStore, x: f64, y: f64) {
    let screen = c.viewport().paper_to_screen(Point::new(x, y));
    c.pointer_move(store, screen);
}

#[test]
fn test_drag_view_moves_it() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();

    let down = click(&c, 0.0, 0.0);
    c.pointer_down(&mut store, down);
    assert!(matches!(c.state(), InteractionState::DraggingView { .. }));

    move_to(&mut c, &mut store, 20.0, 10.0);
    let p = store.drawing().views[0].position;
    assert!(p.distance_to(&Point::new(20.0, 10.0)) < 1e-6);

    let up = click(&c, 20.0, 10.0);
    c.pointer_up(&mut store, up);
    assert_eq!(c.state(), &InteractionState::Idle);
}

#[test]
fn test_dimension_tool_two_picks() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    c.set_tool(Tool::Dimension(DimensionMode::Auto));

    let first = click(&c, -49.0, -49.0);
    c.pointer_down(&mut store, first);
    assert!(matches!(
        c.state(),
        InteractionState::PointPicking { first: Some(_) }
    ));
    assert_eq!(c.render_state().picks, vec![Point::new(-50.0, -50.0)]);

    let second = click(&c, 49.0, -49.0);
    c.pointer_down(&mut store, second);
    assert_eq!(c.state(), &InteractionState::Idle);

    let dims = &store.drawing().dimensions.items;
    assert_eq!(dims.len(), 1);
    assert_eq!(dims[0].kind, DimensionKind::Horizontal);
    assert!((dims[0].value - 100.0).abs() < 1e-9);
    assert_eq!(dims[0].view_id, Some(store.drawing().views[0].id));
}

#[test]
fn test_right_click_cancels_pick() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    c.set_tool(Tool::Dimension(DimensionMode::Auto));

    let first = click(&c, -50.0, -50.0);
    c.pointer_down(&mut store, first);
    let right = PointerEvent::new(first.position, PointerButton::Right);
    c.pointer_down(&mut store, right);
    assert_eq!(c.state(), &InteractionState::Idle);
    assert!(store.drawing().dimensions.items.is_empty());
}

#[test]
fn test_escape_priority() {
    let mut store = MemoryStore::new(with_top_dimension(square_drawing()));
    let mut c = controller();

    let on_dim = click(&c, 0.0, 60.0);
    c.pointer_down(&mut store, on_dim);
    assert_eq!(c.selection(), Selection::Dimension(0));
    c.key_down(&mut store, Key::Escape);
    assert_eq!(c.selection(), Selection::None);

    c.set_tool(Tool::Dimension(DimensionMode::Auto));
    let pick = click(&c, -50.0, -50.0);
    c.pointer_down(&mut store, pick);
    c.key_down(&mut store, Key::Escape);
    assert_eq!(c.state(), &InteractionState::Idle);
    assert_eq!(c.tool(), Tool::Dimension(DimensionMode::Auto));

    c.key_down(&mut store, Key::Escape);
    assert_eq!(c.tool(), Tool::Select);
}

#[test]
fn test_delete_selected_dimension() {
    let mut store = MemoryStore::new(with_top_dimension(square_drawing()));
    let mut c = controller();

    let on_dim = click(&c, 0.0, 60.0);
    c.pointer_down(&mut store, on_dim);
    c.key_down(&mut store, Key::Delete);
    assert!(store.drawing().dimensions.items.is_empty());
    assert!(c.selection().is_none());
}

#[test]
fn test_drag_selected_dimension_offset() {
    let mut store = MemoryStore::new(with_top_dimension(square_drawing()));
    let mut c = controller();

    let on_dim = click(&c, 0.0, 60.0);
    c.pointer_down(&mut store, on_dim);
    c.pointer_down(&mut store, on_dim);
    assert_eq!(
        c.state(),
        &InteractionState::DraggingDimensionOffset { index: 0 }
    );

    move_to(&mut c, &mut store, 0.0, 80.0);
    let dim = &store.drawing().dimensions.items[0];
    assert!((dim.offset - 30.0).abs() < 1e-6);
    assert!((dim.dimension_line.start.y - 80.0).abs() < 1e-6);
}

#[test]
fn test_note_text_editing() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    c.set_tool(Tool::Note);

    let down = click(&c, 200.0, 100.0);
    c.pointer_down(&mut store, down);
    let id = match c.state() {
        InteractionState::EditingAnnotationText { id, .. } => *id,
        other => panic!("unexpected state {:?}", other),
    };
    assert!(c.text_edit_overlay(store.drawing()).is_some());

    for key in [Key::Char('A'), Key::Char('B'), Key::Backspace, Key::Char('C')] {
        c.key_down(&mut store, key);
    }
    assert_eq!(c.render_state().editing, Some((id, "AC".to_string())));
    c.key_down(&mut store, Key::Enter);

    let note = store.drawing().annotation(id).unwrap();
    assert_eq!(note.text, "AC");
    assert!(note.anchor_point.distance_to(&Point::new(200.0, 100.0)) < 1e-6);
    assert!(note.position.distance_to(&Point::new(210.0, 110.0)) < 1e-6);
    assert_eq!(c.state(), &InteractionState::Idle);
}

#[test]
fn test_ctrl_drag_pans() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();

    c.pointer_down(&mut store, PointerEvent::left(100.0, 100.0).with_ctrl());
    c.pointer_move(&mut store, Point::new(110.0, 105.0));
    assert_eq!(c.viewport().pan_x(), 10.0);
    assert_eq!(c.viewport().pan_y(), 5.0);
    // Panning never moves views.
    assert_eq!(store.drawing().views[0].position, Point::ORIGIN);
}

#[test]
fn test_wheel_and_home() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    for _ in 0..100 {
        c.wheel(-1.0, Point::new(600.0, 400.0));
    }
    assert!((c.viewport().zoom() - 5.0).abs() < 1e-12);
    c.key_down(&mut store, Key::Home);
    assert_eq!(c.viewport().zoom(), 1.0);
}

#[test]
fn test_escape_cancels_view_drag() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();

    let down = click(&c, 0.0, 0.0);
    c.pointer_down(&mut store, down);
    move_to(&mut c, &mut store, 10.0, 10.0);
    c.key_down(&mut store, Key::Escape);
    assert_eq!(c.state(), &InteractionState::Idle);

    // Later moves only hover.
    move_to(&mut c, &mut store, 40.0, 40.0);
    let p = store.drawing().views[0].position;
    assert!(p.distance_to(&Point::new(10.0, 10.0)) < 1e-6);
}

#[test]
fn test_escape_cancels_dimension_offset_drag() {
    let mut store = MemoryStore::new(with_top_dimension(square_drawing()));
    let mut c = controller();

    let on_dim = click(&c, 0.0, 60.0);
    c.pointer_down(&mut store, on_dim);
    c.pointer_down(&mut store, on_dim);
    c.key_down(&mut store, Key::Escape);
    assert_eq!(c.state(), &InteractionState::Idle);
    // The drag is what Escape ended; the selection stays.
    assert_eq!(c.selection(), Selection::Dimension(0));

    move_to(&mut c, &mut store, 0.0, 90.0);
    assert!((store.drawing().dimensions.items[0].offset - 10.0).abs() < 1e-9);
}

#[test]
fn test_escape_discards_blank_note() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    c.set_tool(Tool::Note);

    let down = click(&c, 200.0, 100.0);
    c.pointer_down(&mut store, down);
    assert_eq!(store.drawing().annotations.items.len(), 1);
    c.key_down(&mut store, Key::Char('X'));
    c.key_down(&mut store, Key::Escape);

    assert!(store.drawing().annotations.items.is_empty());
    assert!(c.selection().is_none());
    assert_eq!(c.state(), &InteractionState::Idle);
}

#[test]
fn test_escape_keeps_existing_note_text() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    c.set_tool(Tool::Note);

    let first = click(&c, 200.0, 100.0);
    c.pointer_down(&mut store, first);
    c.key_down(&mut store, Key::Char('A'));
    c.key_down(&mut store, Key::Enter);
    let second = click(&c, 250.0, 100.0);
    c.pointer_down(&mut store, second);
    c.key_down(&mut store, Key::Escape);

    let notes = &store.drawing().annotations.items;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "A");
}

#[test]
fn test_radial_tool_measures_centre_to_rim() {
    let mut store = MemoryStore::new(square_drawing());
    let mut c = controller();
    c.set_tool(Tool::Dimension(DimensionMode::Radial));

    // Free picks away from the square.
    let centre = click(&c, 150.0, 100.0);
    c.pointer_down(&mut store, centre);
    let rim = click(&c, 180.0, 140.0);
    c.pointer_down(&mut store, rim);

    let dims = &store.drawing().dimensions.items;
    assert_eq!(dims.len(), 1);
    assert_eq!(dims[0].kind, DimensionKind::Radial);
    assert!((dims[0].value - 50.0).abs() < 1e-6);
    assert_eq!(dims[0].prefix.as_deref(), Some("R"));
    assert_eq!(dims[0].view_id, None);
}
