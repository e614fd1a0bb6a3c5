//! Pointer and keyboard handling for the sheet viewport.

use sheetkit_core::{
    resolve_style, Annotation, DimensionError, DimensionPatch, Drawing, Point, Rect,
};
use sheetkit_settings::EngineSettings;
use uuid::Uuid;

use super::state::{
    InteractionState, Key, PickedPoint, PointerButton, PointerEvent, Selection, Tool,
};
use crate::dimension::{
    default_offset, line_length_dimension, offset_from_cursor, synthesize, with_offset,
};
use crate::hit_test::{
    annotation_box, hit_entity, hit_line, hit_view, AnnotationPart, Hit, LineHit,
};
use crate::renderer::RenderState;
use crate::snap::{SnapCache, SnapResult};
use crate::store::{AnnotationPatch, DrawingStore};
use crate::viewport::Viewport;

/// Leader length of a freshly placed note, along both axes (mm).
const NOTE_LEADER_OFFSET_MM: f64 = 10.0;

/// Drives the viewport from pointer, wheel and keyboard input.
///
/// All drawing changes go through the [`DrawingStore`] passed to each
/// handler; the controller itself only holds transient UI state.
#[derive(Debug, Clone)]
pub struct InteractionController {
    viewport: Viewport,
    settings: EngineSettings,
    state: InteractionState,
    selection: Selection,
    tool: Tool,
    hovered: Option<Hit>,
    hover_line: Option<LineHit>,
    snap: Option<SnapResult>,
    snap_cache: SnapCache,
}

impl InteractionController {
    pub fn new(viewport: Viewport, settings: EngineSettings) -> Self {
        Self {
            viewport,
            settings,
            state: InteractionState::Idle,
            selection: Selection::None,
            tool: Tool::Select,
            hovered: None,
            hover_line: None,
            snap: None,
            snap_cache: SnapCache::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn snap(&self) -> Option<&SnapResult> {
        self.snap.as_ref()
    }

    /// Switch tools, dropping any half-finished pick.
    pub fn set_tool(&mut self, tool: Tool) {
        if matches!(self.state, InteractionState::PointPicking { .. }) {
            self.state = InteractionState::Idle;
        }
        self.tool = tool;
        self.snap = None;
        self.hover_line = None;
        tracing::debug!(?tool, "tool changed");
    }

    pub fn pointer_down(&mut self, store: &mut dyn DrawingStore, event: PointerEvent) {
        let paper = self.viewport.screen_to_paper(event.position);

        if event.button == PointerButton::Middle
            || (event.button == PointerButton::Left && event.modifiers.ctrl)
        {
            self.state = InteractionState::Panning {
                last: event.position,
            };
            return;
        }

        if event.button == PointerButton::Right {
            if matches!(self.state, InteractionState::PointPicking { .. }) {
                tracing::debug!("point pick cancelled");
                self.state = InteractionState::Idle;
            } else {
                self.selection = Selection::None;
            }
            return;
        }

        if matches!(self.state, InteractionState::EditingAnnotationText { .. }) {
            self.commit_text(store);
        }

        match self.tool {
            Tool::Select => self.select_at(store.drawing(), paper),
            Tool::Dimension(_) => self.pick_point(store, paper),
            Tool::Note => self.place_note(store, paper),
            Tool::LineLength => self.dimension_line_at(store, paper),
        }
    }

    fn select_at(&mut self, drawing: &Drawing, paper: Point) {
        match hit_entity(drawing, paper, &self.settings.hit_test) {
            Some(Hit::Dimension(index)) => {
                if self.selection == Selection::Dimension(index) {
                    self.state = InteractionState::DraggingDimensionOffset { index };
                } else {
                    self.selection = Selection::Dimension(index);
                }
            }
            Some(Hit::Annotation(hit)) => {
                if self.selection == Selection::Annotation(hit.id) {
                    let local = paper - note_offset(drawing, hit.id);
                    let grab_offset = drawing
                        .annotation(hit.id)
                        .map(|a| a.position - local)
                        .unwrap_or(Point::ORIGIN);
                    self.state = InteractionState::DraggingAnnotation {
                        id: hit.id,
                        part: hit.part,
                        grab_offset,
                    };
                } else {
                    self.selection = Selection::Annotation(hit.id);
                }
            }
            Some(Hit::View(view_id)) => {
                let grab_offset = drawing
                    .view(view_id)
                    .map(|v| v.position - paper)
                    .unwrap_or(Point::ORIGIN);
                self.selection = Selection::None;
                self.state = InteractionState::DraggingView {
                    view_id,
                    grab_offset,
                };
            }
            None => self.selection = Selection::None,
        }
    }

    /// Resolve where a dimension pick lands: snap, then line, then free.
    fn resolve_pick(&mut self, drawing: &Drawing, paper: Point) -> PickedPoint {
        if let Some(snap) = self.snap_cache.find(drawing, paper, &self.settings.snap) {
            return PickedPoint {
                paper: snap.paper_point(),
                view_id: Some(snap.view_id),
                snap: Some(snap.snap.kind),
            };
        }
        if let Some(hit) = hit_line(drawing, paper, &self.settings.hit_test) {
            return PickedPoint {
                paper: hit.view_position + hit.point,
                view_id: Some(hit.view_id),
                snap: None,
            };
        }
        PickedPoint {
            paper,
            view_id: hit_view(drawing, paper, &self.settings.hit_test),
            snap: None,
        }
    }

    fn pick_point(&mut self, store: &mut dyn DrawingStore, paper: Point) {
        let Tool::Dimension(mode) = self.tool else {
            return;
        };
        let pick = self.resolve_pick(store.drawing(), paper);

        let first = match &self.state {
            InteractionState::PointPicking { first: Some(first) } => *first,
            _ => {
                tracing::debug!(x = pick.paper.x, y = pick.paper.y, "first dimension point");
                self.state = InteractionState::PointPicking { first: Some(pick) };
                return;
            }
        };
        self.state = InteractionState::Idle;

        let drawing = store.drawing();
        let view_id = first.view_id.filter(|id| drawing.view(*id).is_some());
        let origin = drawing.anchor_offset(view_id);
        let bounds = view_id
            .and_then(|id| drawing.view(id))
            .map(|v| v.local_bounds());
        let config = &drawing.dimensions.config;
        let offset = default_offset(config, bounds.as_ref());

        match synthesize(
            first.paper - origin,
            pick.paper - origin,
            mode,
            offset,
            config,
            view_id,
        ) {
            Ok(dim) => {
                tracing::debug!(kind = %dim.kind, value = dim.value, "dimension added");
                store.add_dimension(dim);
            }
            Err(e) => tracing::warn!("dimension skipped: {}", e),
        }
    }

    fn place_note(&mut self, store: &mut dyn DrawingStore, paper: Point) {
        let drawing = store.drawing();
        let (view_id, anchor) = match hit_line(drawing, paper, &self.settings.hit_test) {
            Some(hit) => (Some(hit.view_id), hit.point),
            None => {
                let view_id = hit_view(drawing, paper, &self.settings.hit_test);
                (view_id, paper - drawing.anchor_offset(view_id))
            }
        };

        let position = anchor + Point::new(NOTE_LEADER_OFFSET_MM, NOTE_LEADER_OFFSET_MM);
        let note = Annotation::new(String::new(), position, anchor, view_id);
        let id = note.id;
        store.add_annotation(note);

        self.selection = Selection::Annotation(id);
        self.state = InteractionState::EditingAnnotationText {
            id,
            buffer: String::new(),
        };
        tracing::debug!(%id, "note placed");
    }

    fn dimension_line_at(&mut self, store: &mut dyn DrawingStore, paper: Point) {
        let drawing = store.drawing();
        let Some(hit) = hit_line(drawing, paper, &self.settings.hit_test) else {
            return;
        };
        let Some(view) = drawing.view(hit.view_id) else {
            return;
        };
        match line_length_dimension(&hit.segment, view, &drawing.dimensions.config) {
            Ok(dim) => store.add_dimension(dim),
            Err(e) => tracing::warn!("line length dimension skipped: {}", e),
        }
    }

    pub fn pointer_move(&mut self, store: &mut dyn DrawingStore, position: Point) {
        let paper = self.viewport.screen_to_paper(position);

        match self.state.clone() {
            InteractionState::Panning { last } => {
                self.viewport.pan_by(position.x - last.x, position.y - last.y);
                self.state = InteractionState::Panning { last: position };
            }
            InteractionState::DraggingView {
                view_id,
                grab_offset,
            } => {
                if let Err(e) = store.update_view_position(view_id, paper + grab_offset) {
                    tracing::warn!("view drag: {}", e);
                }
            }
            InteractionState::DraggingDimensionOffset { index } => {
                match dimension_drag_patch(store.drawing(), index, paper) {
                    Ok(Some(patch)) => {
                        if let Err(e) = store.update_dimension(index, &patch) {
                            tracing::warn!("dimension drag: {}", e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("offset drag skipped: {}", e),
                }
            }
            InteractionState::DraggingAnnotation {
                id,
                part,
                grab_offset,
            } => {
                let local = paper - note_offset(store.drawing(), id);
                let patch = match part {
                    AnnotationPart::Anchor => AnnotationPatch {
                        anchor_point: Some(local),
                        ..AnnotationPatch::default()
                    },
                    AnnotationPart::Box => AnnotationPatch {
                        position: Some(local + grab_offset),
                        ..AnnotationPatch::default()
                    },
                };
                if let Err(e) = store.update_annotation(id, &patch) {
                    tracing::warn!("annotation drag: {}", e);
                }
            }
            InteractionState::Idle
            | InteractionState::PointPicking { .. }
            | InteractionState::EditingAnnotationText { .. } => {
                self.update_hover(store.drawing(), paper);
            }
        }
    }

    fn update_hover(&mut self, drawing: &Drawing, paper: Point) {
        let hit_settings = &self.settings.hit_test;
        match self.tool {
            Tool::Select => {
                self.hovered = hit_entity(drawing, paper, hit_settings);
                self.hover_line = None;
                self.snap = None;
            }
            Tool::Dimension(_) => {
                self.hovered = None;
                self.snap = self.snap_cache.find(drawing, paper, &self.settings.snap);
                self.hover_line = if self.snap.is_none() {
                    hit_line(drawing, paper, hit_settings)
                } else {
                    None
                };
            }
            Tool::Note | Tool::LineLength => {
                self.hovered = None;
                self.snap = None;
                self.hover_line = hit_line(drawing, paper, hit_settings);
            }
        }
    }

    /// Ends any drag; picking and text editing carry on.
    pub fn pointer_up(&mut self, _store: &mut dyn DrawingStore, _event: PointerEvent) {
        if self.state.is_dragging() {
            self.state = InteractionState::Idle;
        }
    }

    /// Pointer left the canvas or the gesture was cancelled.
    pub fn pointer_leave(&mut self) {
        if self.state.is_dragging() {
            self.state = InteractionState::Idle;
        }
        self.hovered = None;
        self.hover_line = None;
        self.snap = None;
    }

    /// Wheel zoom about the cursor.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) {
        self.viewport.wheel(delta_y, cursor);
    }

    pub fn key_down(&mut self, store: &mut dyn DrawingStore, key: Key) {
        if let InteractionState::EditingAnnotationText { buffer, .. } = &mut self.state {
            match key {
                Key::Char(c) => buffer.push(c),
                Key::Backspace => {
                    buffer.pop();
                }
                Key::Enter => self.commit_text(store),
                Key::Escape => self.abandon_text(store),
                Key::Delete | Key::Home => {}
            }
            return;
        }

        match key {
            Key::Escape => self.escape(),
            Key::Delete | Key::Backspace => self.delete_selection(store),
            Key::Home | Key::Char('0') => self.viewport.reset(),
            Key::Enter | Key::Char(_) => {}
        }
    }

    fn escape(&mut self) {
        if self.state.is_dragging() {
            tracing::debug!("drag cancelled");
            self.state = InteractionState::Idle;
        } else if matches!(self.state, InteractionState::PointPicking { .. }) {
            self.state = InteractionState::Idle;
        } else if matches!(self.selection, Selection::Annotation(_)) {
            self.selection = Selection::None;
        } else if matches!(self.selection, Selection::Dimension(_)) {
            self.selection = Selection::None;
        } else if self.tool != Tool::Select {
            self.set_tool(Tool::Select);
        }
    }

    fn delete_selection(&mut self, store: &mut dyn DrawingStore) {
        let result = match self.selection {
            Selection::Dimension(index) => store.remove_dimension(index).map(|_| ()),
            Selection::Annotation(id) => store.remove_annotation(id).map(|_| ()),
            Selection::None => return,
        };
        if let Err(e) = result {
            tracing::warn!("delete: {}", e);
        }
        self.selection = Selection::None;
        self.hovered = None;
    }

    fn commit_text(&mut self, store: &mut dyn DrawingStore) {
        let InteractionState::EditingAnnotationText { id, buffer } =
            std::mem::take(&mut self.state)
        else {
            return;
        };
        let patch = AnnotationPatch {
            text: Some(buffer),
            ..AnnotationPatch::default()
        };
        if let Err(e) = store.update_annotation(id, &patch) {
            tracing::warn!("note text: {}", e);
        }
    }

    /// Leave text editing without saving; a note that never got text is removed.
    fn abandon_text(&mut self, store: &mut dyn DrawingStore) {
        let InteractionState::EditingAnnotationText { id, .. } = std::mem::take(&mut self.state)
        else {
            return;
        };
        let blank = store
            .drawing()
            .annotation(id)
            .is_some_and(|note| note.text.is_empty());
        if !blank {
            return;
        }
        match store.remove_annotation(id) {
            Ok(_) => {
                tracing::debug!(%id, "empty note discarded");
                if self.selection == Selection::Annotation(id) {
                    self.selection = Selection::None;
                }
            }
            Err(e) => tracing::warn!("discard note: {}", e),
        }
    }

    /// Screen rectangle for the text editor overlay of the note being edited.
    pub fn text_edit_overlay(&self, drawing: &Drawing) -> Option<Rect> {
        let InteractionState::EditingAnnotationText { id, buffer } = &self.state else {
            return None;
        };
        let note = drawing.annotation(*id)?;
        let mut shown = note.clone();
        shown.text = buffer.clone();
        let style = resolve_style(&shown, &drawing.annotations.default_style);
        let b = annotation_box(&shown, &style).translate(drawing.anchor_offset(note.view_id));
        let top_left = self.viewport.paper_to_screen(Point::new(b.min.x, b.max.y));
        let bottom_right = self.viewport.paper_to_screen(Point::new(b.max.x, b.min.y));
        Some(Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        ))
    }

    /// Overlay state for the renderer.
    pub fn render_state(&self) -> RenderState {
        let picks = match &self.state {
            InteractionState::PointPicking { first: Some(p) } => vec![p.paper],
            _ => Vec::new(),
        };
        let dragging_view = match &self.state {
            InteractionState::DraggingView { view_id, .. } => Some(*view_id),
            _ => None,
        };
        let editing = match &self.state {
            InteractionState::EditingAnnotationText { id, buffer } => Some((*id, buffer.clone())),
            _ => None,
        };
        RenderState {
            hovered: self.hovered,
            dragging_view,
            selection: self.selection,
            snap: self.snap,
            picks,
            hover_line: self.hover_line,
            editing,
            label_style: self.settings.labels.style,
            min_stroke_px: self.settings.viewport.min_stroke_px,
        }
    }
}

fn note_offset(drawing: &Drawing, id: Uuid) -> Point {
    drawing.anchor_offset(drawing.annotation(id).and_then(|a| a.view_id))
}

/// Geometry update for dragging dimension `index` to `paper`.
fn dimension_drag_patch(
    drawing: &Drawing,
    index: usize,
    paper: Point,
) -> Result<Option<DimensionPatch>, DimensionError> {
    let Some(dim) = drawing.dimensions.items.get(index) else {
        return Ok(None);
    };
    let local = paper - drawing.anchor_offset(dim.view_id);
    let offset = offset_from_cursor(dim, local)?;
    let moved = with_offset(dim, offset, &drawing.dimensions.config)?;
    Ok(Some(DimensionPatch::geometry_of(&moved)))
}
