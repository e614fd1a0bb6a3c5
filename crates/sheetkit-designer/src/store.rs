//! Drawing mutations.
//!
//! The engine reads a [`Drawing`] snapshot and reports every change through
//! [`DrawingStore`]. [`MemoryStore`] keeps the drawing in memory.

use sheetkit_core::{
    Annotation, AnnotationStyle, Dimension, DimensionPatch, DisplayOptions, Drawing, DrawingView,
    Point, ShapeId, SheetConfig, StoreError, ViewId,
};
use uuid::Uuid;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Partial update for an annotation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPatch {
    pub text: Option<String>,
    pub position: Option<Point>,
    pub anchor_point: Option<Point>,
    pub style: Option<AnnotationStyle>,
}

impl AnnotationPatch {
    pub fn apply(&self, note: &mut Annotation) {
        if let Some(text) = &self.text {
            note.text = text.clone();
        }
        if let Some(p) = self.position {
            note.position = p;
        }
        if let Some(p) = self.anchor_point {
            note.anchor_point = p;
        }
        if let Some(style) = &self.style {
            note.style = style.clone();
        }
    }
}

/// Partial update for drawing-level fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingUpdate {
    pub name: Option<String>,
    pub sheet: Option<SheetConfig>,
    pub display: Option<DisplayOptions>,
    pub source_shape_ids: Option<Vec<ShapeId>>,
}

/// Mutation interface of the drawing state
pub trait DrawingStore {
    /// Current snapshot
    fn drawing(&self) -> &Drawing;

    fn update_view_position(&mut self, view_id: ViewId, position: Point) -> StoreResult<()>;

    fn add_view(&mut self, view: DrawingView);

    fn add_dimension(&mut self, dimension: Dimension);

    fn update_dimension(&mut self, index: usize, patch: &DimensionPatch) -> StoreResult<()>;

    fn remove_dimension(&mut self, index: usize) -> StoreResult<Dimension>;

    fn add_annotation(&mut self, annotation: Annotation);

    fn update_annotation(&mut self, id: Uuid, patch: &AnnotationPatch) -> StoreResult<()>;

    fn remove_annotation(&mut self, id: Uuid) -> StoreResult<Annotation>;

    fn update_drawing(&mut self, update: DrawingUpdate);
}

/// In-memory store
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    drawing: Drawing,
}

impl MemoryStore {
    pub fn new(drawing: Drawing) -> Self {
        Self { drawing }
    }

    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    fn dimension_mut(&mut self, index: usize) -> StoreResult<&mut Dimension> {
        let len = self.drawing.dimensions.items.len();
        self.drawing
            .dimensions
            .items
            .get_mut(index)
            .ok_or(StoreError::DimensionIndexOutOfRange { index, len })
    }

    fn annotation_index(&self, id: Uuid) -> StoreResult<usize> {
        self.drawing
            .annotations
            .items
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::AnnotationNotFound {
                annotation_id: id.to_string(),
            })
    }
}

impl DrawingStore for MemoryStore {
    fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    fn update_view_position(&mut self, view_id: ViewId, position: Point) -> StoreResult<()> {
        let view = self
            .drawing
            .views
            .iter_mut()
            .find(|v| v.id == view_id)
            .ok_or_else(|| StoreError::ViewNotFound {
                view_id: view_id.to_string(),
            })?;
        view.position = position;
        self.drawing.touch();
        Ok(())
    }

    fn add_view(&mut self, view: DrawingView) {
        tracing::info!(view = %view.id, kind = %view.projection_type, "view added");
        self.drawing.views.push(view);
        self.drawing.touch();
    }

    fn add_dimension(&mut self, dimension: Dimension) {
        self.drawing.dimensions.items.push(dimension);
        self.drawing.touch();
    }

    fn update_dimension(&mut self, index: usize, patch: &DimensionPatch) -> StoreResult<()> {
        patch.apply(self.dimension_mut(index)?);
        self.drawing.touch();
        Ok(())
    }

    fn remove_dimension(&mut self, index: usize) -> StoreResult<Dimension> {
        self.dimension_mut(index)?;
        let removed = self.drawing.dimensions.items.remove(index);
        self.drawing.touch();
        Ok(removed)
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.drawing.annotations.items.push(annotation);
        self.drawing.touch();
    }

    fn update_annotation(&mut self, id: Uuid, patch: &AnnotationPatch) -> StoreResult<()> {
        let index = self.annotation_index(id)?;
        patch.apply(&mut self.drawing.annotations.items[index]);
        self.drawing.touch();
        Ok(())
    }

    fn remove_annotation(&mut self, id: Uuid) -> StoreResult<Annotation> {
        let index = self.annotation_index(id)?;
        let removed = self.drawing.annotations.items.remove(index);
        self.drawing.touch();
        Ok(removed)
    }

    fn update_drawing(&mut self, update: DrawingUpdate) {
        if let Some(name) = update.name {
            self.drawing.name = name;
        }
        if let Some(sheet) = update.sheet {
            self.drawing.sheet = sheet;
        }
        if let Some(display) = update.display {
            self.drawing.display = display;
        }
        if let Some(ids) = update.source_shape_ids {
            self.drawing.source_shape_ids = ids;
        }
        self.drawing.touch();
    }
}
