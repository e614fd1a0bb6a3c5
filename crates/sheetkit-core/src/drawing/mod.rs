//! Drawing data model
//!
//! A [`Drawing`] is the read snapshot the engine works from: sheet settings,
//! placed views, dimensions and annotations. Dimensions and annotations are
//! stored in view-local coordinates and follow their view when it moves.

pub mod annotation;
pub mod dimension;
pub mod sheet;
pub mod view;

pub use annotation::{resolve_style, Annotation, AnnotationSet, AnnotationStyle, Color, ResolvedStyle};
pub use dimension::{
    compose_label, Arrow, ArrowStyle, Dimension, DimensionConfig, DimensionKind, DimensionLine,
    DimensionMode, DimensionPatch, DimensionSet,
};
pub use sheet::{
    LineWidths, Orientation, PaperSize, ProjectionAngle, SheetConfig, TitleBlockInfo,
    TitleBlockStyle,
};
pub use view::{
    DrawingView, Line2D, LineCategory, LineType, Projection, ProjectionType, ViewId,
    ViewLabelStyle,
};

use crate::geometry::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a source shape in the modelling kernel
pub type ShapeId = String;

/// Display toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_bounding_boxes: bool,
    pub show_labels: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_bounding_boxes: false,
            show_labels: true,
        }
    }
}

/// Entity whose `view_id` names a view that is not on the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanglingReference {
    Dimension(usize),
    Annotation(Uuid),
}

/// A technical drawing sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: Uuid,
    pub name: String,
    pub sheet: SheetConfig,
    pub views: Vec<DrawingView>,
    #[serde(default)]
    pub dimensions: DimensionSet,
    #[serde(default)]
    pub annotations: AnnotationSet,
    #[serde(default)]
    pub display: DisplayOptions,
    #[serde(default)]
    pub source_shape_ids: Vec<ShapeId>,
    pub updated_at: DateTime<Utc>,
}

impl Drawing {
    pub fn new(name: impl Into<String>, sheet: SheetConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sheet,
            views: Vec::new(),
            dimensions: DimensionSet::default(),
            annotations: AnnotationSet::default(),
            display: DisplayOptions::default(),
            source_shape_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn view(&self, id: ViewId) -> Option<&DrawingView> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn view_index(&self, id: ViewId) -> Option<usize> {
        self.views.iter().position(|v| v.id == id)
    }

    pub fn visible_views(&self) -> impl Iterator<Item = &DrawingView> {
        self.views.iter().filter(|v| v.visible)
    }

    pub fn annotation(&self, id: Uuid) -> Option<&Annotation> {
        self.annotations.items.iter().find(|a| a.id == id)
    }

    /// Paper-space offset for an entity attached to `view_id` (origin when unattached).
    pub fn anchor_offset(&self, view_id: Option<ViewId>) -> Point {
        view_id
            .and_then(|id| self.view(id))
            .map(|v| v.position)
            .unwrap_or(Point::ORIGIN)
    }

    /// Dimensions and annotations whose view reference is broken.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let missing = |id: &Option<ViewId>| id.is_some_and(|id| self.view(id).is_none());
        let dims = self
            .dimensions
            .items
            .iter()
            .enumerate()
            .filter(|(_, d)| missing(&d.view_id))
            .map(|(i, _)| DanglingReference::Dimension(i));
        let notes = self
            .annotations
            .items
            .iter()
            .filter(|a| missing(&a.view_id))
            .map(|a| DanglingReference::Annotation(a.id));
        dims.chain(notes).collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
