//! Interaction state, selection, tools and input events.

use sheetkit_core::{DimensionMode, Point, ViewId};
use uuid::Uuid;

use crate::hit_test::AnnotationPart;
use crate::snap::SnapKind;

/// Active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Dimension(DimensionMode),
    Note,
    LineLength,
}

/// Selected entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Dimension(usize),
    Annotation(Uuid),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// A point picked for a dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedPoint {
    /// Paper-space location
    pub paper: Point,
    /// View the point belongs to, if any
    pub view_id: Option<ViewId>,
    /// How the point was found, `None` for a free pick
    pub snap: Option<SnapKind>,
}

/// Pointer interaction in progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning {
        /// Last pointer position (screen px)
        last: Point,
    },
    DraggingView {
        view_id: ViewId,
        /// `view.position - cursor` at grab time (paper mm)
        grab_offset: Point,
    },
    DraggingDimensionOffset {
        index: usize,
    },
    DraggingAnnotation {
        id: Uuid,
        part: AnnotationPart,
        /// `position - cursor` at grab time (view-local mm)
        grab_offset: Point,
    },
    PointPicking {
        first: Option<PickedPoint>,
    },
    EditingAnnotationText {
        id: Uuid,
        buffer: String,
    },
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            InteractionState::Panning { .. }
                | InteractionState::DraggingView { .. }
                | InteractionState::DraggingDimensionOffset { .. }
                | InteractionState::DraggingAnnotation { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Pointer event in screen (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(position: Point, button: PointerButton) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::default(),
        }
    }

    pub fn left(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerButton::Left)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Enter,
    Home,
    Char(char),
}
