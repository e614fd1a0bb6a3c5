//! Placed projection views and their line geometry.

use crate::geometry::{BoundingBox, Point, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a view on a drawing
pub type ViewId = Uuid;

/// Standard projection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionType {
    Top,
    Front,
    Right,
    Left,
    Bottom,
    Back,
    Isometric,
}

/// Wording used for view labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLabelStyle {
    #[default]
    English,
    Spanish,
    /// Upper-case technical names ("FRONT VIEW")
    Technical,
}

impl ProjectionType {
    pub fn all() -> &'static [ProjectionType] {
        &[
            Self::Front,
            Self::Top,
            Self::Right,
            Self::Left,
            Self::Bottom,
            Self::Back,
            Self::Isometric,
        ]
    }

    pub fn is_isometric(&self) -> bool {
        matches!(self, Self::Isometric)
    }

    /// Default label for the view in the given wording.
    pub fn label(&self, style: ViewLabelStyle) -> &'static str {
        match style {
            ViewLabelStyle::English => match self {
                Self::Top => "Top",
                Self::Front => "Front",
                Self::Right => "Right",
                Self::Left => "Left",
                Self::Bottom => "Bottom",
                Self::Back => "Back",
                Self::Isometric => "Isometric",
            },
            ViewLabelStyle::Spanish => match self {
                Self::Top => "Planta",
                Self::Front => "Alzado",
                Self::Right => "Perfil derecho",
                Self::Left => "Perfil izquierdo",
                Self::Bottom => "Vista inferior",
                Self::Back => "Vista posterior",
                Self::Isometric => "Isométrica",
            },
            ViewLabelStyle::Technical => match self {
                Self::Top => "TOP VIEW",
                Self::Front => "FRONT VIEW",
                Self::Right => "RIGHT VIEW",
                Self::Left => "LEFT VIEW",
                Self::Bottom => "BOTTOM VIEW",
                Self::Back => "BACK VIEW",
                Self::Isometric => "ISOMETRIC VIEW",
            },
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(ViewLabelStyle::English))
    }
}

/// Line classification emitted by the projection generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    VisibleSharp,
    VisibleOutline,
    VisibleSmooth,
    HiddenSharp,
    HiddenSmooth,
    HiddenOutline,
    SectionCut,
    Centerline,
}

/// Styling family of a line type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCategory {
    Visible,
    Hidden,
    Section,
    Centerline,
}

impl LineType {
    pub fn category(&self) -> LineCategory {
        match self {
            Self::VisibleSharp | Self::VisibleOutline | Self::VisibleSmooth => {
                LineCategory::Visible
            }
            Self::HiddenSharp | Self::HiddenSmooth | Self::HiddenOutline => LineCategory::Hidden,
            Self::SectionCut => LineCategory::Section,
            Self::Centerline => LineCategory::Centerline,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.category() == LineCategory::Visible
    }

    pub fn is_hidden(&self) -> bool {
        self.category() == LineCategory::Hidden
    }
}

/// One projected line (projection-space coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2D {
    pub start: Point,
    pub end: Point,
    pub line_type: LineType,
}

impl Line2D {
    pub fn new(start: Point, end: Point, line_type: LineType) -> Self {
        Self {
            start,
            end,
            line_type,
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Output of the projection generator for one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub lines: Vec<Line2D>,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub label: Option<String>,
}

impl Projection {
    /// Build a projection whose box is computed from its lines.
    pub fn from_lines(lines: Vec<Line2D>) -> Self {
        let bounding_box =
            BoundingBox::from_points(lines.iter().flat_map(|l| [&l.start, &l.end]))
                .unwrap_or_default();
        Self {
            lines,
            bounding_box,
            label: None,
        }
    }
}

/// A projection placed on the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingView {
    pub id: ViewId,
    pub projection_type: ProjectionType,
    pub projection: Projection,
    /// Paper-space position (mm) of the bounding-box centre
    pub position: Point,
    pub visible: bool,
}

impl DrawingView {
    pub fn new(projection_type: ProjectionType, projection: Projection, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            projection_type,
            projection,
            position,
            visible: true,
        }
    }

    /// Projection-space point to view-local coordinates (centred on the box).
    pub fn projection_to_local(&self, p: Point) -> Point {
        p - self.projection.bounding_box.center()
    }

    /// View-local point to paper space.
    pub fn local_to_paper(&self, p: Point) -> Point {
        self.position + p
    }

    /// Paper-space point to view-local coordinates.
    pub fn paper_to_local(&self, p: Point) -> Point {
        p - self.position
    }

    /// Lines in view-local coordinates, paired with their type.
    pub fn local_lines(&self) -> impl Iterator<Item = (Segment, LineType)> + '_ {
        let c = self.projection.bounding_box.center();
        self.projection
            .lines
            .iter()
            .map(move |l| (Segment::new(l.start - c, l.end - c), l.line_type))
    }

    /// View-local bounding box (centred on the origin).
    pub fn local_bounds(&self) -> BoundingBox {
        let bbox = &self.projection.bounding_box;
        bbox.translate(-bbox.center())
    }

    /// Paper-space bounding box.
    pub fn paper_bounds(&self) -> BoundingBox {
        self.local_bounds().translate(self.position)
    }

    pub fn width(&self) -> f64 {
        self.projection.bounding_box.width()
    }

    pub fn height(&self) -> f64 {
        self.projection.bounding_box.height()
    }

    /// Label text: the projection's own label, else the type name.
    pub fn label(&self, style: ViewLabelStyle) -> String {
        self.projection
            .label
            .clone()
            .unwrap_or_else(|| self.projection_type.label(style).to_string())
    }
}
