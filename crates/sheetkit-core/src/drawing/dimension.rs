//! Dimension entities and their style configuration.

use crate::geometry::{Point, Segment};
use crate::units::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::view::ViewId;

/// Resolved dimension kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    Horizontal,
    Vertical,
    Aligned,
    /// Centre to rim, `point1` is the centre
    Radial,
    /// Rim to rim through the centre, `point1` is the centre
    Diameter,
}

impl DimensionKind {
    /// Radial and diameter dimensions measure from a circle centre.
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Radial | Self::Diameter)
    }

    /// Label prefix given to new dimensions of this kind.
    pub fn default_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Radial => Some("R"),
            Self::Diameter => Some("\u{2205}"),
            Self::Horizontal | Self::Vertical | Self::Aligned => None,
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
            Self::Aligned => write!(f, "aligned"),
            Self::Radial => write!(f, "radial"),
            Self::Diameter => write!(f, "diameter"),
        }
    }
}

/// Requested dimension kind; `Auto` picks horizontal, vertical or aligned
/// from the point angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionMode {
    Horizontal,
    Vertical,
    Aligned,
    #[default]
    Auto,
    Radial,
    Diameter,
}

impl From<DimensionKind> for DimensionMode {
    fn from(kind: DimensionKind) -> Self {
        match kind {
            DimensionKind::Horizontal => Self::Horizontal,
            DimensionKind::Vertical => Self::Vertical,
            DimensionKind::Aligned => Self::Aligned,
            DimensionKind::Radial => Self::Radial,
            DimensionKind::Diameter => Self::Diameter,
        }
    }
}

/// Arrowhead style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowStyle {
    #[default]
    Filled,
    Open,
    Tick,
    Dot,
    None,
}

/// Arrowhead at one end of a dimension line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Tip position (view-local)
    pub tip: Point,
    /// Unit vector the arrow points along (towards the tip)
    pub direction: Point,
    pub style: ArrowStyle,
}

/// The dimension line with its two arrowheads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionLine {
    pub start: Point,
    pub end: Point,
    pub start_arrow: Arrow,
    pub end_arrow: Arrow,
}

impl DimensionLine {
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Style used when synthesizing dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionConfig {
    /// Minimum distance between the measured points and the dimension line (mm)
    pub offset: f64,
    /// Gap between a measured point and the start of its extension line (mm)
    pub extension_gap: f64,
    /// Extension line overshoot past the dimension line (mm)
    pub extension_overshoot: f64,
    pub arrow_size: f64,
    pub arrow_style: ArrowStyle,
    pub text_height: f64,
    /// Decimals shown in the label
    pub precision: usize,
    pub show_unit: bool,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            offset: 10.0,
            extension_gap: 2.0,
            extension_overshoot: 2.0,
            arrow_size: 3.0,
            arrow_style: ArrowStyle::Filled,
            text_height: 3.5,
            precision: 2,
            show_unit: false,
        }
    }
}

/// A measured dimension attached to a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: Uuid,
    pub kind: DimensionKind,
    pub dimension_line: DimensionLine,
    pub extension_lines: Vec<Segment>,
    pub text_position: Point,
    /// Label rotation in degrees, always within [-90, 90]
    pub text_rotation_deg: f64,
    /// Measured length in projection-space units
    pub value: f64,
    pub point1: Point,
    pub point2: Point,
    /// Signed distance between the measured points and the dimension line
    pub offset: f64,
    pub view_id: Option<ViewId>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub label_override: Option<String>,
}

/// Partial update for a stored dimension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionPatch {
    pub dimension_line: Option<DimensionLine>,
    pub extension_lines: Option<Vec<Segment>>,
    pub text_position: Option<Point>,
    pub text_rotation_deg: Option<f64>,
    pub offset: Option<f64>,
    pub label_override: Option<Option<String>>,
}

impl DimensionPatch {
    /// Patch carrying all geometry of `dim` (used after an offset drag).
    pub fn geometry_of(dim: &Dimension) -> Self {
        Self {
            dimension_line: Some(dim.dimension_line),
            extension_lines: Some(dim.extension_lines.clone()),
            text_position: Some(dim.text_position),
            text_rotation_deg: Some(dim.text_rotation_deg),
            offset: Some(dim.offset),
            label_override: None,
        }
    }

    pub fn apply(&self, dim: &mut Dimension) {
        if let Some(line) = self.dimension_line {
            dim.dimension_line = line;
        }
        if let Some(lines) = &self.extension_lines {
            dim.extension_lines = lines.clone();
        }
        if let Some(p) = self.text_position {
            dim.text_position = p;
        }
        if let Some(r) = self.text_rotation_deg {
            dim.text_rotation_deg = r;
        }
        if let Some(o) = self.offset {
            dim.offset = o;
        }
        if let Some(label) = &self.label_override {
            dim.label_override = label.clone();
        }
    }
}

/// Dimension style plus the dimension list of a drawing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionSet {
    pub config: DimensionConfig,
    pub items: Vec<Dimension>,
}

impl DimensionSet {
    /// Dimensions of one kind, in list order.
    pub fn by_kind(&self, kind: DimensionKind) -> Vec<&Dimension> {
        self.items.iter().filter(|d| d.kind == kind).collect()
    }
}

/// Label text for a real-world value
///
/// `label_override` wins outright; otherwise `prefix + value + [unit]`,
/// then the suffix after a space.
pub fn compose_label(dim: &Dimension, real_value: f64, config: &DimensionConfig, unit: Unit) -> String {
    if let Some(label) = dim.label_override.as_deref() {
        return label.to_string();
    }
    let mut out = String::new();
    if let Some(prefix) = dim.prefix.as_deref() {
        out.push_str(prefix);
    }
    out.push_str(&crate::units::format_value(
        real_value,
        config.precision,
        unit,
        config.show_unit,
    ));
    if let Some(suffix) = dim.suffix.as_deref() {
        out.push(' ');
        out.push_str(suffix);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: DimensionKind) -> Dimension {
        let arrow = Arrow {
            tip: Point::ORIGIN,
            direction: Point::new(1.0, 0.0),
            style: ArrowStyle::Filled,
        };
        Dimension {
            id: Uuid::new_v4(),
            kind,
            dimension_line: DimensionLine {
                start: Point::ORIGIN,
                end: Point::new(10.0, 0.0),
                start_arrow: arrow,
                end_arrow: arrow,
            },
            extension_lines: Vec::new(),
            text_position: Point::ORIGIN,
            text_rotation_deg: 0.0,
            value: 10.0,
            point1: Point::ORIGIN,
            point2: Point::new(10.0, 0.0),
            offset: 0.0,
            view_id: None,
            prefix: kind.default_prefix().map(str::to_string),
            suffix: None,
            label_override: None,
        }
    }

    #[test]
    fn test_label_parts() {
        let config = DimensionConfig {
            show_unit: true,
            ..DimensionConfig::default()
        };
        let mut dim = sample(DimensionKind::Radial);
        dim.suffix = Some("TYP".to_string());
        assert_eq!(compose_label(&dim, 10.0, &config, Unit::Millimeter), "R10.00 mm TYP");

        dim.label_override = Some("SEE NOTE".to_string());
        assert_eq!(compose_label(&dim, 10.0, &config, Unit::Millimeter), "SEE NOTE");
    }

    #[test]
    fn test_suffix_without_unit() {
        let mut dim = sample(DimensionKind::Horizontal);
        dim.suffix = Some("TYP".to_string());
        let label = compose_label(&dim, 10.0, &DimensionConfig::default(), Unit::Meter);
        assert_eq!(label, "10.00 TYP");
    }

    #[test]
    fn test_by_kind_keeps_order() {
        let set = DimensionSet {
            config: DimensionConfig::default(),
            items: vec![
                sample(DimensionKind::Diameter),
                sample(DimensionKind::Horizontal),
                sample(DimensionKind::Diameter),
            ],
        };
        let diameters = set.by_kind(DimensionKind::Diameter);
        assert_eq!(diameters.len(), 2);
        assert_eq!(diameters[0].id, set.items[0].id);
        assert_eq!(diameters[1].id, set.items[2].id);
        assert!(set.by_kind(DimensionKind::Radial).is_empty());
    }
}
