//! Text notes with a leader line, and their style resolution.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::view::ViewId;

/// 8-bit RGBA colour, serialized as `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid colour {}", s));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("Invalid colour {}: {}", s, e))
        };
        match hex.len() {
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(format!("Invalid colour {}: expected #rrggbb or #rrggbbaa", s)),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Partial annotation style; unset fields fall back to the drawing default
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationStyle {
    #[serde(default)]
    pub text_color: Option<Color>,
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub border_color: Option<Color>,
    /// Box padding in mm
    #[serde(default)]
    pub padding: Option<f64>,
    /// Font size in mm
    #[serde(default)]
    pub font_size: Option<f64>,
    /// Leader stroke width in mm
    #[serde(default)]
    pub leader_width: Option<f64>,
}

/// Fully resolved annotation style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub text_color: Color,
    pub background: Color,
    pub border_color: Color,
    pub padding: f64,
    pub font_size: f64,
    pub leader_width: f64,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            background: Color::WHITE,
            border_color: Color::BLACK,
            padding: 1.5,
            font_size: 3.5,
            leader_width: 0.25,
        }
    }
}

/// A note placed on the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub text: String,
    /// Text box anchor (view-local)
    pub position: Point,
    /// Leader target (view-local)
    pub anchor_point: Point,
    pub view_id: Option<ViewId>,
    #[serde(default)]
    pub style: AnnotationStyle,
}

impl Annotation {
    pub fn new(text: impl Into<String>, position: Point, anchor_point: Point, view_id: Option<ViewId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            position,
            anchor_point,
            view_id,
            style: AnnotationStyle::default(),
        }
    }
}

/// Default style plus the annotation list of a drawing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub default_style: AnnotationStyle,
    pub items: Vec<Annotation>,
}

/// Resolve the effective style of an annotation.
///
/// Precedence per field: the annotation's own value, then the drawing
/// default, then the built-in [`ResolvedStyle::default`].
pub fn resolve_style(annotation: &Annotation, drawing_default: &AnnotationStyle) -> ResolvedStyle {
    let base = ResolvedStyle::default();
    let own = &annotation.style;
    ResolvedStyle {
        text_color: own
            .text_color
            .or(drawing_default.text_color)
            .unwrap_or(base.text_color),
        background: own
            .background
            .or(drawing_default.background)
            .unwrap_or(base.background),
        border_color: own
            .border_color
            .or(drawing_default.border_color)
            .unwrap_or(base.border_color),
        padding: own
            .padding
            .or(drawing_default.padding)
            .unwrap_or(base.padding),
        font_size: own
            .font_size
            .or(drawing_default.font_size)
            .unwrap_or(base.font_size),
        leader_width: own
            .leader_width
            .or(drawing_default.leader_width)
            .unwrap_or(base.leader_width),
    }
}
