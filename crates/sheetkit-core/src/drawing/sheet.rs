//! Sheet configuration: paper, scale, units and title block settings.

use crate::units::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Short side horizontal
    Portrait,
    /// Long side horizontal
    #[default]
    Landscape,
}

/// Paper size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A0,
    A1,
    A2,
    #[default]
    A3,
    A4,
    /// Custom size in mm, interpreted as portrait
    Custom { width: f64, height: f64 },
}

impl PaperSize {
    /// Portrait dimensions (width, height) in mm.
    pub fn portrait_mm(&self) -> (f64, f64) {
        match *self {
            Self::A0 => (841.0, 1189.0),
            Self::A1 => (594.0, 841.0),
            Self::A2 => (420.0, 594.0),
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::Custom { width, height } => (width.min(height), width.max(height)),
        }
    }

    /// Physical (width, height) in mm for the given orientation.
    pub fn dimensions_mm(&self, orientation: Orientation) -> (f64, f64) {
        let (short, long) = self.portrait_mm();
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A0 => write!(f, "A0"),
            Self::A1 => write!(f, "A1"),
            Self::A2 => write!(f, "A2"),
            Self::A3 => write!(f, "A3"),
            Self::A4 => write!(f, "A4"),
            Self::Custom { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

/// Projection angle convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionAngle {
    /// First angle (ISO / European)
    #[default]
    First,
    /// Third angle (ASME / American)
    Third,
}

impl fmt::Display for ProjectionAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "1st"),
            Self::Third => write!(f, "3rd"),
        }
    }
}

/// Title block style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleBlockStyle {
    /// No title block
    None,
    /// Title row only
    Simple,
    /// Title, units, projection angle, size, scale, date and sheet number
    #[default]
    Standard,
}

/// Per line-type stroke width overrides (mm on paper)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineWidths {
    #[serde(default)]
    pub visible: Option<f64>,
    #[serde(default)]
    pub hidden: Option<f64>,
    #[serde(default)]
    pub dimension: Option<f64>,
    #[serde(default)]
    pub centerline: Option<f64>,
    #[serde(default)]
    pub section: Option<f64>,
}

/// Text shown in the title block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitleBlockInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sheet_number: Option<String>,
}

impl TitleBlockInfo {
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }

    pub fn sheet_number_or_default(&self) -> &str {
        self.sheet_number
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("1/1")
    }
}

/// Sheet configuration, fixed for a drawing revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub size: PaperSize,
    pub orientation: Orientation,
    /// Drawing scale factor (0.25 means 1:4)
    pub scale: f64,
    pub projection_angle: ProjectionAngle,
    pub units: Unit,
    pub title_block: TitleBlockStyle,
    #[serde(default)]
    pub line_widths: LineWidths,
    #[serde(default)]
    pub title_block_info: TitleBlockInfo,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            size: PaperSize::A3,
            orientation: Orientation::Landscape,
            scale: 0.25,
            projection_angle: ProjectionAngle::First,
            units: Unit::Meter,
            title_block: TitleBlockStyle::Standard,
            line_widths: LineWidths::default(),
            title_block_info: TitleBlockInfo::default(),
        }
    }
}

impl SheetConfig {
    /// Physical paper (width, height) in mm.
    pub fn paper_dimensions(&self) -> (f64, f64) {
        self.size.dimensions_mm(self.orientation)
    }

    /// `scale × units per metre`: projection mm per model metre.
    pub fn projection_factor(&self) -> f64 {
        self.scale * self.units.per_metre()
    }

    /// Scale as shown in the title block: `1:N` below 1, `N:1` otherwise.
    pub fn scale_label(&self) -> String {
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return "-".to_string();
        }
        if self.scale < 1.0 {
            format!("1:{}", (1.0 / self.scale).round())
        } else {
            format!("{}:1", self.scale.round())
        }
    }
}
