//! Display units for drawing sheets
//!
//! The model is authored in metres. A sheet displays measured values in one
//! of a small set of length units; `per_metre` is the factor that turns a
//! model length in metres into the display unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Millimetres
    #[serde(rename = "mm")]
    Millimeter,
    /// Centimetres
    #[serde(rename = "cm")]
    Centimeter,
    /// Metres
    #[serde(rename = "m")]
    Meter,
    /// Inches
    #[serde(rename = "in")]
    Inch,
    /// Feet
    #[serde(rename = "ft")]
    Foot,
}

impl Unit {
    /// Display units per model metre.
    pub fn per_metre(&self) -> f64 {
        match self {
            Self::Millimeter => 1000.0,
            Self::Centimeter => 100.0,
            Self::Meter => 1.0,
            Self::Inch => 1000.0 / 25.4,
            Self::Foot => 1000.0 / 304.8,
        }
    }

    /// Short label used in dimension text and the title block.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }

    /// All supported units, smallest first.
    pub fn all() -> &'static [Unit] {
        &[
            Self::Millimeter,
            Self::Centimeter,
            Self::Meter,
            Self::Inch,
            Self::Foot,
        ]
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::Meter
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimeters" | "centimetre" => Ok(Self::Centimeter),
            "m" | "meter" | "meters" | "metre" => Ok(Self::Meter),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(Self::Foot),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Format a measured value for display
///
/// * `value` - Value already expressed in `unit`
/// * `precision` - Number of decimals
/// * `unit` - Display unit
/// * `show_unit` - Append the unit abbreviation
pub fn format_value(value: f64, precision: usize, unit: Unit, show_unit: bool) -> String {
    // Avoid rendering "-0.00" for tiny negative noise.
    let value = if value.abs() < 0.5 * 10f64.powi(-(precision as i32)) {
        0.0
    } else {
        value
    };
    if show_unit {
        format!("{:.*} {}", precision, value, unit.abbreviation())
    } else {
        format!("{:.*}", precision, value)
    }
}
