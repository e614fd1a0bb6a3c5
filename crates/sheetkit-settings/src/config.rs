//! Engine configuration
//!
//! Provides configuration file handling and validation for the drawing
//! engine. Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Viewport (zoom limits, wheel step, minimum stroke width)
//! - Hit testing (selection tolerances)
//! - Snapping (radius and candidate kinds)
//! - Dimension style defaults for new drawings
//! - Auto-layout spacing
//! - View label wording

pub use sheetkit_core::drawing::{DimensionConfig, ViewLabelStyle};
use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Viewport behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Smallest allowed zoom factor
    pub zoom_min: f64,
    /// Largest allowed zoom factor
    pub zoom_max: f64,
    /// Zoom multiplier for one wheel step towards the user (zoom in)
    pub wheel_zoom_in: f64,
    /// Zoom multiplier for one wheel step away from the user (zoom out)
    pub wheel_zoom_out: f64,
    /// Strokes never render thinner than this many pixels
    pub min_stroke_px: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 5.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            min_stroke_px: 0.35,
        }
    }
}

/// Selection tolerances in paper millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestSettings {
    /// Distance within which a projection line is hit
    pub line_tolerance_mm: f64,
    /// Endpoint snap distance as a multiple of the line tolerance
    pub endpoint_snap_factor: f64,
    /// Distance within which a dimension or annotation leader is hit
    pub entity_tolerance_mm: f64,
    /// Radius around an annotation's text anchor that counts as a hit
    pub annotation_label_radius_mm: f64,
    /// Margin added around each view box for view picking
    pub view_margin_mm: f64,
}

impl HitTestSettings {
    /// Endpoint snap distance in mm.
    pub fn endpoint_snap_mm(&self) -> f64 {
        self.line_tolerance_mm * self.endpoint_snap_factor
    }
}

impl Default for HitTestSettings {
    fn default() -> Self {
        Self {
            line_tolerance_mm: 10.0,
            endpoint_snap_factor: 1.5,
            entity_tolerance_mm: 8.0,
            annotation_label_radius_mm: 15.0,
            view_margin_mm: 15.0,
        }
    }
}

/// Snap behaviour while picking dimension points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    pub enabled: bool,
    /// Snap radius in paper millimetres
    pub radius_mm: f64,
    pub include_midpoints: bool,
    pub include_intersections: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            radius_mm: 15.0,
            include_midpoints: true,
            include_intersections: true,
        }
    }
}

/// Auto-layout spacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Gap between grid cells in mm
    pub gap_mm: f64,
    /// Leftward bias of the fitted grid as a share of the drawing-area width
    pub bias_x_ratio: f64,
    /// Upward bias of the fitted grid as a share of the drawing-area height
    pub bias_y_ratio: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            gap_mm: 8.0,
            bias_x_ratio: 0.05,
            bias_y_ratio: 0.08,
        }
    }
}

/// View label wording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub style: ViewLabelStyle,
}

/// Complete engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub viewport: ViewportSettings,
    pub hit_test: HitTestSettings,
    pub snap: SnapSettings,
    /// Dimension style applied to new drawings
    pub dimension: DimensionConfig,
    pub layout: LayoutSettings,
    pub labels: LabelSettings,
}

/// File format chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}

impl EngineSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let settings: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::debug!("Loaded engine settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> ConfigResult<()> {
        let vp = &self.viewport;
        positive("viewport.zoom_min", vp.zoom_min)?;
        positive("viewport.zoom_max", vp.zoom_max)?;
        if vp.zoom_min > vp.zoom_max {
            return Err(ConfigError::out_of_range(
                "viewport.zoom_min",
                format!("{} > zoom_max {}", vp.zoom_min, vp.zoom_max),
            ));
        }
        if vp.wheel_zoom_in <= 1.0 {
            return Err(ConfigError::out_of_range("viewport.wheel_zoom_in", vp.wheel_zoom_in));
        }
        if !(vp.wheel_zoom_out > 0.0 && vp.wheel_zoom_out < 1.0) {
            return Err(ConfigError::out_of_range("viewport.wheel_zoom_out", vp.wheel_zoom_out));
        }
        positive("viewport.min_stroke_px", vp.min_stroke_px)?;

        let ht = &self.hit_test;
        positive("hit_test.line_tolerance_mm", ht.line_tolerance_mm)?;
        positive("hit_test.endpoint_snap_factor", ht.endpoint_snap_factor)?;
        positive("hit_test.entity_tolerance_mm", ht.entity_tolerance_mm)?;
        positive("hit_test.annotation_label_radius_mm", ht.annotation_label_radius_mm)?;
        if ht.view_margin_mm < 0.0 {
            return Err(ConfigError::out_of_range("hit_test.view_margin_mm", ht.view_margin_mm));
        }

        positive("snap.radius_mm", self.snap.radius_mm)?;

        let dim = &self.dimension;
        positive("dimension.offset", dim.offset)?;
        positive("dimension.arrow_size", dim.arrow_size)?;
        positive("dimension.text_height", dim.text_height)?;
        if dim.extension_gap < 0.0 || dim.extension_overshoot < 0.0 {
            return Err(ConfigError::out_of_range(
                "dimension.extension_gap",
                format!("{}/{}", dim.extension_gap, dim.extension_overshoot),
            ));
        }
        if dim.precision > 6 {
            return Err(ConfigError::out_of_range("dimension.precision", dim.precision));
        }

        if self.layout.gap_mm < 0.0 {
            return Err(ConfigError::out_of_range("layout.gap_mm", self.layout.gap_mm));
        }

        Ok(())
    }

    /// Merge another settings value into this one.
    ///
    /// Sections of `other` that differ from their defaults replace ours.
    pub fn merge(&mut self, other: &EngineSettings) {
        let defaults = EngineSettings::default();
        if other.viewport != defaults.viewport {
            self.viewport = other.viewport.clone();
        }
        if other.hit_test != defaults.hit_test {
            self.hit_test = other.hit_test.clone();
        }
        if other.snap != defaults.snap {
            self.snap = other.snap.clone();
        }
        if other.dimension != defaults.dimension {
            self.dimension = other.dimension;
        }
        if other.layout != defaults.layout {
            self.layout = other.layout.clone();
        }
        if other.labels != defaults.labels {
            self.labels = other.labels.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EngineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.hit_test.endpoint_snap_mm(), 15.0);
        assert_eq!(settings.dimension.offset, 10.0);
    }

    #[test]
    fn test_inverted_zoom_limits_rejected() {
        let mut settings = EngineSettings::default();
        settings.viewport.zoom_min = 6.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: EngineSettings = toml::from_str("[snap]\nradius_mm = 4.0\n").unwrap();
        assert_eq!(settings.snap.radius_mm, 4.0);
        assert!(settings.snap.enabled);
        assert_eq!(settings.layout.gap_mm, 8.0);
    }

    #[test]
    fn test_merge_takes_changed_sections() {
        let mut base = EngineSettings::default();
        base.layout.gap_mm = 12.0;

        let mut other = EngineSettings::default();
        other.snap.radius_mm = 3.0;

        base.merge(&other);
        assert_eq!(base.snap.radius_mm, 3.0);
        assert_eq!(base.layout.gap_mm, 12.0);
    }
}
