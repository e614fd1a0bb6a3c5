//! Stroke styling as a pure function of the line type.

use sheetkit_core::constants::{
    DEFAULT_CENTERLINE_WIDTH_MM, DEFAULT_DIMENSION_WIDTH_MM, DEFAULT_HIDDEN_WIDTH_MM,
    DEFAULT_SECTION_WIDTH_MM, DEFAULT_VISIBLE_WIDTH_MM,
};
use sheetkit_core::{Color, LineCategory, LineType, LineWidths};

const HIDDEN_DASH: [f64; 2] = [4.0, 2.0];
const CENTERLINE_DASH: [f64; 4] = [6.0, 2.0, 1.0, 2.0];

/// Dash pattern in paper mm, `None` for solid strokes.
pub fn dash_array(line_type: LineType) -> Option<&'static [f64]> {
    match line_type.category() {
        LineCategory::Visible | LineCategory::Section => None,
        LineCategory::Hidden => Some(&HIDDEN_DASH),
        LineCategory::Centerline => Some(&CENTERLINE_DASH),
    }
}

pub fn stroke_color(line_type: LineType) -> Color {
    match line_type.category() {
        LineCategory::Hidden => Color::rgb(0x66, 0x66, 0x66),
        LineCategory::Section => Color::rgb(0xcc, 0x00, 0x00),
        LineCategory::Visible | LineCategory::Centerline => Color::BLACK,
    }
}

/// Configured stroke width in paper mm, falling back to the drawing defaults.
pub fn stroke_width_mm(line_type: LineType, widths: &LineWidths) -> f64 {
    match line_type.category() {
        LineCategory::Visible => widths.visible.unwrap_or(DEFAULT_VISIBLE_WIDTH_MM),
        LineCategory::Hidden => widths.hidden.unwrap_or(DEFAULT_HIDDEN_WIDTH_MM),
        LineCategory::Centerline => widths.centerline.unwrap_or(DEFAULT_CENTERLINE_WIDTH_MM),
        LineCategory::Section => widths.section.unwrap_or(DEFAULT_SECTION_WIDTH_MM),
    }
}

/// Stroke width for dimension and leader lines.
pub fn dimension_width_mm(widths: &LineWidths) -> f64 {
    widths.dimension.unwrap_or(DEFAULT_DIMENSION_WIDTH_MM)
}

/// Width actually drawn: never thinner than `min_px` on screen.
///
/// `pixels_per_mm` is the current paper-to-screen scale.
pub fn effective_width_mm(configured_mm: f64, min_px: f64, pixels_per_mm: f64) -> f64 {
    if pixels_per_mm <= 0.0 {
        return configured_mm;
    }
    configured_mm.max(min_px / pixels_per_mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_arrays() {
        assert_eq!(dash_array(LineType::Centerline), Some(&[6.0, 2.0, 1.0, 2.0][..]));
        assert_eq!(dash_array(LineType::HiddenSmooth), Some(&[4.0, 2.0][..]));
        assert_eq!(dash_array(LineType::VisibleSharp), None);
        assert_eq!(dash_array(LineType::SectionCut), None);
    }

    #[test]
    fn test_width_fallbacks() {
        let none = LineWidths::default();
        assert_eq!(stroke_width_mm(LineType::VisibleOutline, &none), 0.5);
        assert_eq!(stroke_width_mm(LineType::HiddenSharp, &none), 0.25);
        assert_eq!(stroke_width_mm(LineType::Centerline, &none), 0.18);
        assert_eq!(stroke_width_mm(LineType::SectionCut, &none), 0.7);
        assert_eq!(dimension_width_mm(&none), 0.25);

        let custom = LineWidths {
            visible: Some(0.7),
            ..LineWidths::default()
        };
        assert_eq!(stroke_width_mm(LineType::VisibleSmooth, &custom), 0.7);
    }

    #[test]
    fn test_colors() {
        assert_eq!(stroke_color(LineType::SectionCut), Color::rgb(0xcc, 0, 0));
        assert_eq!(stroke_color(LineType::HiddenOutline), Color::rgb(0x66, 0x66, 0x66));
        assert_eq!(stroke_color(LineType::VisibleSharp), Color::BLACK);
    }

    #[test]
    fn test_min_pixel_width() {
        // At 0.5 px/mm a 0.18 mm line would be 0.09 px; floor it at 0.35 px.
        let w = effective_width_mm(0.18, 0.35, 0.5);
        assert!((w - 0.7).abs() < 1e-12);
        assert_eq!(effective_width_mm(0.5, 0.35, 10.0), 0.5);
    }
}
