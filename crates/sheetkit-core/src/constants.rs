//! Fixed engine constants. Tunable values live in `sheetkit-settings`.

/// Share of the paper width used by the inner drawing area (4% grid margin per side).
pub const INNER_AREA_RATIO: f64 = 0.92;

/// Grid-reference margin as a share of the scaled paper width.
pub const GRID_MARGIN_RATIO: f64 = 0.04;

/// Share of the available canvas the fitted sheet occupies.
pub const SHEET_FIT_RATIO: f64 = 0.95;

/// Reference grid columns (1..=8) and rows (A..=F).
pub const GRID_COLUMNS: usize = 8;
pub const GRID_ROWS: usize = 6;

/// Isometric foreshortening factor, `sqrt(2/3)`.
pub fn isometric_factor() -> f64 {
    (2.0f64 / 3.0).sqrt()
}

/// Half-width of the angle band around 0/90/180/270 degrees for auto dimensions.
pub const AUTO_DIMENSION_BAND_DEG: f64 = 15.0;

/// Offset floor as a share of the largest view extent.
pub const DIMENSION_OFFSET_VIEW_RATIO: f64 = 0.05;

/// Text distance from the dimension line, in text heights.
pub const DIMENSION_TEXT_GAP_FACTOR: f64 = 1.2;

/// Radial label position along the radius, from the centre.
pub const RADIAL_TEXT_RATIO: f64 = 0.7;

/// Arrow wing length as a share of the arrow size.
pub const ARROW_WING_RATIO: f64 = 0.6;

/// View label distance below the view box (mm).
pub const VIEW_LABEL_GAP_MM: f64 = 8.0;

/// Share of the paper used by the new-view placement slots.
pub const PLACEMENT_AREA_RATIO: f64 = 0.7;

/// Default stroke widths in mm when a sheet has no override.
pub const DEFAULT_VISIBLE_WIDTH_MM: f64 = 0.5;
pub const DEFAULT_HIDDEN_WIDTH_MM: f64 = 0.25;
pub const DEFAULT_DIMENSION_WIDTH_MM: f64 = 0.25;
pub const DEFAULT_CENTERLINE_WIDTH_MM: f64 = 0.18;
pub const DEFAULT_SECTION_WIDTH_MM: f64 = 0.7;
