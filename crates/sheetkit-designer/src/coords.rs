//! Conversions between model, projection, view-local and paper space.
//!
//! ```text
//! model (m) --x scale*U--> projection (mm) --minus box centre--> view-local
//!   --plus view position--> paper (mm) --Viewport--> screen (px)
//! ```
//!
//! Screen conversions live on [`crate::Viewport`]; everything here is
//! independent of pan and zoom.

use sheetkit_core::constants::isometric_factor;
use sheetkit_core::{DrawingView, Point, ProjectionType, SheetConfig};

/// Model length in metres to projection-space millimetres.
pub fn model_to_projection(length_m: f64, sheet: &SheetConfig) -> f64 {
    length_m * sheet.projection_factor()
}

/// Model length in metres of a measured paper length.
///
/// `paper_len / (scale × U)`, further divided by `sqrt(2/3)` for isometric
/// views to undo the axonometric foreshortening. `U` already sits in the
/// projection scale, so the result is in metres whatever the sheet unit;
/// dimension labels print this number followed by the sheet unit symbol.
pub fn real_length(paper_len: f64, sheet: &SheetConfig, projection_type: ProjectionType) -> f64 {
    let factor = sheet.projection_factor();
    if factor <= 0.0 || !factor.is_finite() {
        return 0.0;
    }
    let value = paper_len / factor;
    if projection_type.is_isometric() {
        value / isometric_factor()
    } else {
        value
    }
}

/// Projection-space point to paper space.
pub fn projection_to_paper(view: &DrawingView, p: Point) -> Point {
    view.local_to_paper(view.projection_to_local(p))
}

/// Paper-space point to projection space.
pub fn paper_to_projection(view: &DrawingView, p: Point) -> Point {
    view.paper_to_local(p) + view.projection.bounding_box.center()
}
