//! Sheet placement, frame and reference grid.
//!
//! The sheet is fitted into the canvas at zoom 1 and centred. All frame and
//! grid geometry is produced in paper millimetres (origin at the
//! drawing-area centre, +Y up); the [`Viewport`] maps it to the screen.

use sheetkit_core::constants::{
    GRID_COLUMNS, GRID_MARGIN_RATIO, GRID_ROWS, INNER_AREA_RATIO, SHEET_FIT_RATIO,
};
use sheetkit_core::{BoundingBox, Point, Rect, Segment, SheetConfig};

use crate::viewport::Viewport;

/// Label of one reference-grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    pub text: String,
    /// Label centre in paper mm
    pub position: Point,
}

/// Reference grid between the outer and inner frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceGrid {
    pub ticks: Vec<Segment>,
    pub labels: Vec<GridLabel>,
}

/// Sheet placement in the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    /// Screen pixels per paper mm at zoom 1
    pub fit_scale: f64,
    /// Paper rectangle in screen pixels at zoom 1, no pan
    pub paper_rect: Rect,
    /// Grid margin in screen pixels at zoom 1
    pub grid_margin_px: f64,
    /// Inner drawing area in screen pixels at zoom 1, no pan
    pub inner_rect: Rect,
}

impl SheetLayout {
    /// Fit the sheet into a canvas of the given CSS pixel size.
    pub fn compute(sheet: &SheetConfig, canvas_width: f64, canvas_height: f64) -> Self {
        let (paper_w, paper_h) = sheet.paper_dimensions();
        let fit_scale = if paper_w > 0.0 && paper_h > 0.0 {
            (canvas_width / paper_w).min(canvas_height / paper_h) * SHEET_FIT_RATIO
        } else {
            0.0
        };

        let scaled_w = paper_w * fit_scale;
        let scaled_h = paper_h * fit_scale;
        let paper_rect = Rect::new(
            (canvas_width - scaled_w) / 2.0,
            (canvas_height - scaled_h) / 2.0,
            scaled_w,
            scaled_h,
        );

        let grid_margin_px = scaled_w * GRID_MARGIN_RATIO;
        let inner_rect = Rect::new(
            paper_rect.x + grid_margin_px,
            paper_rect.y + grid_margin_px,
            (scaled_w - 2.0 * grid_margin_px).max(0.0),
            (scaled_h - 2.0 * grid_margin_px).max(0.0),
        );

        tracing::trace!(paper_w, paper_h, fit_scale, "sheet layout computed");

        Self {
            paper_width_mm: paper_w,
            paper_height_mm: paper_h,
            fit_scale,
            paper_rect,
            grid_margin_px,
            inner_rect,
        }
    }

    /// `innerDrawingAreaWidthPx / innerDrawingAreaWidthMm`.
    pub fn paper_to_screen_scale(&self) -> f64 {
        let inner_mm = self.paper_width_mm * INNER_AREA_RATIO;
        if inner_mm <= 0.0 {
            return 0.0;
        }
        self.inner_rect.width / inner_mm
    }

    /// Use this layout's scale for the viewport's paper mapping.
    pub fn apply_to(&self, viewport: &mut Viewport) {
        viewport.set_paper_scale(self.paper_to_screen_scale());
    }

    /// Grid margin in paper mm.
    pub fn grid_margin_mm(&self) -> f64 {
        self.paper_width_mm * GRID_MARGIN_RATIO
    }

    /// Outer frame (the paper edge) in paper mm.
    pub fn outer_frame_mm(&self) -> BoundingBox {
        BoundingBox::from_center(Point::ORIGIN, self.paper_width_mm, self.paper_height_mm)
    }

    /// Inner drawing area in paper mm.
    pub fn inner_area_mm(&self) -> BoundingBox {
        let m = self.grid_margin_mm();
        BoundingBox::from_center(
            Point::ORIGIN,
            (self.paper_width_mm - 2.0 * m).max(0.0),
            (self.paper_height_mm - 2.0 * m).max(0.0),
        )
    }

    /// Inner drawing area in screen pixels under the current pan and zoom.
    pub fn inner_rect_screen(&self, viewport: &Viewport) -> Rect {
        let inner = self.inner_area_mm();
        let top_left = viewport.paper_to_screen(Point::new(inner.min.x, inner.max.y));
        let bottom_right = viewport.paper_to_screen(Point::new(inner.max.x, inner.min.y));
        Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    /// Reference grid: numbered columns across, lettered rows down.
    pub fn reference_grid(&self) -> ReferenceGrid {
        let outer = self.outer_frame_mm();
        let inner = self.inner_area_mm();
        let band = self.grid_margin_mm() / 2.0;
        let mut grid = ReferenceGrid::default();

        let col_w = inner.width() / GRID_COLUMNS as f64;
        for i in 0..GRID_COLUMNS {
            let x0 = inner.min.x + col_w * i as f64;
            if i > 0 {
                grid.ticks
                    .push(Segment::new(Point::new(x0, outer.max.y), Point::new(x0, inner.max.y)));
                grid.ticks
                    .push(Segment::new(Point::new(x0, outer.min.y), Point::new(x0, inner.min.y)));
            }
            let cx = x0 + col_w / 2.0;
            let text = (i + 1).to_string();
            grid.labels.push(GridLabel {
                text: text.clone(),
                position: Point::new(cx, outer.max.y - band),
            });
            grid.labels.push(GridLabel {
                text,
                position: Point::new(cx, outer.min.y + band),
            });
        }

        let row_h = inner.height() / GRID_ROWS as f64;
        for j in 0..GRID_ROWS {
            // Rows are lettered from the top edge down.
            let y0 = inner.max.y - row_h * j as f64;
            if j > 0 {
                grid.ticks
                    .push(Segment::new(Point::new(outer.min.x, y0), Point::new(inner.min.x, y0)));
                grid.ticks
                    .push(Segment::new(Point::new(outer.max.x, y0), Point::new(inner.max.x, y0)));
            }
            let cy = y0 - row_h / 2.0;
            let text = char::from(b'A' + j as u8).to_string();
            grid.labels.push(GridLabel {
                text: text.clone(),
                position: Point::new(outer.min.x + band, cy),
            });
            grid.labels.push(GridLabel {
                text,
                position: Point::new(outer.max.x - band, cy),
            });
        }

        grid
    }
}
