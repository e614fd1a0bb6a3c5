//! Title block layout and the projection-angle symbol.
//!
//! The block sits in the bottom-right corner of the inner drawing area.
//! Geometry is in paper millimetres, +Y up.
//!
//! ```text
//! +-----------------------------------+
//! | TITLE                             |
//! +----------+--------------+---------+
//! | UNITS    | PROJ. ANGLE  | SIZE    |
//! +----------+--------------+---------+
//! | SCALE    | LAST UPDATE  | SHEET   |
//! +----------+--------------+---------+
//! ```

use chrono::{DateTime, Utc};
use sheetkit_core::{BoundingBox, Point, ProjectionAngle, Segment, SheetConfig, TitleBlockStyle};

/// Column split of the lower two rows.
const COLUMN_SPLIT: [f64; 3] = [0.27, 0.42, 0.31];
const CELL_PADDING_MM: f64 = 1.0;
const TITLE_ROW_FACTOR: f64 = 1.3;

/// What a cell shows besides its caption
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    ProjectionSymbol(ProjectionAngle),
}

/// One captioned cell of the title block
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCell {
    pub rect: BoundingBox,
    pub caption: &'static str,
    pub content: CellContent,
    /// Caption anchor (top-left, inside the padding)
    pub caption_position: Point,
    /// Content centre
    pub content_position: Point,
    pub caption_size: f64,
    pub content_size: f64,
}

/// Computed title block
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlockLayout {
    pub rect: BoundingBox,
    pub cells: Vec<TitleCell>,
    /// Interior cell borders
    pub dividers: Vec<Segment>,
}

fn clamp_size(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

impl TitleBlockLayout {
    /// Lay out the title block inside `inner` (the inner drawing area).
    ///
    /// Returns `None` for [`TitleBlockStyle::None`].
    pub fn compute(
        inner: &BoundingBox,
        sheet: &SheetConfig,
        updated_at: DateTime<Utc>,
    ) -> Option<Self> {
        if sheet.title_block == TitleBlockStyle::None {
            return None;
        }

        let width = clamp_size(inner.width() * 0.15, 50.0, 80.0);
        let row = clamp_size(inner.height() * 0.025, 6.0, 10.0);
        let title_row = row * TITLE_ROW_FACTOR;
        let caption_size = clamp_size(row * 0.25, 1.8, 2.5);
        let value_size = clamp_size(row * 0.35, 2.2, 3.0);
        let title_size = clamp_size(row * 0.45, 2.8, 4.0);

        let full = sheet.title_block == TitleBlockStyle::Standard;
        let height = if full { title_row + 2.0 * row } else { title_row };

        let right = inner.max.x;
        let left = right - width;
        let bottom = inner.min.y;
        let top = bottom + height;
        let rect = BoundingBox::new(Point::new(left, bottom), Point::new(right, top));

        let mut cells = Vec::new();
        let mut dividers = Vec::new();

        let title_rect =
            BoundingBox::new(Point::new(left, top - title_row), Point::new(right, top));
        cells.push(Self::cell(
            title_rect,
            "TITLE",
            CellContent::Text(sheet.title_block_info.title_or_default().to_string()),
            caption_size,
            title_size,
        ));

        if full {
            let units = sheet.units.abbreviation().to_string();
            let size = sheet.size.to_string();
            let rows: [[(&'static str, CellContent); 3]; 2] = [
                [
                    ("UNITS", CellContent::Text(units)),
                    (
                        "PROJ. ANGLE",
                        CellContent::ProjectionSymbol(sheet.projection_angle),
                    ),
                    ("SIZE", CellContent::Text(size)),
                ],
                [
                    ("SCALE", CellContent::Text(sheet.scale_label())),
                    (
                        "LAST UPDATE",
                        CellContent::Text(updated_at.format("%d/%m/%y").to_string()),
                    ),
                    (
                        "SHEET",
                        CellContent::Text(sheet.title_block_info.sheet_number_or_default().to_string()),
                    ),
                ],
            ];

            for (r, row_cells) in rows.into_iter().enumerate() {
                let row_top = top - title_row - row * r as f64;
                let row_bottom = row_top - row;
                dividers.push(Segment::new(Point::new(left, row_top), Point::new(right, row_top)));

                let mut x = left;
                for (c, (caption, content)) in row_cells.into_iter().enumerate() {
                    let w = width * COLUMN_SPLIT[c];
                    if c > 0 {
                        dividers.push(Segment::new(
                            Point::new(x, row_bottom),
                            Point::new(x, row_top),
                        ));
                    }
                    let cell_rect =
                        BoundingBox::new(Point::new(x, row_bottom), Point::new(x + w, row_top));
                    cells.push(Self::cell(cell_rect, caption, content, caption_size, value_size));
                    x += w;
                }
            }
        }

        Some(Self {
            rect,
            cells,
            dividers,
        })
    }

    fn cell(
        rect: BoundingBox,
        caption: &'static str,
        content: CellContent,
        caption_size: f64,
        content_size: f64,
    ) -> TitleCell {
        let caption_position = Point::new(rect.min.x + CELL_PADDING_MM, rect.max.y - CELL_PADDING_MM);
        // Content sits centred in the space below the caption.
        let content_top = caption_position.y - caption_size;
        let content_position = Point::new(
            rect.center().x,
            (content_top + rect.min.y + CELL_PADDING_MM) / 2.0,
        );
        TitleCell {
            rect,
            caption,
            content,
            caption_position,
            content_position,
            caption_size,
            content_size,
        }
    }
}

/// Drawable geometry of the projection-angle symbol
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolGeometry {
    pub segments: Vec<Segment>,
    /// (centre, radius)
    pub circles: Vec<(Point, f64)>,
}

/// Truncated cone plus its end view, laid out for the given convention.
///
/// First angle puts the end view (two circles) left of the cone; third
/// angle puts it on the right, facing the cone's narrow end.
pub fn projection_symbol(angle: ProjectionAngle, rect: &BoundingBox) -> SymbolGeometry {
    let avail_w = (rect.width() - 2.0 * CELL_PADDING_MM).max(0.0);
    let avail_h = (rect.height() - 2.0 * CELL_PADDING_MM).max(0.0);
    let s = avail_h.min(avail_w / 2.3);
    if s <= 0.0 {
        return SymbolGeometry::default();
    }

    let big_r = s / 2.0;
    let small_r = s / 4.0;
    let cone_len = s;
    let gap = 0.3 * s;
    let total = cone_len + gap + s;
    let c = rect.center();
    let x0 = c.x - total / 2.0;

    let (cone_x, circle_cx) = match angle {
        ProjectionAngle::First => (x0 + s + gap, x0 + big_r),
        ProjectionAngle::Third => (x0, x0 + cone_len + gap + big_r),
    };

    // Wide end on the left, narrow end on the right.
    let a = Point::new(cone_x, c.y + big_r);
    let b = Point::new(cone_x + cone_len, c.y + small_r);
    let d = Point::new(cone_x + cone_len, c.y - small_r);
    let e = Point::new(cone_x, c.y - big_r);

    let circle_c = Point::new(circle_cx, c.y);
    let reach = big_r * 1.15;

    SymbolGeometry {
        segments: vec![
            Segment::new(a, b),
            Segment::new(b, d),
            Segment::new(d, e),
            Segment::new(e, a),
            Segment::new(
                circle_c - Point::new(reach, 0.0),
                circle_c + Point::new(reach, 0.0),
            ),
            Segment::new(
                circle_c - Point::new(0.0, reach),
                circle_c + Point::new(0.0, reach),
            ),
        ],
        circles: vec![(circle_c, big_r), (circle_c, small_r)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn inner() -> BoundingBox {
        BoundingBox::from_center(Point::ORIGIN, 386.4, 263.4)
    }

    #[test]
    fn test_standard_block_cells() {
        let sheet = SheetConfig::default();
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let block = TitleBlockLayout::compute(&inner(), &sheet, date).unwrap();

        assert_eq!(block.cells.len(), 7);
        assert!((block.rect.max.x - inner().max.x).abs() < 1e-9);
        assert!((block.rect.min.y - inner().min.y).abs() < 1e-9);
        assert!((block.rect.width() - 57.96).abs() < 1e-9);

        let text = |caption: &str| {
            block
                .cells
                .iter()
                .find(|c| c.caption == caption)
                .map(|c| c.content.clone())
        };
        assert_eq!(text("TITLE"), Some(CellContent::Text("Untitled".into())));
        assert_eq!(text("SCALE"), Some(CellContent::Text("1:4".into())));
        assert_eq!(text("LAST UPDATE"), Some(CellContent::Text("09/03/24".into())));
        assert_eq!(text("SHEET"), Some(CellContent::Text("1/1".into())));
        assert_eq!(text("UNITS"), Some(CellContent::Text("m".into())));
        assert_eq!(
            text("PROJ. ANGLE"),
            Some(CellContent::ProjectionSymbol(ProjectionAngle::First))
        );
    }

    #[test]
    fn test_simple_and_none_styles() {
        let mut sheet = SheetConfig {
            title_block: TitleBlockStyle::Simple,
            ..SheetConfig::default()
        };
        let block = TitleBlockLayout::compute(&inner(), &sheet, Utc::now()).unwrap();
        assert_eq!(block.cells.len(), 1);

        sheet.title_block = TitleBlockStyle::None;
        assert!(TitleBlockLayout::compute(&inner(), &sheet, Utc::now()).is_none());
    }

    #[test]
    fn test_symbol_sides_differ() {
        let rect = BoundingBox::new(Point::new(0.0, 0.0), Point::new(24.0, 8.0));
        let first = projection_symbol(ProjectionAngle::First, &rect);
        let third = projection_symbol(ProjectionAngle::Third, &rect);
        let cone_x = |g: &SymbolGeometry| g.segments[0].start.x;
        assert!(first.circles[0].0.x < cone_x(&first));
        assert!(third.circles[0].0.x > cone_x(&third));
        assert_eq!(first.circles.len(), 2);
    }
}
