//! Automatic view placement.
//!
//! Positions are paper-space view centres (mm, origin at the drawing-area
//! centre, +Y up).

use sheetkit_core::constants::PLACEMENT_AREA_RATIO;
use sheetkit_core::{BoundingBox, DrawingView, Point, ViewId};
use sheetkit_settings::LayoutSettings;

/// Columns and rows used to fit `count` views.
pub fn grid_shape(count: usize) -> (usize, usize) {
    match count {
        0 => (0, 0),
        1 => (1, 1),
        2 => (2, 1),
        3 | 4 => (2, 2),
        5 | 6 => (3, 2),
        n => {
            let cols = (n as f64).sqrt().ceil() as usize;
            (cols, n.div_ceil(cols))
        }
    }
}

/// Cell centres for boxes of the given `(width, height)`, row-major.
///
/// Column widths and row heights are the largest box in that column or
/// row. The grid is centred, then nudged left and up by the configured
/// share of the drawing area.
pub fn fit_all_sizes(
    sizes: &[(f64, f64)],
    inner_w: f64,
    inner_h: f64,
    settings: &LayoutSettings,
) -> Vec<Point> {
    let (cols, rows) = grid_shape(sizes.len());
    if cols == 0 {
        return Vec::new();
    }

    let mut col_w = vec![0.0_f64; cols];
    let mut row_h = vec![0.0_f64; rows];
    for (i, &(w, h)) in sizes.iter().enumerate() {
        let (c, r) = (i % cols, i / cols);
        col_w[c] = col_w[c].max(w);
        row_h[r] = row_h[r].max(h);
    }

    let gap = settings.gap_mm;
    let total_w: f64 = col_w.iter().sum::<f64>() + gap * (cols - 1) as f64;
    let total_h: f64 = row_h.iter().sum::<f64>() + gap * (rows - 1) as f64;
    let left = -total_w / 2.0 - settings.bias_x_ratio * inner_w;
    let top = total_h / 2.0 + settings.bias_y_ratio * inner_h;

    let col_x: Vec<f64> = col_w
        .iter()
        .scan(left, |x, w| {
            let centre = *x + w / 2.0;
            *x += w + gap;
            Some(centre)
        })
        .collect();
    let row_y: Vec<f64> = row_h
        .iter()
        .scan(top, |y, h| {
            let centre = *y - h / 2.0;
            *y -= h + gap;
            Some(centre)
        })
        .collect();

    (0..sizes.len())
        .map(|i| Point::new(col_x[i % cols], row_y[i / cols]))
        .collect()
}

/// New positions for all visible views, in list order.
pub fn fit_all_views(
    views: &[DrawingView],
    inner_w: f64,
    inner_h: f64,
    settings: &LayoutSettings,
) -> Vec<(ViewId, Point)> {
    let visible: Vec<&DrawingView> = views.iter().filter(|v| v.visible).collect();
    let sizes: Vec<(f64, f64)> = visible.iter().map(|v| (v.width(), v.height())).collect();
    let positions = fit_all_sizes(&sizes, inner_w, inner_h, settings);
    tracing::info!(views = positions.len(), "fit all views");
    visible.iter().map(|v| v.id).zip(positions).collect()
}

/// The four quadrant slots: top-left, top-right, bottom-left, bottom-right.
pub fn quadrant_slots(paper_w: f64, paper_h: f64) -> [Point; 4] {
    let w = PLACEMENT_AREA_RATIO * paper_w / 6.0;
    let h = PLACEMENT_AREA_RATIO * paper_h / 6.0;
    [
        Point::new(-w, h),
        Point::new(w, h),
        Point::new(-w, -h),
        Point::new(w, -h),
    ]
}

fn nearest_slot(slots: &[Point; 4], p: Point) -> usize {
    let mut best = 0;
    for (i, s) in slots.iter().enumerate().skip(1) {
        if p.distance_to(s) < p.distance_to(&slots[best]) {
            best = i;
        }
    }
    best
}

/// Position for a view about to be added.
///
/// The first four views take the quadrant slots in order, skipping slots
/// already claimed (a slot is claimed by every view for which it is the
/// nearest). Later views line up to the right of the last one.
pub fn place_new_view(
    existing: &[DrawingView],
    new_box: &BoundingBox,
    paper_w: f64,
    paper_h: f64,
    gap: f64,
) -> Point {
    let slots = quadrant_slots(paper_w, paper_h);

    let Some(last) = existing.last() else {
        return slots[0];
    };

    if existing.len() < slots.len() {
        let mut taken = [false; 4];
        for v in existing {
            taken[nearest_slot(&slots, v.position)] = true;
        }
        if let Some(i) = taken.iter().position(|t| !t) {
            return slots[i];
        }
    }

    Point::new(
        last.position.x + last.width() / 2.0 + gap + new_box.width() / 2.0,
        last.position.y,
    )
}
