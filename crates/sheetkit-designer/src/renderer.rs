//! Sheet renderer
//! Draws a drawing snapshot to an image buffer using tiny-skia.
//!
//! Features:
//! - Sheet frame, reference grid and title block
//! - Projection lines styled by line type
//! - Dimensions, annotations and interaction overlays
//! - Output in device pixels
//!
//! Geometry is built in paper millimetres and mapped to device pixels by a
//! single transform, so stroke widths and dash lengths are paper sizes.

use image::{Rgb, RgbImage};
use rusttype::{point as rt_point, Font, Scale};
use sheetkit_core::constants::{ARROW_WING_RATIO, VIEW_LABEL_GAP_MM};
use sheetkit_core::{
    resolve_style, Arrow, ArrowStyle, BoundingBox, Color as SheetColor, Dimension, Drawing,
    Point, Segment, ViewId, ViewLabelStyle,
};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash,
    Transform,
};
use uuid::Uuid;

use crate::dimension::drawing_label;
use crate::font_manager;
use crate::hit_test::{annotation_box, Hit, LineHit};
use crate::interaction::Selection;
use crate::line_style::{dash_array, dimension_width_mm, effective_width_mm, stroke_color, stroke_width_mm};
use crate::sheet_layout::SheetLayout;
use crate::snap::{SnapKind, SnapResult};
use crate::title_block::{projection_symbol, CellContent, TitleBlockLayout};
use crate::viewport::Viewport;

const FRAME_WIDTH_MM: f64 = 0.5;
const INNER_FRAME_WIDTH_MM: f64 = 0.35;
const THIN_WIDTH_MM: f64 = 0.25;
const BBOX_PADDING_MM: f64 = 5.0;
const VIEW_LABEL_SIZE_MM: f64 = 3.5;
const MARKER_SIZE_PX: f64 = 8.0;

fn bg_color() -> Color {
    Color::from_rgba8(0xd8, 0xdc, 0xe0, 255)
}
fn paper_color() -> Color {
    Color::WHITE
}
fn ink_color() -> Color {
    Color::BLACK
}
fn highlight_color() -> Color {
    Color::from_rgba8(0x1e, 0x88, 0xe5, 255)
}
fn bbox_color() -> Color {
    Color::from_rgba8(0xa0, 0xa0, 0xa0, 255)
}
fn snap_color() -> Color {
    Color::from_rgba8(0x2e, 0x7d, 0x32, 255)
}
fn pick_color() -> Color {
    Color::from_rgba8(0xe5, 0x39, 0x35, 255)
}

fn to_skia(c: SheetColor) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Overlay state exported by the interaction controller
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub hovered: Option<Hit>,
    pub dragging_view: Option<ViewId>,
    pub selection: Selection,
    pub snap: Option<SnapResult>,
    /// Pending dimension picks (paper mm)
    pub picks: Vec<Point>,
    pub hover_line: Option<LineHit>,
    /// Note being edited and its unsaved text
    pub editing: Option<(Uuid, String)>,
    pub label_style: ViewLabelStyle,
    pub min_stroke_px: f64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            hovered: None,
            dragging_view: None,
            selection: Selection::None,
            snap: None,
            picks: Vec::new(),
            hover_line: None,
            editing: None,
            label_style: ViewLabelStyle::default(),
            min_stroke_px: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TextAlign {
    Center,
    TopLeft,
}

/// Drawing surface in paper millimetres
struct Sheet<'a> {
    pixmap: Pixmap,
    transform: Transform,
    viewport: &'a Viewport,
    /// Device pixels per paper mm
    device_scale: f64,
    min_stroke_px: f64,
    font: Option<&'static Font<'static>>,
}

impl Sheet<'_> {
    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self, width_mm: f64, dash: Option<&[f64]>) -> Stroke {
        let width = effective_width_mm(width_mm, self.min_stroke_px, self.viewport.pixels_per_mm());
        Stroke {
            width: width as f32,
            dash: dash.and_then(|d| StrokeDash::new(d.iter().map(|v| *v as f32).collect(), 0.0)),
            ..Stroke::default()
        }
    }

    /// Paper length for a fixed on-screen size.
    fn screen_mm(&self, px: f64) -> f64 {
        self.viewport.screen_len_to_paper(px)
    }

    fn segments<I>(&mut self, segments: I, color: Color, width_mm: f64, dash: Option<&[f64]>)
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut pb = PathBuilder::new();
        for s in segments {
            pb.move_to(s.start.x as f32, s.start.y as f32);
            pb.line_to(s.end.x as f32, s.end.y as f32);
        }
        if let Some(path) = pb.finish() {
            let stroke = self.stroke(width_mm, dash);
            self.pixmap
                .stroke_path(&path, &Self::paint(color), &stroke, self.transform, None);
        }
    }

    fn polygon(&mut self, points: &[Point], color: Color) {
        let mut pb = PathBuilder::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                pb.move_to(p.x as f32, p.y as f32);
            } else {
                pb.line_to(p.x as f32, p.y as f32);
            }
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap
                .fill_path(&path, &Self::paint(color), FillRule::Winding, self.transform, None);
        }
    }

    fn fill_box(&mut self, b: &BoundingBox, color: Color) {
        let corners = [
            b.min,
            Point::new(b.max.x, b.min.y),
            b.max,
            Point::new(b.min.x, b.max.y),
        ];
        self.polygon(&corners, color);
    }

    fn stroke_box(&mut self, b: &BoundingBox, color: Color, width_mm: f64, dash: Option<&[f64]>) {
        let c = [
            b.min,
            Point::new(b.max.x, b.min.y),
            b.max,
            Point::new(b.min.x, b.max.y),
        ];
        let edges = (0..4).map(|i| Segment::new(c[i], c[(i + 1) % 4]));
        self.segments(edges, color, width_mm, dash);
    }

    fn circle(&mut self, center: Point, radius: f64, color: Color, fill: bool, width_mm: f64) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        let paint = Self::paint(color);
        if fill {
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        } else {
            let stroke = self.stroke(width_mm, None);
            self.pixmap
                .stroke_path(&path, &paint, &stroke, self.transform, None);
        }
    }

    /// Draw `text` of height `size_mm` at `anchor`, rotated counter-clockwise.
    fn text(
        &mut self,
        text: &str,
        anchor: Point,
        size_mm: f64,
        color: Color,
        align: TextAlign,
        rotation_deg: f64,
    ) {
        let Some(font) = self.font else {
            return;
        };
        let px = (size_mm * self.device_scale) as f32;
        if text.is_empty() || px < 1.0 {
            return;
        }

        let scale = Scale::uniform(px);
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<_> = font
            .layout(text, scale, rt_point(0.0, v_metrics.ascent))
            .collect();
        let width = glyphs
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
            .ceil();
        let height = (v_metrics.ascent - v_metrics.descent).ceil();
        let Some(mut tile) = Pixmap::new(width as u32 + 2, height as u32 + 2) else {
            return;
        };

        let tile_w = tile.width();
        let tile_h = tile.height();
        let (r, g, b) = (color.red(), color.green(), color.blue());
        for glyph in &glyphs {
            if let Some(bounding_box) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let tx = gx as i32 + bounding_box.min.x;
                    let ty = gy as i32 + bounding_box.min.y;
                    if tx < 0 || ty < 0 || tx >= tile_w as i32 || ty >= tile_h as i32 {
                        return;
                    }
                    let idx = ((ty as u32 * tile_w + tx as u32) * 4) as usize;
                    let pixel = &mut tile.data_mut()[idx..idx + 4];
                    let a = v.clamp(0.0, 1.0);
                    let alpha = (a * 255.0) as u8;
                    if alpha > pixel[3] {
                        // Premultiplied
                        pixel[0] = (r * a * 255.0) as u8;
                        pixel[1] = (g * a * 255.0) as u8;
                        pixel[2] = (b * a * 255.0) as u8;
                        pixel[3] = alpha;
                    }
                });
            }
        }

        let (ox, oy) = match align {
            TextAlign::Center => (-(width / 2.0), -(height / 2.0)),
            TextAlign::TopLeft => (0.0, 0.0),
        };
        let at = self.viewport.paper_to_device(anchor);
        let transform = Transform::from_translate(at.x as f32, at.y as f32)
            .pre_concat(Transform::from_rotate(-rotation_deg as f32))
            .pre_concat(Transform::from_translate(ox, oy));
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, tile.as_ref(), &paint, transform, None);
    }

    fn into_image(self) -> RgbImage {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let data = self.pixmap.data();
        RgbImage::from_fn(width, height, |x, y| {
            let idx = ((y * width + x) * 4) as usize;
            Rgb([data[idx], data[idx + 1], data[idx + 2]])
        })
    }
}

/// Render `drawing` as seen through `viewport`.
///
/// The image is `canvas × device_pixel_ratio` pixels. Rendering reads the
/// snapshot only; hover, selection and pick markers come from `state`.
pub fn render(drawing: &Drawing, state: &RenderState, viewport: &Viewport) -> RgbImage {
    let dpr = viewport.device_pixel_ratio();
    let width = (viewport.canvas_width() * dpr).round().max(0.0) as u32;
    let height = (viewport.canvas_height() * dpr).round().max(0.0) as u32;
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(bg_color());

    let origin = viewport.paper_to_device(Point::ORIGIN);
    let device_scale = viewport.pixels_per_mm() * dpr;
    let s = device_scale as f32;
    let transform = Transform::from_row(s, 0.0, 0.0, -s, origin.x as f32, origin.y as f32);

    let font = font_manager::get_font();
    if font.is_none() {
        tracing::debug!("no font available, text skipped");
    }

    let mut sheet = Sheet {
        pixmap,
        transform,
        viewport,
        device_scale,
        min_stroke_px: state.min_stroke_px,
        font,
    };

    draw_sheet(&mut sheet, drawing);
    draw_views(&mut sheet, drawing, state);
    draw_dimensions(&mut sheet, drawing, state);
    draw_annotations(&mut sheet, drawing, state);
    draw_overlays(&mut sheet, state);

    sheet.into_image()
}

fn draw_sheet(sheet: &mut Sheet<'_>, drawing: &Drawing) {
    let layout = SheetLayout::compute(
        &drawing.sheet,
        sheet.viewport.canvas_width(),
        sheet.viewport.canvas_height(),
    );
    let outer = layout.outer_frame_mm();
    let inner = layout.inner_area_mm();

    sheet.fill_box(&outer, paper_color());
    sheet.stroke_box(&outer, ink_color(), FRAME_WIDTH_MM, None);
    sheet.stroke_box(&inner, ink_color(), INNER_FRAME_WIDTH_MM, None);

    let grid = layout.reference_grid();
    sheet.segments(grid.ticks.iter().copied(), ink_color(), THIN_WIDTH_MM, None);
    let label_size = (layout.grid_margin_mm() * 0.5).clamp(2.0, 5.0);
    for label in &grid.labels {
        sheet.text(&label.text, label.position, label_size, ink_color(), TextAlign::Center, 0.0);
    }

    let Some(block) = TitleBlockLayout::compute(&inner, &drawing.sheet, drawing.updated_at) else {
        return;
    };
    sheet.fill_box(&block.rect, paper_color());
    sheet.stroke_box(&block.rect, ink_color(), FRAME_WIDTH_MM, None);
    sheet.segments(block.dividers.iter().copied(), ink_color(), THIN_WIDTH_MM, None);

    for cell in &block.cells {
        sheet.text(
            cell.caption,
            cell.caption_position,
            cell.caption_size,
            ink_color(),
            TextAlign::TopLeft,
            0.0,
        );
        match &cell.content {
            CellContent::Text(text) => sheet.text(
                text,
                cell.content_position,
                cell.content_size,
                ink_color(),
                TextAlign::Center,
                0.0,
            ),
            CellContent::ProjectionSymbol(angle) => {
                // Symbol fills the space under the caption.
                let below = BoundingBox::new(
                    cell.rect.min,
                    Point::new(cell.rect.max.x, cell.caption_position.y - cell.caption_size),
                );
                let symbol = projection_symbol(*angle, &below);
                sheet.segments(symbol.segments.iter().copied(), ink_color(), THIN_WIDTH_MM, None);
                for (c, r) in &symbol.circles {
                    sheet.circle(*c, *r, ink_color(), false, THIN_WIDTH_MM);
                }
            }
        }
    }
}

fn draw_views(sheet: &mut Sheet<'_>, drawing: &Drawing, state: &RenderState) {
    let widths = &drawing.sheet.line_widths;

    for view in drawing.visible_views() {
        for (segment, line_type) in view.local_lines() {
            sheet.segments(
                [segment.translate(view.position)],
                to_skia(stroke_color(line_type)),
                stroke_width_mm(line_type, widths),
                dash_array(line_type),
            );
        }

        let highlighted = state.hovered == Some(Hit::View(view.id))
            || state.dragging_view == Some(view.id);
        if highlighted || drawing.display.show_bounding_boxes {
            let padded = view.paper_bounds().inflate(BBOX_PADDING_MM);
            let (color, dash) = if highlighted {
                (highlight_color(), None)
            } else {
                (bbox_color(), Some(&[2.0, 1.0][..]))
            };
            sheet.stroke_box(&padded, color, THIN_WIDTH_MM, dash);
        }

        if drawing.display.show_labels {
            let bounds = view.paper_bounds();
            let at = Point::new(view.position.x, bounds.min.y - VIEW_LABEL_GAP_MM);
            sheet.text(
                &view.label(state.label_style),
                at,
                VIEW_LABEL_SIZE_MM,
                ink_color(),
                TextAlign::Center,
                0.0,
            );
        }
    }
}

fn view_hidden(drawing: &Drawing, view_id: Option<ViewId>) -> bool {
    view_id
        .and_then(|id| drawing.view(id))
        .is_some_and(|v| !v.visible)
}

fn draw_arrow(sheet: &mut Sheet<'_>, arrow: &Arrow, offset: Point, size: f64, color: Color, width: f64) {
    let tip = arrow.tip + offset;
    let d = arrow.direction;
    let n = d.perpendicular();
    let back = tip - d * size;
    let half = ARROW_WING_RATIO * size / 2.0;
    let wing_a = back + n * half;
    let wing_b = back - n * half;

    match arrow.style {
        ArrowStyle::Filled => sheet.polygon(&[tip, wing_a, wing_b], color),
        ArrowStyle::Open => sheet.segments(
            [Segment::new(wing_a, tip), Segment::new(tip, wing_b)],
            color,
            width,
            None,
        ),
        ArrowStyle::Tick => {
            let slash = d.rotated(std::f64::consts::FRAC_PI_4) * (size / 2.0);
            sheet.segments([Segment::new(tip - slash, tip + slash)], color, width, None);
        }
        ArrowStyle::Dot => sheet.circle(tip, size / 3.0, color, true, width),
        ArrowStyle::None => {}
    }
}

fn draw_dimensions(sheet: &mut Sheet<'_>, drawing: &Drawing, state: &RenderState) {
    let config = &drawing.dimensions.config;
    let width = dimension_width_mm(&drawing.sheet.line_widths);

    for (index, dim) in drawing.dimensions.items.iter().enumerate() {
        if view_hidden(drawing, dim.view_id) {
            continue;
        }
        let offset = drawing.anchor_offset(dim.view_id);
        let active = state.selection == Selection::Dimension(index)
            || state.hovered == Some(Hit::Dimension(index));
        let color = if active { highlight_color() } else { ink_color() };

        draw_dimension(sheet, dim, offset, color, width, config.arrow_size);
        sheet.text(
            &drawing_label(dim, drawing),
            dim.text_position + offset,
            config.text_height,
            color,
            TextAlign::Center,
            dim.text_rotation_deg,
        );
    }
}

fn draw_dimension(
    sheet: &mut Sheet<'_>,
    dim: &Dimension,
    offset: Point,
    color: Color,
    width: f64,
    arrow_size: f64,
) {
    let lines = dim
        .extension_lines
        .iter()
        .map(|s| s.translate(offset))
        .chain(std::iter::once(dim.dimension_line.segment().translate(offset)));
    sheet.segments(lines, color, width, None);
    if dim.kind.is_circular() {
        let c = dim.point1 + offset;
        let h = arrow_size / 2.0;
        let mark = [
            Segment::new(c - Point::new(h, 0.0), c + Point::new(h, 0.0)),
            Segment::new(c - Point::new(0.0, h), c + Point::new(0.0, h)),
        ];
        sheet.segments(mark, color, width, None);
    }
    draw_arrow(sheet, &dim.dimension_line.start_arrow, offset, arrow_size, color, width);
    draw_arrow(sheet, &dim.dimension_line.end_arrow, offset, arrow_size, color, width);
}

fn draw_annotations(sheet: &mut Sheet<'_>, drawing: &Drawing, state: &RenderState) {
    for note in &drawing.annotations.items {
        if view_hidden(drawing, note.view_id) {
            continue;
        }
        let offset = drawing.anchor_offset(note.view_id);
        let style = resolve_style(note, &drawing.annotations.default_style);

        let mut shown = note.clone();
        if let Some((id, buffer)) = &state.editing {
            if *id == note.id {
                shown.text = buffer.clone();
            }
        }

        let active = state.selection == Selection::Annotation(note.id)
            || matches!(state.hovered, Some(Hit::Annotation(h)) if h.id == note.id);
        let border = if active {
            highlight_color()
        } else {
            to_skia(style.border_color)
        };

        let anchor = note.anchor_point + offset;
        let b = annotation_box(&shown, &style).translate(offset);
        sheet.segments(
            [Segment::new(anchor, note.position + offset)],
            to_skia(style.text_color),
            style.leader_width,
            None,
        );
        sheet.circle(anchor, style.leader_width * 2.0, to_skia(style.text_color), true, 0.0);
        sheet.fill_box(&b, to_skia(style.background));
        sheet.stroke_box(&b, border, THIN_WIDTH_MM, None);
        sheet.text(
            &shown.text,
            Point::new(b.min.x + style.padding, b.max.y - style.padding),
            style.font_size,
            to_skia(style.text_color),
            TextAlign::TopLeft,
            0.0,
        );
    }
}

fn draw_overlays(sheet: &mut Sheet<'_>, state: &RenderState) {
    let marker = sheet.screen_mm(MARKER_SIZE_PX);
    let line_width = sheet.screen_mm(1.5);

    if let Some(hit) = &state.hover_line {
        sheet.segments(
            [hit.segment.translate(hit.view_position)],
            highlight_color(),
            line_width,
            None,
        );
    }

    if let Some(snap) = &state.snap {
        let p = snap.paper_point();
        let h = marker / 2.0;
        match snap.snap.kind {
            SnapKind::Endpoint => {
                let b = BoundingBox::from_center(p, marker, marker);
                sheet.stroke_box(&b, snap_color(), line_width, None);
            }
            SnapKind::Midpoint => {
                let tri = [
                    Point::new(p.x - h, p.y - h),
                    Point::new(p.x + h, p.y - h),
                    Point::new(p.x, p.y + h),
                ];
                let edges = (0..3).map(|i| Segment::new(tri[i], tri[(i + 1) % 3]));
                sheet.segments(edges, snap_color(), line_width, None);
            }
            SnapKind::Intersection => {
                sheet.segments(
                    [
                        Segment::new(Point::new(p.x - h, p.y - h), Point::new(p.x + h, p.y + h)),
                        Segment::new(Point::new(p.x - h, p.y + h), Point::new(p.x + h, p.y - h)),
                    ],
                    snap_color(),
                    line_width,
                    None,
                );
            }
        }
    }

    for p in &state.picks {
        let h = marker / 2.0;
        sheet.segments(
            [
                Segment::new(Point::new(p.x - h, p.y), Point::new(p.x + h, p.y)),
                Segment::new(Point::new(p.x, p.y - h), Point::new(p.x, p.y + h)),
            ],
            pick_color(),
            line_width,
            None,
        );
        sheet.circle(*p, h * 0.6, pick_color(), false, line_width);
    }
}
