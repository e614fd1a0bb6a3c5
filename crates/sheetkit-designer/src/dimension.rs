//! Dimension synthesis
//!
//! Builds dimension geometry from two view-local points. All dimension
//! kinds share one construction:
//!
//! ```text
//! n      = measuring normal   (horizontal: +Y, vertical: +X, aligned: left of p1->p2)
//! level  = offset >= 0 ? max(n.(p - p1)) + offset : min(n.(p - p1)) + offset
//! line   = { p1 + n*level + t*dir }
//! foot_i = (p_i + s*n) ∩ line
//! ```
//!
//! so re-running with the same points, kind and offset reproduces the
//! same geometry bit for bit.
//!
//! Radial and diameter dimensions take the circle centre as `p1` and a rim
//! point as `p2`. They have no extension lines and ignore the offset.

use sheetkit_core::constants::{
    AUTO_DIMENSION_BAND_DEG, DIMENSION_OFFSET_VIEW_RATIO, DIMENSION_TEXT_GAP_FACTOR,
    RADIAL_TEXT_RATIO,
};
use sheetkit_core::geometry::GEOMETRY_EPSILON;
use sheetkit_core::{
    compose_label, Arrow, ArrowStyle, BoundingBox, Dimension, DimensionConfig, DimensionError, DimensionKind,
    DimensionLine, DimensionMode, Drawing, DrawingView, Point, ProjectionType, Segment, SheetConfig,
    ViewId,
};
use uuid::Uuid;

use crate::coords::real_length;

type DimResult<T> = std::result::Result<T, DimensionError>;

/// Geometry shared by new and re-offset dimensions
#[derive(Debug, Clone, PartialEq)]
struct Geometry {
    dimension_line: DimensionLine,
    extension_lines: Vec<Segment>,
    text_position: Point,
    text_rotation_deg: f64,
    value: f64,
}

/// Pick horizontal, vertical or aligned from the angle of `p1 -> p2`.
///
/// Within 15° of 0°/180° is horizontal, within 15° of 90°/270° vertical,
/// anything else aligned.
pub fn classify(p1: Point, p2: Point) -> DimensionKind {
    let theta = Segment::new(p1, p2).angle_degrees();
    let abs = theta.abs();
    if abs < AUTO_DIMENSION_BAND_DEG || abs > 180.0 - AUTO_DIMENSION_BAND_DEG {
        DimensionKind::Horizontal
    } else if (abs - 90.0).abs() < AUTO_DIMENSION_BAND_DEG {
        DimensionKind::Vertical
    } else {
        DimensionKind::Aligned
    }
}

/// Resolve a requested mode to a concrete kind.
pub fn resolve_kind(mode: DimensionMode, p1: Point, p2: Point) -> DimensionKind {
    match mode {
        DimensionMode::Horizontal => DimensionKind::Horizontal,
        DimensionMode::Vertical => DimensionKind::Vertical,
        DimensionMode::Aligned => DimensionKind::Aligned,
        DimensionMode::Auto => classify(p1, p2),
        DimensionMode::Radial => DimensionKind::Radial,
        DimensionMode::Diameter => DimensionKind::Diameter,
    }
}

/// Default offset magnitude: the configured offset, grown with large views.
pub fn default_offset(config: &DimensionConfig, view_bounds: Option<&BoundingBox>) -> f64 {
    let extent = view_bounds
        .map(|b| b.width().max(b.height()))
        .unwrap_or(0.0);
    config.offset.max(DIMENSION_OFFSET_VIEW_RATIO * extent)
}

/// Unit direction along the dimension line and the measuring normal.
fn frame(kind: DimensionKind, p1: Point, p2: Point) -> DimResult<(Point, Point)> {
    match kind {
        DimensionKind::Horizontal => Ok((Point::new(1.0, 0.0), Point::new(0.0, 1.0))),
        DimensionKind::Vertical => Ok((Point::new(0.0, 1.0), Point::new(1.0, 0.0))),
        DimensionKind::Aligned | DimensionKind::Radial | DimensionKind::Diameter => {
            let dir = (p2 - p1).normalized().ok_or(DimensionError::DegenerateSegment {
                length: p1.distance_to(&p2),
            })?;
            Ok((dir, dir.perpendicular()))
        }
    }
}

fn finite(p: Point, what: &str) -> DimResult<Point> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(DimensionError::NonFinite {
            what: what.to_string(),
        })
    }
}

/// Keep label rotation within [-90°, 90°] so text never reads upside down.
fn readable_rotation(mut deg: f64) -> f64 {
    if deg > 90.0 {
        deg -= 180.0;
    } else if deg < -90.0 {
        deg += 180.0;
    }
    deg
}

fn build(
    kind: DimensionKind,
    p1: Point,
    p2: Point,
    offset: f64,
    config: &DimensionConfig,
) -> DimResult<Geometry> {
    if !p1.is_finite() || !p2.is_finite() || !offset.is_finite() {
        return Err(DimensionError::NonFinite {
            what: "input".to_string(),
        });
    }

    if kind.is_circular() {
        return build_circular(kind, p1, p2, config);
    }

    let (dir, n) = frame(kind, p1, p2)?;
    let measured = (p2 - p1).dot(&dir).abs();
    if measured < GEOMETRY_EPSILON {
        return Err(DimensionError::DegenerateSegment { length: measured });
    }

    let rel2 = (p2 - p1).dot(&n);
    let level = if offset >= 0.0 {
        rel2.max(0.0) + offset
    } else {
        rel2.min(0.0) + offset
    };
    let origin = p1 + n * level;
    let line = Segment::new(origin, origin + dir);

    let foot = |p: Point| -> DimResult<Point> {
        let ext = Segment::new(p, p + n);
        ext.line_intersection(&line)
            .ok_or(DimensionError::NearSingular {
                determinant: ext.determinant(&line),
            })
    };
    let foot1 = finite(foot(p1)?, "dimension line start")?;
    let foot2 = finite(foot(p2)?, "dimension line end")?;

    let extension = |p: Point, rel: f64, f: Point| {
        let side = if level >= rel { 1.0 } else { -1.0 };
        Segment::new(
            p + n * (side * config.extension_gap),
            f + n * (side * config.extension_overshoot),
        )
    };
    let extension_lines = vec![extension(p1, 0.0, foot1), extension(p2, rel2, foot2)];

    let outward = (foot1 - foot2)
        .normalized()
        .ok_or(DimensionError::DegenerateSegment { length: measured })?;
    let dimension_line = DimensionLine {
        start: foot1,
        end: foot2,
        start_arrow: Arrow {
            tip: foot1,
            direction: outward,
            style: config.arrow_style,
        },
        end_arrow: Arrow {
            tip: foot2,
            direction: -outward,
            style: config.arrow_style,
        },
    };

    let side = if offset >= 0.0 { n } else { -n };
    let text_position = finite(
        foot1.midpoint(&foot2) + side * (DIMENSION_TEXT_GAP_FACTOR * config.text_height),
        "text position",
    )?;
    let text_rotation_deg = readable_rotation(dir.y.atan2(dir.x).to_degrees());

    Ok(Geometry {
        dimension_line,
        extension_lines,
        text_position,
        text_rotation_deg,
        value: measured,
    })
}

/// Radius or diameter through `rim`, with the label on the left of the
/// centre-to-rim direction.
fn build_circular(
    kind: DimensionKind,
    center: Point,
    rim: Point,
    config: &DimensionConfig,
) -> DimResult<Geometry> {
    let (dir, n) = frame(kind, center, rim)?;
    let radius = center.distance_to(&rim);
    if radius < GEOMETRY_EPSILON {
        return Err(DimensionError::DegenerateSegment { length: radius });
    }

    let gap = n * (DIMENSION_TEXT_GAP_FACTOR * config.text_height);
    let (start, start_style, text_anchor, value) = match kind {
        DimensionKind::Radial => (
            center,
            ArrowStyle::None,
            center + dir * (RADIAL_TEXT_RATIO * radius),
            radius,
        ),
        _ => (center - dir * radius, config.arrow_style, center, 2.0 * radius),
    };

    let dimension_line = DimensionLine {
        start: finite(start, "dimension line start")?,
        end: rim,
        start_arrow: Arrow {
            tip: start,
            direction: -dir,
            style: start_style,
        },
        end_arrow: Arrow {
            tip: rim,
            direction: dir,
            style: config.arrow_style,
        },
    };

    Ok(Geometry {
        dimension_line,
        extension_lines: Vec::new(),
        text_position: finite(text_anchor + gap, "text position")?,
        text_rotation_deg: readable_rotation(dir.y.atan2(dir.x).to_degrees()),
        value,
    })
}

/// Synthesize a new dimension between two view-local points.
pub fn synthesize(
    p1: Point,
    p2: Point,
    mode: DimensionMode,
    offset: f64,
    config: &DimensionConfig,
    view_id: Option<ViewId>,
) -> DimResult<Dimension> {
    let kind = resolve_kind(mode, p1, p2);
    let g = build(kind, p1, p2, offset, config)?;
    tracing::debug!(%kind, value = g.value, offset, "dimension synthesized");
    Ok(Dimension {
        id: Uuid::new_v4(),
        kind,
        dimension_line: g.dimension_line,
        extension_lines: g.extension_lines,
        text_position: g.text_position,
        text_rotation_deg: g.text_rotation_deg,
        value: g.value,
        point1: p1,
        point2: p2,
        offset,
        view_id,
        prefix: kind.default_prefix().map(str::to_string),
        suffix: None,
        label_override: None,
    })
}

/// Regenerate all geometry of `dim` for a new offset.
pub fn with_offset(dim: &Dimension, offset: f64, config: &DimensionConfig) -> DimResult<Dimension> {
    let g = build(dim.kind, dim.point1, dim.point2, offset, config)?;
    Ok(Dimension {
        dimension_line: g.dimension_line,
        extension_lines: g.extension_lines,
        text_position: g.text_position,
        text_rotation_deg: g.text_rotation_deg,
        value: g.value,
        offset,
        ..dim.clone()
    })
}

/// Offset that puts the dimension line through `cursor` (view-local).
///
/// Projects `cursor - point1` on the measuring normal. A cursor between the
/// two measured points pins the line to the upper (or right) point.
/// Radial and diameter dimensions keep their stored offset.
pub fn offset_from_cursor(dim: &Dimension, cursor: Point) -> DimResult<f64> {
    if dim.kind.is_circular() {
        return Ok(dim.offset);
    }
    let (_, n) = frame(dim.kind, dim.point1, dim.point2)?;
    let d = (cursor - dim.point1).dot(&n);
    let rel2 = (dim.point2 - dim.point1).dot(&n);
    let (lo, hi) = (rel2.min(0.0), rel2.max(0.0));
    let offset = if d > hi {
        d - hi
    } else if d < lo {
        d - lo
    } else {
        0.0
    };
    if offset.is_finite() {
        Ok(offset)
    } else {
        Err(DimensionError::NonFinite {
            what: "offset".to_string(),
        })
    }
}

/// Aligned dimension spanning a whole view-local line.
pub fn line_length_dimension(
    line: &Segment,
    view: &DrawingView,
    config: &DimensionConfig,
) -> DimResult<Dimension> {
    let offset = default_offset(config, Some(&view.local_bounds()));
    synthesize(
        line.start,
        line.end,
        DimensionMode::Aligned,
        offset,
        config,
        Some(view.id),
    )
}

/// Point on a circle at `angle_deg`, counter-clockwise from +X.
fn rim_point(center: Point, radius: f64, angle_deg: f64) -> Point {
    let a = angle_deg.to_radians();
    center + Point::new(radius * a.cos(), radius * a.sin())
}

/// Radius dimension of a circle, drawn at `angle_deg`.
pub fn radial_dimension(
    center: Point,
    radius: f64,
    angle_deg: f64,
    config: &DimensionConfig,
    view_id: Option<ViewId>,
) -> DimResult<Dimension> {
    let rim = rim_point(center, radius, angle_deg);
    synthesize(center, rim, DimensionMode::Radial, 0.0, config, view_id)
}

/// Diameter dimension of a circle, drawn across it at `angle_deg`.
pub fn diameter_dimension(
    center: Point,
    diameter: f64,
    angle_deg: f64,
    config: &DimensionConfig,
    view_id: Option<ViewId>,
) -> DimResult<Dimension> {
    let rim = rim_point(center, diameter / 2.0, angle_deg);
    synthesize(center, rim, DimensionMode::Diameter, 0.0, config, view_id)
}

/// Overall width (below the view) and height (right of it) dimensions.
///
/// Degenerate extents are skipped.
pub fn auto_dimension(view: &DrawingView, config: &DimensionConfig) -> Vec<Dimension> {
    let b = view.local_bounds();
    let offset = default_offset(config, Some(&b));
    let mut out = Vec::new();

    match synthesize(
        b.min,
        Point::new(b.max.x, b.min.y),
        DimensionMode::Horizontal,
        -offset,
        config,
        Some(view.id),
    ) {
        Ok(d) => out.push(d),
        Err(e) => tracing::debug!("skipping overall width: {}", e),
    }
    match synthesize(
        Point::new(b.max.x, b.min.y),
        b.max,
        DimensionMode::Vertical,
        offset,
        config,
        Some(view.id),
    ) {
        Ok(d) => out.push(d),
        Err(e) => tracing::debug!("skipping overall height: {}", e),
    }
    out
}

/// Label for a dimension measured in a view of `projection_type`.
pub fn format_label(
    dim: &Dimension,
    config: &DimensionConfig,
    sheet: &SheetConfig,
    projection_type: ProjectionType,
) -> String {
    compose_label(
        dim,
        real_length(dim.value, sheet, projection_type),
        config,
        sheet.units,
    )
}

/// Projection type of the view a dimension is attached to.
fn view_projection_type(dim: &Dimension, drawing: &Drawing) -> ProjectionType {
    dim.view_id
        .and_then(|id| drawing.view(id))
        .map(|v| v.projection_type)
        .unwrap_or(ProjectionType::Front)
}

/// Model length in metres measured by a stored dimension.
pub fn real_value(dim: &Dimension, drawing: &Drawing) -> f64 {
    real_length(dim.value, &drawing.sheet, view_projection_type(dim, drawing))
}

/// Display label of a stored dimension.
pub fn drawing_label(dim: &Dimension, drawing: &Drawing) -> String {
    format_label(
        dim,
        &drawing.dimensions.config,
        &drawing.sheet,
        view_projection_type(dim, drawing),
    )
}
