//! SheetKit preview
//!
//! Builds a sample bracket drawing through the same paths an editor uses
//! (projection generator, auto layout, dimensioning) and renders the sheet.
//!
//! Usage: `sheetkit [output.png] [settings.toml|settings.json]`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use sheetkit::core::Annotation;
use sheetkit::designer::dimension::{auto_dimension, drawing_label};
use sheetkit::designer::layout::fit_all_views;
use sheetkit::designer::DrawingStore;
use sheetkit::{
    add_view, init_logging, render, Drawing, EngineSettings, InteractionController, Line2D,
    LineType, MemoryStore, Point, Projection, ProjectionGenerator, ProjectionType, SheetConfig,
    SheetLayout, Viewport, BUILD_DATE, VERSION,
};

const CANVAS_WIDTH: f64 = 1600.0;
const CANVAS_HEIGHT: f64 = 1131.0;
const SHAPE_ID: &str = "bracket";

/// Box-shaped part with a through hole, sized in metres
struct BracketKernel {
    length: f64,
    width: f64,
    height: f64,
    hole: f64,
}

fn rect(w: f64, h: f64, line_type: LineType) -> Vec<Line2D> {
    vec![
        Line2D::new(Point::new(0.0, 0.0), Point::new(w, 0.0), line_type),
        Line2D::new(Point::new(w, 0.0), Point::new(w, h), line_type),
        Line2D::new(Point::new(w, h), Point::new(0.0, h), line_type),
        Line2D::new(Point::new(0.0, h), Point::new(0.0, 0.0), line_type),
    ]
}

impl BracketKernel {
    fn outline(&self, projection_type: ProjectionType, k: f64) -> Vec<Line2D> {
        let (l, w, h, d) = (self.length * k, self.width * k, self.height * k, self.hole * k);
        match projection_type {
            ProjectionType::Front | ProjectionType::Back => {
                let mut lines = rect(l, h, LineType::VisibleOutline);
                let x0 = (l - d) / 2.0;
                lines.push(Line2D::new(Point::new(x0, 0.0), Point::new(x0, h), LineType::HiddenSharp));
                lines.push(Line2D::new(Point::new(x0 + d, 0.0), Point::new(x0 + d, h), LineType::HiddenSharp));
                lines.push(Line2D::new(
                    Point::new(l / 2.0, -0.1 * h),
                    Point::new(l / 2.0, 1.1 * h),
                    LineType::Centerline,
                ));
                lines
            }
            ProjectionType::Top | ProjectionType::Bottom => {
                let mut lines = rect(l, w, LineType::VisibleOutline);
                let (cx, cy) = (l / 2.0, w / 2.0);
                let r = d / 2.0;
                // Hole drawn as a square of its diameter.
                let corner = Point::new(cx - r, cy - r);
                lines.extend(
                    rect(d, d, LineType::VisibleSharp)
                        .into_iter()
                        .map(|s| Line2D::new(s.start + corner, s.end + corner, s.line_type)),
                );
                lines
            }
            ProjectionType::Right | ProjectionType::Left => rect(w, h, LineType::VisibleOutline),
            ProjectionType::Isometric => {
                let f = sheetkit::core::constants::isometric_factor();
                let (c, s) = (30f64.to_radians().cos() * f, 30f64.to_radians().sin() * f);
                let iso = |x: f64, y: f64, z: f64| Point::new((x - y) * c, (x + y) * s + z * f);
                let corners = [
                    iso(0.0, 0.0, 0.0),
                    iso(l, 0.0, 0.0),
                    iso(l, w, 0.0),
                    iso(l, w, h),
                    iso(0.0, w, h),
                    iso(0.0, 0.0, h),
                ];
                let mut lines: Vec<Line2D> = (0..corners.len())
                    .map(|i| {
                        Line2D::new(
                            corners[i],
                            corners[(i + 1) % corners.len()],
                            LineType::VisibleOutline,
                        )
                    })
                    .collect();
                let top = iso(l, 0.0, h);
                for p in [corners[1], corners[3], corners[5]] {
                    lines.push(Line2D::new(top, p, LineType::VisibleSmooth));
                }
                lines
            }
        }
    }
}

#[async_trait]
impl ProjectionGenerator for BracketKernel {
    async fn generate_projection(
        &self,
        shape_id: &str,
        projection_type: ProjectionType,
        scale: f64,
    ) -> anyhow::Result<Projection> {
        anyhow::ensure!(shape_id == SHAPE_ID, "unknown shape {}", shape_id);
        let mut projection = Projection::from_lines(self.outline(projection_type, scale));
        if projection_type.is_isometric() {
            projection.label = Some("Isometric".to_string());
        }
        Ok(projection)
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<EngineSettings> {
    let settings = match path {
        Some(p) => EngineSettings::load_from_file(p)
            .with_context(|| format!("loading settings from {}", p.display()))?,
        None => EngineSettings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, build = BUILD_DATE, "SheetKit preview");

    let mut args = std::env::args().skip(1);
    let output = args.next().map(PathBuf::from);
    let settings_path = args.next().map(PathBuf::from);
    let settings = load_settings(settings_path.as_deref())?;

    let mut drawing = Drawing::new("Bracket", SheetConfig::default());
    drawing.sheet.title_block_info.title = Some("Bracket".to_string());
    drawing.source_shape_ids = vec![SHAPE_ID.to_string()];
    drawing.dimensions.config = settings.dimension.clone();
    drawing.display.show_labels = true;
    let mut store = MemoryStore::new(drawing);

    let kernel = BracketKernel {
        length: 0.4,
        width: 0.2,
        height: 0.15,
        hole: 0.06,
    };
    let no_remap = HashMap::new();
    let mut front = None;
    for projection_type in [
        ProjectionType::Front,
        ProjectionType::Top,
        ProjectionType::Right,
        ProjectionType::Isometric,
    ] {
        let id = add_view(
            &kernel,
            &mut store,
            SHAPE_ID,
            projection_type,
            &no_remap,
            &settings.layout,
        )
        .await?;
        front.get_or_insert(id);
    }

    let layout = SheetLayout::compute(&store.drawing().sheet, CANVAS_WIDTH, CANVAS_HEIGHT);
    let inner = layout.inner_area_mm();
    let placed = fit_all_views(
        &store.drawing().views,
        inner.width(),
        inner.height(),
        &settings.layout,
    );
    for (view_id, position) in placed {
        store.update_view_position(view_id, position)?;
    }

    let front_view = front.and_then(|id| store.drawing().view(id)).cloned();
    if let Some(view) = front_view {
        for dim in auto_dimension(&view, &store.drawing().dimensions.config) {
            store.add_dimension(dim);
        }
        let b = view.local_bounds();
        store.add_annotation(Annotation::new(
            "THRU HOLE",
            Point::new(b.max.x + 12.0, b.max.y + 12.0),
            Point::new(0.0, b.max.y),
            Some(view.id),
        ));
    }

    for dim in &store.drawing().dimensions.items {
        println!("{:>10}  {}", dim.kind, drawing_label(dim, store.drawing()));
    }

    let mut viewport = Viewport::with_settings(CANVAS_WIDTH, CANVAS_HEIGHT, &settings.viewport);
    layout.apply_to(&mut viewport);
    let controller = InteractionController::new(viewport, settings);
    let image = render(store.drawing(), &controller.render_state(), controller.viewport());

    if let Some(path) = output {
        image
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "sheet written");
    }

    Ok(())
}
