//! # SheetKit
//!
//! Interactive 2D technical drawing sheets:
//! - Paper sheets (A0 to A4, portrait or landscape) with frame, reference
//!   grid and title block
//! - Projection views placed, dragged and auto-laid-out on the sheet
//! - Horizontal, vertical and aligned dimensions with real-world labels
//! - Notes with leaders, snapping and hit testing
//!
//! ## Architecture
//!
//! SheetKit is organized as a workspace with multiple crates:
//!
//! 1. **sheetkit-core** - Geometry, units, drawing model, errors
//! 2. **sheetkit-settings** - Engine settings and persistence
//! 3. **sheetkit-designer** - Viewport, dimensions, interaction, rendering
//! 4. **sheetkit** - Facade and the preview binary

pub use sheetkit_core::{
    BoundingBox, Dimension, DimensionConfig, DimensionKind, DimensionMode, Drawing, DrawingView,
    Error, Line2D, LineType, Point, Projection, ProjectionType, Result, Segment, SheetConfig,
    Unit,
};
pub use sheetkit_designer::{
    add_view, render, InteractionController, MemoryStore, ProjectionGenerator, RenderState,
    SheetLayout, Viewport,
};
pub use sheetkit_settings::{EngineSettings, SettingsPersistence};

pub use sheetkit_core as core;
pub use sheetkit_designer as designer;
pub use sheetkit_settings as settings;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Install the global tracing subscriber for the preview binary.
///
/// Honours `RUST_LOG`; without it SheetKit crates log at INFO and
/// everything else at WARN. Output goes to stderr so stdout stays free for
/// the dimension listing.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,sheetkit=info,sheetkit_designer=info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()?;

    Ok(())
}
