//! # SheetKit Designer
//!
//! Interactive drawing-sheet engine. It places projection views on a paper
//! sheet, maps between the coordinate spaces, and turns pointer input into
//! dimensions, notes and view moves.
//!
//! ## Core Components
//!
//! - **Viewport**: zoom and pan between paper mm and screen pixels
//! - **Sheet layout**: paper fit, frames, reference grid and title block
//! - **Hit testing and snapping**: lines, dimensions, notes, views
//! - **Dimensions**: construction, offset dragging and labels
//! - **Layout**: fit-all grid and quadrant placement of new views
//! - **Interaction**: the tool state machine over a [`DrawingStore`]
//! - **Renderer**: tiny-skia rasterisation of a snapshot
//!
//! ## Coordinate spaces
//!
//! ```text
//! model (m) --scale x unit--> projection --centre on bbox--> view-local
//!   view-local --+ view position--> paper (mm, +Y up)
//!   paper --zoom, pan, flip Y--> screen (px, +Y down) --x dpr--> device
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sheetkit_designer::{InteractionController, MemoryStore, PointerEvent, Viewport};
//!
//! let mut store = MemoryStore::new(drawing);
//! let mut controller = InteractionController::new(Viewport::new(800.0, 600.0), settings);
//! controller.pointer_down(&mut store, PointerEvent::left(400.0, 300.0));
//! let image = sheetkit_designer::render(store.drawing(), &controller.render_state(), controller.viewport());
//! ```

pub mod coords;
pub mod dimension;
pub mod font_manager;
pub mod interaction;
pub mod layout;
pub mod line_style;
pub mod projection;
pub mod renderer;
pub mod sheet_layout;
pub mod snap;
pub mod store;
pub mod title_block;
pub mod viewport;

pub use dimension::{
    auto_dimension, classify, default_offset, diameter_dimension, drawing_label, format_label,
    line_length_dimension, offset_from_cursor, radial_dimension, real_value, resolve_kind,
    synthesize, with_offset,
};
pub use hit_test::{
    annotation_box, hit_annotation, hit_dimension, hit_entity, hit_line, hit_view, AnnotationHit,
    AnnotationPart, Hit, LineHit,
};
pub use interaction::{
    InteractionController, InteractionState, Key, Modifiers, PickedPoint, PointerButton,
    PointerEvent, Selection, Tool,
};
pub use layout::{fit_all_sizes, fit_all_views, grid_shape, place_new_view, quadrant_slots};
pub use projection::{add_view, ProjectionGenerator};
pub use renderer::{render, RenderState};
pub use sheet_layout::{GridLabel, ReferenceGrid, SheetLayout};
pub use snap::{find_snap, snap_candidates, SnapCache, SnapKind, SnapPoint, SnapResult};
pub use store::{AnnotationPatch, DrawingStore, DrawingUpdate, MemoryStore, StoreResult};
pub use title_block::{projection_symbol, CellContent, SymbolGeometry, TitleBlockLayout, TitleCell};
pub use viewport::Viewport;
