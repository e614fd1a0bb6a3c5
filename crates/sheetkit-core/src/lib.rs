//! # SheetKit Core
//!
//! Core types for SheetKit.
//! Provides the geometry primitives, display units, the drawing data model
//! and the error types shared by the settings and designer crates.

pub mod constants;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod units;

pub use drawing::{
    compose_label, resolve_style, Annotation, AnnotationSet, AnnotationStyle, Arrow, ArrowStyle,
    Color, DanglingReference, Dimension, DimensionConfig, DimensionKind, DimensionLine,
    DimensionMode, DimensionPatch, DimensionSet, DisplayOptions, Drawing, DrawingView, Line2D, LineCategory,
    LineType, LineWidths, Orientation, PaperSize, Projection, ProjectionAngle, ProjectionType,
    ResolvedStyle, ShapeId, SheetConfig, TitleBlockInfo, TitleBlockStyle, ViewId,
    ViewLabelStyle,
};

pub use error::{DimensionError, Error, ProjectionError, Result, StoreError};

pub use geometry::{BoundingBox, Point, PointLineDistance, Rect, Segment};

pub use units::Unit;
