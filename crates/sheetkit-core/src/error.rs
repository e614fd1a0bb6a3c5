//! Error handling for SheetKit
//!
//! Provides error types for every layer of the drawing engine:
//! - Projection errors (the external modelling kernel failed to produce a view)
//! - Dimension errors (degenerate or near-singular dimension geometry)
//! - Store errors (a mutation referenced an entity that does not exist)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Projection generation error
///
/// Raised when the modelling kernel cannot produce the 2D line set for a view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The generator rejected the request
    #[error("Projection generation failed for shape {shape_id}: {reason}")]
    GenerationFailed {
        /// The shape id that was requested.
        shape_id: String,
        /// The reason reported by the generator.
        reason: String,
    },

    /// The retry with a remapped shape id failed as well
    #[error("Projection generation failed for shape {shape_id} (retried as {remapped_id}): {reason}")]
    RetryFailed {
        /// The original shape id.
        shape_id: String,
        /// The remapped shape id used for the retry.
        remapped_id: String,
        /// The reason reported by the generator on the retry.
        reason: String,
    },
}

/// Invalid dimension geometry
///
/// Raised by the dimension synthesizer when its inputs cannot produce finite
/// geometry. Callers skip the update instead of storing the result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// The measured points coincide
    #[error("Degenerate dimension segment (length {length})")]
    DegenerateSegment {
        /// The measured length.
        length: f64,
    },

    /// A line intersection was requested for (nearly) parallel lines
    #[error("Near-singular dimension geometry (determinant {determinant:e})")]
    NearSingular {
        /// The determinant of the intersection system.
        determinant: f64,
    },

    /// A computed coordinate is NaN or infinite
    #[error("Non-finite dimension geometry: {what}")]
    NonFinite {
        /// Which quantity went non-finite.
        what: String,
    },
}

/// Store mutation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The referenced view does not exist
    #[error("View not found: {view_id}")]
    ViewNotFound {
        /// The missing view id.
        view_id: String,
    },

    /// A dimension index is past the end of the list
    #[error("Dimension index {index} out of range (len {len})")]
    DimensionIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The current number of dimensions.
        len: usize,
    },

    /// The referenced annotation does not exist
    #[error("Annotation not found: {annotation_id}")]
    AnnotationNotFound {
        /// The missing annotation id.
        annotation_id: String,
    },
}

/// Main error type for SheetKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Projection generation error
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Invalid dimension geometry
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// Store mutation error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a projection generation failure
    pub fn is_projection_error(&self) -> bool {
        matches!(self, Error::Projection(_))
    }

    /// Check if this is an invalid dimension geometry error
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Error::Dimension(_))
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
