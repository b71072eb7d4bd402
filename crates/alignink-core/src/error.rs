//! Error types for canvas operations.

use crate::shapes::{Geometry, ShapeId};
use thiserror::Error;

/// Canvas errors.
///
/// These are integration errors: they mean the host handed the engine
/// something it never should have, and are reported rather than ignored.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Invalid geometry for shape {id}: {geometry:?}")]
    InvalidGeometry { id: ShapeId, geometry: Geometry },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
