//! Scripted scenes: a shape list plus the drag events to replay against it.

use alignink_core::shapes::{demo_shapes, DEMO_RECTS};
use alignink_core::{Corner, Geometry, HandleKind, Shape, ShapeId, SnapConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Scene loading errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Event {event} refers to missing shape {shape}")]
    MissingShape { event: usize, shape: String },
}

/// Refers to a shape either by list index or by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeRef {
    Index(usize),
    Id(ShapeId),
}

/// One event from the handle controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    /// Live update while dragging.
    Changing {
        shape: ShapeRef,
        handle: HandleKind,
        size: Geometry,
    },
    /// Drag released.
    Changed { shape: ShapeRef, size: Geometry },
}

impl SceneEvent {
    pub fn shape(&self) -> ShapeRef {
        match self {
            SceneEvent::Changing { shape, .. } | SceneEvent::Changed { shape, .. } => *shape,
        }
    }
}

/// A scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Initial shapes (IDs are allocated when omitted).
    pub shapes: Vec<Shape>,
    /// Snap configuration embedded in the scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SnapConfig>,
    /// Events, replayed in order.
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

impl Scene {
    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a file.
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The demo rectangles with a short move and resize of the first one
    /// towards the tall rectangle's left edge.
    pub fn demo() -> Self {
        let first = DEMO_RECTS[0];
        let nudged = Geometry { x: 211.0, y: first.y, ..first };
        let resized = Geometry::new(205.0, 120.0, 103.0, 105.0);
        Self {
            shapes: demo_shapes(),
            config: None,
            events: vec![
                SceneEvent::Changing {
                    shape: ShapeRef::Index(0),
                    handle: HandleKind::Move,
                    size: Geometry { x: 180.0, ..first },
                },
                SceneEvent::Changing {
                    shape: ShapeRef::Index(0),
                    handle: HandleKind::Move,
                    size: nudged,
                },
                SceneEvent::Changed {
                    shape: ShapeRef::Index(0),
                    size: Geometry { x: 208.0, ..first },
                },
                SceneEvent::Changing {
                    shape: ShapeRef::Index(0),
                    handle: HandleKind::Corner(Corner::TopLeft),
                    size: resized,
                },
            ],
        }
    }

    /// Resolve a shape reference against the scene's shape list.
    pub fn resolve(&self, event: usize, shape: ShapeRef) -> Result<ShapeId, SceneError> {
        let found = match shape {
            ShapeRef::Index(i) => self.shapes.get(i).map(Shape::id),
            ShapeRef::Id(id) => self.shapes.iter().find(|s| s.id() == id).map(Shape::id),
        };
        found.ok_or_else(|| SceneError::MissingShape {
            event,
            shape: match shape {
                ShapeRef::Index(i) => format!("#{}", i),
                ShapeRef::Id(id) => id.to_string(),
            },
        })
    }
}
