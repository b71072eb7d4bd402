//! Shape definitions for the canvas.

mod geometry;

pub use geometry::Geometry;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A rectangle on the canvas.
///
/// Shapes are plain data. Only the committed geometry lives here; the
/// geometry of a shape that is being dragged is supplied live by the handle
/// and only written back once the drag ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Stable identifier. Allocated on load when missing.
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ShapeId,
    /// Position, size and rotation.
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Shape {
    /// Create a new shape with a fresh ID.
    pub fn new(geometry: Geometry) -> Self {
        Self::with_id(Uuid::new_v4(), geometry)
    }

    /// Reconstruct a shape with a specific ID.
    pub fn with_id(id: ShapeId, geometry: Geometry) -> Self {
        Self { id, geometry }
    }

    /// Get the shape's unique identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Get the committed geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Replace all geometry fields at once.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Unrotated bounding box.
    pub fn bounds(&self) -> Rect {
        self.geometry.as_rect()
    }
}

/// Rectangles of the built-in demo scene.
pub const DEMO_RECTS: [Geometry; 4] = [
    Geometry { x: 124.0, y: 125.0, width: 100.0, height: 100.0, rotate: 0.0 },
    Geometry { x: 723.0, y: 265.0, width: 200.0, height: 130.0, rotate: 0.0 },
    Geometry { x: 482.0, y: 422.0, width: 130.0, height: 200.0, rotate: 0.0 },
    Geometry { x: 208.0, y: 402.0, width: 231.0, height: 503.0, rotate: 0.0 },
];

/// Build the demo scene with fresh IDs.
pub fn demo_shapes() -> Vec<Shape> {
    DEMO_RECTS.iter().copied().map(Shape::new).collect()
}
