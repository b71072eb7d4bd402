//! Alignment anchors derived from a shape's bounding box.
//!
//! Every shape exposes three anchors per axis: its min edge, its center and
//! its max edge. The matcher compares these between shapes.

use crate::shapes::Geometry;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Which of the three anchors of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorIndex {
    /// Left or top edge.
    #[default]
    Min = 0,
    /// Center line.
    Mid = 1,
    /// Right or bottom edge.
    Max = 2,
}

impl AnchorIndex {
    /// All indices in scan order.
    pub const ALL: [AnchorIndex; 3] = [AnchorIndex::Min, AnchorIndex::Mid, AnchorIndex::Max];
}

/// The (min, mid, max) coordinates of a box along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorTriple {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

impl AnchorTriple {
    /// Build a triple from an interval; the bounds may come in either order.
    pub fn from_span(a: f64, b: f64) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min,
            mid: (min + max) / 2.0,
            max,
        }
    }

    /// Get the anchor at `index`.
    pub fn get(&self, index: AnchorIndex) -> f64 {
        match index {
            AnchorIndex::Min => self.min,
            AnchorIndex::Mid => self.mid,
            AnchorIndex::Max => self.max,
        }
    }
}

/// Anchors of a shape on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub x: AnchorTriple,
    pub y: AnchorTriple,
}

impl Anchors {
    /// Anchors of an axis-aligned rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: AnchorTriple::from_span(rect.x0, rect.x1),
            y: AnchorTriple::from_span(rect.y0, rect.y1),
        }
    }
}

/// Source of alignment anchors for a geometry.
///
/// Called once per shape on every pointer-move, so implementations should be
/// cheap and must be pure.
pub trait AnchorSource {
    fn anchors_of(&self, geometry: &Geometry) -> Anchors;
}

/// How rotation is taken into account when deriving anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorMode {
    /// Use the unrotated box; `rotate` is ignored.
    #[default]
    AxisAligned,
    /// Use the axis-aligned bounding box of the rotated rectangle.
    RotatedBounds,
}

impl AnchorSource for AnchorMode {
    fn anchors_of(&self, geometry: &Geometry) -> Anchors {
        match self {
            AnchorMode::AxisAligned => Anchors::from_rect(geometry.as_rect()),
            AnchorMode::RotatedBounds => Anchors::from_rect(rotated_bounds(geometry)),
        }
    }
}

/// Axis-aligned bounding box of a geometry rotated around its center.
pub fn rotated_bounds(geometry: &Geometry) -> Rect {
    let rect = geometry.as_rect();
    let angle = geometry.rotation_radians();
    if angle.abs() < 1e-9 {
        return rect;
    }

    let rot = Affine::rotate_about(angle, rect.center());
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let first = rot * corners[0];
    corners[1..]
        .iter()
        .fold(Rect::from_points(first, first), |acc, &p| {
            acc.union_pt(rot * p)
        })
}
