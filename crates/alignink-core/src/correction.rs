//! Handle kinds and the snap correction applied for each of them.

use crate::shapes::Geometry;
use crate::snap::AlignmentMatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge midpoint positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// The drag handle that is producing the live geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HandleKind {
    /// Dragging the shape body.
    Move,
    /// Rotation handle.
    Rotate,
    /// Corner resize handle.
    Corner(Corner),
    /// Edge midpoint resize handle.
    Edge(Edge),
}

impl HandleKind {
    /// Every handle kind, in wire-name order.
    pub const ALL: [HandleKind; 10] = [
        HandleKind::Move,
        HandleKind::Rotate,
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Edge(Edge::Top),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Edge(Edge::Bottom),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Edge(Edge::Left),
        HandleKind::Edge(Edge::Right),
    ];

    /// Name used by handle controllers.
    pub fn name(self) -> &'static str {
        match self {
            HandleKind::Move => "move",
            HandleKind::Rotate => "rotate",
            HandleKind::Corner(Corner::TopLeft) => "top-left",
            HandleKind::Edge(Edge::Top) => "top-middle",
            HandleKind::Corner(Corner::TopRight) => "top-right",
            HandleKind::Corner(Corner::BottomLeft) => "bottom-left",
            HandleKind::Edge(Edge::Bottom) => "bottom-middle",
            HandleKind::Corner(Corner::BottomRight) => "bottom-right",
            HandleKind::Edge(Edge::Left) => "middle-left",
            HandleKind::Edge(Edge::Right) => "middle-right",
        }
    }

    /// How this handle moves the shape along (x, y).
    fn motion(self) -> (AxisMotion, AxisMotion) {
        use AxisMotion::*;
        match self {
            HandleKind::Move => (Translate, Translate),
            HandleKind::Rotate => (Fixed, Fixed),
            HandleKind::Corner(Corner::TopLeft) => (MinEdge, MinEdge),
            HandleKind::Corner(Corner::TopRight) => (MaxEdge, MinEdge),
            HandleKind::Corner(Corner::BottomLeft) => (MinEdge, MaxEdge),
            HandleKind::Corner(Corner::BottomRight) => (MaxEdge, MaxEdge),
            HandleKind::Edge(Edge::Top) => (Fixed, MinEdge),
            HandleKind::Edge(Edge::Bottom) => (Fixed, MaxEdge),
            HandleKind::Edge(Edge::Left) => (MinEdge, Fixed),
            HandleKind::Edge(Edge::Right) => (MaxEdge, Fixed),
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized handle name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown handle kind: {0}")]
pub struct UnknownHandle(pub String);

impl FromStr for HandleKind {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older handle controllers emit "meddle-right".
        if s == "meddle-right" {
            return Ok(HandleKind::Edge(Edge::Right));
        }
        HandleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}

impl TryFrom<String> for HandleKind {
    type Error = UnknownHandle;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HandleKind> for String {
    fn from(kind: HandleKind) -> Self {
        kind.name().to_string()
    }
}

/// What a handle does to one axis of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisMotion {
    /// Axis untouched.
    Fixed,
    /// Whole box slides; size unchanged.
    Translate,
    /// Left/top edge dragged; right/bottom edge stays put.
    MinEdge,
    /// Right/bottom edge dragged; left/top edge stays put.
    MaxEdge,
}

impl AxisMotion {
    /// (position offset, size offset) for a correction along this axis.
    fn patch(self, correction: f64) -> (f64, f64) {
        match self {
            AxisMotion::Fixed => (0.0, 0.0),
            AxisMotion::Translate => (correction, 0.0),
            AxisMotion::MinEdge => (correction, -correction),
            AxisMotion::MaxEdge => (0.0, correction),
        }
    }
}

/// Additive offsets applied on top of the live geometry of the dragged shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrectionPatch {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CorrectionPatch {
    /// Check if the patch changes nothing.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to a geometry. Rotation is left as is.
    pub fn apply(&self, geometry: &Geometry) -> Geometry {
        Geometry {
            x: geometry.x + self.x,
            y: geometry.y + self.y,
            width: geometry.width + self.width,
            height: geometry.height + self.height,
            rotate: geometry.rotate,
        }
    }
}

/// Turn per-axis corrections into a patch for the active handle.
///
/// Resize handles keep the opposite corner (or edge) in place; the rotation
/// handle never produces a positional correction.
pub fn resolve_correction(handle: HandleKind, alignment: &AlignmentMatch) -> CorrectionPatch {
    let (motion_x, motion_y) = handle.motion();
    let (x, width) = motion_x.patch(alignment.x.correction);
    let (y, height) = motion_y.patch(alignment.y.correction);
    CorrectionPatch {
        x,
        y,
        width,
        height,
    }
}
