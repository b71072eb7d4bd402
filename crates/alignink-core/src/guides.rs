//! Guide lines showing which anchors are currently aligned.

use crate::anchors::Anchors;
use crate::snap::{AlignmentMatch, Axis, AxisMatch};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A guide line segment in canvas coordinates.
///
/// Serialized as `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct GuideSegment {
    pub start: Point,
    pub end: Point,
}

impl GuideSegment {
    /// Collapsed segment used when there is nothing to show.
    pub const ZERO: GuideSegment = GuideSegment {
        start: Point::ZERO,
        end: Point::ZERO,
    };

    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether the segment should be drawn.
    pub fn is_visible(&self) -> bool {
        *self != Self::ZERO
    }
}

impl Default for GuideSegment {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[[f64; 2]; 2]> for GuideSegment {
    fn from([[x0, y0], [x1, y1]]: [[f64; 2]; 2]) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }
}

impl From<GuideSegment> for [[f64; 2]; 2] {
    fn from(segment: GuideSegment) -> Self {
        [
            [segment.start.x, segment.start.y],
            [segment.end.x, segment.end.y],
        ]
    }
}

/// The vertical (X) and horizontal (Y) guide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Guides {
    /// Vertical line at the matched X anchor.
    pub x: GuideSegment,
    /// Horizontal line at the matched Y anchor.
    pub y: GuideSegment,
}

impl Guides {
    /// Both guides collapsed.
    pub const NONE: Guides = Guides {
        x: GuideSegment::ZERO,
        y: GuideSegment::ZERO,
    };

    /// Check if any guide should be drawn.
    pub fn any_visible(&self) -> bool {
        self.x.is_visible() || self.y.is_visible()
    }
}

/// Derive the guide segments from an alignment result.
///
/// Each guide sits on the matched reference anchor and spans the combined
/// extent of both shapes along the other axis, with the dragging shape
/// shifted by the other axis' correction.
pub fn project_guides(alignment: &AlignmentMatch, dragging: &Anchors) -> Guides {
    Guides {
        x: project_axis(&alignment.x, Axis::X, alignment.y.correction, dragging),
        y: project_axis(&alignment.y, Axis::Y, alignment.x.correction, dragging),
    }
}

fn project_axis(
    axis_match: &AxisMatch,
    axis: Axis,
    cross_correction: f64,
    dragging: &Anchors,
) -> GuideSegment {
    let Some(reference) = axis_match.reference else {
        return GuideSegment::ZERO;
    };

    let cross = match axis {
        Axis::X => Axis::Y,
        Axis::Y => Axis::X,
    };
    let at = axis.triple(&reference.anchors).get(axis_match.reference_index);
    let reference_span = cross.triple(&reference.anchors);
    let dragging_span = cross.triple(dragging);

    // Run from whichever shape starts first to the far edge of the other.
    let (from, to) = if reference_span.min > dragging_span.min {
        (dragging_span.min + cross_correction, reference_span.max)
    } else {
        (reference_span.min, dragging_span.max + cross_correction)
    };

    match axis {
        Axis::X => GuideSegment::new(Point::new(at, from), Point::new(at, to)),
        Axis::Y => GuideSegment::new(Point::new(from, at), Point::new(to, at)),
    }
}
