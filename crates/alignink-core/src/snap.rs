//! Alignment matching between the shape being dragged and the rest of the canvas.

use crate::anchors::{AnchorIndex, AnchorSource, AnchorTriple, Anchors};
use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// Default snap threshold (in canvas units).
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;

/// The shape a winning match was found against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAnchors {
    /// ID of the reference shape.
    pub shape_id: ShapeId,
    /// The reference shape's anchors on both axes.
    pub anchors: Anchors,
}

/// Closest alignment found along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMatch {
    /// Absolute anchor distance, `+inf` when nothing matched.
    pub distance: f64,
    /// Which of the reference shape's anchors matched.
    pub reference_index: AnchorIndex,
    /// Which of the dragging shape's anchors matched.
    ///
    /// Guide placement only looks at `reference_index`; this is carried so
    /// callers can tell e.g. a left-to-right alignment from a center-to-right one.
    pub dragging_index: AnchorIndex,
    /// Signed offset `reference - dragging` to add to the dragging shape.
    pub correction: f64,
    /// The reference shape, present only when a match was found.
    pub reference: Option<ReferenceAnchors>,
}

impl AxisMatch {
    /// The "no match" sentinel.
    pub fn none() -> Self {
        Self {
            distance: f64::INFINITY,
            reference_index: AnchorIndex::Min,
            dragging_index: AnchorIndex::Min,
            correction: 0.0,
            reference: None,
        }
    }

    /// Check if this axis snapped to something.
    pub fn is_snapped(&self) -> bool {
        self.reference.is_some()
    }

    /// The matched reference coordinate on this axis, if any.
    pub fn reference_value(&self, axis: Axis) -> Option<f64> {
        self.reference
            .map(|r| axis.triple(&r.anchors).get(self.reference_index))
    }
}

impl Default for AxisMatch {
    fn default() -> Self {
        Self::none()
    }
}

/// Canvas axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Select this axis' triple from a pair of anchors.
    pub fn triple(self, anchors: &Anchors) -> &AnchorTriple {
        match self {
            Axis::X => &anchors.x,
            Axis::Y => &anchors.y,
        }
    }
}

/// Per-axis result of an alignment search.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentMatch {
    pub x: AxisMatch,
    pub y: AxisMatch,
}

impl AlignmentMatch {
    /// No match on either axis.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any axis snapped.
    pub fn is_snapped(&self) -> bool {
        self.x.is_snapped() || self.y.is_snapped()
    }
}

/// Find the closest alignment of `dragging` against every other shape.
///
/// For each axis, all nine (reference anchor, dragging anchor) pairs of every
/// reference shape are compared. A pair replaces the running best only when
/// its distance is strictly smaller than both the best so far and
/// `threshold`, so the first candidate in shape order wins ties. A
/// `threshold <= 0` (or NaN) never matches.
pub fn find_alignment(
    dragging_id: ShapeId,
    dragging: &Anchors,
    shapes: &[Shape],
    source: &impl AnchorSource,
    threshold: f64,
) -> AlignmentMatch {
    let mut result = AlignmentMatch::none();

    for shape in shapes.iter().filter(|s| s.id() != dragging_id) {
        let reference = ReferenceAnchors {
            shape_id: shape.id(),
            anchors: source.anchors_of(&shape.geometry),
        };
        closest_on_axis(&mut result.x, Axis::X, &reference, dragging, threshold);
        closest_on_axis(&mut result.y, Axis::Y, &reference, dragging, threshold);
    }

    log::debug!(
        "alignment for {}: x={:?} y={:?}",
        dragging_id,
        result.x.reference.map(|_| result.x.correction),
        result.y.reference.map(|_| result.y.correction),
    );
    result
}

/// Fold one reference shape into the running best of one axis.
fn closest_on_axis(
    best: &mut AxisMatch,
    axis: Axis,
    reference: &ReferenceAnchors,
    dragging: &Anchors,
    threshold: f64,
) {
    let reference_triple = axis.triple(&reference.anchors);
    let dragging_triple = axis.triple(dragging);

    for reference_index in AnchorIndex::ALL {
        for dragging_index in AnchorIndex::ALL {
            let diff = reference_triple.get(reference_index) - dragging_triple.get(dragging_index);
            let distance = diff.abs();
            if distance < best.distance && distance < threshold {
                log::trace!(
                    "{:?}: {:?}->{:?} of {} at {}",
                    axis,
                    dragging_index,
                    reference_index,
                    reference.shape_id,
                    distance
                );
                *best = AxisMatch {
                    distance,
                    reference_index,
                    dragging_index,
                    correction: diff,
                    reference: Some(*reference),
                };
            }
        }
    }
}
