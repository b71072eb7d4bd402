//! Lifecycle of a single drag interaction.

use crate::correction::{CorrectionPatch, HandleKind};
use crate::guides::Guides;
use crate::shapes::{Geometry, ShapeId};
use crate::snap::AlignmentMatch;
use serde::Serialize;

/// What the host draws while a shape is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SnapFeedback {
    /// X and Y guide lines.
    pub guides: Guides,
    /// Offsets to apply on top of the live geometry.
    pub correction: CorrectionPatch,
    /// The raw per-axis matches the above were derived from.
    #[serde(skip)]
    pub alignment: AlignmentMatch,
}

impl SnapFeedback {
    /// Feedback with no guides and no correction.
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Interaction state of the canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No shape is being dragged.
    #[default]
    Idle,
    /// A shape is being moved, resized or rotated.
    Interacting {
        /// The shape under the pointer.
        shape_id: ShapeId,
        /// The handle being dragged.
        handle: HandleKind,
        /// Last geometry reported by the handle (before correction).
        live: Geometry,
        /// Feedback computed for `live`.
        feedback: SnapFeedback,
    },
}

impl InteractionState {
    /// Transition for a "shape changing" event.
    ///
    /// Always ends up interacting with `shape_id`. A different shape replaces
    /// the current one.
    pub fn changing(
        self,
        shape_id: ShapeId,
        handle: HandleKind,
        live: Geometry,
        feedback: SnapFeedback,
    ) -> Self {
        match &self {
            InteractionState::Interacting { shape_id: active, .. } if *active != shape_id => {
                log::warn!("Interaction with {} replaced by {}", active, shape_id);
            }
            InteractionState::Idle => {
                log::debug!("Interaction started: {} via {}", shape_id, handle);
            }
            _ => {}
        }
        InteractionState::Interacting {
            shape_id,
            handle,
            live,
            feedback,
        }
    }

    /// Transition for a drag end. Always returns to idle.
    pub fn finish(self) -> Self {
        InteractionState::Idle
    }

    /// Check if a shape is being dragged.
    pub fn is_interacting(&self) -> bool {
        matches!(self, InteractionState::Interacting { .. })
    }

    /// The shape being dragged, if any.
    pub fn dragging_shape_id(&self) -> Option<ShapeId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Interacting { shape_id, .. } => Some(*shape_id),
        }
    }

    /// The active handle, if any.
    pub fn handle(&self) -> Option<HandleKind> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Interacting { handle, .. } => Some(*handle),
        }
    }

    /// Current feedback; neutral when idle.
    pub fn feedback(&self) -> SnapFeedback {
        match self {
            InteractionState::Idle => SnapFeedback::neutral(),
            InteractionState::Interacting { feedback, .. } => *feedback,
        }
    }

    /// Current guides; collapsed when idle.
    pub fn guides(&self) -> Guides {
        self.feedback().guides
    }

    /// Current correction; zero when idle.
    pub fn correction(&self) -> CorrectionPatch {
        self.feedback().correction
    }

    /// Live geometry with the current correction applied.
    pub fn snapped_geometry(&self) -> Option<Geometry> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Interacting { live, feedback, .. } => {
                Some(feedback.correction.apply(live))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::Corner;
    use uuid::Uuid;

    fn feedback(dx: f64) -> SnapFeedback {
        SnapFeedback {
            correction: CorrectionPatch {
                x: dx,
                ..CorrectionPatch::default()
            },
            ..SnapFeedback::neutral()
        }
    }

    #[test]
    fn test_idle_is_neutral() {
        let state = InteractionState::default();
        assert!(!state.is_interacting());
        assert_eq!(state.dragging_shape_id(), None);
        assert_eq!(state.guides(), Guides::NONE);
        assert!(state.correction().is_zero());
        assert_eq!(state.snapped_geometry(), None);
    }

    #[test]
    fn test_changing_then_finish() {
        let id = Uuid::new_v4();
        let live = Geometry::new(0.0, 0.0, 10.0, 10.0);
        let state = InteractionState::Idle.changing(id, HandleKind::Move, live, feedback(2.0));
        assert_eq!(state.dragging_shape_id(), Some(id));
        assert_eq!(state.handle(), Some(HandleKind::Move));
        assert!((state.correction().x - 2.0).abs() < f64::EPSILON);
        assert_eq!(state.snapped_geometry(), Some(Geometry::new(2.0, 0.0, 10.0, 10.0)));

        let state = state.finish();
        assert_eq!(state, InteractionState::Idle);
        assert!(state.correction().is_zero());
    }

    #[test]
    fn test_finish_from_idle() {
        assert_eq!(InteractionState::Idle.finish(), InteractionState::Idle);
    }

    #[test]
    fn test_other_shape_overwrites() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let live = Geometry::new(0.0, 0.0, 10.0, 10.0);
        let state = InteractionState::Idle
            .changing(first, HandleKind::Move, live, feedback(1.0))
            .changing(second, HandleKind::Corner(Corner::TopLeft), live, feedback(3.0));
        assert_eq!(state.dragging_shape_id(), Some(second));
        assert_eq!(state.handle(), Some(HandleKind::Corner(Corner::TopLeft)));
        assert!((state.correction().x - 3.0).abs() < f64::EPSILON);
    }
}
