//! Canvas document and drag-event wiring.

use crate::anchors::AnchorSource;
use crate::config::SnapConfig;
use crate::correction::{resolve_correction, HandleKind};
use crate::error::{CanvasError, CanvasResult};
use crate::guides::project_guides;
use crate::interaction::{InteractionState, SnapFeedback};
use crate::shapes::{demo_shapes, Geometry, Shape, ShapeId};
use crate::snap::find_alignment;
use serde::{Deserialize, Serialize};

/// Compute snap feedback for a shape being dragged.
///
/// Runs the matcher, then the guide projector, then the correction resolver,
/// all against the unmodified shape list.
pub fn evaluate_snap(
    shapes: &[Shape],
    shape_id: ShapeId,
    handle: HandleKind,
    live: &Geometry,
    config: &SnapConfig,
) -> SnapFeedback {
    let dragging = config.anchor_mode.anchors_of(live);
    let alignment = find_alignment(
        shape_id,
        &dragging,
        shapes,
        &config.anchor_mode,
        config.effective_threshold(),
    );
    SnapFeedback {
        guides: project_guides(&alignment, &dragging),
        correction: resolve_correction(handle, &alignment),
        alignment,
    }
}

/// An ordered collection of shapes plus the live interaction.
///
/// List order is z-order; it plays no part in snapping beyond breaking ties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Canvas {
    /// All shapes, back to front.
    #[serde(default)]
    shapes: Vec<Shape>,
    /// Snap configuration.
    #[serde(default)]
    pub config: SnapConfig,
    /// Interaction in progress (not persisted).
    #[serde(skip)]
    state: InteractionState,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(config: SnapConfig) -> Self {
        Self {
            shapes: Vec::new(),
            config,
            state: InteractionState::Idle,
        }
    }

    /// Create a canvas with the given shapes.
    pub fn with_shapes(shapes: Vec<Shape>, config: SnapConfig) -> Self {
        Self {
            shapes,
            config,
            state: InteractionState::Idle,
        }
    }

    /// The demo scene.
    pub fn demo() -> Self {
        Self::with_shapes(demo_shapes(), SnapConfig::default())
    }

    /// Add a shape on top. Returns its ID.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove a shape. Ends the interaction if it was the shape being dragged.
    pub fn remove_shape(&mut self, id: ShapeId) -> CanvasResult<Shape> {
        let index = self.index_of(id)?;
        if self.state.dragging_shape_id() == Some(id) {
            self.state = std::mem::take(&mut self.state).finish();
        }
        Ok(self.shapes.remove(index))
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Shapes in z-order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Current interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Live geometry of `id` with the current correction applied.
    ///
    /// `None` unless `id` is the shape being dragged.
    pub fn snapped_geometry(&self, id: ShapeId) -> Option<Geometry> {
        if self.state.dragging_shape_id() == Some(id) {
            self.state.snapped_geometry()
        } else {
            None
        }
    }

    /// Handle a live drag update.
    ///
    /// `live` is the geometry the handle currently proposes. The committed
    /// shape list is left untouched; the returned correction is meant to be
    /// applied on top of `live` for display.
    pub fn on_shape_changing(
        &mut self,
        id: ShapeId,
        handle: HandleKind,
        live: Geometry,
    ) -> CanvasResult<SnapFeedback> {
        self.index_of(id)?;
        validate(id, &live)?;

        let feedback = evaluate_snap(&self.shapes, id, handle, &live, &self.config);
        self.state = std::mem::take(&mut self.state).changing(id, handle, live, feedback);
        Ok(feedback)
    }

    /// Handle drag release: commit `final_geometry` and reset the interaction.
    pub fn on_shape_changed(&mut self, id: ShapeId, final_geometry: Geometry) -> CanvasResult<()> {
        let index = self.index_of(id)?;
        validate(id, &final_geometry)?;

        self.shapes[index].set_geometry(final_geometry);
        self.state = std::mem::take(&mut self.state).finish();
        log::info!("Committed {} at {:?}", id, final_geometry);
        Ok(())
    }

    /// Serialize shapes and configuration to JSON.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a canvas from JSON. Starts idle.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn index_of(&self, id: ShapeId) -> CanvasResult<usize> {
        self.shapes
            .iter()
            .position(|s| s.id() == id)
            .ok_or(CanvasError::ShapeNotFound(id))
    }
}

fn validate(id: ShapeId, geometry: &Geometry) -> CanvasResult<()> {
    if geometry.is_finite() {
        Ok(())
    } else {
        Err(CanvasError::InvalidGeometry {
            id,
            geometry: *geometry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::AnchorMode;
    use crate::correction::{Corner, CorrectionPatch, Edge};
    use crate::guides::Guides;
    use kurbo::Point;
    use uuid::Uuid;

    fn two_shapes() -> (Canvas, ShapeId, ShapeId) {
        let mut canvas = Canvas::new(SnapConfig::default());
        let reference = canvas.add_shape(Shape::new(Geometry::new(100.0, 100.0, 100.0, 100.0)));
        let dragging = canvas.add_shape(Shape::new(Geometry::new(400.0, 400.0, 50.0, 50.0)));
        (canvas, reference, dragging)
    }

    #[test]
    fn test_move_snaps_onto_reference_edge() {
        let (mut canvas, _, dragging) = two_shapes();
        // Left edge 3 right of the reference's right edge, far away vertically.
        let live = Geometry::new(203.0, 400.0, 50.0, 50.0);
        let feedback = canvas.on_shape_changing(dragging, HandleKind::Move, live).unwrap();

        assert!((feedback.correction.x - -3.0).abs() < 1e-9);
        assert_eq!(feedback.correction.y, 0.0);
        let snapped = feedback.correction.apply(&live);
        assert!((snapped.x - 200.0).abs() < 1e-9);

        // Reference is above: guide runs from its top to the dragging bottom.
        assert_eq!(feedback.guides.x.start, Point::new(200.0, 100.0));
        assert_eq!(feedback.guides.x.end, Point::new(200.0, 450.0));
        assert!(!feedback.guides.y.is_visible());

        assert_eq!(canvas.state().dragging_shape_id(), Some(dragging));
        assert_eq!(canvas.state().guides(), feedback.guides);
    }

    #[test]
    fn test_changing_does_not_mutate_shapes() {
        let (mut canvas, _, dragging) = two_shapes();
        let before = canvas.shapes().to_vec();
        canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(203.0, 98.0, 50.0, 50.0))
            .unwrap();
        assert_eq!(canvas.shapes(), before.as_slice());
    }

    #[test]
    fn test_top_left_resize_keeps_bottom_right() {
        let (mut canvas, _, dragging) = two_shapes();
        let live = Geometry::new(196.0, 103.0, 254.0, 347.0);
        let feedback = canvas
            .on_shape_changing(dragging, HandleKind::Corner(Corner::TopLeft), live)
            .unwrap();

        let snapped = feedback.correction.apply(&live);
        assert!((snapped.x + snapped.width - 450.0).abs() < 1e-9);
        assert!((snapped.y + snapped.height - 450.0).abs() < 1e-9);
        assert!((snapped.x - 200.0).abs() < 1e-9);
        assert!((snapped.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_shape_never_snaps() {
        let mut canvas = Canvas::new(SnapConfig::default());
        let id = canvas.add_shape(Shape::new(Geometry::new(0.0, 0.0, 10.0, 10.0)));
        for handle in HandleKind::ALL {
            let feedback = canvas
                .on_shape_changing(id, handle, Geometry::new(1.0, 1.0, 10.0, 10.0))
                .unwrap();
            assert!(feedback.alignment.x.distance.is_infinite());
            assert!(feedback.alignment.y.distance.is_infinite());
            assert_eq!(feedback.guides, Guides::NONE);
            assert!(feedback.correction.is_zero());
        }
    }

    #[test]
    fn test_changed_commits_and_resets() {
        let (mut canvas, reference, dragging) = two_shapes();
        let order: Vec<_> = canvas.shapes().iter().map(Shape::id).collect();
        let reference_before = canvas.shape(reference).cloned();

        canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(203.0, 98.0, 50.0, 50.0))
            .unwrap();
        assert!(canvas.state().is_interacting());

        let final_geometry = Geometry::new(200.0, 100.0, 50.0, 50.0).with_rotate(15.0);
        canvas.on_shape_changed(dragging, final_geometry).unwrap();

        assert_eq!(canvas.shape(dragging).map(Shape::geometry), Some(final_geometry));
        assert_eq!(canvas.shape(reference).cloned(), reference_before);
        let order_after: Vec<_> = canvas.shapes().iter().map(Shape::id).collect();
        assert_eq!(order, order_after);

        assert_eq!(*canvas.state(), InteractionState::Idle);
        assert_eq!(canvas.state().guides(), Guides::NONE);
        assert_eq!(canvas.state().correction(), CorrectionPatch::default());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut canvas, _, dragging) = two_shapes();
        let geometry = Geometry::new(400.0, 400.0, 50.0, 50.0);
        canvas.on_shape_changed(dragging, geometry).unwrap();
        canvas.on_shape_changed(dragging, geometry).unwrap();
        assert_eq!(canvas.state().guides(), Guides::NONE);
        assert!(canvas.state().correction().is_zero());
    }

    #[test]
    fn test_unknown_id_is_error() {
        let (mut canvas, _, dragging) = two_shapes();
        canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(203.0, 98.0, 50.0, 50.0))
            .unwrap();
        let before = canvas.shapes().to_vec();
        let unknown = Uuid::new_v4();

        let err = canvas
            .on_shape_changing(unknown, HandleKind::Move, Geometry::default())
            .unwrap_err();
        assert!(matches!(err, CanvasError::ShapeNotFound(id) if id == unknown));

        let err = canvas.on_shape_changed(unknown, Geometry::default()).unwrap_err();
        assert!(matches!(err, CanvasError::ShapeNotFound(_)));

        assert_eq!(canvas.shapes(), before.as_slice());
        assert_eq!(canvas.state().dragging_shape_id(), Some(dragging));
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        let (mut canvas, _, dragging) = two_shapes();
        let err = canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(f64::NAN, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, CanvasError::InvalidGeometry { .. }));
        assert!(!canvas.state().is_interacting());
    }

    #[test]
    fn test_overflowing_geometry_rejected() {
        let (mut canvas, _, dragging) = two_shapes();
        let huge = Geometry::new(0.0, 1e300, 1.0, f64::MAX);
        let err = canvas
            .on_shape_changing(dragging, HandleKind::Move, huge)
            .unwrap_err();
        assert!(matches!(err, CanvasError::InvalidGeometry { id, .. } if id == dragging));

        let err = canvas.on_shape_changed(dragging, huge).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidGeometry { .. }));
        assert_eq!(
            canvas.shape(dragging).map(Shape::geometry),
            Some(Geometry::new(400.0, 400.0, 50.0, 50.0))
        );
    }

    #[test]
    fn test_snapped_geometry_for_active_shape_only() {
        let (mut canvas, reference, dragging) = two_shapes();
        assert_eq!(canvas.snapped_geometry(dragging), None);

        canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(203.0, 400.0, 50.0, 50.0))
            .unwrap();
        let snapped = canvas.snapped_geometry(dragging).unwrap();
        assert!((snapped.x - 200.0).abs() < 1e-9);
        assert!((snapped.y - 400.0).abs() < 1e-9);
        assert_eq!(canvas.snapped_geometry(reference), None);

        canvas
            .on_shape_changed(dragging, snapped)
            .unwrap();
        assert_eq!(canvas.snapped_geometry(dragging), None);
    }

    #[test]
    fn test_disabled_config_never_snaps() {
        let (mut canvas, _, dragging) = two_shapes();
        canvas.config.enabled = false;
        let feedback = canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(100.0, 100.0, 100.0, 100.0))
            .unwrap();
        assert!(feedback.correction.is_zero());
        assert!(!feedback.alignment.is_snapped());
    }

    #[test]
    fn test_rotated_bounds_mode() {
        let mut canvas = Canvas::new(SnapConfig::default().with_anchor_mode(AnchorMode::RotatedBounds));
        // 100x20 bar turned upright: bounding box x 40..60.
        canvas.add_shape(Shape::new(Geometry::new(0.0, 0.0, 100.0, 20.0).with_rotate(90.0)));
        let dragging = canvas.add_shape(Shape::new(Geometry::new(500.0, 500.0, 10.0, 10.0)));

        let feedback = canvas
            .on_shape_changing(dragging, HandleKind::Edge(Edge::Left), Geometry::new(62.0, 500.0, 10.0, 10.0))
            .unwrap();
        assert!((feedback.correction.x - -2.0).abs() < 1e-6);
        assert!((feedback.correction.width - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_remove_active_shape_ends_interaction() {
        let (mut canvas, _, dragging) = two_shapes();
        canvas
            .on_shape_changing(dragging, HandleKind::Move, Geometry::new(203.0, 98.0, 50.0, 50.0))
            .unwrap();
        let removed = canvas.remove_shape(dragging).unwrap();
        assert_eq!(removed.id(), dragging);
        assert!(!canvas.state().is_interacting());
        assert!(canvas.remove_shape(dragging).is_err());
    }

    #[test]
    fn test_json_round_trip_skips_state() {
        let mut canvas = Canvas::demo();
        let id = canvas.shapes()[0].id();
        canvas
            .on_shape_changing(id, HandleKind::Move, Geometry::new(125.0, 125.0, 100.0, 100.0))
            .unwrap();

        let json = canvas.to_json().unwrap();
        let loaded = Canvas::from_json(&json).unwrap();
        assert_eq!(loaded.shapes(), canvas.shapes());
        assert_eq!(loaded.config, canvas.config);
        assert!(!loaded.state().is_interacting());
    }

    #[test]
    fn test_demo_scene_alignment() {
        // Drag the first demo rectangle so its left edge sits 2 units right
        // of the tall rectangle's left edge (x = 208).
        let mut canvas = Canvas::demo();
        let id = canvas.shapes()[0].id();
        let live = Geometry::new(210.0, 125.0, 100.0, 100.0);
        let feedback = canvas.on_shape_changing(id, HandleKind::Move, live).unwrap();
        assert!((feedback.correction.x - -2.0).abs() < 1e-9);
        assert!((feedback.guides.x.start.x - 208.0).abs() < 1e-9);
    }
}
