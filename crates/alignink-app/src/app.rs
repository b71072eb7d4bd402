//! Scene replay: feeds scripted handle events through the snap engine.

use crate::config::ConfigError;
use crate::scene::{Scene, SceneError, SceneEvent};
use alignink_core::{Canvas, CanvasError, Geometry, HandleKind, Shape, ShapeId, SnapConfig, SnapFeedback};
use serde::Serialize;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Event {event}: {source}")]
    Canvas {
        event: usize,
        #[source]
        source: CanvasError,
    },
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Snap configuration. Overrides whatever the scene embeds.
    pub snap: Option<SnapConfig>,
    /// Threshold override, applied last.
    pub threshold: Option<f64>,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl AppConfig {
    /// Resolve the snap configuration for a scene.
    pub fn snap_config(&self, scene: &Scene) -> SnapConfig {
        let mut config = self.snap.or(scene.config).unwrap_or_default();
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config
    }
}

/// Outcome of one replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    /// Position in the event list.
    pub index: usize,
    /// Shape the event targeted.
    pub shape: ShapeId,
    /// Active handle; absent for drag-end events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<HandleKind>,
    /// Guides and correction for live updates; absent for drag-end events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<SnapFeedback>,
    /// Live geometry with the correction applied (or the committed geometry).
    pub geometry: Geometry,
}

/// Result of replaying a whole scene.
#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    pub events: Vec<EventReport>,
    pub shapes: Vec<Shape>,
}

/// Headless host around a canvas.
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Replay every event of `scene` in order.
    pub fn replay(&self, scene: &Scene) -> Result<Replay, AppError> {
        let snap = self.config.snap_config(scene);
        log::info!(
            "Replaying {} events over {} shapes (threshold {})",
            scene.events.len(),
            scene.shapes.len(),
            snap.threshold
        );

        let mut canvas = Canvas::with_shapes(scene.shapes.clone(), snap);
        let mut events = Vec::with_capacity(scene.events.len());

        for (index, event) in scene.events.iter().enumerate() {
            let shape = scene.resolve(index, event.shape())?;
            let canvas_err = |source| AppError::Canvas { event: index, source };

            let report = match event {
                SceneEvent::Changing { handle, size, .. } => {
                    let feedback = canvas
                        .on_shape_changing(shape, *handle, *size)
                        .map_err(canvas_err)?;
                    EventReport {
                        index,
                        shape,
                        handle: Some(*handle),
                        feedback: Some(feedback),
                        geometry: feedback.correction.apply(size),
                    }
                }
                SceneEvent::Changed { size, .. } => {
                    canvas.on_shape_changed(shape, *size).map_err(canvas_err)?;
                    EventReport {
                        index,
                        shape,
                        handle: None,
                        feedback: None,
                        geometry: *size,
                    }
                }
            };
            events.push(report);
        }

        Ok(Replay {
            events,
            shapes: canvas.shapes().to_vec(),
        })
    }

    /// Render a replay as JSON.
    pub fn render(&self, replay: &Replay) -> Result<String, AppError> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(replay)?
        } else {
            serde_json::to_string(replay)?
        };
        Ok(json)
    }
}
