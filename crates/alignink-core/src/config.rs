//! Snap engine configuration.

use crate::anchors::AnchorMode;
use crate::snap::DEFAULT_SNAP_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Tunables for alignment snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Maximum anchor distance (exclusive) that still snaps, in canvas units.
    /// Values `<= 0` disable snapping.
    pub threshold: f64,
    /// How anchors are derived from shape geometry.
    pub anchor_mode: AnchorMode,
    /// Master switch.
    pub enabled: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SNAP_THRESHOLD,
            anchor_mode: AnchorMode::default(),
            enabled: true,
        }
    }
}

impl SnapConfig {
    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the anchor mode.
    pub fn with_anchor_mode(mut self, anchor_mode: AnchorMode) -> Self {
        self.anchor_mode = anchor_mode;
        self
    }

    /// Threshold actually handed to the matcher (0 when disabled).
    pub fn effective_threshold(&self) -> f64 {
        if self.enabled { self.threshold } else { 0.0 }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
