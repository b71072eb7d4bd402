//! AlignInk Application
//!
//! Headless host for the snap engine. Stands in for the handle controller
//! and renderer: scripted drag events go in, guides and corrections come out.

mod app;
mod config;
mod scene;

pub use app::{App, AppConfig, AppError, EventReport, Replay};
pub use config::{load_snap_config, ConfigError};
pub use scene::{Scene, SceneError, SceneEvent, ShapeRef};
