//! AlignInk Core Library
//!
//! Alignment snap-guide engine for a 2D shape editor: while a shape is being
//! moved, resized or rotated, find the closest alignment with the other
//! shapes, compute the correction that snaps onto it and the guide lines to
//! show for it.

pub mod anchors;
pub mod canvas;
pub mod config;
pub mod correction;
pub mod error;
pub mod guides;
pub mod interaction;
pub mod shapes;
pub mod snap;

pub use anchors::{AnchorIndex, AnchorMode, AnchorSource, AnchorTriple, Anchors};
pub use canvas::{evaluate_snap, Canvas};
pub use config::SnapConfig;
pub use correction::{resolve_correction, Corner, CorrectionPatch, Edge, HandleKind, UnknownHandle};
pub use error::{CanvasError, CanvasResult};
pub use guides::{project_guides, GuideSegment, Guides};
pub use interaction::{InteractionState, SnapFeedback};
pub use shapes::{Geometry, Shape, ShapeId};
pub use snap::{find_alignment, AlignmentMatch, Axis, AxisMatch, ReferenceAnchors, DEFAULT_SNAP_THRESHOLD};
