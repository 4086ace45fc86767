//! Gridmark Core - marker data model, geometry construction, and frame math
//!
//! This crate provides the foundational types for the Gridmark system:
//! - Interactive marker and control descriptions
//! - Pure construction of marker geometry and manipulation handles
//! - Stamped coordinate-frame transforms and their time-parameterized motions
//! - Feedback events delivered by the visualization frontend

pub mod feedback;
pub mod geometry;
pub mod marker;
pub mod transform;

pub use feedback::{Feedback, FeedbackKind};
pub use geometry::{build_marker, make_box};
pub use marker::{ControlMode, ControlSpec, MarkerMode, MarkerSpec, Pose, ShapeKind, VisualShape};
pub use transform::{TransformRecord, BASE_FRAME, MOVING_FRAME, ROTATING_FRAME};
