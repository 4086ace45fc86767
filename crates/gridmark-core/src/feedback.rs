//! Manipulation feedback events delivered by the visualization frontend

use serde::{Deserialize, Serialize};

use crate::marker::Pose;

/// What kind of manipulation a feedback event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Periodic liveness notification, no user action
    KeepAlive,
    /// Marker pose changed while being dragged
    PoseUpdate,
    /// A button control was activated
    Click,
    MouseDown,
    MouseUp,
}

/// A single feedback event referencing a marker by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub marker_name: String,
    /// Marker pose as reported by the frontend at event time
    pub pose: Pose,
}

impl Feedback {
    /// Click event on the named marker at the reported pose
    pub fn click(marker_name: impl Into<String>, pose: Pose) -> Self {
        Self {
            kind: FeedbackKind::Click,
            marker_name: marker_name.into(),
            pose,
        }
    }
}
