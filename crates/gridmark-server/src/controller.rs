//! Grid spawning, click feedback handling, and ad-hoc frame publishing

use std::sync::Arc;

use glam::DVec3;
use gridmark_core::{build_marker, Feedback, FeedbackKind, MarkerMode, TransformRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::registry::MarkerServer;

/// Recoverable per-operation errors; none of these are fatal to the process
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("marker server is not initialized")]
    ServerUninitialized,
    #[error("marker '{0}' not found")]
    MarkerNotFound(String),
    #[error("frame names must not be empty")]
    EmptyFrameName,
    #[error("unexpected feedback event kind: {0:?}")]
    UnexpectedEvent(FeedbackKind),
}

/// Grid dimensions and spacing for `spawn_grid`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    pub rows: u32,
    pub cols: u32,
    /// Distance between neighboring markers, in meters
    pub spacing: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            spacing: 2.0,
        }
    }
}

/// Orchestrates marker state in response to operator triggers and feedback.
///
/// The registry may be attached after construction; operations that need it
/// fail closed with [`ControlError::ServerUninitialized`] until then. The
/// transform channel is independent of the registry, so frame publishing
/// works either way.
pub struct MarkerController {
    server: Option<Arc<MarkerServer>>,
    transform_tx: broadcast::Sender<TransformRecord>,
}

impl MarkerController {
    /// Controller with no registry attached yet
    pub fn new(transform_tx: broadcast::Sender<TransformRecord>) -> Self {
        Self {
            server: None,
            transform_tx,
        }
    }

    /// Controller with the registry attached at construction
    pub fn with_server(
        server: Arc<MarkerServer>,
        transform_tx: broadcast::Sender<TransformRecord>,
    ) -> Self {
        Self {
            server: Some(server),
            transform_tx,
        }
    }

    pub fn attach_server(&mut self, server: Arc<MarkerServer>) {
        self.server = Some(server);
    }

    /// Materialize a rows x cols grid of full 6-DOF markers.
    ///
    /// All markers are inserted first and committed once, so observers see
    /// the grid appear as a single batch. Re-spawning with the same settings
    /// collides on every name and overwrites instead of duplicating.
    pub async fn spawn_grid(&self, grid: &GridSettings) -> Result<usize, ControlError> {
        let Some(server) = self.server.as_ref() else {
            error!("Marker server is not initialized, skipping grid spawn");
            return Err(ControlError::ServerUninitialized);
        };

        for i in 0..grid.rows {
            for j in 0..grid.cols {
                let position = DVec3::new(
                    f64::from(i) * grid.spacing,
                    f64::from(j) * grid.spacing,
                    0.0,
                );
                server.insert(build_marker(MarkerMode::Full6Dof, position)).await;
            }
        }
        server.commit().await;

        let count = (grid.rows * grid.cols) as usize;
        info!(markers = count, "Spawned marker grid");
        Ok(count)
    }

    /// React to one feedback event.
    ///
    /// Only click events mutate state: the clicked marker is erased and
    /// replaced by a freely movable marker at the reported position. The
    /// replacement takes its name from the new position, so marker identity
    /// does not survive interaction.
    pub async fn handle_feedback(&self, feedback: &Feedback) -> Result<(), ControlError> {
        if feedback.kind != FeedbackKind::Click {
            warn!(
                kind = ?feedback.kind,
                marker = %feedback.marker_name,
                "Ignoring unexpected feedback event"
            );
            return Err(ControlError::UnexpectedEvent(feedback.kind));
        }

        let Some(server) = self.server.as_ref() else {
            error!("Marker server is not initialized, dropping feedback event");
            return Err(ControlError::ServerUninitialized);
        };

        if server.lookup(&feedback.marker_name).await.is_none() {
            warn!(marker = %feedback.marker_name, "Feedback for unknown marker, dropping event");
            return Err(ControlError::MarkerNotFound(feedback.marker_name.clone()));
        }

        server.erase(&feedback.marker_name).await;

        let position = feedback.pose.position;
        let replacement = build_marker(MarkerMode::Move3d, position);
        let replacement_name = replacement.name.clone();
        server.insert(replacement).await;
        server.commit().await;

        info!(
            old = %feedback.marker_name,
            new = %replacement_name,
            "Replaced clicked marker at feedback position"
        );
        Ok(())
    }

    /// Publish one identity transform relating `frame_id` to its parent.
    ///
    /// Both names must be non-empty; nothing is published otherwise.
    pub fn publish_frame(&self, frame_id: &str, parent_frame_id: &str) -> Result<(), ControlError> {
        if frame_id.is_empty() || parent_frame_id.is_empty() {
            warn!("Rejecting frame publish with empty frame name");
            return Err(ControlError::EmptyFrameName);
        }

        let _ = self
            .transform_tx
            .send(TransformRecord::identity(frame_id, parent_frame_id));
        info!(frame = %frame_id, parent = %parent_frame_id, "Published frame transform");
        Ok(())
    }
}
