//! Interactive marker and control descriptions

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Interaction mode of a single manipulation handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Translate along the control's axis
    MoveAxis,
    /// Rotate about the control's axis
    RotateAxis,
    /// Unconstrained 3D translation
    Move3d,
    /// Unconstrained 3D rotation
    Rotate3d,
}

/// How a marker as a whole should be manipulable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerMode {
    /// Single free-move handle
    Move3d,
    /// Single free-rotate handle
    Rotate3d,
    /// Per-axis move and rotate handles on all three axes
    Full6Dof,
}

impl Default for MarkerMode {
    fn default() -> Self {
        Self::Full6Dof
    }
}

/// Position and orientation in the owning marker's frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Pose {
    /// Pose at `position` with identity orientation
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

/// Primitive shape kinds a control can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Cube,
    Cylinder,
    Sphere,
}

/// Visual primitive embedded in a control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualShape {
    pub kind: ShapeKind,
    /// Extent along each axis, in meters
    pub size: DVec3,
    /// RGBA, each channel in [0, 1]
    pub color: [f32; 4],
}

/// A named manipulation handle attached to a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub name: String,
    pub mode: ControlMode,
    /// Axis of the control when axis-constrained; identity otherwise
    pub orientation: DQuat,
    /// Rendered shape, for controls that also carry the marker's visual
    pub shape: Option<VisualShape>,
}

/// A named, positioned marker with its attached manipulation handles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Unique name within the registry; derived from position
    pub name: String,
    /// Coordinate frame the pose is expressed in
    pub frame_id: String,
    pub pose: Pose,
    /// Uniform scale factor applied to the marker's visuals
    pub scale: f64,
    pub description: String,
    pub controls: Vec<ControlSpec>,
}

/// Derive a marker name from its position.
///
/// Deterministic: two markers at the same x/y collide on the same name and
/// the later insert overwrites the earlier one at commit time.
pub fn marker_name(position: DVec3) -> String {
    format!("marker_{}_{}", position.x, position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_name_deterministic() {
        let a = marker_name(DVec3::new(2.0, 4.0, 0.0));
        let b = marker_name(DVec3::new(2.0, 4.0, 7.5));
        assert_eq!(a, "marker_2_4");
        // z does not participate, same x/y collides
        assert_eq!(a, b);
    }

    #[test]
    fn test_marker_name_distinct_positions() {
        let a = marker_name(DVec3::new(0.0, 2.0, 0.0));
        let b = marker_name(DVec3::new(2.0, 0.0, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_pose_default_is_identity() {
        let pose = Pose::default();
        assert_eq!(pose.position, DVec3::ZERO);
        assert_eq!(pose.orientation, DQuat::IDENTITY);
    }
}
