//! Stamped coordinate-frame transforms and their time-parameterized motions

use chrono::{DateTime, Utc};
use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Frame every marker and broadcast transform is expressed in
pub const BASE_FRAME: &str = "base_link";

/// Child frame that bobs along z
pub const MOVING_FRAME: &str = "moving_frame";

/// Child frame that pitches continuously
pub const ROTATING_FRAME: &str = "rotating_frame";

/// Ticks per radian of phase for both frame motions
const PHASE_DIVISOR: f64 = 140.0;

/// Peak z displacement of the moving frame, in meters
const BOB_AMPLITUDE: f64 = 2.0;

/// A stamped relation between a child frame and its parent.
///
/// Records are ephemeral: recomputed and republished on every tick, never
/// stored. Each constructor samples the clock itself, so two records built
/// in the same tick may carry distinct stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    pub child_frame: String,
    pub parent_frame: String,
    pub stamp: DateTime<Utc>,
    pub translation: DVec3,
    pub rotation: DQuat,
}

impl TransformRecord {
    /// Zero-translation, identity-rotation relation stamped with the current time
    pub fn identity(child_frame: &str, parent_frame: &str) -> Self {
        Self {
            child_frame: child_frame.to_string(),
            parent_frame: parent_frame.to_string(),
            stamp: Utc::now(),
            translation: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

/// Quaternion from fixed-axis roll/pitch/yaw angles in radians
pub fn quat_from_rpy(roll: f64, pitch: f64, yaw: f64) -> DQuat {
    DQuat::from_euler(EulerRot::ZYX, yaw, pitch, roll)
}

/// `base_link -> moving_frame` at the given tick count: bobbing along z.
///
/// The counter is passed in by value; callers own it and may let it wrap.
pub fn moving_frame_at(counter: u32) -> TransformRecord {
    let phase = f64::from(counter) / PHASE_DIVISOR;
    TransformRecord {
        child_frame: MOVING_FRAME.to_string(),
        parent_frame: BASE_FRAME.to_string(),
        stamp: Utc::now(),
        translation: DVec3::new(0.0, 0.0, BOB_AMPLITUDE * phase.sin()),
        rotation: DQuat::IDENTITY,
    }
}

/// `base_link -> rotating_frame` at the given tick count: pitching in place
pub fn rotating_frame_at(counter: u32) -> TransformRecord {
    let phase = f64::from(counter) / PHASE_DIVISOR;
    TransformRecord {
        child_frame: ROTATING_FRAME.to_string(),
        parent_frame: BASE_FRAME.to_string(),
        stamp: Utc::now(),
        translation: DVec3::ZERO,
        rotation: quat_from_rpy(0.0, phase, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_frame_at_zero_is_flat() {
        let record = moving_frame_at(0);
        assert_eq!(record.child_frame, MOVING_FRAME);
        assert_eq!(record.parent_frame, BASE_FRAME);
        assert_eq!(record.translation, DVec3::ZERO);
        assert_eq!(record.rotation, DQuat::IDENTITY);
    }

    #[test]
    fn test_moving_frame_bobs_with_counter() {
        for counter in [1u32, 70, 140, 220, 1000] {
            let record = moving_frame_at(counter);
            let expected = 2.0 * (f64::from(counter) / 140.0).sin();
            assert!((record.translation.z - expected).abs() < 1e-12);
            assert_eq!(record.translation.x, 0.0);
            assert_eq!(record.translation.y, 0.0);
        }
    }

    #[test]
    fn test_rotating_frame_at_zero_is_identity() {
        let record = rotating_frame_at(0);
        assert_eq!(record.rotation, DQuat::IDENTITY);
        assert_eq!(record.translation, DVec3::ZERO);
    }

    #[test]
    fn test_rotating_frame_pitches_with_counter() {
        for counter in [1u32, 35, 140, 500] {
            let record = rotating_frame_at(counter);
            let expected = DQuat::from_rotation_y(f64::from(counter) / 140.0);
            assert!(record.rotation.abs_diff_eq(expected, 1e-12));
        }
    }

    #[test]
    fn test_quat_from_rpy_single_axes() {
        assert!(quat_from_rpy(0.3, 0.0, 0.0).abs_diff_eq(DQuat::from_rotation_x(0.3), 1e-12));
        assert!(quat_from_rpy(0.0, 0.3, 0.0).abs_diff_eq(DQuat::from_rotation_y(0.3), 1e-12));
        assert!(quat_from_rpy(0.0, 0.0, 0.3).abs_diff_eq(DQuat::from_rotation_z(0.3), 1e-12));
    }

    #[test]
    fn test_identity_record() {
        let record = TransformRecord::identity("camera", "base_link");
        assert_eq!(record.child_frame, "camera");
        assert_eq!(record.parent_frame, "base_link");
        assert_eq!(record.translation, DVec3::ZERO);
        assert_eq!(record.rotation, DQuat::IDENTITY);
    }
}
