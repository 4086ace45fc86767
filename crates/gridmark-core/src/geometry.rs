//! Pure construction of marker geometry and manipulation handles

use glam::{DQuat, DVec3};

use crate::marker::{
    marker_name, ControlMode, ControlSpec, MarkerMode, MarkerSpec, Pose, ShapeKind, VisualShape,
};
use crate::transform::BASE_FRAME;

/// Cube edge length relative to the owning marker's scale
pub const CUBE_SCALE_RATIO: f64 = 0.45;

/// Neutral gray, fully opaque
const CUBE_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Uniform scale assigned to every marker this builder produces
const MARKER_SCALE: f64 = 1.0;

/// Build a fully-described interactive marker at `position`.
///
/// `Move3d` and `Rotate3d` markers get a single free handle of that mode;
/// `Full6Dof` gets a rotate and a move handle per axis. Every marker also
/// gets a trailing cube control in `Move3d` mode so the rendered cube itself
/// stays clickable and draggable.
pub fn build_marker(mode: MarkerMode, position: DVec3) -> MarkerSpec {
    let mut controls = Vec::new();

    match mode {
        MarkerMode::Move3d => controls.push(ControlSpec {
            name: "move_3d".to_string(),
            mode: ControlMode::Move3d,
            orientation: DQuat::IDENTITY,
            shape: None,
        }),
        MarkerMode::Rotate3d => controls.push(ControlSpec {
            name: "rotate_3d".to_string(),
            mode: ControlMode::Rotate3d,
            orientation: DQuat::IDENTITY,
            shape: None,
        }),
        MarkerMode::Full6Dof => {
            for (axis, dir) in [("x", DVec3::X), ("y", DVec3::Y), ("z", DVec3::Z)] {
                let orientation = axis_orientation(dir);
                controls.push(ControlSpec {
                    name: format!("rotate_{axis}"),
                    mode: ControlMode::RotateAxis,
                    orientation,
                    shape: None,
                });
                controls.push(ControlSpec {
                    name: format!("move_{axis}"),
                    mode: ControlMode::MoveAxis,
                    orientation,
                    shape: None,
                });
            }
        }
    }

    controls.push(ControlSpec {
        name: "cube".to_string(),
        mode: ControlMode::Move3d,
        orientation: DQuat::IDENTITY,
        shape: Some(make_box(MARKER_SCALE)),
    });

    MarkerSpec {
        name: marker_name(position),
        frame_id: BASE_FRAME.to_string(),
        pose: Pose::from_position(position),
        scale: MARKER_SCALE,
        description: "6-DOF control marker".to_string(),
        controls,
    }
}

/// Cube primitive sized relative to the marker scale
pub fn make_box(scale: f64) -> VisualShape {
    VisualShape {
        kind: ShapeKind::Cube,
        size: DVec3::splat(scale * CUBE_SCALE_RATIO),
        color: CUBE_COLOR,
    }
}

/// Unit quaternion aligning a control with `axis`
fn axis_orientation(axis: DVec3) -> DQuat {
    DQuat::from_xyzw(axis.x, axis.y, axis.z, 1.0).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_3d_marker_has_two_controls() {
        let marker = build_marker(MarkerMode::Move3d, DVec3::ZERO);
        assert_eq!(marker.controls.len(), 2);
        assert_eq!(marker.controls[0].name, "move_3d");
        assert_eq!(marker.controls[0].mode, ControlMode::Move3d);
        assert!(marker.controls[0].shape.is_none());
    }

    #[test]
    fn test_rotate_3d_marker_has_two_controls() {
        let marker = build_marker(MarkerMode::Rotate3d, DVec3::ZERO);
        assert_eq!(marker.controls.len(), 2);
        assert_eq!(marker.controls[0].name, "rotate_3d");
        assert_eq!(marker.controls[0].mode, ControlMode::Rotate3d);
    }

    #[test]
    fn test_full_6dof_marker_has_seven_controls() {
        let marker = build_marker(MarkerMode::Full6Dof, DVec3::new(2.0, 4.0, 0.0));
        assert_eq!(marker.controls.len(), 7);

        let names: Vec<&str> = marker.controls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["rotate_x", "move_x", "rotate_y", "move_y", "rotate_z", "move_z", "cube"]
        );

        for control in &marker.controls[..6] {
            assert!(
                (control.orientation.length() - 1.0).abs() < 1e-12,
                "axis control orientation must be a unit quaternion"
            );
            assert!(control.shape.is_none());
        }
    }

    #[test]
    fn test_cube_control_is_always_last_and_clickable() {
        for mode in [MarkerMode::Move3d, MarkerMode::Rotate3d, MarkerMode::Full6Dof] {
            let marker = build_marker(mode, DVec3::ZERO);
            let cube = marker.controls.last().unwrap();
            assert_eq!(cube.name, "cube");
            assert_eq!(cube.mode, ControlMode::Move3d);

            let shape = cube.shape.as_ref().unwrap();
            assert_eq!(shape.kind, ShapeKind::Cube);
            assert_eq!(shape.size, DVec3::splat(0.45));
            assert_eq!(shape.color, [0.5, 0.5, 0.5, 1.0]);
        }
    }

    #[test]
    fn test_marker_fields() {
        let position = DVec3::new(4.0, 6.0, 0.0);
        let marker = build_marker(MarkerMode::Full6Dof, position);
        assert_eq!(marker.name, "marker_4_6");
        assert_eq!(marker.frame_id, BASE_FRAME);
        assert_eq!(marker.pose.position, position);
        assert_eq!(marker.pose.orientation, DQuat::IDENTITY);
        assert_eq!(marker.scale, 1.0);
    }

    #[test]
    fn test_axis_orientations_point_along_their_axes() {
        let marker = build_marker(MarkerMode::Full6Dof, DVec3::ZERO);
        // rotate_x carries the x-aligned quaternion (1,0,0,1)/sqrt(2)
        let q = marker.controls[0].orientation;
        assert!((q.x - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((q.w - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(q.y, 0.0);
        assert_eq!(q.z, 0.0);
    }
}
