//! Rotation reconstruction from solved joint positions.
//!
//! FABRIK only moves points. Each non-effector joint gets the rotation that
//! carries its rest bone direction onto the solved bone direction, applied on
//! top of its rest rotation so twist about the bone survives. The effector
//! follows the target rotation, keeping the offset it had at setup.

use crate::chain::ChainModel;
use crate::math::from_to_rotation;
use glam::{Quat, Vec3};

/// Rotation of joint `joint` (not the effector) given solved positions
#[inline]
pub fn joint_rotation(model: &ChainModel, joints: &[Vec3], joint: usize) -> Quat {
    let solved = joints[joint + 1] - joints[joint];
    from_to_rotation(model.rest_direction(joint), solved) * model.rest_rotation(joint)
}

/// Effector rotation tracking `target_rotation` with the setup-time offset
#[inline]
pub fn effector_rotation(model: &ChainModel, target_rotation: Quat) -> Quat {
    target_rotation * model.effector_offset()
}

/// Rotations for every joint, root first, effector last.
pub fn reconstruct_rotations(
    model: &ChainModel,
    joints: &[Vec3],
    target_rotation: Quat,
) -> Vec<Quat> {
    debug_assert_eq!(joints.len(), model.joint_count());

    let mut rotations: Vec<Quat> = (0..model.bone_count())
        .map(|joint| joint_rotation(model, joints, joint))
        .collect();
    rotations.push(effector_rotation(model, target_rotation));
    rotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::JointPose;
    use crate::math::ApproxEq;
    use std::f32::consts::FRAC_PI_2;

    fn model() -> ChainModel {
        let joints = [
            JointPose::new(Vec3::ZERO, Quat::from_rotation_x(0.4)),
            JointPose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY),
            JointPose::new(Vec3::new(2.0, 0.0, 0.0), Quat::from_rotation_y(0.7)),
        ];
        ChainModel::build(&joints, Quat::from_rotation_z(0.2)).unwrap()
    }

    #[test]
    fn test_rest_positions_give_rest_rotations() {
        let model = model();
        let joints = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
        let rotations = reconstruct_rotations(&model, &joints, model.target_rest_rotation());

        assert_eq!(rotations.len(), 3);
        assert!(rotations[0].approx_eq(&model.rest_rotation(0), 1e-6));
        assert!(rotations[1].approx_eq(&model.rest_rotation(1), 1e-6));
        // Rest target rotation times the setup offset, not the raw effector rest
        let expected = model.target_rest_rotation() * model.effector_offset();
        assert!(rotations[2].approx_eq(&expected, 1e-6));
    }

    #[test]
    fn test_bone_direction_change_composes_with_rest() {
        let model = model();
        // Root bone swung from +X to +Y
        let joints = [Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
        let rotations = reconstruct_rotations(&model, &joints, Quat::IDENTITY);

        let swing = Quat::from_rotation_z(FRAC_PI_2);
        assert!(rotations[0].approx_eq(&(swing * model.rest_rotation(0)), 1e-5));
        // Rest twist about the bone is carried along
        let swung = rotations[0] * model.rest_rotation(0).inverse() * Vec3::X;
        assert!(swung.approx_eq(&Vec3::Y, 1e-5));
        // Second bone still points +X
        assert!(rotations[1].approx_eq(&model.rest_rotation(1), 1e-5));
    }

    #[test]
    fn test_effector_keeps_target_offset() {
        let model = model();
        let joints = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];

        for angle in [0.0, 0.5, 1.7, -2.9] {
            let target_rot = Quat::from_euler(glam::EulerRot::XYZ, angle, angle * 0.5, 0.3);
            let rotations = reconstruct_rotations(&model, &joints, target_rot);
            let offset = target_rot.inverse() * rotations[2];
            assert!(offset.approx_eq(&model.effector_offset(), 1e-5));
        }
    }

    #[test]
    fn test_collapsed_bone_keeps_rest_rotation() {
        let model = model();
        let joints = [Vec3::ZERO, Vec3::ZERO, Vec3::X];
        let rotations = reconstruct_rotations(&model, &joints, Quat::IDENTITY);

        assert!(rotations[0].approx_eq(&model.rest_rotation(0), 1e-6));
        assert!(rotations.iter().all(|q| q.is_finite()));
    }
}
