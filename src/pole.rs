//! Pole-vector correction for three-joint limbs (elbow/knee bend direction).

use crate::math::{reject_from_axis, signed_angle_about, try_direction};
use glam::{Quat, Vec3};

/// Joint count the pole constraint applies to: root, mid, effector
pub const POLE_JOINT_COUNT: usize = 3;

/// Swing the middle joint of a three-joint chain about the root-effector
/// axis so its bend points toward `pole`.
///
/// Root and effector never move, and both bone lengths are preserved since
/// the mid joint only rotates about an axis through the other two.
/// Returns whether the mid joint was moved. No-op for other chain lengths or
/// when the geometry gives no usable direction (root on effector, mid or pole
/// on the limb axis).
pub fn apply_pole(joints: &mut [Vec3], pole: Vec3) -> bool {
    if joints.len() != POLE_JOINT_COUNT {
        return false;
    }
    let (root, mid, end) = (joints[0], joints[1], joints[2]);

    let Some(limb_axis) = try_direction(end - root) else {
        return false;
    };
    let Some(pole_dir) = reject_from_axis(pole - root, limb_axis) else {
        return false;
    };
    let Some(bone_dir) = reject_from_axis(mid - root, limb_axis) else {
        return false;
    };

    // Rotate about the limb axis itself so an opposite-facing pole cannot
    // pick some other half-turn axis
    let angle = signed_angle_about(bone_dir, pole_dir, limb_axis);
    let rotation = Quat::from_axis_angle(limb_axis, angle);
    joints[1] = rotation * (mid - root) + root;

    log::trace!("Pole swung mid joint by {:.4} rad", angle);
    true
}
