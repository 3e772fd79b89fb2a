use crate::chain::ChainModel;
use crate::math::direction_or;
use glam::Vec3;
use serde::Serialize;

/// Which half of the reach solver produced the positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReachBranch {
    /// Target within reach: iterated backward/forward passes
    Reachable,
    /// Target beyond reach: chain stretched straight toward it
    Unreachable,
}

/// Result of one reach solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachOutcome {
    pub branch: ReachBranch,
    /// Backward/forward passes run (always 0 for the unreachable branch)
    pub passes: usize,
}

/// Solve positions for a chain of joints using the FABRIK algorithm.
///
/// # Arguments
/// * `joints` - Current world positions of the joints (root to end effector),
///   index-aligned with `model`. Overwritten with the solved positions.
/// * `model` - Bone lengths and rest directions of the chain
/// * `target` - Target position for the end effector
/// * `max_iterations` - The loop stops after `max_iterations + 1` passes
/// * `tolerance` - Effector-to-target distance accepted as converged
///
/// The root never moves and every bone has its model length afterwards. A
/// live pose whose bone lengths drifted from the model is first re-seated
/// onto them with a forward pass; that does not count as a pass.
pub fn solve_fabrik(
    joints: &mut [Vec3],
    model: &ChainModel,
    target: Vec3,
    max_iterations: usize,
    tolerance: f32,
) -> ReachOutcome {
    debug_assert_eq!(joints.len(), model.joint_count());
    let n = joints.len();
    if n < 2 {
        return ReachOutcome {
            branch: ReachBranch::Reachable,
            passes: 0,
        };
    }

    // Check reachability (strict: full extension still iterates)
    let dist = joints[0].distance(target);
    if dist > model.chain_length() {
        stretch_toward(joints, model, target);
        log::trace!(
            "Target {:.4} away exceeds reach {:.4}, stretching",
            dist,
            model.chain_length()
        );
        return ReachOutcome {
            branch: ReachBranch::Unreachable,
            passes: 0,
        };
    }

    let base_pos = joints[0];
    if !is_rigid(joints, model) {
        log::debug!("Live pose off the model bone lengths, re-seating");
        forward_pass(joints, model, base_pos);
    }

    let mut passes = 0;
    let mut dist_to_target = joints[n - 1].distance(target);

    while dist_to_target > tolerance {
        backward_pass(joints, model, target);
        forward_pass(joints, model, base_pos);
        passes += 1;
        dist_to_target = joints[n - 1].distance(target);
        log::trace!("Pass {}: effector {:.5} from target", passes, dist_to_target);

        if passes > max_iterations {
            break;
        }
    }

    ReachOutcome {
        branch: ReachBranch::Reachable,
        passes,
    }
}

/// Every live bone within a relative 1e-5 of its model length
fn is_rigid(joints: &[Vec3], model: &ChainModel) -> bool {
    joints
        .windows(2)
        .zip(model.bone_lengths())
        .all(|(pair, &length)| (pair[0].distance(pair[1]) - length).abs() <= length * 1e-5)
}

/// Lay the chain out in a straight line from the root toward `target`.
fn stretch_toward(joints: &mut [Vec3], model: &ChainModel, target: Vec3) {
    let dir = direction_or(target - joints[0], model.rest_unit(0));
    for (i, &length) in model.bone_lengths().iter().enumerate() {
        joints[i + 1] = joints[i] + dir * length;
    }
}

/// Pin the effector on the target and pull each joint back toward it.
fn backward_pass(joints: &mut [Vec3], model: &ChainModel, target: Vec3) {
    let n = joints.len();
    joints[n - 1] = target;
    for i in (0..n - 1).rev() {
        // Bone i points from joint i to i+1; walking back uses its reverse
        let dir = direction_or(joints[i] - joints[i + 1], -model.rest_unit(i));
        joints[i] = joints[i + 1] + dir * model.bone_lengths()[i];
    }
}

/// Pin the root on its anchor and push each joint back out along the chain.
fn forward_pass(joints: &mut [Vec3], model: &ChainModel, base_pos: Vec3) {
    joints[0] = base_pos;
    for i in 0..joints.len() - 1 {
        let dir = direction_or(joints[i + 1] - joints[i], model.rest_unit(i));
        joints[i + 1] = joints[i] + dir * model.bone_lengths()[i];
    }
}
