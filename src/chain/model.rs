use super::joint::JointPose;
use crate::error::{ChainError, Result};
use crate::math::direction_or;
use glam::{Quat, Vec3};

/// Minimum joints in a chain: a root and an effector
pub const MIN_JOINTS: usize = 2;

/// Rest-pose geometry of a joint chain, captured once at setup.
///
/// Index 0 is the root, index `joint_count() - 1` the effector. Bone `i`
/// connects joint `i` to joint `i + 1`. Nothing here changes after
/// [`ChainModel::build`]; per-solve state lives in the solve input/output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainModel {
    bone_lengths: Vec<f32>,
    chain_length: f32,
    /// Raw (unnormalized) joint i -> joint i+1 vectors at setup
    rest_directions: Vec<Vec3>,
    /// Unit versions of `rest_directions`, `Vec3::Y` for zero-length bones
    rest_units: Vec<Vec3>,
    /// Rotations of the non-effector joints at setup
    rest_rotations: Vec<Quat>,
    effector_rest_rotation: Quat,
    target_rest_rotation: Quat,
}

impl ChainModel {
    /// Build the model from an ordered snapshot of joint world poses and the
    /// target's rotation at the same moment.
    pub fn build(joints: &[JointPose], target_rotation: Quat) -> Result<Self> {
        if joints.len() < MIN_JOINTS {
            return Err(ChainError::TooFewJoints {
                count: joints.len(),
            });
        }
        if !joints.iter().all(JointPose::is_finite) {
            return Err(ChainError::NonFiniteInput("joint pose"));
        }
        if !target_rotation.is_finite() {
            return Err(ChainError::NonFiniteInput("target rotation"));
        }

        let bones = joints.len() - 1;
        let mut bone_lengths = Vec::with_capacity(bones);
        let mut rest_directions = Vec::with_capacity(bones);
        let mut rest_units = Vec::with_capacity(bones);
        let mut rest_rotations = Vec::with_capacity(bones);
        let mut chain_length = 0.0;

        for pair in joints.windows(2) {
            let (joint, next) = (pair[0], pair[1]);
            let length = joint.position.distance(next.position);
            let direction = next.position - joint.position;

            bone_lengths.push(length);
            chain_length += length;
            rest_directions.push(direction);
            rest_units.push(direction_or(direction, Vec3::Y));
            rest_rotations.push(joint.rotation);
        }

        let effector_rest_rotation = joints[bones].rotation;

        log::debug!(
            "Built chain model: {} joints, reach {:.4}",
            joints.len(),
            chain_length
        );

        Ok(Self {
            bone_lengths,
            chain_length,
            rest_directions,
            rest_units,
            rest_rotations,
            effector_rest_rotation,
            target_rest_rotation: target_rotation,
        })
    }

    #[inline]
    pub fn joint_count(&self) -> usize {
        self.bone_lengths.len() + 1
    }

    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bone_lengths.len()
    }

    #[inline]
    pub fn bone_lengths(&self) -> &[f32] {
        &self.bone_lengths
    }

    /// Sum of all bone lengths (maximum reach from the root)
    #[inline]
    pub fn chain_length(&self) -> f32 {
        self.chain_length
    }

    /// Raw rest vector of bone `bone` (joint `bone` to joint `bone + 1`)
    #[inline]
    pub fn rest_direction(&self, bone: usize) -> Vec3 {
        self.rest_directions[bone]
    }

    /// Unit rest direction of bone `bone`, used as the degenerate fallback
    #[inline]
    pub fn rest_unit(&self, bone: usize) -> Vec3 {
        self.rest_units[bone]
    }

    #[inline]
    pub fn rest_rotation(&self, joint: usize) -> Quat {
        self.rest_rotations[joint]
    }

    #[inline]
    pub fn effector_rest_rotation(&self) -> Quat {
        self.effector_rest_rotation
    }

    #[inline]
    pub fn target_rest_rotation(&self) -> Quat {
        self.target_rest_rotation
    }

    /// Fixed rotational offset between effector and target captured at setup
    #[inline]
    pub fn effector_offset(&self) -> Quat {
        self.effector_rest_rotation * self.target_rest_rotation.inverse()
    }
}
