use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World-space pose of a single joint (or of the IK target).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct JointPose {
    pub position: Vec3,
    /// Identity when omitted in JSON
    #[serde(default)]
    pub rotation: Quat,
}

/// The IK target shares the joint pose layout
pub type TargetPose = JointPose;

impl JointPose {
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity rotation
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}
