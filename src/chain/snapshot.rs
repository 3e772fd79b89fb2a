use super::joint::JointPose;
use super::model::ChainModel;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::solver::ChainSolver;
use glam::Quat;
use serde::{Deserialize, Serialize};

/// Setup-time snapshot of a chain in JSON form.
///
/// Stands in for walking a transform hierarchy: the host serializes the
/// ordered joint poses (root first) plus the target rotation once.
///
/// ```json
/// {
///   "joints": [
///     { "position": [0, 0, 0] },
///     { "position": [0, 1, 0], "rotation": [0, 0, 0, 1] },
///     { "position": [0, 2, 0] }
///   ],
///   "target_rotation": [0, 0, 0, 1],
///   "config": { "iterations": 10, "tolerance": 0.05 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChainSnapshot {
    pub joints: Vec<JointPose>,
    #[serde(default)]
    pub target_rotation: Quat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SolverConfig>,
}

impl ChainSnapshot {
    pub fn new(joints: Vec<JointPose>, target_rotation: Quat) -> Self {
        Self {
            joints,
            target_rotation,
            config: None,
        }
    }

    pub fn with_config(self, config: SolverConfig) -> Self {
        Self {
            config: Some(config),
            ..self
        }
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to JSON string
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build_model(&self) -> Result<ChainModel> {
        ChainModel::build(&self.joints, self.target_rotation)
    }

    /// Build a solver, using the embedded config or the defaults
    pub fn build_solver(&self) -> Result<ChainSolver> {
        ChainSolver::new(self.build_model()?, self.config.unwrap_or_default())
    }
}
