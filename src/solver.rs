//! One solve call: reach, pole, rotations.
//!
//! [`solve`] is a pure function of the model, the per-call input and the
//! settings. [`ChainSolver`] pairs one owned model with its settings for hosts
//! that keep a solver per chain.

use crate::chain::{ChainModel, TargetPose};
use crate::config::SolverConfig;
use crate::error::{ChainError, Result};
use crate::ik::{solve_fabrik, ReachBranch};
use crate::math::scaled_length;
use crate::pole::apply_pole;
use crate::pose::reconstruct_rotations;
use glam::{Quat, Vec3};
use serde::Serialize;

/// Per-call input, index-aligned with the chain model
#[derive(Debug, Clone, Copy)]
pub struct SolveInput<'a> {
    /// Live world positions of every joint, root first
    pub positions: &'a [Vec3],
    pub target: TargetPose,
    /// Bend reference for three-joint chains
    pub pole: Option<Vec3>,
}

impl<'a> SolveInput<'a> {
    pub fn new(positions: &'a [Vec3], target: TargetPose) -> Self {
        Self {
            positions,
            target,
            pole: None,
        }
    }

    pub fn with_pole(self, pole: Vec3) -> Self {
        Self {
            pole: Some(pole),
            ..self
        }
    }

    fn validate(&self, model: &ChainModel) -> Result<()> {
        if self.positions.len() != model.joint_count() {
            return Err(ChainError::JointCountMismatch {
                expected: model.joint_count(),
                actual: self.positions.len(),
            });
        }
        if !self.positions.iter().all(|p| p.is_finite()) {
            return Err(ChainError::NonFiniteInput("joint positions"));
        }
        if !self.target.position.is_finite() {
            return Err(ChainError::NonFiniteInput("target position"));
        }
        if !self.target.rotation.is_finite() {
            return Err(ChainError::NonFiniteInput("target rotation"));
        }
        if self.pole.is_some_and(|pole| !pole.is_finite()) {
            return Err(ChainError::NonFiniteInput("pole position"));
        }
        Ok(())
    }
}

/// How a solve went
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolveReport {
    pub branch: ReachBranch,
    /// Backward/forward passes run
    pub passes: usize,
    /// Effector ended within tolerance of the target
    pub converged: bool,
    pub distance_to_target: f32,
    pub pole_applied: bool,
}

/// Solved pose for every joint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutput {
    /// World positions, root first; the last entry is the effector
    pub positions: Vec<Vec3>,
    /// World rotations, root first; the last entry is the effector
    pub rotations: Vec<Quat>,
    pub report: SolveReport,
}

impl SolveOutput {
    /// Positions as `[x, y, z, x, y, z, ...]`
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Rotations as `[x, y, z, w, x, y, z, w, ...]`
    pub fn rotations_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.rotations)
    }
}

/// View a flat `[x, y, z, ...]` buffer as positions
pub fn positions_from_flat(flat: &[f32]) -> Result<&[Vec3]> {
    bytemuck::try_cast_slice(flat).map_err(|_| ChainError::FlatBuffer { len: flat.len() })
}

/// Solve the chain toward the target.
///
/// Structural problems (misaligned positions, bad tolerance, NaN inputs) are
/// errors. Degenerate geometry and hitting the iteration cap are not: the
/// best pose found is returned and described by [`SolveReport`].
pub fn solve(
    model: &ChainModel,
    input: &SolveInput,
    config: &SolverConfig,
) -> Result<SolveOutput> {
    config.validate()?;
    input.validate(model)?;

    let target = input.target.position;
    let mut positions = input.positions.to_vec();

    let outcome = solve_fabrik(
        &mut positions,
        model,
        target,
        config.iterations,
        config.tolerance,
    );

    let pole_applied = input
        .pole
        .is_some_and(|pole| apply_pole(&mut positions, pole));

    let rotations = reconstruct_rotations(model, &positions, input.target.rotation);

    let distance_to_target = scaled_length(target - positions[positions.len() - 1]);
    let converged = distance_to_target <= config.tolerance;

    if outcome.branch == ReachBranch::Reachable && !converged {
        log::debug!(
            "Iteration cap reached after {} passes, effector {:.5} from target",
            outcome.passes,
            distance_to_target
        );
    }

    Ok(SolveOutput {
        positions,
        rotations,
        report: SolveReport {
            branch: outcome.branch,
            passes: outcome.passes,
            converged,
            distance_to_target,
            pole_applied,
        },
    })
}

/// A chain model with the settings it is solved with.
///
/// Owns its model exclusively; independent chains can be solved on separate
/// threads.
#[derive(Debug, Clone)]
pub struct ChainSolver {
    model: ChainModel,
    config: SolverConfig,
}

impl ChainSolver {
    pub fn new(model: ChainModel, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { model, config })
    }

    pub fn model(&self) -> &ChainModel {
        &self.model
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the settings; the model stays untouched
    pub fn set_config(&mut self, config: SolverConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn solve(
        &self,
        positions: &[Vec3],
        target: TargetPose,
        pole: Option<Vec3>,
    ) -> Result<SolveOutput> {
        let input = SolveInput {
            positions,
            target,
            pole,
        };
        solve(&self.model, &input, &self.config)
    }
}

static_assertions::assert_impl_all!(ChainModel: Send, Sync);
static_assertions::assert_impl_all!(SolverConfig: Send, Sync, Copy);
static_assertions::assert_impl_all!(ChainSolver: Send, Sync);
