//! FABRIK joint-chain solver
//!
//! Drives the end joint of an articulated chain of rigid bones toward a
//! moving target pose. Positions come from FABRIK (forward and backward
//! reaching), with an optional pole target steering the bend of three-joint
//! limbs. Joint rotations are then rebuilt from the solved positions.
//!
//! ```text
//! joint poses ──► ChainModel (once) ──┐
//! live positions + target (+ pole) ───┴─► solve ──► positions + rotations
//! ```
//!
//! The host owns the scene: it supplies the ordered joint poses at setup and
//! the live positions every update, then writes the results back.

pub mod chain;
pub mod config;
pub mod error;
pub mod ik;
pub mod math;
pub mod pole;
pub mod pose;
pub mod solver;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use chain::{ChainModel, ChainSnapshot, JointPose, TargetPose};
pub use config::SolverConfig;
pub use error::{ChainError, Result};
pub use glam::{Quat, Vec3};
pub use ik::{solve_fabrik, ReachBranch, ReachOutcome};
pub use solver::{solve, ChainSolver, SolveInput, SolveOutput, SolveReport};

#[cfg(target_arch = "wasm32")]
pub use wasm::{init_logging, IkChain};
