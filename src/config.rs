//! Solver settings supplied by the host.

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};

/// Default cap on backward/forward iterations
pub const DEFAULT_ITERATIONS: usize = 10;

/// Default effector-to-target distance accepted as converged
pub const DEFAULT_TOLERANCE: f32 = 0.05;

/// Iteration cap and convergence tolerance for the reach loop.
///
/// Missing JSON fields fall back to the defaults:
///
/// ```json
/// { "iterations": 20, "tolerance": 0.001 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SolverConfig {
    /// Passes beyond the first; the loop runs at most `iterations + 1` times.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    pub fn new(iterations: usize, tolerance: f32) -> Result<Self> {
        let config = Self {
            iterations,
            tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Return a copy with a different iteration cap
    pub fn with_iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }

    /// Return a copy with a different tolerance (unvalidated)
    pub fn with_tolerance(self, tolerance: f32) -> Self {
        Self { tolerance, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_finite() && self.tolerance > 0.0 {
            Ok(())
        } else {
            Err(ChainError::InvalidTolerance(self.tolerance))
        }
    }

    /// Parse and validate from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
