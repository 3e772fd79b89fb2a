//! WebAssembly bindings: thin wrappers that convert JS buffers and call the
//! pure solver.

use crate::chain::{ChainSnapshot, TargetPose};
use crate::error::ChainError;
use crate::solver::{positions_from_flat, ChainSolver, SolveOutput};
use glam::{Quat, Vec3};
use wasm_bindgen::prelude::*;

impl From<ChainError> for JsValue {
    fn from(err: ChainError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Route panics and `log` output to the browser console
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn vec3_from(values: &[f32], what: &str) -> Result<Vec3, JsValue> {
    match values {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(JsValue::from_str(&format!(
            "{} needs 3 floats, got {}",
            what,
            values.len()
        ))),
    }
}

fn quat_from(values: &[f32], what: &str) -> Result<Quat, JsValue> {
    match values {
        [x, y, z, w] => Ok(Quat::from_xyzw(*x, *y, *z, *w)),
        _ => Err(JsValue::from_str(&format!(
            "{} needs 4 floats, got {}",
            what,
            values.len()
        ))),
    }
}

fn target_from(position: &[f32], rotation: &[f32]) -> Result<TargetPose, JsValue> {
    Ok(TargetPose::new(
        vec3_from(position, "target position")?,
        quat_from(rotation, "target rotation")?,
    ))
}

/// One IK chain owned by the host page
#[wasm_bindgen]
pub struct IkChain {
    solver: ChainSolver,
}

impl IkChain {
    fn run(
        &self,
        live_positions: &[f32],
        target_position: &[f32],
        target_rotation: &[f32],
        pole: Option<Vec3>,
    ) -> Result<SolveOutput, JsValue> {
        let live = positions_from_flat(live_positions)?;
        let target = target_from(target_position, target_rotation)?;
        Ok(self.solver.solve(live, target, pole)?)
    }
}

#[wasm_bindgen]
impl IkChain {
    /// Build from a JSON setup snapshot (see `ChainSnapshot`)
    #[wasm_bindgen(constructor)]
    pub fn new(snapshot_json: &str) -> Result<IkChain, JsValue> {
        let solver = ChainSnapshot::from_json(snapshot_json)?.build_solver()?;
        log::info!(
            "IK chain ready: {} joints, reach {:.3}",
            solver.model().joint_count(),
            solver.model().chain_length()
        );
        Ok(IkChain { solver })
    }

    pub fn joint_count(&self) -> usize {
        self.solver.model().joint_count()
    }

    pub fn chain_length(&self) -> f32 {
        self.solver.model().chain_length()
    }

    pub fn iterations(&self) -> usize {
        self.solver.config().iterations
    }

    pub fn set_iterations(&mut self, iterations: usize) -> Result<(), JsValue> {
        let config = self.solver.config().with_iterations(iterations);
        Ok(self.solver.set_config(config)?)
    }

    pub fn tolerance(&self) -> f32 {
        self.solver.config().tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f32) -> Result<(), JsValue> {
        let config = self.solver.config().with_tolerance(tolerance);
        Ok(self.solver.set_config(config)?)
    }

    /// Solve and return `{ positions, rotations, report }`
    pub fn solve(
        &self,
        live_positions: &[f32],
        target_position: &[f32],
        target_rotation: &[f32],
    ) -> Result<JsValue, JsValue> {
        let output = self.run(live_positions, target_position, target_rotation, None)?;
        Ok(serde_wasm_bindgen::to_value(&output)?)
    }

    /// Solve with a pole target bending the middle joint of a 3-joint chain
    pub fn solve_with_pole(
        &self,
        live_positions: &[f32],
        target_position: &[f32],
        target_rotation: &[f32],
        pole: &[f32],
    ) -> Result<JsValue, JsValue> {
        let pole = vec3_from(pole, "pole position")?;
        let output = self.run(live_positions, target_position, target_rotation, Some(pole))?;
        Ok(serde_wasm_bindgen::to_value(&output)?)
    }

    /// Solve into one flat buffer: `3 * N` position floats then `4 * N`
    /// rotation floats (xyzw)
    pub fn solve_flat(
        &self,
        live_positions: &[f32],
        target_position: &[f32],
        target_rotation: &[f32],
    ) -> Result<Vec<f32>, JsValue> {
        let output = self.run(live_positions, target_position, target_rotation, None)?;
        let mut flat = Vec::with_capacity(output.positions.len() * 7);
        flat.extend_from_slice(output.positions_flat());
        flat.extend_from_slice(output.rotations_flat());
        Ok(flat)
    }
}
