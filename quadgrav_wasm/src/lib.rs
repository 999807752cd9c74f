// quadgrav_wasm/src/lib.rs
// This is the public API for the wasm wrapper of the simulation library.

use wasm_bindgen::prelude::*;

use quadgrav::constants_config::SimConfig;
use quadgrav::galaxy::two_galaxies;
use quadgrav::quadtree::NodeKind;
use quadgrav::simulation::Simulation;

#[wasm_bindgen]
pub struct WasmSimulation {
    sim: Simulation,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Seeds a two-galaxy system with `body_count` bodies.
    #[wasm_bindgen(constructor)]
    pub fn new(body_count: usize, seed: u32) -> Self {
        Self {
            sim: Simulation::new(two_galaxies(body_count, seed as u64), SimConfig::default()),
        }
    }

    /// Advances the simulation by one step.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.sim.step().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.sim.bodies().len()
    }

    /// Interleaved x/y positions, for pushing straight into a renderer.
    #[wasm_bindgen]
    pub fn positions(&self) -> js_sys::Float64Array {
        let flat: Vec<f64> = self
            .sim
            .bodies()
            .iter()
            .flat_map(|body| [body.x, body.y])
            .collect();
        js_sys::Float64Array::from(flat.as_slice())
    }

    #[wasm_bindgen]
    pub fn masses(&self) -> js_sys::Float64Array {
        let masses: Vec<f64> = self.sim.bodies().iter().map(|body| body.mass).collect();
        js_sys::Float64Array::from(masses.as_slice())
    }

    /// Adjusts the accuracy/speed tradeoff between steps.
    #[wasm_bindgen]
    pub fn set_theta(&mut self, theta: f64) {
        self.sim.config_mut().theta = theta;
    }

    /// Dumps node pool diagnostics to the browser console.
    #[wasm_bindgen]
    pub fn log_pool_stats(&self) {
        let pool = self.sim.pool();
        let message = format!(
            "pool: empty={:?} leaf={:?} fork={:?} leaf_stats={:?}",
            pool.pool_size(NodeKind::Empty),
            pool.pool_size(NodeKind::Leaf),
            pool.pool_size(NodeKind::Fork),
            pool.stats(NodeKind::Leaf),
        );
        web_sys::console::log_1(&message.into());
    }
}
