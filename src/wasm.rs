//! WASM bindings for ISLM Core.
//!
//! This module provides JavaScript-friendly bindings so a browser dashboard
//! can recompute the charts on every slider movement.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmIslm } from 'islm_core';
//!
//! await init();
//!
//! const model = new WasmIslm(`
//!   .param b 1.5
//!   .scenario trap (h=50)
//! `);
//!
//! slider.oninput = () => {
//!   const report = JSON.parse(model.evaluate(fiscal.value, monetary.value));
//!   plot(report.is_lm.is_current, report.is_lm.lm_current);
//! };
//! ```

use wasm_bindgen::prelude::*;

use crate::dsl;
use crate::error::IslmError;
use crate::model::{ModelDescription, PolicyShock, ShockPolicy};
use crate::solver::{Evaluator, EvaluatorConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: IslmError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible IS-LM evaluator.
#[wasm_bindgen]
pub struct WasmIslm {
    evaluator: Evaluator,
}

#[wasm_bindgen]
impl WasmIslm {
    /// Create an evaluator from a model description.
    ///
    /// An empty string gives the reference model. Out-of-range shocks are
    /// clamped to the slider bounds and results are memoized.
    #[wasm_bindgen(constructor)]
    pub fn new(model_dsl: &str) -> Result<WasmIslm, JsValue> {
        let ast = dsl::parse(model_dsl).map_err(to_js)?;
        let description = ModelDescription::from_ast(ast).map_err(to_js)?;
        let config = EvaluatorConfig::new()
            .with_shock_policy(ShockPolicy::Clamp)
            .with_cache(true);
        let evaluator = description.evaluator(config).map_err(to_js)?;
        Ok(WasmIslm { evaluator })
    }

    /// Evaluate every panel and return the report as JSON.
    #[wasm_bindgen]
    pub fn evaluate(&mut self, fiscal: f64, monetary: f64) -> Result<String, JsValue> {
        let report = self
            .evaluator
            .evaluate(PolicyShock::new(fiscal, monetary))
            .map_err(to_js)?;
        serde_json::to_string(&report).map_err(|e| {
            to_js(IslmError::WasmError {
                message: e.to_string(),
            })
        })
    }

    /// Solve the base model only, returning `[Y*, r*]`.
    #[wasm_bindgen]
    pub fn equilibrium(&mut self, fiscal: f64, monetary: f64) -> Result<Vec<f64>, JsValue> {
        let eq = self
            .evaluator
            .equilibrium(PolicyShock::new(fiscal, monetary))
            .map_err(to_js)?;
        Ok(vec![eq.output, eq.rate])
    }

    /// Lower slider bound.
    #[wasm_bindgen(getter)]
    pub fn shock_min(&self) -> f64 {
        self.evaluator.config().shock_bounds.min
    }

    /// Upper slider bound.
    #[wasm_bindgen(getter)]
    pub fn shock_max(&self) -> f64 {
        self.evaluator.config().shock_bounds.max
    }

    /// Slider step.
    #[wasm_bindgen(getter)]
    pub fn shock_step(&self) -> f64 {
        self.evaluator.config().shock_bounds.step
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
