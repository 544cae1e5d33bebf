//! # ISLM Core
//!
//! Comparative statics for the linear IS-LM model.
//!
//! This library provides:
//! - A closed-form solver for the simultaneous goods- and money-market equilibrium
//! - Lazily sampled IS, LM, money-demand and planned-expenditure curves
//! - Structural-sensitivity scenarios (steep/flat IS and LM) driven by parameter overrides
//! - A text format for model calibrations and custom scenarios
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the model description language
//! - [`model`] - Parameters, policy shocks and validation
//! - [`solver`] - Equilibrium, curves, scenarios and the dashboard evaluator
//! - [`output`] - Summary and JSON report output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! islm --fiscal 2 --monetary -1.5
//! islm model.islm --format json | render-dashboard
//! ```
//!
//! ### Library
//!
//! ```
//! use islm_core::{ModelParameters, PolicyShock, solve_equilibrium};
//!
//! let eq = solve_equilibrium(&ModelParameters::reference(), PolicyShock::ZERO).unwrap();
//! assert!((eq.output - 10.3333).abs() < 1e-4);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmIslm } from 'islm_core';
//!
//! const model = new WasmIslm("");
//! const report = JSON.parse(model.evaluate(1.5, -0.25));
//! ```
//!
//! ## Model
//!
//! ```text
//! IS:  Y = a + c·(Y − T) + I0 − b·r + G      G = G0 + ΔG
//! LM:  M = k·Y − h·r                          M = M0 + ΔM
//! ```
//!
//! Every evaluation is a pure function of `(ModelParameters, PolicyShock)`;
//! nothing is retained between calls except an optional memoization cache.

pub mod dsl;
pub mod error;
pub mod model;
pub mod solver;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use error::{IslmError, Result};
pub use model::{ModelParameters, PolicyShock};
pub use solver::{solve_equilibrium, Equilibrium, Evaluator};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmIslm;

/// Divisors with a smaller magnitude are treated as zero.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

/// Default lower bound of the policy sliders
pub const DEFAULT_SHOCK_MIN: f64 = -9.0;

/// Default upper bound of the policy sliders
pub const DEFAULT_SHOCK_MAX: f64 = 9.0;

/// Default policy slider granularity
pub const DEFAULT_SHOCK_STEP: f64 = 0.25;
