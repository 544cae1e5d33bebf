//! IS-LM equilibrium solver.
//!
//! This module provides the numerical engine behind the dashboard.
//!
//! ## The linear IS-LM system
//!
//! Goods and money markets clear simultaneously:
//! ```text
//! [ 1−c   b ] [ Y ]   [ A ]
//! [  k   −h ] [ r ] = [ M ]
//! ```
//!
//! where:
//! - `A = a − c·T + I0 + G` is autonomous demand
//! - `M` is the real money supply
//! - the determinant is `−(b·k + h·(1−c))`, so `den = b·k + h·(1−c)` must be non-zero
//!
//! The closed form lives in [`equilibrium`], sampled relations in [`curves`],
//! override-driven variants in [`scenario`] and the full dashboard in
//! [`evaluator`].

pub mod cache;
pub mod curves;
pub mod equilibrium;
pub mod evaluator;
pub mod scenario;

pub use cache::EquilibriumCache;
pub use curves::{
    generate_expenditure_curve, generate_is_curve, generate_lm_curve,
    generate_money_demand_curve, generate_reference_line, Curve, CurvePoints, Relation,
    SampleRange,
};
pub use equilibrium::{goods_market_output, multipliers, solve_equilibrium, Equilibrium, Multipliers};
pub use evaluator::{DashboardReport, Evaluator, EvaluatorConfig, KeynesianCross, MoneyMarket};
pub use scenario::{evaluate_scenario, Scenario, ScenarioEvaluation};

/// Upper bound of the output axis on the base panels.
pub const BASE_OUTPUT_MAX: f64 = 30.0;

/// Upper bound of the output axis on the structural variants.
pub const VARIANT_OUTPUT_MAX: f64 = 60.0;

/// Lower bound of every interest-rate axis.
pub const RATE_MIN: f64 = -1.0;

/// Upper bound of the interest-rate axis on the base panels.
pub const BASE_RATE_MAX: f64 = 6.0;

/// Upper bound of the interest-rate axis on the structural variants.
pub const VARIANT_RATE_MAX: f64 = 12.0;

/// The money axis spans `M0 ± 8`, floored at zero.
pub const MONEY_AXIS_HALF_WIDTH: f64 = 8.0;

/// Samples per curve on the base panels.
pub const BASE_SAMPLE_COUNT: usize = 300;

/// Samples per curve on the structural variants.
pub const VARIANT_SAMPLE_COUNT: usize = 400;

/// Relative tolerance between the Keynesian-cross and IS-LM equilibria.
pub const PANEL_AGREEMENT_TOLERANCE: f64 = 1e-9;

/// Default number of memoized equilibria.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;
