//! Closed-form IS-LM equilibrium.

use serde::Serialize;

use crate::error::{IslmError, Result};
use crate::model::{ModelParameters, PolicyShock};

/// Simultaneous goods- and money-market equilibrium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equilibrium {
    /// Output / income `Y*`
    pub output: f64,
    /// Interest rate `r*`
    pub rate: f64,
}

impl Equilibrium {
    /// Residuals of the IS and LM equations at this point.
    ///
    /// IS: `(1−c)·Y + b·r − A`, LM: `k·Y − h·r − M`.
    pub fn residuals(&self, params: &ModelParameters, shock: PolicyShock) -> (f64, f64) {
        let g = params.g0 + shock.fiscal;
        let m = params.m0 + shock.monetary;
        let is = params.leakage() * self.output + params.b * self.rate - params.autonomous_demand(g);
        let lm = params.k * self.output - params.h * self.rate - m;
        (is, lm)
    }
}

/// Comparative statics of the equilibrium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Multipliers {
    /// `∂Y*/∂G = h / den`
    pub fiscal_output: f64,
    /// `∂r*/∂G = k / den`
    pub fiscal_rate: f64,
    /// `∂Y*/∂M = b / den`
    pub monetary_output: f64,
    /// `∂r*/∂M = −(1−c) / den`
    pub monetary_rate: f64,
    /// Private investment lost per unit of government spending, `−b·k / den`
    pub crowding_out: f64,
}

/// Solve the IS and LM equations for `(Y*, r*)`.
///
/// With `G = G0 + ΔG`, `M = M0 + ΔM` and `A = a − c·T + I0 + G`:
///
/// ```text
/// Y* = (h·A + b·M) / den
/// r* = (A − (1−c)·Y*) / b
/// ```
pub fn solve_equilibrium(params: &ModelParameters, shock: PolicyShock) -> Result<Equilibrium> {
    let b = params.checked_b()?;
    params.checked_h()?;
    let den = params.checked_denominator()?;

    let g = params.g0 + shock.fiscal;
    let m = params.m0 + shock.monetary;
    let autonomous = params.autonomous_demand(g);

    let output = (params.h * autonomous + b * m) / den;
    let rate = (autonomous - params.leakage() * output) / b;

    if !output.is_finite() {
        return Err(IslmError::NonFiniteResult { quantity: "Y*" });
    }
    if !rate.is_finite() {
        return Err(IslmError::NonFiniteResult { quantity: "r*" });
    }

    Ok(Equilibrium { output, rate })
}

/// Output that clears the goods market alone at a fixed interest rate.
///
/// This is where the expenditure line crosses the 45° line:
/// `Y = (a − c·T + I0 − b·r + G) / (1 − c)`.
pub fn goods_market_output(params: &ModelParameters, g: f64, r: f64) -> Result<f64> {
    let leakage = params.checked_leakage()?;
    Ok((params.autonomous_demand(g) - params.b * r) / leakage)
}

/// Closed-form policy multipliers.
pub fn multipliers(params: &ModelParameters) -> Result<Multipliers> {
    let den = params.checked_denominator()?;
    Ok(Multipliers {
        fiscal_output: params.h / den,
        fiscal_rate: params.k / den,
        monetary_output: params.b / den,
        monetary_rate: -params.leakage() / den,
        crowding_out: -params.b * params.k / den,
    })
}
