//! Structural-sensitivity scenarios.
//!
//! A [`Scenario`] is a named set of parameter overrides plus the axes its chart
//! uses. Every scenario, the base case included, goes through the same
//! [`evaluate_scenario`].

use serde::Serialize;

use crate::error::Result;
use crate::model::{ModelParameters, Parameter, ParameterOverrides, PolicyShock};

use super::curves::{generate_is_curve, generate_lm_curve, Curve, SampleRange};
use super::equilibrium::{multipliers, solve_equilibrium, Equilibrium, Multipliers};
use super::{
    BASE_OUTPUT_MAX, BASE_RATE_MAX, BASE_SAMPLE_COUNT, RATE_MIN, VARIANT_OUTPUT_MAX,
    VARIANT_RATE_MAX, VARIANT_SAMPLE_COUNT,
};

/// A named parameterization of the model and its chart axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    /// Short identifier
    pub name: String,
    /// Chart title
    pub title: String,
    /// Constants replaced in the base parameters
    pub overrides: ParameterOverrides,
    /// Output axis
    pub output_range: SampleRange,
    /// Interest-rate axis
    pub rate_range: SampleRange,
    /// Samples per curve
    pub sample_count: usize,
}

impl Scenario {
    /// The unmodified model on the base axes.
    pub fn base() -> Self {
        Self {
            name: "base".to_string(),
            title: "IS-LM".to_string(),
            overrides: ParameterOverrides::new(),
            output_range: SampleRange {
                min: 0.0,
                max: BASE_OUTPUT_MAX,
            },
            rate_range: SampleRange {
                min: RATE_MIN,
                max: BASE_RATE_MAX,
            },
            sample_count: BASE_SAMPLE_COUNT,
        }
    }

    /// A structural variant on the wide axes.
    pub fn variant(
        name: impl Into<String>,
        title: impl Into<String>,
        overrides: ParameterOverrides,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            overrides,
            output_range: SampleRange {
                min: 0.0,
                max: VARIANT_OUTPUT_MAX,
            },
            rate_range: SampleRange {
                min: RATE_MIN,
                max: VARIANT_RATE_MAX,
            },
            sample_count: VARIANT_SAMPLE_COUNT,
        }
    }

    /// Investment barely responds to r.
    pub fn steep_is() -> Self {
        Self::variant(
            "steep_is",
            "Steep IS (resistant to monetary policy)",
            ParameterOverrides::new().set(Parameter::InvestmentSensitivity, 0.05),
        )
    }

    /// Investment is highly responsive to r.
    pub fn flat_is() -> Self {
        Self::variant(
            "flat_is",
            "Flat IS (highly responsive to r)",
            ParameterOverrides::new().set(Parameter::InvestmentSensitivity, 100.0),
        )
    }

    /// Money demand barely responds to r; fiscal policy is crowded out.
    pub fn steep_lm() -> Self {
        Self::variant(
            "steep_lm",
            "LM very steep (fiscal largely ineffective)",
            ParameterOverrides::new().set(Parameter::InterestSensitivity, 0.05),
        )
    }

    /// Liquidity trap.
    pub fn flat_lm() -> Self {
        Self::variant(
            "flat_lm",
            "LM flat (liquidity trap)",
            ParameterOverrides::new().set(Parameter::InterestSensitivity, 50.0),
        )
    }

    /// The four structural variants shown next to the base chart.
    pub fn standard_variants() -> Vec<Scenario> {
        vec![
            Self::steep_is(),
            Self::flat_is(),
            Self::steep_lm(),
            Self::flat_lm(),
        ]
    }

    /// Override the sample count.
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Parameters this scenario evaluates.
    pub fn parameters(&self, base: &ModelParameters) -> ModelParameters {
        base.with_overrides(&self.overrides)
    }
}

/// Baseline and shocked IS-LM state of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioEvaluation {
    pub name: String,
    pub title: String,
    /// Parameters after overrides
    pub parameters: ModelParameters,
    /// Equilibrium with no policy shock
    pub baseline: Equilibrium,
    /// Equilibrium with the current shock
    pub current: Equilibrium,
    pub multipliers: Multipliers,
    pub is_baseline: Curve,
    pub lm_baseline: Curve,
    pub is_current: Curve,
    pub lm_current: Curve,
    pub output_range: SampleRange,
    pub rate_range: SampleRange,
}

impl ScenarioEvaluation {
    /// Change in equilibrium output caused by the shock.
    pub fn output_response(&self) -> f64 {
        self.current.output - self.baseline.output
    }

    /// Change in equilibrium interest rate caused by the shock.
    pub fn rate_response(&self) -> f64 {
        self.current.rate - self.baseline.rate
    }
}

/// Evaluate a scenario against base parameters and a policy shock.
///
/// The base parameters are not modified; the scenario's overrides are applied
/// to a copy.
pub fn evaluate_scenario(
    base: &ModelParameters,
    scenario: &Scenario,
    shock: PolicyShock,
) -> Result<ScenarioEvaluation> {
    evaluate_with(base, scenario, shock, solve_equilibrium)
}

/// Evaluate a scenario using a caller-supplied equilibrium solver.
pub(crate) fn evaluate_with<F>(
    base: &ModelParameters,
    scenario: &Scenario,
    shock: PolicyShock,
    mut solve: F,
) -> Result<ScenarioEvaluation>
where
    F: FnMut(&ModelParameters, PolicyShock) -> Result<Equilibrium>,
{
    let params = scenario.parameters(base);
    params.ensure_finite()?;

    let baseline = solve(&params, PolicyShock::ZERO)?;
    let current = if shock.is_zero() {
        baseline
    } else {
        solve(&params, shock)?
    };

    let g_base = params.g0;
    let m_base = params.m0;
    let g_cur = params.g0 + shock.fiscal;
    let m_cur = params.m0 + shock.monetary;
    let y = scenario.output_range;
    let n = scenario.sample_count;

    Ok(ScenarioEvaluation {
        name: scenario.name.clone(),
        title: scenario.title.clone(),
        parameters: params,
        baseline,
        current,
        multipliers: multipliers(&params)?,
        is_baseline: generate_is_curve(&params, g_base, y, n)?,
        lm_baseline: generate_lm_curve(&params, m_base, y, n)?,
        is_current: generate_is_curve(&params, g_cur, y, n)?,
        lm_current: generate_lm_curve(&params, m_cur, y, n)?,
        output_range: scenario.output_range,
        rate_range: scenario.rate_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_scenario_matches_solver() {
        let p = ModelParameters::reference();
        let shock = PolicyShock::new(1.0, 0.5);
        let eval = evaluate_scenario(&p, &Scenario::base(), shock).unwrap();

        assert_eq!(eval.baseline, solve_equilibrium(&p, PolicyShock::ZERO).unwrap());
        assert_eq!(eval.current, solve_equilibrium(&p, shock).unwrap());
        assert_eq!(eval.is_current.len(), BASE_SAMPLE_COUNT);
        assert_eq!(eval.output_range.max, BASE_OUTPUT_MAX);
    }

    #[test]
    fn test_variants_do_not_mutate_base() {
        let p = ModelParameters::reference();
        for scenario in Scenario::standard_variants() {
            let eval = evaluate_scenario(&p, &scenario, PolicyShock::fiscal(2.0)).unwrap();
            assert_ne!(eval.parameters, p);
            assert_eq!(eval.is_baseline.len(), VARIANT_SAMPLE_COUNT);
        }
        assert_eq!(p, ModelParameters::reference());
    }

    #[test]
    fn test_curves_cross_at_equilibrium() {
        let p = ModelParameters::reference();
        let shock = PolicyShock::new(-2.0, 3.0);
        for scenario in std::iter::once(Scenario::base()).chain(Scenario::standard_variants()) {
            let eval = evaluate_scenario(&p, &scenario, shock).unwrap();
            let y = eval.current.output;
            assert_relative_eq!(eval.is_current.value_at(y), eval.current.rate, epsilon = 1e-9);
            assert_relative_eq!(eval.lm_current.value_at(y), eval.current.rate, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_slope_sensitivity() {
        let p = ModelParameters::reference();
        let monetary = PolicyShock::monetary(3.0);
        let fiscal = PolicyShock::fiscal(3.0);

        let response = |scenario: Scenario, shock| {
            evaluate_scenario(&p, &scenario, shock)
                .unwrap()
                .output_response()
        };

        let base_m = response(Scenario::base(), monetary);
        let base_f = response(Scenario::base(), fiscal);

        // Steep IS: monetary policy weak. Flat IS: monetary strong, fiscal weak.
        assert!(response(Scenario::steep_is(), monetary) < base_m);
        assert!(response(Scenario::flat_is(), monetary) > base_m);
        assert!(response(Scenario::flat_is(), fiscal) < base_f);

        // Steep LM: fiscal crowded out. Flat LM: fiscal strong, monetary weak.
        assert!(response(Scenario::steep_lm(), fiscal) < base_f);
        assert!(response(Scenario::flat_lm(), fiscal) > base_f);
        assert!(response(Scenario::flat_lm(), monetary) < base_m);
    }

    #[test]
    fn test_responses_follow_multipliers() {
        let p = ModelParameters::reference();
        let shock = PolicyShock::new(1.5, -2.0);
        let eval = evaluate_scenario(&p, &Scenario::steep_lm(), shock).unwrap();
        let m = eval.multipliers;

        assert_relative_eq!(
            eval.output_response(),
            m.fiscal_output * 1.5 - m.monetary_output * 2.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            eval.rate_response(),
            m.fiscal_rate * 1.5 - m.monetary_rate * 2.0,
            max_relative = 1e-9
        );

        let still = evaluate_scenario(&p, &Scenario::steep_lm(), PolicyShock::ZERO).unwrap();
        assert_eq!(still.rate_response(), 0.0);
        assert_eq!(still.is_current, still.is_baseline);
    }

    #[test]
    fn test_degenerate_override_fails() {
        let p = ModelParameters::reference();
        let scenario = Scenario::variant(
            "broken",
            "broken",
            ParameterOverrides::new().set(Parameter::InterestSensitivity, 0.0),
        );
        assert!(evaluate_scenario(&p, &scenario, PolicyShock::ZERO)
            .unwrap_err()
            .is_degenerate());
    }
}
