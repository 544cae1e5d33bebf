//! Dashboard evaluation.
//!
//! [`Evaluator`] turns `(ModelParameters, PolicyShock)` into a
//! [`DashboardReport`] holding everything the four chart groups display.

use serde::Serialize;

use crate::error::Result;
use crate::model::{
    validate_dashboard, ModelParameters, PolicyShock, ShockBounds, ShockPolicy,
};

use super::cache::EquilibriumCache;
use super::curves::{
    generate_expenditure_curve, generate_money_demand_curve, generate_reference_line, Curve,
    SampleRange,
};
use super::equilibrium::{goods_market_output, solve_equilibrium, Equilibrium};
use super::scenario::{evaluate_with, Scenario, ScenarioEvaluation};
use super::{
    BASE_SAMPLE_COUNT, MONEY_AXIS_HALF_WIDTH, PANEL_AGREEMENT_TOLERANCE, VARIANT_SAMPLE_COUNT,
};

/// Configuration for the evaluator.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Slider bounds for both instruments.
    pub shock_bounds: ShockBounds,
    /// Handling of shocks outside the bounds.
    pub shock_policy: ShockPolicy,
    /// Samples per curve on the base panels.
    pub base_samples: usize,
    /// Samples per curve on the structural variants.
    pub variant_samples: usize,
    /// Whether to memoize equilibrium solves.
    pub cache: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            shock_bounds: ShockBounds::default(),
            shock_policy: ShockPolicy::default(),
            base_samples: BASE_SAMPLE_COUNT,
            variant_samples: VARIANT_SAMPLE_COUNT,
            cache: false,
        }
    }
}

impl EvaluatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slider bounds.
    pub fn with_shock_bounds(mut self, bounds: ShockBounds) -> Self {
        self.shock_bounds = bounds;
        self
    }

    /// Set the out-of-range shock policy.
    pub fn with_shock_policy(mut self, policy: ShockPolicy) -> Self {
        self.shock_policy = policy;
        self
    }

    /// Set the sample count for every curve.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.base_samples = samples;
        self.variant_samples = samples;
        self
    }

    /// Enable or disable memoization of equilibrium solves.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}

/// Goods-market panel.
#[derive(Debug, Clone, Serialize)]
pub struct KeynesianCross {
    /// Planned expenditure at the baseline rate
    pub expenditure_baseline: Curve,
    /// Planned expenditure at the current rate
    pub expenditure_current: Curve,
    /// 45° line `E = Y`
    pub reference: Curve,
    /// Goods-market equilibrium output, baseline
    pub equilibrium_baseline: f64,
    /// Goods-market equilibrium output, current
    pub equilibrium_current: f64,
    pub output_range: SampleRange,
}

/// Money-market panel.
#[derive(Debug, Clone, Serialize)]
pub struct MoneyMarket {
    /// Money demand at baseline income
    pub demand_baseline: Curve,
    /// Money demand at current income
    pub demand_current: Curve,
    /// Vertical baseline money supply `M0`
    pub supply_baseline: f64,
    /// Vertical current money supply `M0 + ΔM`
    pub supply_current: f64,
    pub rate_baseline: f64,
    pub rate_current: f64,
    pub money_range: SampleRange,
    pub rate_range: SampleRange,
}

impl MoneyMarket {
    /// Endpoints of a vertical supply segment spanning the rate axis.
    pub fn supply_segment(&self, supply: f64) -> [(f64, f64); 2] {
        [
            (supply, self.rate_range.min),
            (supply, self.rate_range.max),
        ]
    }
}

/// Everything the dashboard renders for one policy shock.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub shock: PolicyShock,
    pub keynesian_cross: KeynesianCross,
    pub money_market: MoneyMarket,
    pub is_lm: ScenarioEvaluation,
    pub variants: Vec<ScenarioEvaluation>,
}

impl DashboardReport {
    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Option<&ScenarioEvaluation> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Evaluates the dashboard for successive policy shocks.
#[derive(Debug)]
pub struct Evaluator {
    params: ModelParameters,
    config: EvaluatorConfig,
    base: Scenario,
    variants: Vec<Scenario>,
    cache: Option<EquilibriumCache>,
}

impl Evaluator {
    /// Create an evaluator with the standard variants and default configuration.
    pub fn new(params: ModelParameters) -> Result<Self> {
        Self::with_config(params, EvaluatorConfig::default())
    }

    /// Create an evaluator with the standard variants and custom configuration.
    pub fn with_config(params: ModelParameters, config: EvaluatorConfig) -> Result<Self> {
        Self::with_scenarios(params, config, Scenario::standard_variants())
    }

    /// Create an evaluator with a custom list of variants.
    pub fn with_scenarios(
        params: ModelParameters,
        config: EvaluatorConfig,
        variants: Vec<Scenario>,
    ) -> Result<Self> {
        validate_dashboard(&params)?;

        let base = Scenario::base().with_sample_count(config.base_samples);
        let variants = variants
            .into_iter()
            .map(|s| s.with_sample_count(config.variant_samples))
            .collect();
        let cache = config.cache.then(EquilibriumCache::default);

        Ok(Self {
            params,
            config,
            base,
            variants,
            cache,
        })
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn variants(&self) -> &[Scenario] {
        &self.variants
    }

    pub fn cache(&self) -> Option<&EquilibriumCache> {
        self.cache.as_ref()
    }

    /// Solve the base model for a shock, honoring the shock policy.
    pub fn equilibrium(&mut self, shock: PolicyShock) -> Result<Equilibrium> {
        let shock = self
            .config
            .shock_bounds
            .enforce(shock, self.config.shock_policy)?;
        let params = self.params;
        self.solve(&params, shock)
    }

    /// Build the full dashboard report for a shock.
    pub fn evaluate(&mut self, shock: PolicyShock) -> Result<DashboardReport> {
        let shock = self
            .config
            .shock_bounds
            .enforce(shock, self.config.shock_policy)?;
        tracing::debug!(
            fiscal = shock.fiscal,
            monetary = shock.monetary,
            variants = self.variants.len(),
            "evaluating dashboard"
        );

        let params = self.params;
        let base = self.base.clone();
        let is_lm = self.evaluate_scenario(&params, &base, shock)?;
        let keynesian_cross = self.keynesian_cross(&is_lm, shock)?;
        let money_market = self.money_market(&is_lm, shock)?;

        let scenarios = self.variants.clone();
        let variants = scenarios
            .iter()
            .map(|scenario| self.evaluate_scenario(&params, scenario, shock))
            .collect::<Result<Vec<_>>>()?;

        Ok(DashboardReport {
            shock,
            keynesian_cross,
            money_market,
            is_lm,
            variants,
        })
    }

    fn solve(&mut self, params: &ModelParameters, shock: PolicyShock) -> Result<Equilibrium> {
        match self.cache.as_mut() {
            Some(cache) => cache.get_or_solve(params, shock),
            None => solve_equilibrium(params, shock),
        }
    }

    fn evaluate_scenario(
        &mut self,
        params: &ModelParameters,
        scenario: &Scenario,
        shock: PolicyShock,
    ) -> Result<ScenarioEvaluation> {
        let eval = evaluate_with(params, scenario, shock, |p, s| self.solve(p, s))?;
        tracing::debug!(
            scenario = %eval.name,
            output = eval.current.output,
            rate = eval.current.rate,
            "scenario solved"
        );
        Ok(eval)
    }

    fn keynesian_cross(&self, is_lm: &ScenarioEvaluation, shock: PolicyShock) -> Result<KeynesianCross> {
        let p = &self.params;
        let range = is_lm.output_range;
        let n = self.base.sample_count;
        let g_base = p.g0;
        let g_cur = p.g0 + shock.fiscal;

        check_panel_agreement(p, g_base, &is_lm.baseline, "baseline")?;
        check_panel_agreement(p, g_cur, &is_lm.current, "current")?;

        Ok(KeynesianCross {
            expenditure_baseline: generate_expenditure_curve(p, g_base, is_lm.baseline.rate, range, n)?,
            expenditure_current: generate_expenditure_curve(p, g_cur, is_lm.current.rate, range, n)?,
            reference: generate_reference_line(range, n)?,
            equilibrium_baseline: is_lm.baseline.output,
            equilibrium_current: is_lm.current.output,
            output_range: range,
        })
    }

    fn money_market(&self, is_lm: &ScenarioEvaluation, shock: PolicyShock) -> Result<MoneyMarket> {
        let p = &self.params;
        let n = self.base.sample_count;
        let money_range = SampleRange::new(
            (p.m0 - MONEY_AXIS_HALF_WIDTH).max(0.0),
            p.m0 + MONEY_AXIS_HALF_WIDTH,
        )?;

        Ok(MoneyMarket {
            demand_baseline: generate_money_demand_curve(p, is_lm.baseline.output, money_range, n)?,
            demand_current: generate_money_demand_curve(p, is_lm.current.output, money_range, n)?,
            supply_baseline: p.m0,
            supply_current: p.m0 + shock.monetary,
            rate_baseline: is_lm.baseline.rate,
            rate_current: is_lm.current.rate,
            money_range,
            rate_range: is_lm.rate_range,
        })
    }
}

/// Check that the Keynesian-cross equilibrium at `r*` coincides with `Y*`.
fn check_panel_agreement(
    params: &ModelParameters,
    g: f64,
    eq: &Equilibrium,
    label: &'static str,
) -> Result<()> {
    let goods = goods_market_output(params, g, eq.rate)?;
    let drift = (goods - eq.output).abs() / eq.output.abs().max(1.0);
    if drift > PANEL_AGREEMENT_TOLERANCE {
        tracing::warn!(
            equilibrium = label,
            goods_market = goods,
            is_lm = eq.output,
            drift,
            "goods-market and IS-LM equilibria disagree"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IslmError;
    use crate::model::Parameter;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_dashboard() {
        let mut evaluator = Evaluator::new(ModelParameters::reference()).unwrap();
        let report = evaluator.evaluate(PolicyShock::ZERO).unwrap();

        assert_relative_eq!(report.is_lm.current.output, 10.3333, epsilon = 1e-4);
        assert_relative_eq!(report.is_lm.current.rate, 1.8889, epsilon = 1e-4);
        assert_eq!(report.is_lm.baseline, report.is_lm.current);
        assert_eq!(report.variants.len(), 4);
        assert!(report.variant("flat_lm").is_some());
    }

    #[test]
    fn test_keynesian_cross_meets_reference_line() {
        let mut evaluator = Evaluator::new(ModelParameters::reference()).unwrap();
        let report = evaluator.evaluate(PolicyShock::new(2.0, -1.0)).unwrap();
        let kc = &report.keynesian_cross;

        let y = kc.equilibrium_current;
        assert_relative_eq!(kc.expenditure_current.value_at(y), y, epsilon = 1e-9);
        assert_relative_eq!(
            kc.expenditure_baseline.value_at(kc.equilibrium_baseline),
            kc.equilibrium_baseline,
            epsilon = 1e-9
        );
        assert_eq!(kc.reference.len(), BASE_SAMPLE_COUNT);
    }

    #[test]
    fn test_money_market_clears_at_supply() {
        let mut evaluator = Evaluator::new(ModelParameters::reference()).unwrap();
        let report = evaluator.evaluate(PolicyShock::monetary(2.0)).unwrap();
        let mm = &report.money_market;

        assert_eq!(mm.supply_baseline, 6.0);
        assert_eq!(mm.supply_current, 8.0);
        assert_eq!(mm.money_range, SampleRange { min: 0.0, max: 14.0 });
        assert_relative_eq!(mm.demand_current.value_at(mm.supply_current), mm.rate_current, epsilon = 1e-9);
        assert_relative_eq!(mm.demand_baseline.value_at(mm.supply_baseline), mm.rate_baseline, epsilon = 1e-9);
        assert_eq!(mm.supply_segment(8.0), [(8.0, -1.0), (8.0, 6.0)]);
    }

    #[test]
    fn test_shock_policy() {
        let params = ModelParameters::reference();
        let mut strict = Evaluator::new(params).unwrap();
        assert!(matches!(
            strict.evaluate(PolicyShock::fiscal(10.0)),
            Err(IslmError::ShockOutOfBounds { .. })
        ));

        let config = EvaluatorConfig::new().with_shock_policy(ShockPolicy::Clamp);
        let mut lenient = Evaluator::with_config(params, config).unwrap();
        let report = lenient.evaluate(PolicyShock::fiscal(10.0)).unwrap();
        assert_eq!(report.shock.fiscal, 9.0);
    }

    #[test]
    fn test_cache_reuses_baseline() {
        let config = EvaluatorConfig::new().with_cache(true).with_samples(10);
        let mut evaluator = Evaluator::with_config(ModelParameters::reference(), config).unwrap();

        evaluator.evaluate(PolicyShock::fiscal(1.0)).unwrap();
        evaluator.evaluate(PolicyShock::fiscal(2.0)).unwrap();

        let cache = evaluator.cache().unwrap();
        // Five scenarios: baselines solved once, current solved per shock
        assert_eq!(cache.misses(), 15);
        assert_eq!(cache.hits(), 5);
    }

    #[test]
    fn test_cached_and_uncached_reports_agree() {
        let shock = PolicyShock::new(-3.5, 4.25);
        let mut plain = Evaluator::new(ModelParameters::reference()).unwrap();
        let config = EvaluatorConfig::new().with_cache(true);
        let mut cached = Evaluator::with_config(ModelParameters::reference(), config).unwrap();

        let a = plain.evaluate(shock).unwrap();
        cached.evaluate(shock).unwrap();
        let b = cached.evaluate(shock).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_unit_mpc_rejected() {
        let params = ModelParameters::reference().with(Parameter::Mpc, 1.0);
        assert!(Evaluator::new(params).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_negative_money_supply_rejected() {
        let params = ModelParameters::reference().with(Parameter::MoneySupply, -10.0);
        assert!(solve_equilibrium(&params, PolicyShock::ZERO).is_ok());
        assert!(matches!(
            Evaluator::new(params),
            Err(IslmError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_custom_scenarios() {
        let scenario = Scenario::variant(
            "tight_money",
            "Tight money",
            crate::model::ParameterOverrides::new().set(Parameter::MoneySupply, 2.0),
        );
        let mut evaluator = Evaluator::with_scenarios(
            ModelParameters::reference(),
            EvaluatorConfig::new().with_samples(50),
            vec![scenario],
        )
        .unwrap();
        let report = evaluator.evaluate(PolicyShock::ZERO).unwrap();

        assert_eq!(report.variants.len(), 1);
        let tight = report.variant("tight_money").unwrap();
        assert!(tight.baseline.output < report.is_lm.baseline.output);
        assert_eq!(tight.is_current.len(), 50);
    }
}
