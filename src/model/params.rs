//! Structural parameters of the linear IS-LM model.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{IslmError, Result};
use crate::SINGULARITY_EPSILON;

/// Names one structural constant of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Parameter {
    /// Autonomous consumption `a`
    AutonomousConsumption,
    /// Marginal propensity to consume `c`
    Mpc,
    /// Taxes `T`
    Taxes,
    /// Autonomous investment `I0`
    AutonomousInvestment,
    /// Investment sensitivity to the interest rate `b`
    InvestmentSensitivity,
    /// Baseline government spending `G0`
    GovernmentSpending,
    /// Money-demand income sensitivity `k`
    IncomeSensitivity,
    /// Money-demand interest sensitivity `h`
    InterestSensitivity,
    /// Baseline real money supply `M0`
    MoneySupply,
}

impl Parameter {
    /// All parameters in declaration order.
    pub const ALL: [Parameter; 9] = [
        Parameter::AutonomousConsumption,
        Parameter::Mpc,
        Parameter::Taxes,
        Parameter::AutonomousInvestment,
        Parameter::InvestmentSensitivity,
        Parameter::GovernmentSpending,
        Parameter::IncomeSensitivity,
        Parameter::InterestSensitivity,
        Parameter::MoneySupply,
    ];

    /// Parse a parameter from its symbol (case-insensitive).
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "a" => Some(Self::AutonomousConsumption),
            "c" | "mpc" => Some(Self::Mpc),
            "t" => Some(Self::Taxes),
            "i0" => Some(Self::AutonomousInvestment),
            "b" => Some(Self::InvestmentSensitivity),
            "g0" => Some(Self::GovernmentSpending),
            "k" => Some(Self::IncomeSensitivity),
            "h" => Some(Self::InterestSensitivity),
            "m0" => Some(Self::MoneySupply),
            _ => None,
        }
    }

    /// The conventional symbol for this parameter.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::AutonomousConsumption => "a",
            Self::Mpc => "c",
            Self::Taxes => "T",
            Self::AutonomousInvestment => "I0",
            Self::InvestmentSensitivity => "b",
            Self::GovernmentSpending => "G0",
            Self::IncomeSensitivity => "k",
            Self::InterestSensitivity => "h",
            Self::MoneySupply => "M0",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Structural constants of the goods and money markets.
///
/// Goods market: `Y = a + c·(Y − T) + I0 − b·r + G`.
/// Money market: `M = k·Y − h·r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParameters {
    pub a: f64,
    pub c: f64,
    #[serde(rename = "T")]
    pub t: f64,
    #[serde(rename = "I0")]
    pub i0: f64,
    pub b: f64,
    #[serde(rename = "G0")]
    pub g0: f64,
    pub k: f64,
    pub h: f64,
    #[serde(rename = "M0")]
    pub m0: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::reference()
    }
}

impl ModelParameters {
    /// The textbook calibration used by the interactive dashboard.
    pub const fn reference() -> Self {
        Self {
            a: 2.0,
            c: 0.5,
            t: 2.0,
            i0: 4.0,
            b: 1.5,
            g0: 3.0,
            k: 0.8,
            h: 1.2,
            m0: 6.0,
        }
    }

    /// Read one parameter.
    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::AutonomousConsumption => self.a,
            Parameter::Mpc => self.c,
            Parameter::Taxes => self.t,
            Parameter::AutonomousInvestment => self.i0,
            Parameter::InvestmentSensitivity => self.b,
            Parameter::GovernmentSpending => self.g0,
            Parameter::IncomeSensitivity => self.k,
            Parameter::InterestSensitivity => self.h,
            Parameter::MoneySupply => self.m0,
        }
    }

    /// Return a copy with one parameter replaced.
    pub fn with(mut self, param: Parameter, value: f64) -> Self {
        let slot = match param {
            Parameter::AutonomousConsumption => &mut self.a,
            Parameter::Mpc => &mut self.c,
            Parameter::Taxes => &mut self.t,
            Parameter::AutonomousInvestment => &mut self.i0,
            Parameter::InvestmentSensitivity => &mut self.b,
            Parameter::GovernmentSpending => &mut self.g0,
            Parameter::IncomeSensitivity => &mut self.k,
            Parameter::InterestSensitivity => &mut self.h,
            Parameter::MoneySupply => &mut self.m0,
        };
        *slot = value;
        self
    }

    /// Return a copy with every override applied.
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> Self {
        overrides
            .iter()
            .fold(*self, |params, (param, value)| params.with(param, value))
    }

    /// Autonomous demand `A = a − c·T + I0 + G` for government spending `g`.
    pub fn autonomous_demand(&self, g: f64) -> f64 {
        self.a - self.c * self.t + self.i0 + g
    }

    /// Leakage `1 − c` out of each unit of income.
    pub fn leakage(&self) -> f64 {
        1.0 - self.c
    }

    /// Determinant `den = b·k + h·(1 − c)` of the IS-LM system.
    pub fn denominator(&self) -> f64 {
        self.b * self.k + self.h * self.leakage()
    }

    /// `b`, or an error if investment does not respond to the interest rate.
    pub fn checked_b(&self) -> Result<f64> {
        nonzero("b", self.b)
    }

    /// `h`, or an error if money demand does not respond to the interest rate.
    pub fn checked_h(&self) -> Result<f64> {
        nonzero("h", self.h)
    }

    /// `1 − c`, or an error if the goods market has no leakage.
    pub fn checked_leakage(&self) -> Result<f64> {
        nonzero("1-c", self.leakage())
    }

    /// `den`, or an error if the IS-LM system is singular.
    pub fn checked_denominator(&self) -> Result<f64> {
        nonzero("den", self.denominator())
    }

    /// Reject NaN and infinite parameters.
    pub fn ensure_finite(&self) -> Result<()> {
        for param in Parameter::ALL {
            let value = self.get(param);
            if !value.is_finite() {
                return Err(IslmError::InvalidParameter {
                    param: param.symbol().to_string(),
                    message: format!("value {} is not finite", value),
                });
            }
        }
        Ok(())
    }
}

fn nonzero(quantity: &'static str, value: f64) -> Result<f64> {
    if value.abs() < SINGULARITY_EPSILON {
        Err(IslmError::degenerate(quantity, value))
    } else {
        Ok(value)
    }
}

/// A set of structural constants to replace in a base [`ModelParameters`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterOverrides(BTreeMap<Parameter, f64>);

impl ParameterOverrides {
    /// Create an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override (builder style).
    pub fn set(mut self, param: Parameter, value: f64) -> Self {
        self.0.insert(param, value);
        self
    }

    /// Insert an override, returning the previous value.
    pub fn insert(&mut self, param: Parameter, value: f64) -> Option<f64> {
        self.0.insert(param, value)
    }

    /// Iterate over overrides in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        self.0.iter().map(|(&p, &v)| (p, v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Parameter, f64)> for ParameterOverrides {
    fn from_iter<I: IntoIterator<Item = (Parameter, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_derived_quantities() {
        let p = ModelParameters::reference();
        assert_relative_eq!(p.autonomous_demand(p.g0), 8.0);
        assert_relative_eq!(p.denominator(), 1.8, max_relative = 1e-12);
        assert_relative_eq!(p.leakage(), 0.5);
    }

    #[test]
    fn test_overrides_leave_base_untouched() {
        let base = ModelParameters::reference();
        let overrides = ParameterOverrides::new()
            .set(Parameter::InvestmentSensitivity, 0.05)
            .set(Parameter::InterestSensitivity, 50.0);

        let variant = base.with_overrides(&overrides);

        assert_eq!(variant.b, 0.05);
        assert_eq!(variant.h, 50.0);
        assert_eq!(base.b, 1.5);
        assert_eq!(base.h, 1.2);
    }

    #[test]
    fn test_checked_divisors() {
        let p = ModelParameters::reference();
        assert!(p.checked_b().is_ok());
        assert!(p.with(Parameter::InvestmentSensitivity, 0.0).checked_b().unwrap_err().is_degenerate());
        assert!(p.with(Parameter::InterestSensitivity, 0.0).checked_h().is_err());
        assert!(p.with(Parameter::Mpc, 1.0).checked_leakage().is_err());

        // b·k = −h·(1−c) cancels the determinant
        let singular = p
            .with(Parameter::InvestmentSensitivity, -0.75)
            .with(Parameter::IncomeSensitivity, 0.8);
        assert!(singular.checked_denominator().is_err());
    }

    #[test]
    fn test_symbol_round_trip() {
        for param in Parameter::ALL {
            assert_eq!(Parameter::from_symbol(param.symbol()), Some(param));
        }
        assert_eq!(Parameter::from_symbol("m0"), Some(Parameter::MoneySupply));
        assert_eq!(Parameter::from_symbol("z"), None);
    }

    #[test]
    fn test_non_finite_rejected() {
        let p = ModelParameters::reference().with(Parameter::Taxes, f64::NAN);
        assert!(matches!(
            p.ensure_finite(),
            Err(IslmError::InvalidParameter { .. })
        ));
    }
}
