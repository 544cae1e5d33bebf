//! Policy shocks and slider bounds.

use serde::Serialize;

use crate::error::{IslmError, Result};

/// Fiscal and monetary perturbations applied to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PolicyShock {
    /// Change in government spending, added to `G0`
    pub fiscal: f64,
    /// Change in real money supply, added to `M0`
    pub monetary: f64,
}

impl PolicyShock {
    /// No policy change.
    pub const ZERO: PolicyShock = PolicyShock {
        fiscal: 0.0,
        monetary: 0.0,
    };

    pub fn new(fiscal: f64, monetary: f64) -> Self {
        Self { fiscal, monetary }
    }

    /// A pure fiscal shock.
    pub fn fiscal(delta_g: f64) -> Self {
        Self::new(delta_g, 0.0)
    }

    /// A pure monetary shock.
    pub fn monetary(delta_m: f64) -> Self {
        Self::new(0.0, delta_m)
    }

    pub fn is_zero(&self) -> bool {
        self.fiscal == 0.0 && self.monetary == 0.0
    }
}

/// What to do with a shock outside the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShockPolicy {
    /// Fail with [`IslmError::ShockOutOfBounds`]
    #[default]
    Reject,
    /// Clamp into range and snap to the step grid
    Clamp,
}

/// Range and granularity of a policy slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShockBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ShockBounds {
    fn default() -> Self {
        Self {
            min: crate::DEFAULT_SHOCK_MIN,
            max: crate::DEFAULT_SHOCK_MAX,
            step: crate::DEFAULT_SHOCK_STEP,
        }
    }
}

impl ShockBounds {
    /// Create slider bounds, rejecting inverted ranges and non-positive steps.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(IslmError::InvalidParameter {
                param: "bounds".to_string(),
                message: format!("invalid shock range [{}, {}]", min, max),
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(IslmError::InvalidParameter {
                param: "bounds".to_string(),
                message: format!("shock step must be positive, got {}", step),
            });
        }
        Ok(Self { min, max, step })
    }

    /// Check whether a single value lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp into range, then snap to the nearest grid point `min + n·step`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0_f64.clamp(self.min, self.max);
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Apply the policy to both instruments of a shock.
    pub fn enforce(&self, shock: PolicyShock, policy: ShockPolicy) -> Result<PolicyShock> {
        match policy {
            ShockPolicy::Clamp => Ok(PolicyShock::new(
                self.clamp(shock.fiscal),
                self.clamp(shock.monetary),
            )),
            ShockPolicy::Reject => {
                self.check("fiscal", shock.fiscal)?;
                self.check("monetary", shock.monetary)?;
                Ok(shock)
            }
        }
    }

    fn check(&self, instrument: &'static str, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(IslmError::ShockOutOfBounds {
                instrument,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_out_of_range() {
        let bounds = ShockBounds::default();
        assert!(bounds.enforce(PolicyShock::new(9.0, -9.0), ShockPolicy::Reject).is_ok());

        let err = bounds
            .enforce(PolicyShock::monetary(9.5), ShockPolicy::Reject)
            .unwrap_err();
        assert!(matches!(
            err,
            IslmError::ShockOutOfBounds { instrument: "monetary", .. }
        ));
    }

    #[test]
    fn test_clamp_snaps_to_grid() {
        let bounds = ShockBounds::default();
        let shock = bounds
            .enforce(PolicyShock::new(12.0, 1.1), ShockPolicy::Clamp)
            .unwrap();
        assert_eq!(shock.fiscal, 9.0);
        assert_eq!(shock.monetary, 1.0);
        assert_eq!(bounds.clamp(-3.13), -3.25);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(ShockBounds::new(1.0, -1.0, 0.25).is_err());
        assert!(ShockBounds::new(-1.0, 1.0, 0.0).is_err());
        assert!(ShockBounds::new(-1.0, 1.0, 0.5).is_ok());
    }
}
