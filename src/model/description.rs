//! Model descriptions built from the DSL.

use std::collections::HashSet;

use super::params::{ModelParameters, Parameter, ParameterOverrides};
use super::shock::{PolicyShock, ShockBounds};
use crate::dsl::{Assignment, ModelAst};
use crate::error::{IslmError, Result};
use crate::solver::{Evaluator, EvaluatorConfig, Scenario};

/// A complete model ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescription {
    /// Calibrated structural parameters
    pub params: ModelParameters,
    /// Initial policy shock
    pub shock: PolicyShock,
    /// Slider bounds
    pub bounds: ShockBounds,
    /// Structural variants shown next to the base chart
    pub scenarios: Vec<Scenario>,
}

impl Default for ModelDescription {
    fn default() -> Self {
        Self {
            params: ModelParameters::reference(),
            shock: PolicyShock::ZERO,
            bounds: ShockBounds::default(),
            scenarios: Scenario::standard_variants(),
        }
    }
}

impl ModelDescription {
    /// Build a model description from a parsed AST.
    pub fn from_ast(ast: ModelAst) -> Result<Self> {
        let mut description = Self::default();

        // Parameters start from the reference calibration
        let mut seen = HashSet::new();
        for assignment in &ast.params {
            let param = lookup_parameter(assignment)?;
            if !seen.insert(param) {
                return Err(IslmError::parse(
                    assignment.line,
                    format!("parameter '{}' set twice", param),
                ));
            }
            description.params = description.params.with(param, assignment.value);
        }

        let mut instruments = HashSet::new();
        for assignment in &ast.shocks {
            let instrument = match assignment.name.to_lowercase().as_str() {
                "dg" | "fiscal" => "dG",
                "dm" | "monetary" => "dM",
                other => {
                    return Err(IslmError::parse(
                        assignment.line,
                        format!("unknown policy instrument '{}' (use dG or dM)", other),
                    ));
                }
            };
            if !instruments.insert(instrument) {
                return Err(IslmError::parse(
                    assignment.line,
                    format!("shock '{}' set twice", instrument),
                ));
            }
            if instrument == "dG" {
                description.shock.fiscal = assignment.value;
            } else {
                description.shock.monetary = assignment.value;
            }
        }

        if let Some(bounds) = ast.bounds {
            description.bounds = ShockBounds::new(bounds.min, bounds.max, bounds.step)?;
        }

        if !ast.scenarios.is_empty() {
            let mut names = HashSet::new();
            let mut scenarios = Vec::with_capacity(ast.scenarios.len());
            for def in &ast.scenarios {
                if !names.insert(def.name.clone()) {
                    return Err(IslmError::DuplicateScenario {
                        name: def.name.clone(),
                    });
                }
                let mut overrides = ParameterOverrides::new();
                for assignment in &def.overrides {
                    let param = lookup_parameter(assignment)?;
                    if overrides.insert(param, assignment.value).is_some() {
                        return Err(IslmError::parse(
                            assignment.line,
                            format!("parameter '{}' overridden twice in scenario '{}'", param, def.name),
                        ));
                    }
                }
                scenarios.push(Scenario::variant(def.name.clone(), def.name.clone(), overrides));
            }
            description.scenarios = scenarios;
        }

        Ok(description)
    }

    /// Create an evaluator for this model.
    ///
    /// The description's shock bounds replace those in `config`.
    pub fn evaluator(&self, config: EvaluatorConfig) -> Result<Evaluator> {
        let config = config.with_shock_bounds(self.bounds);
        Evaluator::with_scenarios(self.params, config, self.scenarios.clone())
    }
}

fn lookup_parameter(assignment: &Assignment) -> Result<Parameter> {
    Parameter::from_symbol(&assignment.name).ok_or_else(|| IslmError::UnknownParameter {
        name: assignment.name.clone(),
        line: assignment.line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;

    #[test]
    fn test_empty_description_is_reference() {
        let description = ModelDescription::from_ast(dsl::parse("").unwrap()).unwrap();
        assert_eq!(description, ModelDescription::default());
        assert_eq!(description.scenarios.len(), 4);
    }

    #[test]
    fn test_full_description() {
        let input = "\
# calibration
.param b 2
.param H 0.9
.shock dG 1.5
.shock monetary -0.5
.bounds -4 4 0.5
.scenario trap (h=50)
.scenario inelastic (b=0.05 h=0.05)
";
        let description = ModelDescription::from_ast(dsl::parse(input).unwrap()).unwrap();

        assert_eq!(description.params.b, 2.0);
        assert_eq!(description.params.h, 0.9);
        assert_eq!(description.params.a, 2.0);
        assert_eq!(description.shock, PolicyShock::new(1.5, -0.5));
        assert_eq!(description.bounds.step, 0.5);
        assert_eq!(description.scenarios.len(), 2);
        assert_eq!(description.scenarios[1].overrides.len(), 2);
    }

    #[test]
    fn test_unknown_parameter() {
        let ast = dsl::parse(".param a 1\n.param z 3").unwrap();
        assert!(matches!(
            ModelDescription::from_ast(ast),
            Err(IslmError::UnknownParameter { line: 2, .. })
        ));

        let ast = dsl::parse(".scenario s (q=1)").unwrap();
        assert!(matches!(
            ModelDescription::from_ast(ast),
            Err(IslmError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        let ast = dsl::parse(".scenario s (b=1)\n.scenario s (h=2)").unwrap();
        assert!(matches!(
            ModelDescription::from_ast(ast),
            Err(IslmError::DuplicateScenario { .. })
        ));

        let ast = dsl::parse(".param b 1\n.param B 2").unwrap();
        assert!(matches!(
            ModelDescription::from_ast(ast),
            Err(IslmError::ParseError { line: 2, .. })
        ));

        let ast = dsl::parse(".shock dG 1\n.shock fiscal 2").unwrap();
        assert!(matches!(
            ModelDescription::from_ast(ast),
            Err(IslmError::ParseError { line: 2, .. })
        ));

        let ast = dsl::parse(".scenario s (b=1 B=2)").unwrap();
        assert!(matches!(
            ModelDescription::from_ast(ast),
            Err(IslmError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_evaluator_uses_description() {
        let input = ".bounds -1 1 0.25\n.scenario trap (h=50)";
        let description = ModelDescription::from_ast(dsl::parse(input).unwrap()).unwrap();
        let mut evaluator = description
            .evaluator(EvaluatorConfig::new().with_samples(20))
            .unwrap();

        assert!(evaluator.evaluate(PolicyShock::fiscal(2.0)).is_err());
        let report = evaluator.evaluate(PolicyShock::fiscal(1.0)).unwrap();
        assert_eq!(report.variants.len(), 1);
        assert_eq!(report.variants[0].name, "trap");
    }
}
