//! Report output for the CLI frontend.
//!
//! Writes a [`DashboardReport`] to stdout either as a human-readable summary
//! or as JSON for an external renderer.

use std::io::{self, Write};

use crate::error::{IslmError, Result};
use crate::solver::{DashboardReport, ScenarioEvaluation};

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Equilibrium table
    #[default]
    Summary,
    /// Full report with sampled curves
    Json,
}

fn output_error(e: impl std::fmt::Display) -> IslmError {
    IslmError::OutputError {
        message: e.to_string(),
    }
}

/// Write a report in the given format.
pub fn write_report<W: Write>(out: &mut W, report: &DashboardReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).map_err(output_error)?;
            writeln!(out).map_err(output_error)
        }
        OutputFormat::Summary => write_summary(out, report).map_err(output_error),
    }
}

/// Write a report to stdout.
pub fn print_report(report: &DashboardReport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format)?;
    out.flush().map_err(output_error)
}

fn write_summary<W: Write>(out: &mut W, report: &DashboardReport) -> io::Result<()> {
    writeln!(
        out,
        "Policy shock: dG = {:+.2}, dM = {:+.2}",
        report.shock.fiscal, report.shock.monetary
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<44} {:>9} {:>9} {:>9} {:>9} {:>8} {:>8}",
        "Scenario", "Y* base", "r* base", "Y* now", "r* now", "dY/dG", "dY/dM"
    )?;

    for eval in std::iter::once(&report.is_lm).chain(&report.variants) {
        write_row(out, eval)?;
    }

    let kc = &report.keynesian_cross;
    let mm = &report.money_market;
    writeln!(out)?;
    writeln!(
        out,
        "Goods market: Y = {:.4} -> {:.4}",
        kc.equilibrium_baseline, kc.equilibrium_current
    )?;
    writeln!(
        out,
        "Money market: M/P = {:.2} -> {:.2}, r = {:.4} -> {:.4}",
        mm.supply_baseline, mm.supply_current, mm.rate_baseline, mm.rate_current
    )?;

    let crowding = report.is_lm.multipliers.crowding_out * report.shock.fiscal;
    if crowding != 0.0 {
        writeln!(out, "Investment crowded out by fiscal shock: {:.4}", -crowding)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, eval: &ScenarioEvaluation) -> io::Result<()> {
    writeln!(
        out,
        "{:<44} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>8.4} {:>8.4}",
        eval.title,
        eval.baseline.output,
        eval.baseline.rate,
        eval.current.output,
        eval.current.rate,
        eval.multipliers.fiscal_output,
        eval.multipliers.monetary_output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelParameters, PolicyShock};
    use crate::solver::{Evaluator, EvaluatorConfig};

    fn report(shock: PolicyShock) -> DashboardReport {
        let config = EvaluatorConfig::new().with_samples(5);
        Evaluator::with_config(ModelParameters::reference(), config)
            .unwrap()
            .evaluate(shock)
            .unwrap()
    }

    #[test]
    fn test_summary_lists_every_scenario() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(PolicyShock::fiscal(1.0)), OutputFormat::Summary).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Policy shock: dG = +1.00, dM = +0.00"));
        assert!(text.contains("IS-LM"));
        assert!(text.contains("LM flat (liquidity trap)"));
        assert!(text.contains("Investment crowded out"));
        assert!(text.contains("10.3333"));
    }

    #[test]
    fn test_json_report_shape() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(PolicyShock::ZERO), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["variants"].as_array().unwrap().len(), 4);
        assert_eq!(value["is_lm"]["is_current"].as_array().unwrap().len(), 5);
        assert_eq!(value["is_lm"]["parameters"]["M0"], 6.0);
        let point = &value["keynesian_cross"]["reference"][4];
        assert_eq!(point[0], 30.0);
        assert_eq!(point[1], 30.0);
    }
}
