//! islm - IS-LM comparative statics
//!
//! Solves the linear IS-LM model for a fiscal and monetary policy shock and
//! prints the equilibria of the base model and its structural variants.
//!
//! # Usage
//!
//! ```bash
//! islm --fiscal 2.5 --monetary -1
//! islm model.islm --format json > report.json
//! RUST_LOG=islm_core=debug islm --fiscal 1
//! ```

use std::path::PathBuf;

use clap::Parser;
use islm_core::{
    dsl,
    error::Result,
    model::{ModelDescription, PolicyShock, ShockPolicy},
    output::{print_report, OutputFormat},
    solver::EvaluatorConfig,
};
use tracing_subscriber::EnvFilter;

/// IS-LM comparative statics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a model description file (.islm); the reference model if omitted
    #[arg(value_name = "MODEL_FILE")]
    model_file: Option<PathBuf>,

    /// Fiscal shock dG (overrides the model file)
    #[arg(short, long, allow_negative_numbers = true)]
    fiscal: Option<f64>,

    /// Monetary shock dM (overrides the model file)
    #[arg(short, long, allow_negative_numbers = true)]
    monetary: Option<f64>,

    /// Samples per curve
    #[arg(short, long)]
    samples: Option<usize>,

    /// Clamp out-of-range shocks to the slider bounds instead of failing
    #[arg(long)]
    clamp: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load the model
    let description = match &args.model_file {
        Some(path) => ModelDescription::from_ast(dsl::parse_file(path)?)?,
        None => ModelDescription::default(),
    };
    tracing::info!(params = ?description.params, "model loaded");

    // Configure the evaluator
    let mut config = EvaluatorConfig::new();
    if let Some(samples) = args.samples {
        config = config.with_samples(samples);
    }
    if args.clamp {
        config = config.with_shock_policy(ShockPolicy::Clamp);
    }
    let mut evaluator = description.evaluator(config)?;

    // Evaluate and print
    let shock = PolicyShock::new(
        args.fiscal.unwrap_or(description.shock.fiscal),
        args.monetary.unwrap_or(description.shock.monetary),
    );
    let report = evaluator.evaluate(shock)?;
    print_report(&report, args.format)?;

    Ok(())
}
