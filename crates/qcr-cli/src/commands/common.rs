//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;

use qcr_adapter_sim::StubSimulator;
use qcr_hal::{BackendFactory, ExecutionResult};
use qcr_ir::Circuit;

use crate::config::RunConfig;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Histogram table
    #[default]
    Table,
    /// A single JSON document
    Json,
}

/// Options shared by commands that run a circuit.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Number of shots [default: 1024, or from config]
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Sampling seed for the simulator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl RunArgs {
    /// Apply these flags on top of `config` and re-validate.
    pub fn resolve(&self, config: &RunConfig) -> Result<RunConfig> {
        let config = config.clone().with_overrides(self.shots, self.seed);
        config.validate()?;
        Ok(config)
    }
}

/// Construct the backend selected by `config`.
pub fn create_backend(config: &RunConfig) -> Result<StubSimulator> {
    StubSimulator::from_config(config.backend_config())
        .with_context(|| format!("Failed to create backend '{}'", config.backend))
}

/// Print a circuit listing.
pub fn print_circuit(circuit: &Circuit) {
    println!(
        "{} {} (depth {})",
        style("Circuit:").bold(),
        style(circuit.name()).cyan(),
        circuit.depth()
    );
    for line in circuit.to_string().lines().skip(1) {
        println!("  {}", style(line).dim());
    }
    println!();
}

/// Print execution results in a table format.
pub fn print_results(title: &str, result: &ExecutionResult) {
    println!(
        "\n{} {} ({} shots):",
        style("✓").green().bold(),
        title,
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
