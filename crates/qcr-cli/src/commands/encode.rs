//! Encode command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;
use tracing::info;

use qcr_hal::{Backend, Counts};
use qcr_protocols::BitEncodingBuilder;

use super::common::{OutputFormat, RunArgs, create_backend, print_json, print_results};
use crate::config::RunConfig;

#[derive(Serialize)]
struct Report<'a> {
    message: &'a [u8],
    key: &'a [u8],
    predicted: String,
    shots: u32,
    seed: Option<u64>,
    counts: &'a Counts,
}

/// Execute the encode command.
pub async fn execute(config: &RunConfig, message: &str, key: &str, args: &RunArgs) -> Result<()> {
    let config = args.resolve(config)?;
    let builder = BitEncodingBuilder::from_strs(message, key)?;

    let circuit = builder.build()?;
    info!(
        "Built bit encoding: {} qubits, {} instructions",
        circuit.num_qubits(),
        circuit.len()
    );

    let backend = create_backend(&config)?;
    let result = backend.run(&circuit, config.shots).await?;

    match args.format {
        OutputFormat::Json => print_json(&Report {
            message: builder.message(),
            key: builder.key(),
            predicted: builder.predicted_bits(),
            shots: result.shots,
            seed: config.seed,
            counts: &result.counts,
        })?,
        OutputFormat::Table => {
            print_results("Bit Encoding Measurement Results", &result);
            println!();
            println!(
                "  Expected pattern: {} ({} marks a key-masked bit)",
                style(builder.predicted_bits()).cyan(),
                style("?").dim()
            );
        }
    }

    Ok(())
}
