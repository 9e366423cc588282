//! Backends command implementation.

use anyhow::Result;
use console::style;

use qcr_hal::Backend;

use super::common::create_backend;
use crate::config::RunConfig;

/// Execute the backends command.
pub async fn execute(config: &RunConfig) -> Result<()> {
    println!("{} Available backends:\n", style("qcr").cyan().bold());

    let backend = create_backend(config)?;
    let caps = backend.capabilities();
    let available = backend.availability().await?.is_available;

    println!(
        "  {} {} {}",
        if available {
            style("●").green()
        } else {
            style("○").red()
        },
        style(backend.name()).bold(),
        if caps.is_simulator { "(local)" } else { "" }
    );
    println!("    Qubits: {}", caps.num_qubits);
    println!("    Max shots: {}", caps.max_shots);
    println!(
        "    Gates: {}",
        caps.gate_set
            .single_qubit
            .iter()
            .chain(&caps.gate_set.two_qubit)
            .chain(&caps.gate_set.three_qubit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("    Seed: {}", backend.seed());
    if !caps.features.is_empty() {
        println!("    Features: {}", caps.features.join(", "));
    }
    println!();

    Ok(())
}
