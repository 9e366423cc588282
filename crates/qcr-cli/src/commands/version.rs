//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - swap-test and bit-encoding circuits",
        style("qcr").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcr-ir           Circuit description");
    println!("  qcr-protocols    Swap-test and bit-encoding builders");
    println!("  qcr-hal          Backend abstraction");
    println!("  qcr-adapter-sim  Seeded symbolic stub simulator");
    println!("  qcr-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
