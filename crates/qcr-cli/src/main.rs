//! qcr command-line interface
//!
//! Builds the demo circuits, runs them on a local backend and prints the
//! measurement histograms.
//!
//! ```text
//! qcr swap-test -n 4 --ancilla 0 --shots 1024 --show-circuit
//! qcr encode --message 0110 --key 1011 --format json
//! qcr backends
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::RunArgs;
use commands::{backends, encode, swap_test, version};
use config::RunConfig;

/// qcr - swap-test and bit-encoding circuits on a local simulator
#[derive(Parser)]
#[command(name = "qcr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true, env = "QCR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chained swap test on identical data states
    SwapTest {
        /// Number of data qubits
        #[arg(short = 'n', long, default_value = "4")]
        num_data_qubits: u32,

        /// Ancilla index (0 or the number of data qubits)
        #[arg(short, long, default_value = "0")]
        ancilla: u32,

        /// Print the circuit before running it
        #[arg(long)]
        show_circuit: bool,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Encode a message under a key and measure it
    Encode {
        /// Message bits, first character is qubit 0
        #[arg(short, long, default_value = "0110")]
        message: String,

        /// Key bits, same length as the message
        #[arg(short, long, default_value = "1011")]
        key: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

fn init_logging(verbose: u8, config: Option<&RunConfig>) {
    let filter = match verbose {
        0 => config.map_or("warn", |c| c.logging.level.as_str()),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RunConfig::load(cli.config.as_deref());
    init_logging(cli.verbose, config.as_ref().ok());

    let result = match config {
        Err(e) => Err(e.into()),
        Ok(config) => match cli.command {
            Commands::SwapTest {
                num_data_qubits,
                ancilla,
                show_circuit,
                run,
            } => swap_test::execute(&config, num_data_qubits, ancilla, show_circuit, &run).await,

            Commands::Encode { message, key, run } => {
                encode::execute(&config, &message, &key, &run).await
            }

            Commands::Backends => backends::execute(&config).await,

            Commands::Version => {
                version::execute();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
