//! CLI argument parsing and end-to-end tests.
//!
//! Parsing is checked against a mirror of the CLI definition (main.rs is a
//! binary); the end-to-end tests run the built `qcr` executable.

// ============================================================================
// clap parsing
// ============================================================================

mod clap_parsing {
    use clap::{Args, Parser, Subcommand, ValueEnum};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qcr")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(long, global = true)]
        config: Option<std::path::PathBuf>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
    enum TestFormat {
        Table,
        Json,
    }

    #[derive(Args)]
    struct TestRunArgs {
        #[arg(short, long)]
        shots: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_enum, default_value_t = TestFormat::Table)]
        format: TestFormat,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        SwapTest {
            #[arg(short = 'n', long, default_value = "4")]
            num_data_qubits: u32,
            #[arg(short, long, default_value = "0")]
            ancilla: u32,
            #[arg(long)]
            show_circuit: bool,
            #[command(flatten)]
            run: TestRunArgs,
        },
        Encode {
            #[arg(short, long, default_value = "0110")]
            message: String,
            #[arg(short, long, default_value = "1011")]
            key: String,
            #[command(flatten)]
            run: TestRunArgs,
        },
        Backends,
        Version,
    }

    #[test]
    fn test_parse_swap_test_defaults() {
        let cli = TestCli::try_parse_from(["qcr", "swap-test"]).unwrap();
        match cli.command {
            TestCommands::SwapTest {
                num_data_qubits,
                ancilla,
                show_circuit,
                run,
            } => {
                assert_eq!(num_data_qubits, 4);
                assert_eq!(ancilla, 0);
                assert!(!show_circuit);
                assert_eq!(run.shots, None);
                assert_eq!(run.seed, None);
                assert_eq!(run.format, TestFormat::Table);
            }
            _ => panic!("Expected SwapTest command"),
        }
    }

    #[test]
    fn test_parse_swap_test_all_args() {
        let cli = TestCli::try_parse_from([
            "qcr",
            "swap-test",
            "-n",
            "6",
            "--ancilla",
            "6",
            "-s",
            "100",
            "--seed",
            "9",
            "--show-circuit",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::SwapTest {
                num_data_qubits,
                ancilla,
                show_circuit,
                run,
            } => {
                assert_eq!(num_data_qubits, 6);
                assert_eq!(ancilla, 6);
                assert!(show_circuit);
                assert_eq!(run.shots, Some(100));
                assert_eq!(run.seed, Some(9));
                assert_eq!(run.format, TestFormat::Json);
            }
            _ => panic!("Expected SwapTest command"),
        }
    }

    #[test]
    fn test_parse_encode_defaults() {
        let cli = TestCli::try_parse_from(["qcr", "encode"]).unwrap();
        match cli.command {
            TestCommands::Encode { message, key, .. } => {
                assert_eq!(message, "0110");
                assert_eq!(key, "1011");
            }
            _ => panic!("Expected Encode command"),
        }
    }

    #[test]
    fn test_parse_bad_format() {
        assert!(TestCli::try_parse_from(["qcr", "encode", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_parse_negative_qubits() {
        assert!(TestCli::try_parse_from(["qcr", "swap-test", "-n", "-1"]).is_err());
    }

    #[test]
    fn test_parse_backends_and_version() {
        let cli = TestCli::try_parse_from(["qcr", "backends"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Backends));
        let cli = TestCli::try_parse_from(["qcr", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli =
            TestCli::try_parse_from(["qcr", "-vv", "backends", "--config", "qcr.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("qcr.yaml")));
    }

    #[test]
    fn test_no_subcommand() {
        assert!(TestCli::try_parse_from(["qcr"]).is_err());
    }
}

// ============================================================================
// end-to-end
// ============================================================================

mod end_to_end {
    use std::io::Write;
    use std::process::{Command, Output};

    fn qcr(args: &[&str]) -> Output {
        let dir = tempfile::tempdir().unwrap();
        Command::new(env!("CARGO_BIN_EXE_qcr"))
            .args(args)
            .current_dir(dir.path())
            .env_remove("QCR_BACKEND")
            .env_remove("QCR_SHOTS")
            .env_remove("QCR_SEED")
            .env_remove("QCR_MAX_QUBITS")
            .env_remove("QCR_LOG_LEVEL")
            .env_remove("QCR_CONFIG")
            .output()
            .unwrap()
    }

    fn json(output: &Output) -> serde_json::Value {
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    #[test]
    fn swap_test_reads_zero_every_shot() {
        let out = qcr(&["swap-test", "--format", "json"]);
        let report = json(&out);
        assert_eq!(report["shots"], 1024);
        assert_eq!(report["counts"]["0"], 1024);
        assert_eq!(report["p0"], 1.0);
        assert_eq!(report["overlap"], 1.0);
    }

    #[test]
    fn swap_test_table_output() {
        let out = qcr(&["swap-test", "-n", "3", "--show-circuit", "-s", "64"]);
        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("Swap Test Measurement Results"));
        assert!(stdout.contains("cswap q0, q2, q3"));
        assert!(stdout.contains("Overlap"));
    }

    #[test]
    fn swap_test_invalid_ancilla_fails() {
        let out = qcr(&["swap-test", "-n", "3", "--ancilla", "1"]);
        assert!(!out.status.success());
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Invalid argument"));
    }

    #[test]
    fn encode_is_reproducible_with_seed() {
        let args = ["encode", "--seed", "5", "-s", "200", "--format", "json"];
        let first = json(&qcr(&args));
        let second = json(&qcr(&args));
        assert_eq!(first["counts"], second["counts"]);
        assert_eq!(first["predicted"], "??1?");

        let total: u64 = first["counts"]
            .as_object()
            .unwrap()
            .values()
            .map(|v| v.as_u64().unwrap())
            .sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn encode_rejects_mismatched_key() {
        let out = qcr(&["encode", "--message", "01", "--key", "1"]);
        assert!(!out.status.success());
    }

    #[test]
    fn zero_shots_rejected() {
        let out = qcr(&["swap-test", "-s", "0"]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("shots"));
    }

    #[test]
    fn config_file_sets_shots() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shots: 32\nseed: 1").unwrap();
        let path = file.path().to_str().unwrap();

        let report = json(&qcr(&["--config", path, "swap-test", "--format", "json"]));
        assert_eq!(report["shots"], 32);
        assert_eq!(report["seed"], 1);
    }

    #[test]
    fn backends_lists_stub() {
        let out = qcr(&["backends"]);
        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("stub"));
        assert!(stdout.contains("cswap"));
    }
}
