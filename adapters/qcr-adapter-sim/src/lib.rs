//! qcr stub simulator
//!
//! A local backend that runs circuits without storing amplitudes. Every qubit
//! is tracked as one of the labels `|0>`, `|1>`, `|+>`, `|->`, which is
//! enough for the swap test on identical states and for the bit encoding:
//!
//! | Gate | Effect on labels |
//! |------|------------------|
//! | `H` | `|0> <-> |+>`, `|1> <-> |->` |
//! | `X` | `|0> <-> |1>` |
//! | `Z` | `|+> <-> |->` |
//! | `SWAP` | exchanges the two labels |
//! | `CX`, `CSWAP` | classical when the control is `|0>`/`|1>`; otherwise only the cases that stay a product state |
//!
//! Measuring `|+>` or `|->` draws a fair bit from a seeded `StdRng`, so a
//! given seed always reproduces the same counts.
//!
//! # Example
//!
//! ```ignore
//! use qcr_adapter_sim::StubSimulator;
//! use qcr_hal::Backend;
//! use qcr_protocols::swap_test;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = StubSimulator::new();
//!     let circuit = swap_test(4, 0)?;
//!     let result = backend.run(&circuit, 1024).await?;
//!
//!     // Identical states: the ancilla always reads 0.
//!     assert_eq!(result.counts.get("0"), 1024);
//!     Ok(())
//! }
//! ```

mod simulator;
mod tracer;

pub use simulator::{DEFAULT_MAX_QUBITS, DEFAULT_SEED, StubSimulator};
