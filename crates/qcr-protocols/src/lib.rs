//! qcr protocol circuits
//!
//! Pure, deterministic builders for the two demo circuits:
//!
//! - [`SwapTestBuilder`]: a chained swap test over `n` data qubits sharing
//!   one ancilla, read back with [`SwapTestOutcome`]
//! - [`BitEncodingBuilder`]: a message written onto qubits and masked by a
//!   key with Hadamards
//!
//! Builders only describe circuits. Running them is the job of a
//! [`qcr_hal::Backend`].
//!
//! # Example
//!
//! ```rust
//! use qcr_protocols::SwapTestBuilder;
//!
//! let circuit = SwapTestBuilder::new(4).build()?;
//! assert_eq!(circuit.len(), 10);
//! assert_eq!(circuit.count_gate("cswap"), 3);
//! # Ok::<(), qcr_protocols::ProtocolError>(())
//! ```

pub mod encoding;
pub mod error;

pub use encoding::{BitEncodingBuilder, DEMO_KEY, DEMO_MESSAGE, bit_encoding, parse_bits};
pub use error::{ProtocolError, ProtocolResult};
pub use swap_test::{SwapTestBuilder, SwapTestConfig, SwapTestOutcome, data_qubits, swap_test};
