//! qcr circuit description
//!
//! This crate provides the symbolic data structures used to describe small
//! quantum circuits: wire identifiers, gate kinds, instructions and the
//! append-only [`Circuit`]. It performs no simulation; a circuit is a plain
//! value that is handed to a backend from `qcr-hal`.
//!
//! # Example: a two-state swap test
//!
//! ```rust
//! use qcr_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("swap_test", 3, 1);
//! circuit
//!     .h(QubitId(0))?
//!     .cswap(QubitId(0), QubitId(1), QubitId(2))?
//!     .h(QubitId(0))?
//!     .measure(QubitId(0), ClbitId(0))?;
//!
//! assert_eq!(circuit.len(), 4);
//! assert_eq!(circuit.count_gate("cswap"), 1);
//! # Ok::<(), qcr_ir::IrError>(())
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `CX` | 2 | Controlled-NOT |
//! | `Swap` | 2 | SWAP gate |
//! | `CSwap` | 3 | Fredkin (controlled SWAP) gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
