//! Gate kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard gates understood by every qcr backend.
///
/// Controlled gates list their control qubits first: `CX` takes one control
/// and one target, `CSwap` one control and two targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate.
    CX,
    /// SWAP gate.
    Swap,
    /// Fredkin gate (controlled SWAP).
    CSwap,
}

impl StandardGate {
    /// OpenQASM name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::CX => "cx",
            StandardGate::Swap => "swap",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Total number of qubits (controls and targets) the gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X | StandardGate::Z => 1,
            StandardGate::CX | StandardGate::Swap => 2,
            StandardGate::CSwap => 3,
        }
    }

    /// Number of leading operands that act as controls.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CSwap => 1,
            _ => 0,
        }
    }

    /// Number of operands the gate acts on as targets.
    #[inline]
    pub fn num_targets(&self) -> u32 {
        self.num_qubits() - self.num_controls()
    }

    /// Look a gate up by its OpenQASM name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "h" => Some(StandardGate::H),
            "x" => Some(StandardGate::X),
            "z" => Some(StandardGate::Z),
            "cx" => Some(StandardGate::CX),
            "swap" => Some(StandardGate::Swap),
            "cswap" => Some(StandardGate::CSwap),
            _ => None,
        }
    }

    /// All standard gates, in declaration order.
    pub fn all() -> [StandardGate; 6] {
        [
            StandardGate::H,
            StandardGate::X,
            StandardGate::Z,
            StandardGate::CX,
            StandardGate::Swap,
            StandardGate::CSwap,
        ]
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CSwap.num_qubits(), 3);
        assert_eq!(StandardGate::CSwap.num_controls(), 1);
        assert_eq!(StandardGate::CSwap.num_targets(), 2);
        assert_eq!(StandardGate::Swap.num_controls(), 0);
    }

    #[test]
    fn test_gate_name_roundtrip() {
        for gate in StandardGate::all() {
            assert_eq!(StandardGate::from_name(gate.name()), Some(gate));
        }
        assert_eq!(StandardGate::from_name("rx"), None);
    }
}
