//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement of `targets[i]` into `clbits[i]`.
    Measure,
    /// Barrier (visual/synchronization marker, no effect on state).
    Barrier,
}

/// A complete instruction with operands.
///
/// Controls and targets are kept apart so a consumer never has to know the
/// operand convention of a gate to find its control wires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Control qubits, empty for uncontrolled operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<QubitId>,
    /// Target qubits.
    pub targets: Vec<QubitId>,
    /// Classical bits written by this instruction (measure only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction from its operands, controls first.
    ///
    /// Operands beyond the gate's control count become targets; arity is
    /// checked when the instruction is appended to a circuit.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let mut targets: Vec<QubitId> = qubits.into_iter().collect();
        let split = (gate.num_controls() as usize).min(targets.len());
        let controls = targets.drain(..split).collect();
        Self {
            kind: InstructionKind::Gate(gate),
            controls,
            targets,
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a controlled-SWAP instruction.
    pub fn cswap(control: QubitId, t1: QubitId, t2: QubitId) -> Self {
        Self::gate(StandardGate::CSwap, [control, t1, t2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            controls: vec![],
            targets: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            controls: vec![],
            targets: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// All qubits touched by the instruction, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Number of qubits touched by the instruction.
    pub fn num_qubits(&self) -> usize {
        self.controls.len() + self.targets.len()
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<StandardGate> {
        match self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        match self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for (i, q) in self.qubits().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{q}")?;
        }
        if !self.clbits.is_empty() {
            let clbits: Vec<String> = self.clbits.iter().map(ToString::to_string).collect();
            write!(f, " -> {}", clbits.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert!(inst.controls.is_empty());
        assert_eq!(inst.targets, vec![QubitId(0)]);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_cswap_splits_control() {
        let inst = Instruction::cswap(QubitId(0), QubitId(1), QubitId(2));
        assert_eq!(inst.controls, vec![QubitId(0)]);
        assert_eq!(inst.targets, vec![QubitId(1), QubitId(2)]);
        assert_eq!(inst.num_qubits(), 3);
        assert_eq!(
            inst.qubits().collect::<Vec<_>>(),
            vec![QubitId(0), QubitId(1), QubitId(2)]
        );
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(0), ClbitId(0));
        assert!(inst.is_measure());
        assert_eq!(inst.targets.len(), 1);
        assert_eq!(inst.clbits.len(), 1);
        assert_eq!(inst.as_gate(), None);
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(inst.is_barrier());
        assert_eq!(inst.targets.len(), 3);
    }

    #[test]
    fn test_instruction_display() {
        let cswap = Instruction::cswap(QubitId(0), QubitId(3), QubitId(4));
        assert_eq!(cswap.to_string(), "cswap q0, q3, q4");

        let measure = Instruction::measure(QubitId(0), ClbitId(0));
        assert_eq!(measure.to_string(), "measure q0 -> c0");
    }
}
