//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// The circuit is an ordered, append-only list of instructions over a fixed
/// number of qubit and classical-bit wires. Every appender validates its
/// operands first, so a failed call leaves the circuit untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Declared number of qubits.
    num_qubits: u32,
    /// Declared number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit with no wires.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Add a single qubit wire and return its id.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a single classical bit and return its id.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::cswap(control, t1, t2))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure every qubit `i` into classical bit `i`, growing the classical
    /// register if it is too small.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            self.num_clbits = self.num_qubits;
        }
        for i in 0..self.num_qubits {
            self.append(Instruction::measure(QubitId(i), ClbitId(i)))?;
        }
        Ok(self)
    }

    /// Apply a barrier to the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Validate and append an instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<()> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.as_gate().map(|g| g.name().to_string());

        match instruction.kind {
            InstructionKind::Gate(gate) => {
                if instruction.controls.len() != gate.num_controls() as usize
                    || instruction.targets.len() != gate.num_targets() as usize
                {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got: instruction.num_qubits() as u32,
                    });
                }
            }
            InstructionKind::Measure => {
                if instruction.targets.is_empty()
                    || instruction.targets.len() != instruction.clbits.len()
                    || !instruction.controls.is_empty()
                {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: "measure".into(),
                        expected: instruction.clbits.len().max(1) as u32,
                        got: instruction.num_qubits() as u32,
                    });
                }
            }
            InstructionKind::Barrier => {}
        }

        let mut seen: Vec<QubitId> = Vec::with_capacity(instruction.num_qubits());
        for qubit in instruction.qubits() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if seen.contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            seen.push(qubit);
        }

        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of instructions with the given name (`"h"`, `"cswap"`, `"measure"`, ...).
    pub fn count_gate(&self, name: &str) -> usize {
        self.instructions.iter().filter(|i| i.name() == name).count()
    }

    /// Instruction counts keyed by name.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth: the longest chain of operations sharing a wire.
    ///
    /// Barriers align the wires they touch but do not add a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_front = vec![0usize; self.num_qubits as usize];
        let mut clbit_front = vec![0usize; self.num_clbits as usize];
        let mut max_depth = 0;

        for inst in &self.instructions {
            let start = inst
                .qubits()
                .map(|q| qubit_front[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_front[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let layer = if inst.is_barrier() { start } else { start + 1 };

            for q in inst.qubits() {
                qubit_front[q.0 as usize] = layer;
            }
            for c in &inst.clbits {
                clbit_front[c.0 as usize] = layer;
            }
            max_depth = max_depth.max(layer);
        }

        max_depth
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize the circuit to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a circuit from JSON, re-validating every instruction.
    pub fn from_json(source: &str) -> IrResult<Self> {
        let raw: Circuit = serde_json::from_str(source)?;
        let mut circuit = Self::with_size(raw.name, raw.num_qubits, raw.num_clbits);
        for inst in raw.instructions {
            circuit.append(inst)?;
        }
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {} ({} qubits, {} clbits)",
            self.name, self.num_qubits, self.num_clbits
        )?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_with_size() {
        let mut circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.add_qubit(), QubitId(3));
        assert_eq!(circuit.add_clbit(), ClbitId(2));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 3, 1);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cswap(QubitId(0), QubitId(1), QubitId(2))
            .unwrap()
            .h(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();

        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.count_gate("cswap"), 1);
        assert_eq!(circuit.count_gate("h"), 2);
        assert_eq!(circuit.depth(), 4);
    }

    #[test]
    fn test_rejects_unknown_qubit_without_appending() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        let err = circuit.cswap(QubitId(0), QubitId(1), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        let err = circuit.cswap(QubitId(0), QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_rejects_unknown_clbit() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        let err = circuit.measure(QubitId(0), ClbitId(1)).unwrap_err();
        assert!(matches!(err, IrError::ClbitNotFound { .. }));
    }

    #[test]
    fn test_rejects_arity_mismatch() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        let bad = Instruction::gate(StandardGate::CSwap, [QubitId(0), QubitId(1)]);
        let err = circuit.append(bad).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.count_gate("measure"), 3);
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_depth_parallel_gates() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.h(QubitId(2)).unwrap();
        assert_eq!(circuit.depth(), 1);

        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(circuit.depth(), 2);

        circuit.barrier([QubitId(0), QubitId(1), QubitId(2)]).unwrap();
        circuit.x(QubitId(2)).unwrap();
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_count_ops() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        let ops = circuit.count_ops();
        assert_eq!(ops.get("h"), Some(&2));
        assert_eq!(ops.get("measure"), Some(&2));
    }

    #[test]
    fn test_json_roundtrip_revalidates() {
        let mut circuit = Circuit::with_size("json", 3, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.cswap(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let json = circuit.to_json().unwrap();
        let decoded = Circuit::from_json(&json).unwrap();
        assert_eq!(decoded, circuit);

        let tampered = json.replace("\"num_qubits\": 3", "\"num_qubits\": 2");
        assert!(Circuit::from_json(&tampered).is_err());
    }

    #[test]
    fn test_display() {
        let mut circuit = Circuit::with_size("show", 2, 1);
        circuit.h(QubitId(1)).unwrap();
        circuit.measure(QubitId(1), ClbitId(0)).unwrap();
        let text = circuit.to_string();
        assert!(text.starts_with("circuit show (2 qubits, 1 clbits)"));
        assert!(text.contains("  h q1\n"));
        assert!(text.contains("  measure q1 -> c0\n"));
    }
}
