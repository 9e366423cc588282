//! Symbolic product-state tracer.
//!
//! Each qubit carries one of four single-qubit labels. Gates permute labels
//! where the result is again a product state and are rejected otherwise, so
//! no amplitudes are ever stored.

use std::fmt;

use rand::Rng;

use qcr_hal::{HalError, HalResult};
use qcr_ir::{Instruction, InstructionKind, StandardGate};

/// Single-qubit state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Label {
    Zero,
    One,
    Plus,
    Minus,
}

impl Label {
    fn h(self) -> Self {
        match self {
            Label::Zero => Label::Plus,
            Label::Plus => Label::Zero,
            Label::One => Label::Minus,
            Label::Minus => Label::One,
        }
    }

    fn x(self) -> Self {
        match self {
            Label::Zero => Label::One,
            Label::One => Label::Zero,
            other => other,
        }
    }

    fn z(self) -> Self {
        match self {
            Label::Plus => Label::Minus,
            Label::Minus => Label::Plus,
            other => other,
        }
    }

    /// Computational-basis value, if the label has one.
    fn bit(self) -> Option<bool> {
        match self {
            Label::Zero => Some(false),
            Label::One => Some(true),
            Label::Plus | Label::Minus => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Zero => write!(f, "|0>"),
            Label::One => write!(f, "|1>"),
            Label::Plus => write!(f, "|+>"),
            Label::Minus => write!(f, "|->"),
        }
    }
}

/// Register state during one shot.
pub(crate) struct SymbolicState {
    labels: Vec<Label>,
    clbits: Vec<bool>,
}

impl SymbolicState {
    /// All qubits in `|0>`, all classical bits cleared.
    pub(crate) fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            labels: vec![Label::Zero; num_qubits],
            clbits: vec![false; num_clbits],
        }
    }

    /// Apply one instruction. Measurements draw from `rng`.
    pub(crate) fn apply<R: Rng>(&mut self, inst: &Instruction, rng: &mut R) -> HalResult<()> {
        match inst.kind {
            InstructionKind::Barrier => Ok(()),
            InstructionKind::Measure => {
                for (q, c) in inst.targets.iter().zip(&inst.clbits) {
                    let q = q.0 as usize;
                    let bit = match self.labels[q].bit() {
                        Some(bit) => bit,
                        None => rng.gen_bool(0.5),
                    };
                    self.labels[q] = if bit { Label::One } else { Label::Zero };
                    self.clbits[c.0 as usize] = bit;
                }
                Ok(())
            }
            InstructionKind::Gate(gate) => self.apply_gate(gate, inst),
        }
    }

    fn apply_gate(&mut self, gate: StandardGate, inst: &Instruction) -> HalResult<()> {
        let t: Vec<usize> = inst.targets.iter().map(|q| q.0 as usize).collect();
        let c: Vec<usize> = inst.controls.iter().map(|q| q.0 as usize).collect();

        match gate {
            StandardGate::H => self.labels[t[0]] = self.labels[t[0]].h(),
            StandardGate::X => self.labels[t[0]] = self.labels[t[0]].x(),
            StandardGate::Z => self.labels[t[0]] = self.labels[t[0]].z(),
            StandardGate::Swap => self.labels.swap(t[0], t[1]),
            StandardGate::CX => {
                let (control, target) = (self.labels[c[0]], self.labels[t[0]]);
                match (control.bit(), target) {
                    (Some(true), _) => self.labels[t[0]] = target.x(),
                    (Some(false), _) | (None, Label::Plus) => {}
                    // Phase kickback: X has eigenvalue -1 on |->.
                    (None, Label::Minus) => self.labels[c[0]] = control.z(),
                    (None, _) => return Err(entangling(inst, control, &[target])),
                }
            }
            StandardGate::CSwap => {
                let control = self.labels[c[0]];
                let (a, b) = (self.labels[t[0]], self.labels[t[1]]);
                match control.bit() {
                    Some(true) => self.labels.swap(t[0], t[1]),
                    Some(false) => {}
                    None if a == b => {}
                    None => return Err(entangling(inst, control, &[a, b])),
                }
            }
        }
        Ok(())
    }

    /// Classical register as a bitstring, highest clbit first.
    pub(crate) fn bitstring(&self) -> String {
        self.clbits
            .iter()
            .rev()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn label(&self, qubit: usize) -> Label {
        self.labels[qubit]
    }
}

fn entangling(inst: &Instruction, control: Label, targets: &[Label]) -> HalError {
    let targets: Vec<String> = targets.iter().map(ToString::to_string).collect();
    HalError::Unsupported(format!(
        "'{inst}' with control {control} and targets {} leaves an entangled state",
        targets.join(", ")
    ))
}
