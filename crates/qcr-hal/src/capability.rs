//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

use qcr_ir::StandardGate;

/// What a backend can execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM naming convention).
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or hardware (`false`).
    pub is_simulator: bool,
    /// Free-form capability flags, e.g. `"deterministic"`, `"symbolic"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local simulator supporting every standard gate.
    pub fn simulator(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec![],
        }
    }

    /// Add a capability flag.
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Whether a capability flag is set.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gate names a backend accepts, grouped by arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Three-qubit gates supported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub three_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate in [`StandardGate`].
    pub fn universal() -> Self {
        let mut set = Self {
            single_qubit: vec![],
            two_qubit: vec![],
            three_qubit: vec![],
        };
        for gate in StandardGate::all() {
            let name = gate.name().to_string();
            match gate.num_qubits() {
                1 => set.single_qubit.push(name),
                2 => set.two_qubit.push(name),
                _ => set.three_qubit.push(name),
            }
        }
        set
    }

    /// Check whether a gate name is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
            || self.two_qubit.iter().any(|g| g == gate)
            || self.three_qubit.iter().any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_gate_set() {
        let set = GateSet::universal();
        assert!(set.contains("h"));
        assert!(set.contains("cx"));
        assert!(set.contains("cswap"));
        assert!(!set.contains("rx"));
        assert_eq!(set.three_qubit, vec!["cswap".to_string()]);
    }

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator("stub", 24).with_feature("deterministic");
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 24);
        assert!(caps.has_feature("deterministic"));
        assert!(!caps.has_feature("statevector"));
    }
}
