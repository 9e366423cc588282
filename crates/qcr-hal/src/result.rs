//! Measurement results.
//!
//! Bitstrings follow the usual big-endian convention: the leftmost character
//! is the highest classical bit, so for three clbits `"001"` means `c0 = 1`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Frequency table of observed bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Number of times `bitstring` was observed (0 if never).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate outcomes in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// Outcomes sorted by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequently observed outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequency of every outcome.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }

    /// Marginal counts of a single classical bit, keyed `"0"` / `"1"`.
    ///
    /// `clbit` indexes from the right of the bitstring.
    pub fn marginal(&self, clbit: usize) -> Counts {
        let mut out = Counts::new();
        for (bitstring, &count) in &self.0 {
            let bit = bitstring
                .len()
                .checked_sub(clbit + 1)
                .and_then(|pos| bitstring.as_bytes().get(pos))
                .copied();
            if let Some(bit) = bit {
                out.insert((bit as char).to_string(), count);
            }
        }
        out
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{k}': {v}")?;
        }
        write!(f, "}}")
    }
}

/// Result of executing a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Observed outcome frequencies. Always sums to `shots`.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Backend-specific metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ExecutionResult {
    /// Create a new result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Set the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Attach a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Relative frequency of a bitstring.
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.counts.get(bitstring) as f64 / f64::from(self.shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("0", 1);
        counts.insert("0", 1);
        counts.insert("1", 3);
        assert_eq!(counts.get("0"), 2);
        assert_eq!(counts.get("1"), 3);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 5);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_counts_sorted_and_most_frequent() {
        let counts: Counts = [("00", 10), ("11", 30), ("01", 10)].into_iter().collect();
        let sorted: Vec<_> = counts.sorted().into_iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(sorted, vec!["11", "00", "01"]);
        assert_eq!(counts.most_frequent(), Some((&"11".to_string(), &30)));
        assert!(Counts::new().most_frequent().is_none());
    }

    #[test]
    fn test_counts_probabilities() {
        let counts: Counts = [("0", 3), ("1", 1)].into_iter().collect();
        let probs = counts.probabilities();
        assert!((probs["0"] - 0.75).abs() < 1e-12);
        assert!((probs["1"] - 0.25).abs() < 1e-12);
        assert!(Counts::new().probabilities().is_empty());
    }

    #[test]
    fn test_counts_marginal() {
        // c0 is the rightmost character.
        let counts: Counts = [("01", 4), ("11", 2), ("10", 1)].into_iter().collect();
        let c0 = counts.marginal(0);
        assert_eq!(c0.get("1"), 6);
        assert_eq!(c0.get("0"), 1);
        let c1 = counts.marginal(1);
        assert_eq!(c1.get("1"), 3);
        assert_eq!(c1.get("0"), 4);
        assert!(counts.marginal(5).is_empty());
    }

    #[test]
    fn test_counts_display_and_json() {
        let counts: Counts = [("1", 2), ("0", 5)].into_iter().collect();
        assert_eq!(counts.to_string(), "{'0': 5, '1': 2}");
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"0":5,"1":2}"#);
    }

    #[test]
    fn test_execution_result_probability() {
        let counts: Counts = [("0", 768), ("1", 256)].into_iter().collect();
        let result = ExecutionResult::new(counts, 1024)
            .with_execution_time(3)
            .with_metadata("backend", "stub");
        assert!((result.probability("0") - 0.75).abs() < 1e-12);
        assert_eq!(result.execution_time_ms, Some(3));
        assert_eq!(result.metadata["backend"], "stub");
    }
}
