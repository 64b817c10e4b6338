// src/simulation/results.rs
use crate::core::{Result, SamplingFailure};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Histogram of measured bitstrings over a run of shots.
///
/// Keys are fixed-width bitstrings (one character per qubit, qubit 0
/// rightmost) and iterate in lexicographic order. A bitstring that was never
/// observed has count 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    num_qubits: usize,
    shots: u64,
    counts: BTreeMap<String, u64>,
}

impl OutcomeCounts {
    /// Creates an empty histogram for `num_qubits`-bit outcomes.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            shots: 0,
            counts: BTreeMap::new(),
        }
    }

    /// Builds a histogram from `(bitstring, count)` pairs.
    /// Duplicate bitstrings are summed; malformed bitstrings are rejected.
    pub fn from_pairs<S, I>(num_qubits: usize, pairs: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut counts = Self::new(num_qubits);
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count)?;
        }
        Ok(counts)
    }

    /// Adds `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) -> Result<()> {
        let key = bitstring.into();
        if key.len() != self.num_qubits || !key.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(SamplingFailure::Simulation(format!(
                "Malformed outcome '{}' for {} qubits",
                key, self.num_qubits
            )));
        }
        if count == 0 {
            return Ok(());
        }
        *self.counts.entry(key).or_default() += count;
        self.shots += count;
        Ok(())
    }

    /// Records one observation of basis index `k`. The index must fit in
    /// `num_qubits` bits.
    pub(crate) fn record_index(&mut self, k: usize) {
        let key = format!("{:0width$b}", k, width = self.num_qubits);
        *self.counts.entry(key).or_default() += 1;
        self.shots += 1;
    }

    /// Count for `bitstring`; 0 when it was never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots (the sum of all counts).
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Width of every bitstring key.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Iterates `(bitstring, count)` in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct observed bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `true` when every shot produced the same bitstring.
    pub fn is_deterministic(&self) -> bool {
        self.counts.len() == 1
    }

    /// The most frequently observed bitstring. Ties go to the
    /// lexicographically smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Relative frequency of each observed bitstring.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        if self.shots == 0 {
            return BTreeMap::new();
        }
        let total = self.shots as f64;
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Verifies the histogram invariant against the requested shot count.
    pub fn check_shots(&self, expected: u64) -> Result<()> {
        if self.shots != expected {
            return Err(SamplingFailure::Simulation(format!(
                "Counts sum to {} but {} shots were requested",
                self.shots, expected
            )));
        }
        Ok(())
    }
}

impl fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome Counts ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        }
        for (bitstring, count) in &self.counts {
            writeln!(f, "  |{}>: {}", bitstring, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_basic() -> Result<()> {
        let mut counts = OutcomeCounts::new(2);
        counts.insert("00", 500)?;
        counts.insert("11", 500)?;
        counts.insert("11", 24)?;

        assert_eq!(counts.get("00"), 500);
        assert_eq!(counts.get("11"), 524);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.shots(), 1024);
        assert_eq!(counts.len(), 2);
        Ok(())
    }

    #[test]
    fn test_malformed_keys_rejected() {
        let mut counts = OutcomeCounts::new(2);
        assert!(counts.insert("0", 1).is_err());
        assert!(counts.insert("012", 1).is_err());
        assert!(counts.insert("0a", 1).is_err());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_zero_count_is_not_an_observation() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(1, [("0", 3), ("1", 0)])?;
        assert!(counts.is_deterministic());
        assert_eq!(counts.len(), 1);
        Ok(())
    }

    #[test]
    fn test_record_index_pads_bitstring() {
        let mut counts = OutcomeCounts::new(2);
        counts.record_index(1);
        counts.record_index(2);
        counts.record_index(1);
        assert_eq!(counts.get("01"), 2);
        assert_eq!(counts.get("10"), 1);
        assert_eq!(counts.shots(), 3);
    }

    #[test]
    fn test_most_frequent_and_probabilities() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(2, [("00", 300), ("01", 200), ("10", 300), ("11", 200)])?;
        assert_eq!(counts.most_frequent(), Some(("00", 300)));
        let probs = counts.probabilities();
        assert!((probs["00"] - 0.3).abs() < 1e-12);
        assert!((probs["11"] - 0.2).abs() < 1e-12);
        assert_eq!(OutcomeCounts::new(2).most_frequent(), None);
        Ok(())
    }

    #[test]
    fn test_check_shots() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(1, [("0", 7), ("1", 3)])?;
        counts.check_shots(10)?;
        assert!(matches!(counts.check_shots(11), Err(SamplingFailure::Simulation(_))));
        Ok(())
    }

    #[test]
    fn test_display_sorted() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(2, [("11", 1), ("00", 2)])?;
        let text = counts.to_string();
        let zero = text.find("|00>").unwrap();
        let three = text.find("|11>").unwrap();
        assert!(zero < three);
        Ok(())
    }
}
