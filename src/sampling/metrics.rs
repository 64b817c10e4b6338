//! Derived metrics over outcome counts.
//!
//! Everything here is a pure function of an [`OutcomeCounts`] (or of a list
//! of single-shot outcomes); nothing is cached.

use crate::core::{Result, SamplingFailure};
use crate::simulation::OutcomeCounts;
use serde::Serialize;

/// `count(state) / shots * 100`. Zero for an empty histogram or an
/// unobserved state.
pub fn percentage(counts: &OutcomeCounts, state: &str) -> f64 {
    let shots = counts.shots();
    if shots == 0 {
        return 0.0;
    }
    counts.get(state) as f64 / shots as f64 * 100.0
}

/// One row of a per-state breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateShare {
    pub state: String,
    pub count: u64,
    pub percentage: f64,
}

/// Count and percentage of every observed state, in bitstring order.
pub fn percentages(counts: &OutcomeCounts) -> Vec<StateShare> {
    counts
        .iter()
        .map(|(state, count)| StateShare {
            state: state.to_string(),
            count,
            percentage: percentage(counts, state),
        })
        .collect()
}

/// Agreement between the two measured qubits of a two-qubit circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationMetrics {
    /// Fraction of shots with both qubits equal (`00` or `11`).
    pub same: f64,
    /// Fraction of shots with the qubits different (`01` or `10`).
    pub diff: f64,
    /// `|same - diff|`
    pub strength: f64,
}

impl CorrelationMetrics {
    pub fn from_counts(counts: &OutcomeCounts) -> Result<Self> {
        if counts.num_qubits() != 2 {
            return Err(SamplingFailure::QubitCountMismatch {
                expected: 2,
                actual: counts.num_qubits(),
            });
        }
        let shots = counts.shots();
        if shots == 0 {
            return Err(SamplingFailure::Simulation("No shots recorded".to_string()));
        }
        let shots = shots as f64;
        let same = (counts.get("00") + counts.get("11")) as f64 / shots;
        let diff = (counts.get("01") + counts.get("10")) as f64 / shots;
        Ok(Self {
            same,
            diff,
            strength: (same - diff).abs(),
        })
    }
}

/// Wins over a series of single-shot coin games. Outcome `"0"` (heads) wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinTally {
    pub wins: u64,
    pub games: u64,
}

impl WinTally {
    /// Whether a single-shot outcome counts as a win.
    pub fn is_win(outcome: &str) -> bool {
        outcome == "0"
    }

    /// Tallies a sequence of single-shot outcomes.
    pub fn from_outcomes<I, S>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        outcomes.into_iter().fold(Self::default(), |mut tally, outcome| {
            tally.record(outcome.as_ref());
            tally
        })
    }

    /// Adds one game; returns whether it was won.
    pub fn record(&mut self, outcome: &str) -> bool {
        let win = Self::is_win(outcome);
        self.games += 1;
        if win {
            self.wins += 1;
        }
        win
    }

    /// Adds another tally into this one.
    pub fn merge(&mut self, other: WinTally) {
        self.wins += other.wins;
        self.games += other.games;
    }

    pub fn losses(&self) -> u64 {
        self.games - self.wins
    }

    /// Win rate in percent; 0 before any game is played.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split_percentages() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(2, [("00", 512), ("11", 512)])?;
        assert_eq!(percentage(&counts, "00"), 50.0);
        assert_eq!(percentage(&counts, "11"), 50.0);
        assert_eq!(percentage(&counts, "01"), 0.0);

        let rows = percentages(&counts);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].state, "00");
        assert_eq!(rows[1].count, 512);
        Ok(())
    }

    #[test]
    fn test_percentages_of_empty_counts() {
        let counts = OutcomeCounts::new(1);
        assert_eq!(percentage(&counts, "0"), 0.0);
        assert!(percentages(&counts).is_empty());
    }

    #[test]
    fn test_correlation_metrics() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(2, [("00", 40), ("11", 40), ("01", 10), ("10", 10)])?;
        let metrics = CorrelationMetrics::from_counts(&counts)?;
        assert!((metrics.same - 0.8).abs() < 1e-12);
        assert!((metrics.diff - 0.2).abs() < 1e-12);
        assert!((metrics.strength - 0.6).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_correlation_needs_two_qubits() -> Result<()> {
        let counts = OutcomeCounts::from_pairs(1, [("0", 1)])?;
        assert_eq!(
            CorrelationMetrics::from_counts(&counts),
            Err(SamplingFailure::QubitCountMismatch { expected: 2, actual: 1 })
        );
        Ok(())
    }

    #[test]
    fn test_win_tally() {
        let tally = WinTally::from_outcomes(["0", "1", "0", "0"]);
        assert_eq!(tally.wins, 3);
        assert_eq!(tally.games, 4);
        assert_eq!(tally.losses(), 1);
        assert_eq!(tally.win_rate(), 75.0);
        assert_eq!(WinTally::default().win_rate(), 0.0);
    }

    #[test]
    fn test_win_tally_merge() {
        let mut total = WinTally::from_outcomes(["0"]);
        total.merge(WinTally::from_outcomes(["1", "1", "0"]));
        assert_eq!(total, WinTally { wins: 2, games: 4 });
    }
}
