//! Quantum coin game.
//!
//! A coin starts heads-up (|0>). The player may put it into superposition,
//! then the referee secretly leaves it, flips it, or puts it into
//! superposition. The coin is measured once per game; heads (`"0"`) is a
//! win for the player.

use crate::circuits::Circuit;
use crate::core::{Result, SamplingFailure};
use crate::operations::Gate;
use crate::sampling::{Sampler, WinTally};
use crate::simulation::Executor;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The player's move, made before the referee's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Apply a Hadamard to the coin.
    Quantum,
    /// Leave the coin alone.
    Classical,
}

impl Strategy {
    pub fn gate(&self) -> Option<Gate> {
        match self {
            Strategy::Quantum => Some(Gate::H),
            Strategy::Classical => None,
        }
    }

    /// Probability of heads after the referee plays `referee`.
    pub fn win_probability(&self, referee: RefereeMove) -> f64 {
        match (self, referee) {
            // |+> is unchanged by I and X; H sends it back to |0>.
            (Strategy::Quantum, RefereeMove::Identity | RefereeMove::Flip) => 0.5,
            (Strategy::Quantum, RefereeMove::Superposition) => 1.0,
            (Strategy::Classical, RefereeMove::Identity) => 1.0,
            (Strategy::Classical, RefereeMove::Flip) => 0.0,
            (Strategy::Classical, RefereeMove::Superposition) => 0.5,
        }
    }

    /// Theoretical win probabilities against each referee move.
    pub fn analysis(&self) -> StrategyAnalysis {
        let against = RefereeMove::ALL.map(|referee| MoveOdds {
            referee,
            win_probability: self.win_probability(referee),
        });
        let expected = against.iter().map(|odds| odds.win_probability).sum::<f64>()
            / against.len() as f64;
        StrategyAnalysis {
            strategy: *self,
            against,
            expected,
        }
    }
}

/// Win probability against one referee move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveOdds {
    pub referee: RefereeMove,
    pub win_probability: f64,
}

/// Theoretical performance of a strategy against a uniformly random referee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyAnalysis {
    pub strategy: Strategy,
    pub against: [MoveOdds; 3],
    /// Mean of the per-move probabilities.
    pub expected: f64,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Quantum => f.write_str("quantum"),
            Strategy::Classical => f.write_str("classical"),
        }
    }
}

impl FromStr for Strategy {
    type Err = SamplingFailure;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantum" => Ok(Strategy::Quantum),
            "classical" => Ok(Strategy::Classical),
            _ => Err(SamplingFailure::UnsupportedOption(s.to_string())),
        }
    }
}

/// The referee's move, drawn uniformly at random each game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefereeMove {
    /// No move (I).
    Identity,
    /// Flip (X).
    Flip,
    /// Superposition (H).
    Superposition,
}

impl RefereeMove {
    pub const ALL: [RefereeMove; 3] = [
        RefereeMove::Identity,
        RefereeMove::Flip,
        RefereeMove::Superposition,
    ];

    pub fn gate(&self) -> Gate {
        match self {
            RefereeMove::Identity => Gate::I,
            RefereeMove::Flip => Gate::X,
            RefereeMove::Superposition => Gate::H,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for RefereeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefereeMove::Identity => f.write_str("No Move (I)"),
            RefereeMove::Flip => f.write_str("Flip (X)"),
            RefereeMove::Superposition => f.write_str("Superposition (H)"),
        }
    }
}

/// One-qubit circuit for a single game.
pub fn coin_circuit(strategy: Strategy, referee: RefereeMove) -> Result<Circuit> {
    let mut circuit = Circuit::new(1)?;
    if let Some(gate) = strategy.gate() {
        circuit.apply(gate, 0)?;
    }
    if referee != RefereeMove::Identity {
        circuit.apply(referee.gate(), 0)?;
    }
    Ok(circuit)
}

/// A single played game.
#[derive(Debug, Clone, Serialize)]
pub struct CoinRound {
    /// 1-based game number within its run.
    pub game_number: u32,
    pub referee: RefereeMove,
    pub circuit: Circuit,
    /// Measured bitstring, `"0"` (heads) or `"1"` (tails).
    pub outcome: String,
    pub win: bool,
}

impl CoinRound {
    pub fn is_heads(&self) -> bool {
        self.outcome == "0"
    }
}

/// Result of a run of games.
#[derive(Debug, Clone, Serialize)]
pub struct CoinGameReport {
    pub strategy: Strategy,
    pub rounds: Vec<CoinRound>,
    pub tally: WinTally,
    pub analysis: StrategyAnalysis,
}

impl CoinGameReport {
    /// More than half of the games were won.
    pub fn strategy_is_winning(&self) -> bool {
        self.tally.win_rate() > 50.0
    }

    pub fn last_round(&self) -> Option<&CoinRound> {
        self.rounds.last()
    }
}

/// Plays `games` games with `strategy`, drawing referee moves from `rng`.
/// Each game is one single-shot sampling request.
pub fn play<E: Executor, R: Rng>(
    sampler: &Sampler<E>,
    strategy: Strategy,
    games: i64,
    rng: &mut R,
) -> Result<CoinGameReport> {
    if games <= 0 {
        return Err(SamplingFailure::InvalidGameCount(games));
    }
    let games = u32::try_from(games).map_err(|_| SamplingFailure::InvalidGameCount(games))?;

    let mut rounds = Vec::new();
    let mut tally = WinTally::default();
    for game_number in 1..=games {
        let referee = RefereeMove::random(rng);
        let circuit = coin_circuit(strategy, referee)?;
        let outcome = sampler.sample_once(&circuit)?;
        let win = tally.record(&outcome);
        debug!("Game {}: referee {:?}, outcome {}", game_number, referee, outcome);
        rounds.push(CoinRound {
            game_number,
            referee,
            circuit,
            outcome,
            win,
        });
    }

    Ok(CoinGameReport {
        strategy,
        rounds,
        tally,
        analysis: strategy.analysis(),
    })
}

/// Running totals across several runs of the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    total: WinTally,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a finished run into the totals.
    pub fn record(&mut self, report: &CoinGameReport) {
        self.total.merge(report.tally);
    }

    pub fn games_played(&self) -> u64 {
        self.total.games
    }

    pub fn wins(&self) -> u64 {
        self.total.wins
    }

    /// `None` until a game has been played.
    pub fn win_rate(&self) -> Option<f64> {
        (self.total.games > 0).then(|| self.total.win_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_coin_circuit_layout() -> Result<()> {
        assert!(coin_circuit(Strategy::Classical, RefereeMove::Identity)?.is_empty());

        let circuit = coin_circuit(Strategy::Quantum, RefereeMove::Flip)?;
        let gates: Vec<Gate> = circuit.operations().iter().map(|op| op.gate()).collect();
        assert_eq!(gates, vec![Gate::H, Gate::X]);

        let circuit = coin_circuit(Strategy::Classical, RefereeMove::Superposition)?;
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.num_qubits(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_strategy() -> Result<()> {
        assert_eq!("quantum".parse::<Strategy>()?, Strategy::Quantum);
        assert_eq!("Classical".parse::<Strategy>()?, Strategy::Classical);
        assert_eq!(
            "random".parse::<Strategy>(),
            Err(SamplingFailure::UnsupportedOption("random".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_referee_draws_every_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(RefereeMove::random(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_scoreboard_accumulates() {
        let report = |outcomes: &[&str]| CoinGameReport {
            strategy: Strategy::Classical,
            rounds: Vec::new(),
            tally: WinTally::from_outcomes(outcomes.iter().copied()),
            analysis: Strategy::Classical.analysis(),
        };
        let mut board = Scoreboard::new();
        assert_eq!(board.win_rate(), None);

        board.record(&report(&["0", "1"]));
        board.record(&report(&["0", "0"]));
        assert_eq!(board.games_played(), 4);
        assert_eq!(board.wins(), 3);
        assert_eq!(board.win_rate(), Some(75.0));
    }

    #[test]
    fn test_strategy_analysis() {
        let quantum = Strategy::Quantum.analysis();
        let odds: Vec<f64> = quantum.against.iter().map(|o| o.win_probability).collect();
        assert_eq!(odds, vec![0.5, 0.5, 1.0]);
        assert!((quantum.expected - 2.0 / 3.0).abs() < 1e-12);

        let classical = Strategy::Classical.analysis();
        let odds: Vec<f64> = classical.against.iter().map(|o| o.win_probability).collect();
        assert_eq!(odds, vec![1.0, 0.0, 0.5]);
        assert_eq!(classical.expected, 0.5);
    }
}
