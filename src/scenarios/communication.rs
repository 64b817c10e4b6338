//! Quantum communication: Alice and Bob share a Bell pair, Alice applies one
//! gate to her qubit (qubit 0), then both qubits are measured.

use crate::circuits::Circuit;
use crate::core::{Result, SamplingFailure};
use crate::operations::Gate;
use crate::sampling::{Sampler, StateShare, percentages};
use crate::scenarios::bell_pair;
use crate::simulation::{Executor, OutcomeCounts};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The gate Alice applies to her half of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliceOp {
    /// Leaves |Φ+> = (|00> + |11>)/√2 as is.
    Identity,
    /// Turns the pair into (|01> + |10>)/√2.
    BitFlip,
    /// Turns the pair into (|00> - |11>)/√2.
    PhaseFlip,
    /// Spreads the pair over all four basis states.
    Hadamard,
}

impl AliceOp {
    pub const ALL: [AliceOp; 4] = [
        AliceOp::Hadamard,
        AliceOp::BitFlip,
        AliceOp::PhaseFlip,
        AliceOp::Identity,
    ];

    pub fn gate(&self) -> Gate {
        match self {
            AliceOp::Identity => Gate::I,
            AliceOp::BitFlip => Gate::X,
            AliceOp::PhaseFlip => Gate::Z,
            AliceOp::Hadamard => Gate::H,
        }
    }

    /// Expected state and measurement distribution after the operation.
    pub fn analysis(&self) -> Analysis {
        match self {
            AliceOp::Identity => Analysis {
                state: "Bell state |Φ+> = (|00> + |11>)/√2",
                notes: &[
                    "Perfect correlation: both qubits same",
                    "50% |00>, 50% |11>",
                ],
            },
            AliceOp::BitFlip => Analysis {
                state: "State after X gate: (|10> + |01>)/√2",
                notes: &[
                    "Anti-correlation: qubits always different",
                    "50% |01>, 50% |10>",
                ],
            },
            AliceOp::PhaseFlip => Analysis {
                state: "State after Z gate: (|00> - |11>)/√2",
                notes: &[
                    "Phase changed but same measurement probabilities",
                    "50% |00>, 50% |11>",
                ],
            },
            AliceOp::Hadamard => Analysis {
                state: "State after H gate: superposition of all four basis states",
                notes: &[
                    "Correlation between the qubits is lost",
                    "About 25% each of |00>, |01>, |10>, |11>",
                ],
            },
        }
    }
}

impl fmt::Display for AliceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate())
    }
}

impl FromStr for AliceOp {
    type Err = SamplingFailure;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<Gate>() {
            Ok(Gate::I) => Ok(AliceOp::Identity),
            Ok(Gate::X) => Ok(AliceOp::BitFlip),
            Ok(Gate::Z) => Ok(AliceOp::PhaseFlip),
            Ok(Gate::H) => Ok(AliceOp::Hadamard),
            _ => Err(SamplingFailure::UnsupportedGate(s.to_string())),
        }
    }
}

/// Theoretical description of the post-operation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub state: &'static str,
    pub notes: &'static [&'static str],
}

/// Bell pair followed by Alice's gate on qubit 0.
pub fn communication_circuit(op: AliceOp) -> Result<Circuit> {
    let mut circuit = bell_pair()?;
    match op {
        // Identity leaves the circuit as the plain Bell pair.
        AliceOp::Identity => {}
        other => {
            circuit.apply(other.gate(), 0)?;
        }
    }
    Ok(circuit)
}

/// Outcome of one communication run.
#[derive(Debug, Clone, Serialize)]
pub struct CommunicationReport {
    pub op: AliceOp,
    pub circuit: Circuit,
    pub counts: OutcomeCounts,
    pub breakdown: Vec<StateShare>,
    /// `true` when every shot gave the same bitstring.
    pub deterministic: bool,
    pub analysis: Analysis,
}

/// Builds and samples the communication circuit for `op`.
pub fn run<E: Executor>(sampler: &Sampler<E>, op: AliceOp, shots: i64) -> Result<CommunicationReport> {
    let circuit = communication_circuit(op)?;
    let counts = sampler.sample(&circuit, shots)?;
    Ok(CommunicationReport {
        op,
        breakdown: percentages(&counts),
        deterministic: counts.is_deterministic(),
        analysis: op.analysis(),
        circuit,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alice_op() -> Result<()> {
        assert_eq!("h".parse::<AliceOp>()?, AliceOp::Hadamard);
        assert_eq!("x".parse::<AliceOp>()?, AliceOp::BitFlip);
        assert_eq!("z".parse::<AliceOp>()?, AliceOp::PhaseFlip);
        assert_eq!("i".parse::<AliceOp>()?, AliceOp::Identity);
        assert_eq!(
            "t".parse::<AliceOp>(),
            Err(SamplingFailure::UnsupportedGate("t".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_identity_is_plain_bell_pair() -> Result<()> {
        assert_eq!(communication_circuit(AliceOp::Identity)?, bell_pair()?);
        Ok(())
    }

    #[test]
    fn test_alice_acts_on_qubit_zero_last() -> Result<()> {
        for op in [AliceOp::BitFlip, AliceOp::PhaseFlip, AliceOp::Hadamard] {
            let circuit = communication_circuit(op)?;
            assert_eq!(circuit.len(), 3);
            let last = &circuit.operations()[2];
            assert_eq!(last.gate(), op.gate());
            assert_eq!(last.qubits(), &[0]);
        }
        Ok(())
    }

    #[test]
    fn test_display_matches_identifier() {
        let ids: Vec<String> = AliceOp::ALL.iter().map(|op| op.to_string()).collect();
        assert_eq!(ids, vec!["h", "x", "z", "i"]);
    }
}
