//! Correlation explorer: prepare a Bell pair, optionally rotate each qubit,
//! measure both and report how often the qubits agree.
//!
//! With no rotations the outcomes are perfectly correlated; a bit flip on
//! one side makes them perfectly anti-correlated; a Hadamard on one side
//! destroys the correlation.

use crate::circuits::Circuit;
use crate::core::{Result, SamplingFailure};
use crate::operations::Gate;
use crate::sampling::{CorrelationMetrics, Sampler, StateShare, percentages};
use crate::scenarios::bell_pair;
use crate::simulation::{Executor, OutcomeCounts};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Optional gate applied to one qubit after the pair is prepared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    None,
    H,
    X,
    Y,
    Z,
    S,
    T,
    Sdg,
}

impl Rotation {
    pub const ALL: [Rotation; 8] = [
        Rotation::None,
        Rotation::H,
        Rotation::X,
        Rotation::Y,
        Rotation::Z,
        Rotation::S,
        Rotation::T,
        Rotation::Sdg,
    ];

    pub fn gate(&self) -> Option<Gate> {
        match self {
            Rotation::None => None,
            Rotation::H => Some(Gate::H),
            Rotation::X => Some(Gate::X),
            Rotation::Y => Some(Gate::Y),
            Rotation::Z => Some(Gate::Z),
            Rotation::S => Some(Gate::S),
            Rotation::T => Some(Gate::T),
            Rotation::Sdg => Some(Gate::Sdg),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gate() {
            Some(gate) => write!(f, "{gate}"),
            None => f.write_str("none"),
        }
    }
}

impl FromStr for Rotation {
    type Err = SamplingFailure;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim();
        if id.is_empty() || id.eq_ignore_ascii_case("none") {
            return Ok(Rotation::None);
        }
        let unsupported = || SamplingFailure::UnsupportedGate(s.to_string());
        let gate = id.parse::<Gate>().map_err(|_| unsupported())?;
        Rotation::ALL
            .into_iter()
            .find(|rotation| rotation.gate() == Some(gate))
            .ok_or_else(unsupported)
    }
}

/// Rotation choice for each qubit of the pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rotations {
    pub q0: Rotation,
    pub q1: Rotation,
}

impl Rotations {
    pub fn new(q0: Rotation, q1: Rotation) -> Self {
        Self { q0, q1 }
    }

    /// No rotation on either qubit.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Bell pair, then the qubit 0 rotation, then the qubit 1 rotation.
pub fn correlation_circuit(rotations: Rotations) -> Result<Circuit> {
    let mut circuit = bell_pair()?;
    for (qubit, rotation) in [(0, rotations.q0), (1, rotations.q1)] {
        if let Some(gate) = rotation.gate() {
            circuit.apply(gate, qubit)?;
        }
    }
    Ok(circuit)
}

/// Outcome of one correlation run.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    pub rotations: Rotations,
    pub circuit: Circuit,
    pub counts: OutcomeCounts,
    pub breakdown: Vec<StateShare>,
    pub metrics: CorrelationMetrics,
}

/// Builds and samples the correlation circuit.
pub fn run<E: Executor>(
    sampler: &Sampler<E>,
    rotations: Rotations,
    shots: i64,
) -> Result<CorrelationReport> {
    let circuit = correlation_circuit(rotations)?;
    let counts = sampler.sample(&circuit, shots)?;
    let metrics = CorrelationMetrics::from_counts(&counts)?;
    Ok(CorrelationReport {
        rotations,
        breakdown: percentages(&counts),
        metrics,
        circuit,
        counts,
    })
}
