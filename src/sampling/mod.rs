// src/sampling/mod.rs

//! The sampling aggregator: validate a request, hand the circuit to an
//! [`Executor`], and return its histogram after checking the counts
//! invariant.

pub mod metrics;

pub use metrics::{CorrelationMetrics, StateShare, WinTally, percentage, percentages};

use crate::circuits::Circuit;
use crate::core::{MAX_SHOTS, Result, SamplingFailure};
use crate::simulation::{Executor, OutcomeCounts, Simulator};
use tracing::{debug, instrument, warn};

/// Checks a caller-supplied shot count and narrows it to the executor's type.
///
/// Zero, negative and counts above [`MAX_SHOTS`] are rejected.
pub fn validate_shots(shots: i64) -> Result<u32> {
    if shots <= 0 || shots > i64::from(MAX_SHOTS) {
        return Err(SamplingFailure::InvalidShots { shots, max: MAX_SHOTS });
    }
    // In range by the check above.
    Ok(shots as u32)
}

/// Runs sampling requests against an executor.
///
/// Each request is independent: the sampler keeps no results between calls.
#[derive(Debug, Clone, Default)]
pub struct Sampler<E = Simulator> {
    executor: E,
}

impl<E: Executor> Sampler<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Samples `circuit` for `shots` shots.
    ///
    /// The shot count and the circuit are checked before the executor is
    /// called. Executor errors are returned unchanged, and a histogram that
    /// does not sum to `shots` or has the wrong key width is reported as
    /// [`SamplingFailure::Simulation`].
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits(), ops = circuit.len()))]
    pub fn sample(&self, circuit: &Circuit, shots: i64) -> Result<OutcomeCounts> {
        let shots = validate_shots(shots).inspect_err(|e| warn!("Rejected request: {}", e))?;
        circuit
            .validate()
            .inspect_err(|e| warn!("Rejected circuit: {}", e))?;

        let counts = self.executor.execute(circuit, shots)?;

        if counts.num_qubits() != circuit.num_qubits() {
            return Err(SamplingFailure::Simulation(format!(
                "Executor returned {}-bit outcomes for a {}-qubit circuit",
                counts.num_qubits(),
                circuit.num_qubits()
            )));
        }
        counts.check_shots(u64::from(shots))?;
        debug!("Sampled {} distinct outcomes", counts.len());
        Ok(counts)
    }

    /// Runs `circuit` for a single shot and returns the measured bitstring.
    pub fn sample_once(&self, circuit: &Circuit) -> Result<String> {
        let counts = self.sample(circuit, 1)?;
        counts
            .iter()
            .next()
            .map(|(bitstring, _)| bitstring.to_string())
            .ok_or_else(|| SamplingFailure::Simulation("Single shot produced no outcome".to_string()))
    }
}
