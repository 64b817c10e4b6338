// src/simulation/mod.rs

//! Executes circuits and returns measured outcome counts.
//!
//! The sampling layer only ever talks to the [`Executor`] trait: "run this
//! circuit this many times and hand back a bitstring histogram". The
//! bundled [`Simulator`] implements it with a dense state vector; tests and
//! other front ends may plug in their own executor.

mod results;
pub(crate) mod engine;

pub use results::OutcomeCounts;

use crate::circuits::Circuit;
use crate::core::{Result, SamplingFailure};
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, instrument};

/// The simulation collaborator consumed by the sampling layer.
pub trait Executor {
    /// Runs `circuit` for `shots` shots, measuring every qubit at the end,
    /// and returns the histogram of measured bitstrings.
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts> {
        (**self).execute(circuit, shots)
    }
}

/// Settings for the bundled simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seed for the sampling RNG. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Widest circuit the simulator accepts.
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: 16,
        }
    }
}

impl SimulatorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }
}

/// State-vector simulator.
///
/// Every call to [`Executor::execute`] starts from |0...0>, applies the
/// circuit once and then samples all shots from the final distribution.
/// With a configured seed, the n-th call draws from a stream derived from
/// the seed and n, so two simulators with the same seed given the same
/// sequence of requests return the same counts.
#[derive(Debug, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    runs: AtomicU64,
}

impl Clone for Simulator {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            runs: AtomicU64::new(self.runs.load(Ordering::Relaxed)),
        }
    }
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            runs: AtomicU64::new(0),
        }
    }

    /// Convenience for a seeded simulator with otherwise default settings.
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(SimulatorConfig::default().with_seed(seed))
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        let run = self.runs.fetch_add(1, Ordering::Relaxed);
        match self.config.seed {
            Some(seed) => {
                // Distinct (seed, run) pairs give distinct keys.
                let mut key = <StdRng as SeedableRng>::Seed::default();
                key[..8].copy_from_slice(&seed.to_le_bytes());
                key[8..16].copy_from_slice(&run.to_le_bytes());
                StdRng::from_seed(key)
            }
            None => StdRng::from_entropy(),
        }
    }
}

impl Executor for Simulator {
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    fn execute(&self, circuit: &Circuit, shots: u32) -> Result<OutcomeCounts> {
        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.config.max_qubits {
            return Err(SamplingFailure::CircuitTooLarge {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }

        let mut engine = SimulationEngine::init(num_qubits)?;
        debug!("Circuit has {} operations", circuit.len());
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }

        let mut rng = self.rng();
        let counts = engine.sample(shots, &mut rng)?;
        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(counts)
    }
}
