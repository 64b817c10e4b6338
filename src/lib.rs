// src/lib.rs

//! `qplay` - outcome sampling for small quantum-circuit demos
//!
//! Build a one- or two-qubit circuit, sample it for a number of shots and
//! turn the measured bitstring histogram into the numbers a demo displays:
//! per-state percentages, same/different-state probabilities, correlation
//! strength, and coin-game win rates.
//!
//! The pieces, in dependency order:
//! - [`operations`]: the gate set (`i`, `x`, `y`, `z`, `h`, `s`, `sdg`, `t`,
//!   `tdg`, `p(θ)`, `cx`).
//! - [`circuits`]: [`Circuit`], a gate sequence over a fixed register.
//! - [`simulation`]: the [`Executor`] seam and the bundled [`Simulator`].
//! - [`sampling`]: [`Sampler`], which validates requests and checks the
//!   returned [`OutcomeCounts`], plus the derived metrics.
//! - [`scenarios`]: circuit assembly for the communication, coin-game and
//!   correlation demos.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod sampling;
pub mod scenarios;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{Result, SamplingFailure, StateVector};
pub use operations::{Gate, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{Executor, OutcomeCounts, Simulator, SimulatorConfig};
pub use sampling::{CorrelationMetrics, Sampler, WinTally, percentage, percentages};
pub use validation::check_normalization;

// Example 1: Bell pair correlations
/// ```
/// use qplay::{Circuit, CorrelationMetrics, Sampler, Simulator};
///
/// let mut circuit = Circuit::new(2)?;
/// circuit.h(0)?.cx(0, 1)?;
///
/// let sampler = Sampler::new(Simulator::seeded(7));
/// let counts = sampler.sample(&circuit, 1024)?;
/// println!("{}", circuit);
/// println!("{}", counts);
///
/// // Every shot lands on |00> or |11>.
/// assert_eq!(counts.shots(), 1024);
/// assert_eq!(counts.get("01") + counts.get("10"), 0);
///
/// let metrics = CorrelationMetrics::from_counts(&counts)?;
/// assert_eq!(metrics.same, 1.0);
/// assert_eq!(metrics.strength, 1.0);
/// # Ok::<(), qplay::SamplingFailure>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Rejected requests
/// ```
/// use qplay::{Circuit, Sampler, SamplingFailure, Simulator};
///
/// let mut circuit = Circuit::new(1)?;
/// circuit.x(0)?;
/// assert!(matches!(circuit.h(1), Err(SamplingFailure::QubitOutOfRange { qubit: 1, .. })));
///
/// let sampler = Sampler::new(Simulator::new());
/// assert!(matches!(
///     sampler.sample(&circuit, 0),
///     Err(SamplingFailure::InvalidShots { shots: 0, .. })
/// ));
/// assert_eq!(sampler.sample_once(&circuit)?, "1");
/// # Ok::<(), qplay::SamplingFailure>(())
/// ```
#[doc(hidden)]
const _: () = ();
