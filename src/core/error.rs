//! Error handling logic

use thiserror::Error;

/// Failures raised while assembling or sampling a circuit.
///
/// Every failure is reported to the caller as-is: nothing is retried and no
/// partial counts are returned. The caller fixes its configuration and
/// issues a new request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SamplingFailure {
    /// Shot count was zero, negative or above the supported maximum.
    #[error("Invalid shots: {shots} (expected 1..={max})")]
    InvalidShots {
        /// The rejected shot count as supplied by the caller.
        shots: i64,
        /// Largest accepted shot count.
        max: u32,
    },

    /// A coin-game run was requested with no games.
    #[error("Invalid game count: {0} (expected at least 1)")]
    InvalidGameCount(i64),

    /// An operation targets a qubit outside `[0, qubit_count)`.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        qubit: usize,
        num_qubits: usize,
    },

    /// A two-qubit operation names the same qubit twice.
    #[error("Control and target qubits must differ (both are {qubit})")]
    DuplicateQubit { qubit: usize },

    /// A gate or option identifier that is not part of the supported set.
    #[error("Unsupported gate '{0}'")]
    UnsupportedGate(String),

    /// An operation names a different number of qubits than its gate acts on.
    #[error("Gate '{gate}' acts on {expected} qubit(s) but was given {actual}")]
    ArityMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// A scenario option identifier that is not recognized.
    #[error("Unsupported option '{0}'")]
    UnsupportedOption(String),

    /// A circuit was requested with no qubits.
    #[error("Invalid qubit count: {0}")]
    InvalidQubitCount(usize),

    /// A metric needs counts over a different number of qubits.
    #[error("Expected {expected}-qubit outcomes, got {actual}-qubit outcomes")]
    QubitCountMismatch { expected: usize, actual: usize },

    /// The circuit is wider than the simulator accepts.
    #[error("Circuit has {num_qubits} qubits but the simulator supports at most {max_qubits}")]
    CircuitTooLarge { num_qubits: usize, max_qubits: usize },

    /// The evolved state vector is no longer normalized.
    #[error("Incoherent state: {0}")]
    Incoherence(String),

    /// The simulation collaborator failed or broke the counts contract.
    #[error("Simulation failed: {0}")]
    Simulation(String),
}

/// Result type for sampling operations.
pub type Result<T> = std::result::Result<T, SamplingFailure>;
