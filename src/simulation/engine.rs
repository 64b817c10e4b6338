// src/simulation/engine.rs
use crate::core::{Result, SamplingFailure, StateVector};
use crate::operations::{Gate, Matrix2, Operation};
use crate::simulation::OutcomeCounts;
use crate::validation::{check_distribution, check_normalization};
use rand::Rng;
use tracing::debug;

/// Dense state-vector engine behind `Simulator`.
pub(crate) struct SimulationEngine {
    /// Amplitudes over `2^num_qubits` basis states; qubit `q` is bit `q`
    /// of the basis index.
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine in |0...0>.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(SamplingFailure::InvalidQubitCount(0));
        }
        if num_qubits >= usize::BITS as usize {
            return Err(SamplingFailure::CircuitTooLarge {
                num_qubits,
                max_qubits: usize::BITS as usize - 1,
            });
        }
        Ok(Self {
            state: StateVector::zero_state(num_qubits),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            return Err(SamplingFailure::Simulation(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies one operation to the state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<()> {
        if op.qubits().len() != op.gate().arity() {
            return Err(SamplingFailure::ArityMismatch {
                gate: op.gate().to_string(),
                expected: op.gate().arity(),
                actual: op.qubits().len(),
            });
        }
        match (op.gate(), op.qubits()) {
            (Gate::Cx, &[control, target]) => {
                self.apply_controlled_gate(control, target, &Gate::X.matrix())
            }
            (Gate::I, &[target]) => self.check_index(target),
            (gate, &[target]) => self.apply_single_qubit_gate(target, &gate.matrix()),
            (gate, qubits) => Err(SamplingFailure::UnsupportedGate(format!(
                "{} on {} qubits",
                gate,
                qubits.len()
            ))),
        }
    }

    fn check_index(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(SamplingFailure::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Applies a 2x2 matrix to `target`, pairing basis states that differ
    /// only in the target bit.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &Matrix2) -> Result<()> {
        self.check_index(target)?;
        let k_mask = 1usize << target;
        let lower_mask = k_mask - 1;
        let half = self.state.dim() / 2;
        let amps = self.state.amplitudes_mut();

        for i in 0..half {
            // Insert a 0 at bit position `target`.
            let i0 = ((i >> target) << (target + 1)) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = amps[i0];
            let psi_1 = amps[i1];
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Applies `matrix` to `target` on the subspace where `control` is |1>.
    fn apply_controlled_gate(
        &mut self,
        control: usize,
        target: usize,
        matrix: &Matrix2,
    ) -> Result<()> {
        self.check_index(control)?;
        self.check_index(target)?;
        if control == target {
            return Err(SamplingFailure::DuplicateQubit { qubit: control });
        }
        let c_mask = 1usize << control;
        let t_mask = 1usize << target;
        let dim = self.state.dim();
        let amps = self.state.amplitudes_mut();

        for i0 in 0..dim {
            if i0 & c_mask == 0 || i0 & t_mask != 0 {
                continue;
            }
            let i1 = i0 | t_mask;
            let psi_0 = amps[i0];
            let psi_1 = amps[i1];
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Draws `shots` measurements of every qubit from the Born distribution
    /// of the current state. The state itself is left untouched.
    pub(crate) fn sample<R: Rng>(&self, shots: u32, rng: &mut R) -> Result<OutcomeCounts> {
        check_normalization(&self.state, None)?;
        let probabilities = self.state.probabilities();
        check_distribution(&probabilities, None)?;

        let cumulative: Vec<f64> = probabilities
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        // Rounding can leave the last cumulative value a hair below a draw.
        let fallback = probabilities
            .iter()
            .rposition(|&p| p > 0.0)
            .ok_or_else(|| SamplingFailure::Incoherence("All amplitudes are zero".to_string()))?;

        let mut counts = OutcomeCounts::new(self.num_qubits);
        for shot in 0..shots {
            let r: f64 = rng.gen_range(0.0..1.0);
            let k = cumulative.partition_point(|&c| c <= r);
            counts.record_index(if k < cumulative.len() { k } else { fallback });

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }
        Ok(counts)
    }
}
