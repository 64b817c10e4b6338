// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gate operations (`qplay::operations::Operation`) over a fixed register.
//!
//! Every qubit of a circuit is measured once all operations have run, so
//! measurement is not part of the operation list.

use crate::core::{Result, SamplingFailure};
use crate::operations::{Gate, Operation};
use serde::Serialize;
use std::fmt;

/// An ordered sequence of operations over `num_qubits` qubits.
///
/// Invariant: every qubit index named by an operation lies in
/// `[0, num_qubits)`. [`Circuit::push`] refuses operations that would break
/// it.
#[derive(Clone, PartialEq, Serialize)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(SamplingFailure::InvalidQubitCount(num_qubits));
        }
        Ok(Self {
            num_qubits,
            operations: Vec::new(),
        })
    }

    /// Appends an operation after checking its arity and qubit indices.
    pub fn push(&mut self, op: Operation) -> Result<&mut Self> {
        self.check_operation(&op)?;
        self.operations.push(op);
        Ok(self)
    }

    /// Appends a single-qubit gate.
    pub fn apply(&mut self, gate: Gate, qubit: usize) -> Result<&mut Self> {
        self.push(Operation::single(gate, qubit)?)
    }

    pub fn i(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::I, qubit)
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::X, qubit)
    }

    pub fn y(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::Y, qubit)
    }

    pub fn z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::Z, qubit)
    }

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::H, qubit)
    }

    pub fn s(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::S, qubit)
    }

    pub fn t(&mut self, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::T, qubit)
    }

    /// Phase `e^(iθ)` on |1> of `qubit`.
    pub fn p(&mut self, theta: f64, qubit: usize) -> Result<&mut Self> {
        self.apply(Gate::P(theta), qubit)
    }

    /// Controlled bit flip.
    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.push(Operation::controlled(control, target)?)
    }

    /// Re-checks arity and the qubit-index invariant over every operation.
    pub fn validate(&self) -> Result<()> {
        self.operations
            .iter()
            .try_for_each(|op| self.check_operation(op))
    }

    fn check_operation(&self, op: &Operation) -> Result<()> {
        let arity = op.gate().arity();
        if op.qubits().len() != arity {
            return Err(SamplingFailure::ArityMismatch {
                gate: op.gate().to_string(),
                expected: arity,
                actual: op.qubits().len(),
            });
        }
        for &qubit in op.qubits() {
            if qubit >= self.num_qubits {
                return Err(SamplingFailure::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        if let [control, target] = op.qubits() {
            if control == target {
                return Err(SamplingFailure::DuplicateQubit { qubit: *control });
            }
        }
        Ok(())
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chaining helper for assembling a `Circuit`.
///
/// The first failing step is remembered and reported by [`CircuitBuilder::build`],
/// so a chain can be written without `?` after every gate.
pub struct CircuitBuilder {
    circuit: Result<Circuit>,
}

impl CircuitBuilder {
    /// Starts a builder over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        let pushed = match &mut self.circuit {
            Ok(circuit) => circuit.push(op).map(|_| ()),
            Err(_) => return self,
        };
        if let Err(e) = pushed {
            self.circuit = Err(e);
        }
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        ops.into_iter().fold(self, Self::add_op)
    }

    /// Adds a single-qubit gate.
    pub fn gate(self, gate: Gate, qubit: usize) -> Self {
        match Operation::single(gate, qubit) {
            Ok(op) => self.add_op(op),
            Err(e) => self.fail(e),
        }
    }

    /// Adds a controlled bit flip.
    pub fn cx(self, control: usize, target: usize) -> Self {
        match Operation::controlled(control, target) {
            Ok(op) => self.add_op(op),
            Err(e) => self.fail(e),
        }
    }

    fn fail(mut self, e: SamplingFailure) -> Self {
        if self.circuit.is_ok() {
            self.circuit = Err(e);
        }
        self
    }

    /// Finalizes the construction, reporting the first invalid step if any.
    pub fn build(self) -> Result<Circuit> {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        let num_ops = self.operations.len();
        let num_qubits = self.num_qubits;

        // One extra column at the end for the measurements.
        let columns = num_ops + 1;
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); columns]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; columns]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in self.operations.iter().enumerate() {
            match (op.gate(), op.qubits()) {
                (Gate::Cx, &[control, target]) => {
                    op_grid[control][t] = format_gate("@");
                    op_grid[target][t] = format_gate("X");
                    let r_min = control.min(target);
                    let r_max = control.max(target);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
                (Gate::I, _) => {} // leave the wire
                (gate, &[target, ..]) => {
                    let symbol = match gate {
                        Gate::Sdg => "S†".to_string(),
                        Gate::Tdg => "T†".to_string(),
                        Gate::P(theta) => {
                            let label = format!("P({theta:.1})");
                            if label.chars().count() > GATE_WIDTH { "P".to_string() } else { label }
                        }
                        other => other.name().to_uppercase(),
                    };
                    op_grid[target][t] = format_gate(&symbol);
                }
                _ => {}
            }
        }
        for row in op_grid.iter_mut() {
            row[num_ops] = format_gate("M");
        }

        writeln!(f, "qplay::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        let max_label_width = format!("q{}", num_qubits - 1).len();
        let label_padding = " ".repeat(max_label_width + 2);
        for r in 0..num_qubits {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..columns {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_qubits_rejected() {
        assert_eq!(Circuit::new(0).unwrap_err(), SamplingFailure::InvalidQubitCount(0));
    }

    #[test]
    fn test_push_checks_range() -> Result<()> {
        let mut circuit = Circuit::new(2)?;
        circuit.h(0)?.cx(0, 1)?;
        assert_eq!(circuit.len(), 2);

        let err = circuit.x(2).unwrap_err();
        assert_eq!(err, SamplingFailure::QubitOutOfRange { qubit: 2, num_qubits: 2 });
        let err = circuit.cx(1, 5).unwrap_err();
        assert_eq!(err, SamplingFailure::QubitOutOfRange { qubit: 5, num_qubits: 2 });
        // Rejected operations are not recorded.
        assert_eq!(circuit.len(), 2);
        circuit.validate()
    }

    #[test]
    fn test_builder_reports_first_error() {
        let result = CircuitBuilder::new(1)
            .gate(Gate::H, 0)
            .gate(Gate::X, 3)
            .cx(0, 0)
            .build();
        assert_eq!(
            result.unwrap_err(),
            SamplingFailure::QubitOutOfRange { qubit: 3, num_qubits: 1 }
        );
    }

    #[test]
    fn test_builder_chain() -> Result<()> {
        let circuit = CircuitBuilder::new(2)
            .gate(Gate::H, 0)
            .cx(0, 1)
            .gate(Gate::T, 1)
            .build()?;
        let gates: Vec<Gate> = circuit.operations().iter().map(|op| op.gate()).collect();
        assert_eq!(gates, vec![Gate::H, Gate::Cx, Gate::T]);
        Ok(())
    }

    #[test]
    fn test_display_bell_circuit() -> Result<()> {
        let mut circuit = Circuit::new(2)?;
        circuit.h(0)?.cx(0, 1)?;
        let diagram = circuit.to_string();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "qplay::Circuit[2 operations on 2 qubits]");
        assert_eq!(lines[1], "q0: ───H──────@──────M───");
        assert_eq!(lines[3], "q1: ──────────X──────M───");
        assert!(lines[2].contains('│'));
        Ok(())
    }

    #[test]
    fn test_operation_arity_enforced() -> Result<()> {
        // A deserialized operation bypasses the checked constructors.
        let one_qubit_cx: Operation = serde_json::from_str(r#"{"gate":"cx","qubits":[0]}"#)
            .map_err(|e| SamplingFailure::Simulation(e.to_string()))?;
        let mut circuit = Circuit::new(2)?;
        let expected = SamplingFailure::ArityMismatch {
            gate: "cx".to_string(),
            expected: 2,
            actual: 1,
        };
        assert_eq!(circuit.push(one_qubit_cx).unwrap_err(), expected);
        assert!(circuit.is_empty());

        let two_qubit_h: Operation = serde_json::from_str(r#"{"gate":"h","qubits":[0,1]}"#)
            .map_err(|e| SamplingFailure::Simulation(e.to_string()))?;
        assert!(matches!(
            circuit.push(two_qubit_h),
            Err(SamplingFailure::ArityMismatch { expected: 1, actual: 2, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_display_phase_labels_fit_column() -> Result<()> {
        let mut circuit = Circuit::new(1)?;
        circuit.p(-0.5, 0)?.p(-12.25, 0)?;
        let diagram = circuit.to_string();
        let row = diagram.lines().nth(1).unwrap_or_default();
        assert_eq!(row, "q0: P(-0.5)───P──────M───");
        Ok(())
    }
}
