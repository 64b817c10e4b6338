// src/operations/mod.rs

//! The fixed gate set and the operations that place gates on qubits.
//!
//! Gates are named by the short lowercase identifiers the demos expose in
//! their option lists (`"h"`, `"x"`, `"cx"`, ...). `Gate` parses from and
//! displays as those identifiers.

use crate::core::constants::qplay_constants::{FRAC_1_SQRT_2, PI};
use crate::core::{Result, SamplingFailure};
use num_complex::Complex;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 2x2 unitary acting on a single qubit, row-major over {|0>, |1>}.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// A gate from the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// No operation.
    I,
    /// Bit flip.
    X,
    /// Combined bit and phase flip.
    Y,
    /// Phase flip (phase π on |1>).
    Z,
    /// Hadamard: |0> -> (|0>+|1>)/√2, |1> -> (|0>-|1>)/√2.
    H,
    /// Phase π/2.
    S,
    /// Phase -π/2.
    Sdg,
    /// Phase π/4.
    T,
    /// Phase -π/4.
    Tdg,
    /// Arbitrary phase `e^(iθ)` on |1>.
    P(f64),
    /// Controlled bit flip. The only two-qubit gate.
    Cx,
}

impl Gate {
    /// Number of qubits the gate acts on.
    pub fn arity(&self) -> usize {
        match self {
            Gate::Cx => 2,
            _ => 1,
        }
    }

    /// Short identifier used in option lists and diagrams.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "i",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::P(_) => "p",
            Gate::Cx => "cx",
        }
    }

    /// The 2x2 matrix of a single-qubit gate. For `Cx` this is the matrix
    /// applied to the target when the control is |1>.
    pub fn matrix(&self) -> Matrix2 {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        let i = Complex::i();
        match self {
            Gate::I => [[one, zero], [zero, one]],
            Gate::X | Gate::Cx => [[zero, one], [one, zero]],
            Gate::Y => [[zero, -i], [i, zero]],
            Gate::Z => phase(PI),
            Gate::H => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            Gate::S => phase(PI / 2.0),
            Gate::Sdg => phase(-PI / 2.0),
            Gate::T => phase(PI / 4.0),
            Gate::Tdg => phase(-PI / 4.0),
            Gate::P(theta) => phase(*theta),
        }
    }
}

/// diag(1, e^(iθ))
fn phase(theta: f64) -> Matrix2 {
    [
        [Complex::new(1.0, 0.0), Complex::zero()],
        [Complex::zero(), Complex::from_polar(1.0, theta)],
    ]
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::P(theta) => write!(f, "p({theta})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Gate {
    type Err = SamplingFailure;

    /// Parses a gate identifier. Case-insensitive; `p(θ)` takes θ in radians.
    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim().to_ascii_lowercase();
        let gate = match id.as_str() {
            "i" | "id" => Gate::I,
            "x" => Gate::X,
            "y" => Gate::Y,
            "z" => Gate::Z,
            "h" => Gate::H,
            "s" => Gate::S,
            "sdg" => Gate::Sdg,
            "t" => Gate::T,
            "tdg" => Gate::Tdg,
            "cx" | "cnot" => Gate::Cx,
            _ => {
                let theta = id
                    .strip_prefix("p(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|arg| arg.trim().parse::<f64>().ok())
                    .filter(|theta| theta.is_finite())
                    .ok_or_else(|| SamplingFailure::UnsupportedGate(s.to_string()))?;
                Gate::P(theta)
            }
        };
        Ok(gate)
    }
}

/// A gate placed on specific qubits.
///
/// For `Cx` the qubits are `[control, target]`; every other gate uses only
/// the first slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    gate: Gate,
    qubits: Vec<usize>,
}

impl Operation {
    /// A single-qubit gate on `target`. `Cx` is rejected; use [`Operation::controlled`].
    pub fn single(gate: Gate, target: usize) -> Result<Self> {
        if gate.arity() != 1 {
            return Err(SamplingFailure::UnsupportedGate(format!(
                "{gate} needs two qubits"
            )));
        }
        Ok(Self { gate, qubits: vec![target] })
    }

    /// Controlled bit flip of `target` conditioned on `control`.
    pub fn controlled(control: usize, target: usize) -> Result<Self> {
        if control == target {
            return Err(SamplingFailure::DuplicateQubit { qubit: control });
        }
        Ok(Self { gate: Gate::Cx, qubits: vec![control, target] })
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// The qubits this operation touches, control first.
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self.qubits.iter().map(|q| format!("q{q}")).collect();
        write!(f, "{} {}", self.gate, qubits.join(", "))
    }
}
