// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Dense amplitude vector over the computational basis of `n` qubits.
///
/// Basis index `k` encodes qubit `q` in bit `q` of `k`, so qubit 0 is the
/// least significant bit. Rendering an index as a zero-padded binary string
/// therefore puts qubit 0 in the rightmost position.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// The all-zeros state |0...0> over `num_qubits` qubits.
    pub(crate) fn zero_state(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self { amplitudes, num_qubits }
    }

    /// Wraps an explicit amplitude vector. The length must be `2^num_qubits`.
    #[cfg(test)]
    pub(crate) fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Self {
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Self { amplitudes, num_qubits }
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Formats basis index `k` as a bitstring, qubit 0 rightmost.
    pub fn bitstring(&self, k: usize) -> String {
        format!("{:0width$b}", k, width = self.num_qubits)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state() {
        let state = StateVector::zero_state(2);
        assert_eq!(state.dim(), 4);
        assert_eq!(state.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bitstring_puts_qubit_zero_rightmost() {
        let state = StateVector::zero_state(2);
        assert_eq!(state.bitstring(0b01), "01");
        assert_eq!(state.bitstring(0b10), "10");
        assert_eq!(StateVector::zero_state(1).bitstring(1), "1");
    }
}
