// src/validation/mod.rs

//! Provides functions to validate a `StateVector` before it is sampled.

use crate::core::{NORM_TOLERANCE, Result, SamplingFailure, StateVector};

/// Checks that the state vector is normalized (`Σ|c_k|² ≈ 1`).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; `None` uses `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SamplingFailure::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq: f64 = state.amplitudes().iter().map(|c| c.norm_sqr()).sum();
    if !norm_sq.is_finite() || (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SamplingFailure::Incoherence(format!(
            "Sum(|c_k|^2) = {} (deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Checks that a probability distribution over basis states has no negative
/// or non-finite entries and sums to 1 within tolerance.
pub fn check_distribution(probabilities: &[f64], tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    if let Some((k, p)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(SamplingFailure::Incoherence(format!(
            "Probability of basis state {} is {}",
            k, p
        )));
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(SamplingFailure::Incoherence(format!(
            "Probabilities sum to {} (deviation > {})",
            total, effective_tolerance
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_state_passes() {
        let state = StateVector::from_amplitudes(vec![
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::new(0.0, FRAC_1_SQRT_2),
        ]);
        assert!(check_normalization(&state, None).is_ok());
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::from_amplitudes(vec![
            Complex::new(1.0, 0.0),
            Complex::new(1.0, 0.0),
        ]);
        match check_normalization(&state, None) {
            Err(SamplingFailure::Incoherence(message)) => {
                assert!(message.contains("Sum(|c_k|^2) = 2"), "{}", message);
            }
            other => panic!("Expected Incoherence, got {:?}", other),
        }
        // A loose enough tolerance accepts it.
        assert!(check_normalization(&state, Some(1.5)).is_ok());
    }

    #[test]
    fn test_distribution_checks() {
        assert!(check_distribution(&[0.25, 0.75], None).is_ok());
        assert!(check_distribution(&[0.5, 0.25], None).is_err());
        assert!(check_distribution(&[1.5, -0.5], None).is_err());
        assert!(check_distribution(&[f64::NAN, 1.0], None).is_err());
    }
}
