//! Numeric constants shared by the simulator and the samplers.

/// Constants used when building gate matrices and checking states.
pub mod qplay_constants {
    /// 1/√2, the Hadamard amplitude.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
    /// Allowed deviation of `Σ|c_k|²` from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Largest shot count a single sampling request may ask for.
    pub const MAX_SHOTS: u32 = 1_000_000;
    /// Shot count used by the demos when none is given.
    pub const DEFAULT_SHOTS: u32 = 1024;
}
