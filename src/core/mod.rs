// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{Result, SamplingFailure};
pub use state::StateVector;

pub mod constants;
pub use constants::qplay_constants::{DEFAULT_SHOTS, MAX_SHOTS, NORM_TOLERANCE};
