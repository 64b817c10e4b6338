// src/scenarios/mod.rs

//! Circuit-assembly rules for the three demos.
//!
//! - [`communication`]: a Bell pair after Alice acts on her half.
//! - [`coin_game`]: a one-qubit coin flipped by a player and a referee.
//! - [`correlation`]: a Bell pair measured after optional rotations.
//!
//! Each module turns a user's option selection into a fresh `Circuit`,
//! runs it through a [`Sampler`](crate::sampling::Sampler) and returns a
//! plain report value for display.

pub mod coin_game;
pub mod communication;
pub mod correlation;

use crate::circuits::Circuit;
use crate::core::Result;

/// `h(0); cx(0, 1)` on a fresh two-qubit circuit.
pub fn bell_pair() -> Result<Circuit> {
    let mut circuit = Circuit::new(2)?;
    circuit.h(0)?.cx(0, 1)?;
    Ok(circuit)
}
