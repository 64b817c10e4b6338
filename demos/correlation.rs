//! Correlation explorer: sweep single-qubit rotations on one half of a
//! Bell pair and print how strongly the measured bits agree.

use qplay::scenarios::correlation::{self, Rotation, Rotations};
use qplay::{Sampler, SamplingFailure, Simulator};

fn main() -> Result<(), SamplingFailure> {
    let sampler = Sampler::new(Simulator::seeded(1));
    let shots = 2048;

    println!("{:<6} {:<6} {:>8} {:>8} {:>9}", "q0", "q1", "same", "diff", "strength");
    for q0 in Rotation::ALL {
        let report = correlation::run(&sampler, Rotations::new(q0, Rotation::None), shots)?;
        let m = report.metrics;
        println!(
            "{:<6} {:<6} {:>8.3} {:>8.3} {:>9.3}",
            q0.to_string(),
            Rotation::None.to_string(),
            m.same,
            m.diff,
            m.strength
        );
    }

    // Same flip on both sides restores the original correlation
    let report = correlation::run(&sampler, Rotations::new(Rotation::X, Rotation::X), shots)?;
    println!("\nx on both qubits:");
    println!("{}", report.circuit);
    println!("{}", report.counts);

    Ok(())
}
