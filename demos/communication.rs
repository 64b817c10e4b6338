//! Bell-pair communication: Alice applies each of her four operations to
//! her half of the pair and Bob's joint measurement shows what changed.

use qplay::scenarios::communication::{self, AliceOp};
use qplay::{Sampler, SamplingFailure, Simulator};

fn main() -> Result<(), SamplingFailure> {
    // Seeded so repeated runs print the same histograms
    let sampler = Sampler::new(Simulator::seeded(42));
    let shots = 1024;

    for op in AliceOp::ALL {
        println!("\n=== Alice applies {} ===", op.to_string().to_uppercase());

        let report = communication::run(&sampler, op, shots)?;
        println!("{}", report.circuit);

        for share in &report.breakdown {
            println!("  |{}>: {:>5} shots ({:.1}%)", share.state, share.count, share.percentage);
        }

        // X moves all weight onto |01>/|10>, Z leaves the histogram alone
        if report.deterministic {
            println!("  Outcome is deterministic");
        } else {
            println!("  Outcome is probabilistic");
        }
        println!("  {}", report.analysis.state);
        for note in report.analysis.notes {
            println!("    - {}", note);
        }
    }

    Ok(())
}
