//! Quantum coin game: the quantum strategy (H before the referee moves)
//! against leaving the coin alone.

use qplay::scenarios::coin_game::{self, Scoreboard, Strategy};
use qplay::{Sampler, SamplingFailure, Simulator};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), SamplingFailure> {
    let sampler = Sampler::new(Simulator::seeded(7));
    let mut rng = StdRng::seed_from_u64(7);

    for strategy in [Strategy::Quantum, Strategy::Classical] {
        println!("\n=== {} strategy ===", strategy);

        let mut board = Scoreboard::new();
        for run in 1..=3 {
            let report = coin_game::play(&sampler, strategy, 10, &mut rng)?;
            board.record(&report);

            println!("Run {}:", run);
            for round in &report.rounds {
                println!(
                    "  Game {:>2}: referee {:<18} -> {} ({})",
                    round.game_number,
                    round.referee.to_string(),
                    if round.is_heads() { "Heads" } else { "Tails" },
                    if round.win { "win" } else { "loss" }
                );
            }
            println!(
                "  {}/{} wins ({:.1}%)",
                report.tally.wins,
                report.tally.games,
                report.tally.win_rate()
            );
        }

        // H then H is the identity, so the referee's superposition move
        // only ever hurts the classical player
        if let Some(rate) = board.win_rate() {
            println!("Overall: {} games, {:.1}% won", board.games_played(), rate);
        }
        println!(
            "Expected against a random referee: {:.0}%",
            strategy.analysis().expected * 100.0
        );
    }

    Ok(())
}
