//! qplay command-line interface
//!
//! Terminal front end for the three demos. Results are printed as tables,
//! or as JSON with `--json`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qplay::core::DEFAULT_SHOTS;
use qplay::sampling::StateShare;
use qplay::scenarios::coin_game::{self, Scoreboard, Strategy};
use qplay::scenarios::communication::{self, AliceOp};
use qplay::scenarios::correlation::{self, Rotation, Rotations};
use qplay::{Sampler, Simulator, SimulatorConfig};

/// Quantum circuit demos: communication, coin game, correlations
#[derive(Parser)]
#[command(name = "qplay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Seed for reproducible sampling
    #[arg(long, env = "QPLAY_SEED", global = true)]
    seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bell pair after Alice applies a gate to her qubit
    Communicate {
        /// Alice's operation (h, x, z, i)
        #[arg(short, long, default_value = "i")]
        op: AliceOp,

        /// Number of shots
        #[arg(short, long, env = "QPLAY_SHOTS", default_value_t = i64::from(DEFAULT_SHOTS), allow_negative_numbers = true)]
        shots: i64,
    },

    /// Play single-shot quantum coin games against a random referee
    Coin {
        /// Player strategy (quantum, classical)
        #[arg(long, default_value = "quantum")]
        strategy: Strategy,

        /// Number of games per run
        #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
        games: i64,

        /// Number of runs to accumulate on the scoreboard
        #[arg(long, default_value_t = 1)]
        runs: u32,
    },

    /// Bell pair measured after optional rotations on each qubit
    Correlate {
        /// Rotation on qubit 0 (none, h, x, y, z, s, t, sdg)
        #[arg(long, default_value = "none")]
        q0: Rotation,

        /// Rotation on qubit 1 (none, h, x, y, z, s, t, sdg)
        #[arg(long, default_value = "none")]
        q1: Rotation,

        /// Number of shots
        #[arg(short, long, env = "QPLAY_SHOTS", default_value_t = i64::from(DEFAULT_SHOTS), allow_negative_numbers = true)]
        shots: i64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimulatorConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    info!(?config, "Starting simulator");
    let sampler = Sampler::new(Simulator::with_config(config));

    match cli.command {
        Commands::Communicate { op, shots } => {
            let report = communication::run(&sampler, op, shots)
                .context("Error running simulation")?;
            if cli.json {
                return print_json(&report);
            }
            print_header(&format!("Quantum Communication (Alice's operation: {})", op.to_string().to_uppercase()));
            println!("{}", report.circuit);
            print_breakdown(&report.breakdown);
            print_section("Interpretation");
            if report.deterministic {
                print_result("Outcome", "deterministic");
            } else {
                print_result("Outcome", "probabilistic");
            }
            print_section("Theoretical Analysis");
            println!("  {}", style(report.analysis.state).bold());
            for note in report.analysis.notes {
                println!("  - {}", note);
            }
        }

        Commands::Coin { strategy, games, runs } => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut board = Scoreboard::new();
            let mut reports = Vec::new();
            for _ in 0..runs {
                let report = coin_game::play(&sampler, strategy, games, &mut rng)
                    .context("Error running game simulation")?;
                board.record(&report);
                reports.push(report);
            }
            if cli.json {
                #[derive(Serialize)]
                struct CoinOutput<'a> {
                    runs: &'a [coin_game::CoinGameReport],
                    scoreboard: Scoreboard,
                }
                return print_json(&CoinOutput { runs: &reports, scoreboard: board });
            }
            print_header(&format!("Quantum Coin Game ({strategy} strategy)"));
            for (run, report) in reports.iter().enumerate() {
                print_section(&format!("Run {}", run + 1));
                for round in &report.rounds {
                    println!(
                        "  Game {:<3} Referee: {:<18} {:<6} {}",
                        round.game_number,
                        round.referee.to_string(),
                        if round.is_heads() { "Heads" } else { "Tails" },
                        if round.win { style("WIN").green().bold() } else { style("LOSS").red().bold() }
                    );
                }
                print_result("Wins", format!("{}/{}", report.tally.wins, report.tally.games));
                print_result("Win rate", format!("{:.1}%", report.tally.win_rate()));
                if report.strategy_is_winning() {
                    print_success(&format!("Your {strategy} strategy is winning!"));
                } else {
                    print_info("Try switching to the quantum strategy for better results.");
                }
                if let Some(last) = report.last_round() {
                    println!();
                    println!("{}", last.circuit);
                }
            }
            print_section("Theoretical Analysis");
            let analysis = strategy.analysis();
            for odds in analysis.against {
                print_result(
                    &format!("Against {}", odds.referee),
                    format!("{:.0}%", odds.win_probability * 100.0),
                );
            }
            print_result("Overall expected", format!("~{:.0}%", analysis.expected * 100.0));

            print_section("Scoreboard");
            print_result("Games played", board.games_played());
            if let Some(rate) = board.win_rate() {
                print_result("Win rate", format!("{rate:.1}%"));
            }
        }

        Commands::Correlate { q0, q1, shots } => {
            let report = correlation::run(&sampler, Rotations::new(q0, q1), shots)
                .context("Error running simulation")?;
            if cli.json {
                return print_json(&report);
            }
            print_header("Quantum Correlation Explorer");
            println!("{}", report.circuit);
            print_breakdown(&report.breakdown);
            print_section("Correlation");
            print_result("Same state", format!("{:.3}", report.metrics.same));
            print_result("Different state", format!("{:.3}", report.metrics.diff));
            print_result("Strength", format!("{:.3}", report.metrics.strength));
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

fn print_breakdown(rows: &[StateShare]) {
    print_section("Measurement Results");
    for row in rows {
        print_result(
            &format!("State |{}>", row.state),
            format!("{} shots ({:.1}%)", row.count, row.percentage),
        );
    }
}
