use std::error::Error;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use unobot::runner::DEFAULT_MAX_TURNS;
use unobot::{Seat, TournamentConfig, create_bot_from_spec, label_for_spec, run_tournament};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = (0xC0FFEE_u64 << 32) | 0x5EED;

#[derive(Parser, Debug)]
#[command(
    name = "tournament",
    about = "Run many games and report per-player win counts."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 100)]
    games: usize,

    /// Base RNG seed (per-game seeds are derived from it)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on turns per game; capped games count for nobody
    #[arg(long = "max-turns", default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,

    /// Enable info-level logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Player bot specs: e.g., heuristic eager random llm:groq:MODEL (2-10 total)
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.len() < 2 {
        return Err("please provide at least 2 bot specs (e.g., heuristic eager)".into());
    }
    // Disallow human in batch runs; it would block waiting for input.
    if args.bots.iter().any(|spec| label_for_spec(spec) == "human") {
        return Err("human players are not supported in tournament runs".into());
    }

    let mut seats = Vec::with_capacity(args.bots.len());
    for (index, spec) in args.bots.iter().enumerate() {
        let bot = create_bot_from_spec(spec, index, args.seed)?;
        let id = format!("{}_{index}", label_for_spec(spec));
        seats.push(Seat::new(id, bot));
    }

    let result = run_tournament(
        &mut seats,
        TournamentConfig {
            num_games: args.games,
            seed: Some(args.seed),
            max_turns: args.max_turns,
        },
    )?;

    println!("Tournament results ({} games):", result.games);
    for (id, wins) in result.standings() {
        let rate = if result.games > 0 {
            wins as f64 / result.games as f64
        } else {
            0.0
        };
        println!("  {id:<16}  {wins:>5} wins  ({:.2}%)", rate * 100.0);
    }
    if result.games > 0 {
        println!(
            "\nAverage game length: {:.1} turns",
            result.total_turns as f64 / result.games as f64
        );
    }
    if result.unresolved > 0 {
        println!("Note: {} game(s) hit the turn cap without a winner.", result.unresolved);
    }
    Ok(())
}
