use std::error::Error;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use unobot::bots::llm::DEFAULT_TIMEOUT;
use unobot::runner::{DEFAULT_MAX_TURNS, TurnObserver};
use unobot::{
    Action, GameState, LlmConfig, PlayerView, Provider, RunnerConfig, Seat, create_bot_with_llm,
    describe_action, play_game_observed, render_view,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play a single game of Uno between bots and/or humans.")]
struct Args {
    /// Seed for the deck and reshuffles
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Stop after the specified number of turns
    #[arg(long = "max-turns", default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,

    /// Show the acting player's view and chosen action each turn
    #[arg(long)]
    visualize: bool,

    /// Enable info-level logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Default provider for llm players: openrouter or groq
    #[arg(long = "llm-provider", default_value = "openrouter")]
    llm_provider: String,

    /// Per-request timeout for llm players, in seconds
    #[arg(long = "llm-timeout", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    llm_timeout: u64,

    /// Player specs (2-10): human[:name], random[:seed], eager[:seed], heuristic,
    /// llm[:[provider:]model]
    bots: Vec<String>,
}

/// Prints each turn as it happens.
struct Console {
    visualize: bool,
}

impl TurnObserver for Console {
    fn before_decision(&mut self, view: &PlayerView, _legal_actions: &[Action]) {
        if self.visualize {
            println!("{}", render_view(view));
        }
    }

    fn after_turn(&mut self, _player: &str, action: &Action, state: &GameState) {
        if self.visualize {
            println!("Chosen action: {}\n", describe_action(action));
        }
        if let Some(event) = state.history().back() {
            println!("> {event}");
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let bot_specs = if args.bots.is_empty() {
        vec![String::from("human"), String::from("eager")]
    } else {
        args.bots
    };
    let llm = LlmConfig {
        provider: Provider::parse(&args.llm_provider)?,
        timeout: Duration::from_secs(args.llm_timeout),
        ..LlmConfig::default()
    };

    let mut seats = Vec::with_capacity(bot_specs.len());
    for (index, spec) in bot_specs.iter().enumerate() {
        let bot = create_bot_with_llm(spec, index, args.seed, &llm)?;
        seats.push(Seat::new(format!("player_{index}"), bot));
    }

    println!("Starting Uno game with {} players.\n", seats.len());
    let config = RunnerConfig {
        max_turns: args.max_turns,
        seed: Some(args.seed),
    };
    let mut console = Console {
        visualize: args.visualize,
    };
    let result = play_game_observed(&mut seats, config, &mut console)?;

    match result.winner {
        Some(winner) => println!(
            "\nGame finished after {} turns. Winner: {winner}.",
            result.num_turns
        ),
        None => println!(
            "\nGame stopped after {} turns without a winner (turn limit {}).",
            result.num_turns, args.max_turns
        ),
    }
    Ok(())
}
