use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::action::PlayerId;
use crate::error::GameError;
use crate::runner::{DEFAULT_MAX_TURNS, RunnerConfig, Seat, play_game};

/// Knobs for a batch of games.
#[derive(Clone, Copy, Debug)]
pub struct TournamentConfig {
    pub num_games: usize,
    /// Seeds the per-game seeds; `None` makes the whole run unrepeatable.
    pub seed: Option<u64>,
    pub max_turns: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Aggregated results across a tournament.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TournamentResult {
    /// Wins per player id; every seated id is present.
    pub wins: BTreeMap<PlayerId, usize>,
    pub games: usize,
    /// Games that hit the turn cap.
    pub unresolved: usize,
    pub total_turns: usize,
}

impl TournamentResult {
    /// Players ordered by wins, most first, ties by id.
    pub fn standings(&self) -> Vec<(&PlayerId, usize)> {
        let mut rows: Vec<(&PlayerId, usize)> =
            self.wins.iter().map(|(id, wins)| (id, *wins)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

/// Plays `config.num_games` independent games. Even-numbered games seat players
/// in the given order and odd-numbered games in reverse, so nobody always opens.
pub fn run_tournament(
    seats: &mut [Seat],
    config: TournamentConfig,
) -> Result<TournamentResult, GameError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut result = TournamentResult {
        wins: seats.iter().map(|seat| (seat.id.clone(), 0)).collect(),
        ..TournamentResult::default()
    };

    for game_idx in 0..config.num_games {
        let reversed = game_idx % 2 == 1;
        if reversed {
            seats.reverse();
        }
        let outcome = play_game(
            seats,
            RunnerConfig {
                max_turns: config.max_turns,
                seed: Some(rng.next_u64()),
            },
        );
        if reversed {
            seats.reverse();
        }
        let outcome = outcome?;

        result.games += 1;
        result.total_turns += outcome.num_turns;
        match outcome.winner {
            Some(winner) => *result.wins.entry(winner).or_default() += 1,
            None => result.unresolved += 1,
        }
    }

    info!(
        games = result.games,
        unresolved = result.unresolved,
        "tournament finished"
    );
    Ok(result)
}
