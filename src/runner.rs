use tracing::{debug, info, warn};

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::init_game;
use crate::state::{GameState, PlayerView};

/// Turn cap applied when none is configured.
pub const DEFAULT_MAX_TURNS: usize = 1000;

/// A player id paired with the bot deciding for it.
pub struct Seat {
    pub id: PlayerId,
    pub bot: Box<dyn Bot>,
}

impl Seat {
    pub fn new(id: impl Into<PlayerId>, bot: Box<dyn Bot>) -> Self {
        Self { id: id.into(), bot }
    }
}

/// Knobs for a single game.
#[derive(Clone, Copy, Debug)]
pub struct RunnerConfig {
    /// Turns played before the game is abandoned without a winner.
    pub max_turns: usize,
    /// Deck and reshuffle seed; `None` plays an unrepeatable game.
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            seed: None,
        }
    }
}

/// Outcome of one game.
#[derive(Clone, Debug)]
pub struct GameResult {
    /// `None` when the turn cap was reached first.
    pub winner: Option<PlayerId>,
    pub num_turns: usize,
    pub player_ids: Vec<PlayerId>,
    pub final_state: GameState,
}

/// Hooks into each turn of [`play_game_observed`]. Both methods default to
/// doing nothing.
pub trait TurnObserver {
    /// Called with the acting player's view before its bot decides.
    fn before_decision(&mut self, _view: &PlayerView, _legal_actions: &[Action]) {}

    /// Called once `action` has been applied for `player`.
    fn after_turn(&mut self, _player: &str, _action: &Action, _state: &GameState) {}
}

impl TurnObserver for () {}

/// Runs a single game to completion.
pub struct GameRunner {
    seats: Vec<Seat>,
    config: RunnerConfig,
}

impl GameRunner {
    pub fn new(seats: Vec<Seat>, config: RunnerConfig) -> Self {
        Self { seats, config }
    }

    pub fn run(&mut self) -> Result<GameResult, GameError> {
        play_game(&mut self.seats, self.config)
    }

    pub fn run_observed(
        &mut self,
        observer: &mut dyn TurnObserver,
    ) -> Result<GameResult, GameError> {
        play_game_observed(&mut self.seats, self.config, observer)
    }

    pub fn into_seats(self) -> Vec<Seat> {
        self.seats
    }
}

/// Plays one game with `seats` in seating order.
///
/// Each turn the current player's bot sees its [`PlayerView`] and the legal
/// actions. A bot that passes, or answers with something illegal, draws if it
/// may and otherwise takes the first legal action.
pub fn play_game(seats: &mut [Seat], config: RunnerConfig) -> Result<GameResult, GameError> {
    play_game_observed(seats, config, &mut ())
}

/// [`play_game`] reporting every turn to `observer`.
pub fn play_game_observed(
    seats: &mut [Seat],
    config: RunnerConfig,
    observer: &mut dyn TurnObserver,
) -> Result<GameResult, GameError> {
    let player_ids: Vec<PlayerId> = seats.iter().map(|seat| seat.id.clone()).collect();
    let mut state = init_game(&player_ids, config.seed)?;
    let mut num_turns = 0usize;

    while !state.is_finished() && num_turns < config.max_turns {
        let current = state.current_player().clone();
        let legal = state.legal_actions(&current);
        if legal.is_empty() {
            break;
        }
        let seat = seats
            .iter_mut()
            .find(|seat| seat.id == current)
            .ok_or_else(|| GameError::UnknownPlayer(current.clone()))?;
        let view = PlayerView::from_state(&state, &current);
        observer.before_decision(&view, &legal);
        let choice = seat.bot.select_action(&view, &legal, &current);
        let action = settle_choice(choice, &legal, seat.bot.name());
        debug!(player = %current, ?action, "turn");
        state = state.apply_action(&current, action.clone())?;
        observer.after_turn(&current, &action, &state);
        num_turns += 1;
    }

    let winner = state.winner().cloned();
    match &winner {
        Some(winner) => info!(%winner, num_turns, "game finished"),
        None => info!(num_turns, "game stopped without a winner"),
    }
    Ok(GameResult {
        winner,
        num_turns,
        player_ids,
        final_state: state,
    })
}

/// Maps a bot's answer onto a legal action. `legal` must not be empty.
pub fn settle_choice(choice: Option<Action>, legal: &[Action], bot: &str) -> Action {
    if let Some(action) = choice {
        if legal.contains(&action) {
            return action;
        }
        warn!(bot, ?action, "bot chose an illegal action; falling back");
    }
    legal
        .iter()
        .find(|action| action.is_draw())
        .unwrap_or(&legal[0])
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    struct Passive;

    impl Bot for Passive {
        fn name(&self) -> &str {
            "passive"
        }

        fn select_action(&mut self, _: &PlayerView, _: &[Action], _: &str) -> Option<Action> {
            None
        }
    }

    #[derive(Default)]
    struct Recorder {
        decisions: usize,
        turns: Vec<(String, Action)>,
        last_history: Option<String>,
    }

    impl TurnObserver for Recorder {
        fn before_decision(&mut self, view: &PlayerView, legal_actions: &[Action]) {
            assert!(view.is_my_turn());
            assert!(!legal_actions.is_empty());
            self.decisions += 1;
        }

        fn after_turn(&mut self, player: &str, action: &Action, state: &GameState) {
            self.turns.push((player.to_string(), action.clone()));
            self.last_history = state.history().back().cloned();
        }
    }

    #[test]
    fn observer_sees_every_turn() {
        let mut seats = vec![
            Seat::new("p1", Box::new(Passive)),
            Seat::new("p2", Box::new(Passive)),
        ];
        let mut recorder = Recorder::default();
        let config = RunnerConfig {
            max_turns: 6,
            seed: Some(8),
        };
        let result = play_game_observed(&mut seats, config, &mut recorder).unwrap();
        assert_eq!(recorder.decisions, 6);
        assert_eq!(recorder.turns.len(), result.num_turns);
        let players: Vec<&str> = recorder.turns.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(players, ["p1", "p2", "p1", "p2", "p1", "p2"]);
        assert!(recorder.turns.iter().all(|(_, action)| action.is_draw()));
        assert_eq!(
            recorder.last_history.as_deref(),
            result.final_state.history().back().map(String::as_str)
        );
    }

    #[test]
    fn passing_means_drawing() {
        let legal = vec![Action::play(Card::wild()), Action::DrawCard];
        assert_eq!(settle_choice(None, &legal, "t"), Action::DrawCard);
    }

    #[test]
    fn illegal_choice_falls_back() {
        let legal = vec![Action::DrawCard];
        let illegal = Action::play(Card::wild_draw_four());
        assert_eq!(settle_choice(Some(illegal), &legal, "t"), Action::DrawCard);
    }

    #[test]
    fn turn_cap_ends_game_without_winner() {
        let seats = vec![
            Seat::new("p1", Box::new(Passive)),
            Seat::new("p2", Box::new(Passive)),
        ];
        let mut runner = GameRunner::new(
            seats,
            RunnerConfig {
                max_turns: 30,
                seed: Some(4),
            },
        );
        let result = runner.run().unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.num_turns, 30);
        assert_eq!(result.player_ids, vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(result.final_state.history().len(), 30);
        assert_eq!(result.final_state.hand_size("p1"), 7 + 15);
        assert_eq!(runner.into_seats().len(), 2);
    }
}
