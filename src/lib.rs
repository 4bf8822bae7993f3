//! Uno rules engine: deck, immutable game states, legal moves and transitions,
//! plus bots, a game driver and a tournament runner for experimentation.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod rules;
pub mod runner;
pub mod state;
pub mod tournament;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::{
    HeuristicBot, HumanBot, LlmBot, LlmConfig, Provider, RandomBot, create_bot_from_spec,
    create_bot_with_llm, label_for_spec,
};
pub use crate::card::{Card, Color, Value};
pub use crate::deck::{create_deck, standard_deck};
pub use crate::error::{AgentError, GameError, InvalidAction, InvalidCard};
pub use crate::game::{GameBuilder, init_game};
pub use crate::rules::{apply_action, get_legal_actions};
pub use crate::runner::{
    GameResult, GameRunner, RunnerConfig, Seat, TurnObserver, play_game, play_game_observed,
    settle_choice,
};
pub use crate::state::{Direction, GameState, PlayerPublicState, PlayerView};
pub use crate::tournament::{TournamentConfig, TournamentResult, run_tournament};
pub use crate::visualize::{VisualOptions, describe_action, render_view};
