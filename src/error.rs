use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{Color, Value};

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid card: {0}")]
    InvalidCard(#[from] InvalidCard),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("the discard pile is empty")]
    EmptyDiscardPile,
    #[error("unknown player {0:?}")]
    UnknownPlayer(PlayerId),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Violations of the card color/value invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCard {
    #[error("wild card {0} cannot carry color {1}")]
    ColoredWild(Value, Color),
    #[error("card {0} requires a color")]
    MissingColor(Value),
    #[error("number {0} is outside 0..=9")]
    NumberOutOfRange(u8),
}

/// Details of invalid player actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("card {card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: String },
    #[error("wild card {0} requires a chosen color")]
    MissingChosenColor(String),
    #[error("it is {current}'s turn, not {player}'s")]
    NotPlayersTurn { player: PlayerId, current: PlayerId },
}

/// Failures while constructing an agent.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("unknown model provider {0:?} (expected openrouter or groq)")]
    UnknownProvider(String),
    #[error("API key required for {provider}; set {var}")]
    MissingApiKey {
        provider: &'static str,
        var: &'static str,
    },
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}
