use std::collections::HashSet;

use im::{OrdMap, Vector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::action::PlayerId;
use crate::card::{Card, Color, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::deck::create_deck;
use crate::error::GameError;
use crate::state::{Direction, GameState};

/// Mixed into the game seed so reshuffles do not replay the deck shuffle.
const RESHUFFLE_SALT: u64 = 0x5EED_5EED_5EED_5EED;

/// Deals a fresh game for `player_ids`, seating them in the given order.
pub fn init_game<S: AsRef<str>>(
    player_ids: &[S],
    seed: Option<u64>,
) -> Result<GameState, GameError> {
    let mut builder = GameBuilder::new(player_ids)?;
    if let Some(seed) = seed {
        builder = builder.with_seed(seed);
    }
    builder.build()
}

/// Builder that enables deterministic deck injection for testing and experiments.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    players: Vec<PlayerId>,
    seed: Option<u64>,
    deck: Option<Vec<Card>>,
    hand_size: usize,
}

impl GameBuilder {
    pub fn new<S: AsRef<str>>(player_ids: &[S]) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_ids.len()) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        let players: Vec<PlayerId> = player_ids
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        let unique: HashSet<&PlayerId> = players.iter().collect();
        if unique.len() != players.len() {
            return Err(GameError::InvalidConfiguration("player ids must be unique"));
        }
        Ok(Self {
            players,
            seed: None,
            deck: None,
            hand_size: HAND_SIZE,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use `deck` as dealt instead of a shuffled standard deck. Cards are drawn
    /// from the back.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the number of cards dealt to each player (7 by default).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn build(self) -> Result<GameState, GameError> {
        let GameBuilder {
            players,
            seed,
            deck,
            hand_size,
        } = self;
        if hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        let mut deck = deck.unwrap_or_else(|| create_deck(seed));
        if deck.len() < hand_size * players.len() {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal hands",
            ));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ RESHUFFLE_SALT),
            None => StdRng::from_entropy(),
        };

        let mut hands: OrdMap<PlayerId, Vector<Card>> = players
            .iter()
            .map(|id| (id.clone(), Vector::new()))
            .collect();
        for _ in 0..hand_size {
            for id in &players {
                let card = deck.pop().ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing hands",
                ))?;
                if let Some(hand) = hands.get_mut(id) {
                    hand.push_back(card);
                }
            }
        }

        let starter = flip_starter(&mut deck);
        let last_played_color = starter.and_then(|card| card.color()).unwrap_or(Color::Red);
        let discard_pile: Vector<Card> = starter.into_iter().collect();
        debug!(
            players = players.len(),
            starter = ?starter.map(|card| card.to_string()),
            draw_pile = deck.len(),
            "dealt new game"
        );

        Ok(GameState {
            hands,
            discard_pile,
            draw_pile: deck.into_iter().collect(),
            current_player: players[0].clone(),
            direction: Direction::Clockwise,
            last_played_color,
            pending_draws: 0,
            winner: None,
            player_order: players.into_iter().collect(),
            history: Vector::new(),
            rng,
        })
    }
}

/// Turns up the first non-wild card from the draw end of `deck`. Wilds met on
/// the way go back on top in the order they came off, so the first one set
/// aside is drawn first. Falls back to whatever card is on top when no colored
/// card remains.
fn flip_starter(deck: &mut Vec<Card>) -> Option<Card> {
    let mut held = Vec::new();
    let mut starter = None;
    while let Some(card) = deck.pop() {
        if card.is_wild() {
            held.push(card);
        } else {
            starter = Some(card);
            break;
        }
    }
    deck.extend(held.into_iter().rev());
    starter.or_else(|| deck.pop())
}
