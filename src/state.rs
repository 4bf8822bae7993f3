use im::{OrdMap, Vector};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color};
use crate::error::GameError;

/// Number of history entries exposed through a [`PlayerView`].
pub const VIEW_HISTORY_LEN: usize = 10;

/// Direction of travel around the table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Signed seat offset of a single step.
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Complete game state.
///
/// States are values: every transition builds a new `GameState` and leaves the
/// previous one untouched. All collections are `im` persistent structures so a
/// transition clones in constant time and shares everything it did not change.
///
/// The reshuffle generator travels with the state, which makes a seeded game
/// reproducible end to end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) hands: OrdMap<PlayerId, Vector<Card>>,
    /// Top card is the back of the vector.
    pub(crate) discard_pile: Vector<Card>,
    /// Cards are drawn from the back of the vector.
    pub(crate) draw_pile: Vector<Card>,
    pub(crate) current_player: PlayerId,
    pub(crate) direction: Direction,
    pub(crate) last_played_color: Color,
    pub(crate) pending_draws: usize,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) player_order: Vector<PlayerId>,
    pub(crate) history: Vector<String>,
    pub(crate) rng: StdRng,
}

impl GameState {
    pub fn hand(&self, player: &str) -> Option<&Vector<Card>> {
        self.hands.get(player)
    }

    pub fn hand_size(&self, player: &str) -> usize {
        self.hands.get(player).map_or(0, Vector::len)
    }

    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    pub fn top_discard(&self) -> Option<&Card> {
        self.discard_pile.back()
    }

    /// Top of the discard pile where the caller cannot proceed without one.
    pub fn require_top_discard(&self) -> Result<Card, GameError> {
        self.top_discard().copied().ok_or(GameError::EmptyDiscardPile)
    }

    /// Color the next play must match: the top card's own color, or the color
    /// chosen for it when the top card is wild.
    pub fn effective_color(&self) -> Result<Color, GameError> {
        let top = self.require_top_discard()?;
        Ok(top.color().unwrap_or(self.last_played_color))
    }

    pub fn current_player(&self) -> &PlayerId {
        &self.current_player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_played_color(&self) -> Color {
        self.last_played_color
    }

    pub fn pending_draws(&self) -> usize {
        self.pending_draws
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn player_order(&self) -> &Vector<PlayerId> {
        &self.player_order
    }

    pub fn history(&self) -> &Vector<String> {
        &self.history
    }

    /// Cards across every hand and both piles.
    pub fn total_cards(&self) -> usize {
        self.hands.values().map(Vector::len).sum::<usize>()
            + self.discard_pile.len()
            + self.draw_pile.len()
    }

    pub(crate) fn seat_of(&self, player: &str) -> Option<usize> {
        self.player_order.iter().position(|id| id == player)
    }

    /// Seat reached by taking `steps` single steps from `seat` in `direction`.
    pub(crate) fn seat_after(&self, seat: usize, direction: Direction, steps: usize) -> usize {
        let len = self.player_order.len() as isize;
        let offset = direction.step() * steps as isize;
        (seat as isize + offset).rem_euclid(len) as usize
    }
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub hand_size: usize,
    pub is_current: bool,
    pub has_won: bool,
}

/// Game state snapshot for one seat. Other players' cards appear only as counts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub self_player: PlayerId,
    pub hand: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub top_discard: Option<Card>,
    pub effective_color: Option<Color>,
    pub last_played_color: Color,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub pending_draws: usize,
    pub draw_pile_count: usize,
    pub winner: Option<PlayerId>,
    pub player_order: Vec<PlayerId>,
    /// One entry per seat, in table order.
    pub players: Vec<PlayerPublicState>,
    /// Most recent history entries, oldest first.
    pub history: Vec<String>,
}

impl PlayerView {
    pub fn from_state(state: &GameState, player: &str) -> Self {
        let players = state
            .player_order
            .iter()
            .map(|id| PlayerPublicState {
                id: id.clone(),
                hand_size: state.hand_size(id),
                is_current: *id == state.current_player,
                has_won: state.winner.as_ref() == Some(id),
            })
            .collect();
        let skip = state.history.len().saturating_sub(VIEW_HISTORY_LEN);

        Self {
            self_player: player.to_string(),
            hand: state
                .hand(player)
                .map(|hand| hand.iter().copied().collect())
                .unwrap_or_default(),
            discard_pile: state.discard_pile.iter().copied().collect(),
            top_discard: state.top_discard().copied(),
            effective_color: state.effective_color().ok(),
            last_played_color: state.last_played_color,
            current_player: state.current_player.clone(),
            direction: state.direction,
            pending_draws: state.pending_draws,
            draw_pile_count: state.draw_pile.len(),
            winner: state.winner.clone(),
            player_order: state.player_order.iter().cloned().collect(),
            players,
            history: state.history.iter().skip(skip).cloned().collect(),
        }
    }

    pub fn is_my_turn(&self) -> bool {
        self.winner.is_none() && self.current_player == self.self_player
    }

    /// Hand size of any seated player.
    pub fn hand_size_of(&self, player: &str) -> Option<usize> {
        self.players
            .iter()
            .find(|p| p.id == player)
            .map(|p| p.hand_size)
    }
}
