use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Identifier of a seated player.
pub type PlayerId = String;

/// Action available to an agent during its turn.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the hand onto the discard pile. Wilds carry the color they
    /// switch play to.
    PlayCard {
        card: Card,
        chosen_color: Option<Color>,
    },
    /// Draw from the draw pile, paying any pending penalty first.
    DrawCard,
}

impl Action {
    /// Play action for a colored card.
    pub fn play(card: Card) -> Self {
        Action::PlayCard {
            card,
            chosen_color: None,
        }
    }

    /// Play action for a wild card with its chosen color.
    pub fn play_wild(card: Card, color: Color) -> Self {
        Action::PlayCard {
            card,
            chosen_color: Some(color),
        }
    }

    /// Returns the card if the action is a play.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::PlayCard { card, .. } => Some(*card),
            Action::DrawCard => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Action::DrawCard)
    }
}
