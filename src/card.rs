use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCard;

pub const MAX_NUMBER: u8 = 9;
pub const HAND_SIZE: usize = 7;
pub const DECK_SIZE: usize = 108;
pub const CARDS_PER_COLOR: usize = 19;
pub const WILDS_PER_KIND: usize = 4;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// One of the four suit colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Face value of a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Value {
    /// Action values every color carries two copies of, in deck order.
    pub const ACTIONS: [Value; 3] = [Value::Skip, Value::Reverse, Value::DrawTwo];

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Value::Wild | Value::WildDrawFour)
    }

    /// Number of cards the next player is forced to draw.
    #[inline]
    pub fn forced_draws(&self) -> usize {
        match self {
            Value::DrawTwo => 2,
            Value::WildDrawFour => 4,
            _ => 0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Skip => f.write_str("skip"),
            Value::Reverse => f.write_str("reverse"),
            Value::DrawTwo => f.write_str("draw_two"),
            Value::Wild => f.write_str("wild"),
            Value::WildDrawFour => f.write_str("wild_draw_four"),
        }
    }
}

/// A single card. Colored cards always carry a color, wilds never do.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    color: Option<Color>,
    value: Value,
}

impl Card {
    /// Builds a card, rejecting color/value combinations that cannot exist.
    pub fn new(color: Option<Color>, value: Value) -> Result<Self, InvalidCard> {
        if let Value::Number(n) = value {
            if n > MAX_NUMBER {
                return Err(InvalidCard::NumberOutOfRange(n));
            }
        }
        match (color, value.is_wild()) {
            (Some(color), true) => Err(InvalidCard::ColoredWild(value, color)),
            (None, false) => Err(InvalidCard::MissingColor(value)),
            _ => Ok(Self { color, value }),
        }
    }

    /// Shorthand for a colored card.
    pub fn colored(color: Color, value: Value) -> Result<Self, InvalidCard> {
        Self::new(Some(color), value)
    }

    pub const fn wild() -> Self {
        Self {
            color: None,
            value: Value::Wild,
        }
    }

    pub const fn wild_draw_four() -> Self {
        Self {
            color: None,
            value: Value::WildDrawFour,
        }
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    pub fn value(&self) -> Value {
        self.value
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.value.is_wild()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Some(color) => write!(f, "{color}_{}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}
