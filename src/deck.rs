use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::{Card, Color, DECK_SIZE, MAX_NUMBER, Value, WILDS_PER_KIND};

/// Builds the full 108-card deck in deterministic order (unshuffled).
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        deck.push(colored(color, Value::Number(0)));
        let values = (1..=MAX_NUMBER)
            .map(Value::Number)
            .chain(Value::ACTIONS);
        for value in values {
            deck.push(colored(color, value));
            deck.push(colored(color, value));
        }
    }
    for _ in 0..WILDS_PER_KIND {
        deck.push(Card::wild());
        deck.push(Card::wild_draw_four());
    }
    deck
}

/// Builds and shuffles a full deck. The same seed always yields the same order;
/// without a seed the order comes from the thread-local generator.
pub fn create_deck(seed: Option<u64>) -> Vec<Card> {
    let mut deck = standard_deck();
    match seed {
        Some(seed) => deck.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => deck.shuffle(&mut rand::thread_rng()),
    }
    deck
}

fn colored(color: Color, value: Value) -> Card {
    match Card::colored(color, value) {
        Ok(card) => card,
        Err(err) => unreachable!("standard deck only holds valid cards: {err}"),
    }
}
