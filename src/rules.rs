use im::Vector;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::action::{Action, PlayerId};
use crate::card::{Card, Color, Value};
use crate::error::{GameError, InvalidAction};
use crate::state::GameState;

/// Legal actions for `player` in `state`. See [`GameState::legal_actions`].
pub fn get_legal_actions(state: &GameState, player: &str) -> Vec<Action> {
    state.legal_actions(player)
}

/// Successor of `state` after `player` performs `action`. See
/// [`GameState::apply_action`].
pub fn apply_action(
    state: &GameState,
    player: &str,
    action: Action,
) -> Result<GameState, GameError> {
    state.apply_action(player, action)
}

impl GameState {
    /// Every action `player` may take right now.
    ///
    /// Empty once the game is won or when it is not `player`'s turn. A pending
    /// penalty leaves drawing as the only option. Otherwise each playable card is
    /// listed (wilds once per color) and drawing is always offered last.
    pub fn legal_actions(&self, player: &str) -> Vec<Action> {
        if self.winner.is_some() || self.current_player != player {
            return Vec::new();
        }
        if self.pending_draws > 0 {
            return vec![Action::DrawCard];
        }

        let mut actions = Vec::new();
        if let Some(hand) = self.hands.get(player) {
            for card in hand.iter().filter(|card| self.can_play(card)) {
                if card.is_wild() {
                    actions.extend(Color::ALL.iter().map(|&color| Action::play_wild(*card, color)));
                } else {
                    actions.push(Action::play(*card));
                }
            }
        }
        actions.push(Action::DrawCard);
        actions
    }

    /// Whether `card` may go on the current discard pile. Anything goes on an
    /// empty pile.
    pub fn can_play(&self, card: &Card) -> bool {
        let Some(top) = self.top_discard() else {
            return true;
        };
        let effective = top.color().unwrap_or(self.last_played_color);
        card.is_wild() || card.color() == Some(effective) || card.value() == top.value()
    }

    /// Returns the state that follows `player` performing `action`. `self` is
    /// left untouched.
    ///
    /// A finished game is returned unchanged.
    pub fn apply_action(&self, player: &str, action: Action) -> Result<GameState, GameError> {
        if self.winner.is_some() {
            return Ok(self.clone());
        }
        if !self.hands.contains_key(player) {
            return Err(GameError::UnknownPlayer(player.to_string()));
        }
        if self.current_player != player {
            return Err(InvalidAction::NotPlayersTurn {
                player: player.to_string(),
                current: self.current_player.clone(),
            }
            .into());
        }

        let mut next = self.clone();
        match action {
            Action::DrawCard => next.resolve_draw(player),
            Action::PlayCard { card, chosen_color } => {
                next.resolve_play(player, card, chosen_color)?
            }
        }
        Ok(next)
    }

    fn resolve_draw(&mut self, player: &str) {
        if self.pending_draws > 0 {
            let owed = std::mem::take(&mut self.pending_draws);
            let drawn = self.deal_to(player, owed);
            debug!(player, owed, drawn, "paid draw penalty");
            self.history
                .push_back(format!("{player} drew {drawn} cards (penalty)"));
        } else {
            let drawn = self.deal_to(player, 1);
            debug!(player, drawn, "drew a card");
            self.history.push_back(format!("{player} drew a card"));
        }
        self.pass_turn(1);
    }

    fn resolve_play(
        &mut self,
        player: &str,
        card: Card,
        chosen_color: Option<Color>,
    ) -> Result<(), GameError> {
        let color = match card.color() {
            Some(color) => color,
            None => chosen_color
                .ok_or_else(|| InvalidAction::MissingChosenColor(card.to_string()))?,
        };

        let remaining = {
            let hand = self
                .hands
                .get_mut(player)
                .ok_or_else(|| GameError::UnknownPlayer(player.to_string()))?;
            let index = hand.iter().position(|held| *held == card).ok_or_else(|| {
                InvalidAction::CardNotInHand {
                    player: player.to_string(),
                    card: card.to_string(),
                }
            })?;
            hand.remove(index);
            hand.len()
        };
        self.discard_pile.push_back(card);
        self.last_played_color = color;
        debug!(player, card = %card, %color, remaining, "played card");

        if remaining == 0 {
            self.winner = Some(player.to_string());
            self.history
                .push_back(format!("{player} played {card} and won"));
            return Ok(());
        }

        let entry = if card.is_wild() {
            format!("{player} played {card} (chose {color})")
        } else {
            format!("{player} played {card}")
        };
        self.history.push_back(entry);

        match card.value() {
            Value::Skip => self.pass_turn(2),
            Value::Reverse => {
                self.direction = self.direction.reversed();
                self.pass_turn(1);
            }
            Value::DrawTwo | Value::WildDrawFour => {
                let victim = self.player_after_current(1);
                let owed = card.value().forced_draws();
                let drawn = self.deal_to(&victim, owed);
                debug!(victim = %victim, owed, drawn, "forced draw");
                self.pass_turn(2);
            }
            Value::Number(_) | Value::Wild => self.pass_turn(1),
        }
        Ok(())
    }

    /// Moves `count` cards from the draw pile to `player`'s hand, reshuffling
    /// when the pile runs out. Returns how many cards actually moved.
    fn deal_to(&mut self, player: &str, count: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            let Some(card) = self.draw_one() else {
                break;
            };
            if let Some(hand) = self.hands.get_mut(player) {
                hand.push_back(card);
                drawn += 1;
            }
        }
        drawn
    }

    fn draw_one(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discards();
        }
        self.draw_pile.pop_back()
    }

    /// Turns every discard except the top card into a freshly shuffled draw pile.
    fn reshuffle_discards(&mut self) {
        if self.discard_pile.len() <= 1 {
            return;
        }
        let Some(top) = self.discard_pile.pop_back() else {
            return;
        };
        let mut recycled: Vec<Card> = self.discard_pile.iter().copied().collect();
        recycled.shuffle(&mut self.rng);
        debug!(cards = recycled.len(), "reshuffled discard pile into draw pile");
        self.draw_pile = recycled.into_iter().collect();
        self.discard_pile = Vector::unit(top);
    }

    fn player_after_current(&self, steps: usize) -> PlayerId {
        match self.seat_of(&self.current_player) {
            Some(seat) => {
                self.player_order[self.seat_after(seat, self.direction, steps)].clone()
            }
            None => self.current_player.clone(),
        }
    }

    fn pass_turn(&mut self, steps: usize) {
        self.current_player = self.player_after_current(steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DECK_SIZE;
    use crate::game::{GameBuilder, init_game};
    use crate::state::Direction;

    fn card(color: Color, value: Value) -> Card {
        Card::colored(color, value).unwrap()
    }

    #[test]
    fn penalty_draw_pays_all_pending_cards() {
        let state = init_game(&["p1", "p2", "p3"], Some(11)).unwrap();
        let state = GameState {
            pending_draws: 3,
            ..state
        };
        assert_eq!(state.legal_actions("p1"), vec![Action::DrawCard]);

        let next = state.apply_action("p1", Action::DrawCard).unwrap();
        assert_eq!(next.hand_size("p1"), 10);
        assert_eq!(next.pending_draws(), 0);
        assert_eq!(next.current_player(), "p2");
        assert_eq!(
            next.history().back().map(String::as_str),
            Some("p1 drew 3 cards (penalty)")
        );
        assert_eq!(next.total_cards(), DECK_SIZE);
    }

    #[test]
    fn penalty_draw_reports_cards_actually_drawn() {
        let deck = vec![
            card(Color::Blue, Value::Number(4)),
            card(Color::Red, Value::Number(1)),
            card(Color::Red, Value::Number(2)),
        ];
        let state = GameBuilder::new(&["p1", "p2"])
            .unwrap()
            .with_deck(deck)
            .with_hand_size(1)
            .build()
            .unwrap();
        let state = GameState {
            pending_draws: 4,
            ..state
        };
        let next = state.apply_action("p1", Action::DrawCard).unwrap();
        assert_eq!(next.hand_size("p1"), 1);
        assert_eq!(
            next.history().back().map(String::as_str),
            Some("p1 drew 0 cards (penalty)")
        );
        assert_eq!(next.current_player(), "p2");
    }

    #[test]
    fn input_state_is_not_modified() {
        let state = init_game(&["p1", "p2"], Some(21)).unwrap();
        let before = state.clone();
        let next = state.apply_action("p1", Action::DrawCard).unwrap();
        assert_eq!(state, before);
        assert_ne!(next, before);
    }

    #[test]
    fn rejects_out_of_turn_and_unknown_players() {
        let state = init_game(&["p1", "p2"], Some(21)).unwrap();
        assert!(state.legal_actions("p2").is_empty());
        assert!(matches!(
            state.apply_action("p2", Action::DrawCard),
            Err(GameError::InvalidAction(InvalidAction::NotPlayersTurn { .. }))
        ));
        assert_eq!(
            state.apply_action("nobody", Action::DrawCard),
            Err(GameError::UnknownPlayer("nobody".to_string()))
        );
    }

    #[test]
    fn rejects_card_not_in_hand() {
        let state = init_game(&["p1", "p2"], Some(8)).unwrap();
        let missing = Color::ALL
            .iter()
            .flat_map(|&color| (0..=9).map(move |n| card(color, Value::Number(n))))
            .find(|candidate| !state.hand("p1").unwrap().contains(candidate))
            .unwrap();
        let result = state.apply_action("p1", Action::play(missing));
        assert!(matches!(
            result,
            Err(GameError::InvalidAction(InvalidAction::CardNotInHand { .. }))
        ));
    }

    #[test]
    fn wild_requires_chosen_color() {
        let deck = vec![
            card(Color::Blue, Value::Number(4)),
            card(Color::Red, Value::Number(1)),
            card(Color::Green, Value::Number(2)),
            Card::wild(),
            card(Color::Red, Value::Number(3)),
            Card::wild(),
        ];
        let state = GameBuilder::new(&["p1", "p2"])
            .unwrap()
            .with_deck(deck)
            .with_hand_size(2)
            .build()
            .unwrap();
        let result = state.apply_action(
            "p1",
            Action::PlayCard {
                card: Card::wild(),
                chosen_color: None,
            },
        );
        assert_eq!(
            result,
            Err(GameError::InvalidAction(InvalidAction::MissingChosenColor(
                "wild".to_string()
            )))
        );

        let next = state
            .apply_action("p1", Action::play_wild(Card::wild(), Color::Yellow))
            .unwrap();
        assert_eq!(next.last_played_color(), Color::Yellow);
        assert_eq!(next.effective_color(), Ok(Color::Yellow));
        assert_eq!(
            next.history().back().map(String::as_str),
            Some("p1 played wild (chose yellow)")
        );
    }

    #[test]
    fn empty_discard_allows_every_card() {
        let state = init_game(&["p1", "p2"], Some(31)).unwrap();
        let state = GameState {
            discard_pile: Vector::new(),
            ..state
        };
        let hand = state.hand("p1").unwrap();
        let expected: usize = hand
            .iter()
            .map(|card| if card.is_wild() { 4 } else { 1 })
            .sum::<usize>()
            + 1;
        let actions = state.legal_actions("p1");
        assert_eq!(actions.len(), expected);
        assert_eq!(actions.last(), Some(&Action::DrawCard));
    }

    #[test]
    fn reshuffle_keeps_top_discard() {
        let state = init_game(&["p1", "p2"], Some(12)).unwrap();
        let top = card(Color::Green, Value::Number(6));
        let buried: Vector<Card> = state.draw_pile().clone();
        let mut discard = buried.clone();
        discard.push_back(top);
        let state = GameState {
            draw_pile: Vector::new(),
            discard_pile: discard,
            ..state
        };
        let total = state.total_cards();

        let next = state.apply_action("p1", Action::DrawCard).unwrap();
        assert_eq!(next.discard_pile(), &Vector::unit(top));
        assert_eq!(next.draw_pile().len(), buried.len() - 1);
        assert_eq!(next.hand_size("p1"), state.hand_size("p1") + 1);
        assert_eq!(next.total_cards(), total);
    }

    #[test]
    fn reverse_flips_direction_back() {
        let state = init_game(&["p1", "p2", "p3"], Some(2)).unwrap();
        let state = GameState {
            direction: Direction::CounterClockwise,
            ..state
        };
        assert_eq!(state.player_after_current(1), "p3");
        assert_eq!(state.player_after_current(2), "p2");
    }
}
