use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, Color, Value};
use crate::state::{Direction, PlayerView};

/// Hand size at which the next opponent counts as about to win.
const DANGER_HAND_SIZE: usize = 2;

/// Rule-based bot that plays sensible moves without search.
///
/// In plain English:
/// - Always play something when possible; draw only as a last resort.
/// - Hold wilds back while colored plays exist, unless the next player is close
///   to going out, in which case hit them with the strongest attack available.
/// - Among colored cards shed action cards first, then high numbers.
/// - When playing a wild, name the color the bot holds most of.
#[derive(Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    fn next_opponent_hand(view: &PlayerView) -> Option<usize> {
        let len = view.player_order.len() as isize;
        let seat = view
            .player_order
            .iter()
            .position(|id| *id == view.self_player)? as isize;
        let step = match view.direction {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        };
        let next = &view.player_order[(seat + step).rem_euclid(len) as usize];
        view.hand_size_of(next)
    }

    fn score_play(card: Card, chosen_color: Option<Color>, view: &PlayerView, danger: bool) -> i32 {
        let base = match card.value() {
            Value::Number(n) => i32::from(n),
            Value::Skip | Value::Reverse => 20,
            Value::DrawTwo => 25,
            Value::Wild => -10,
            Value::WildDrawFour => -5,
        };
        let attack = if danger {
            match card.value() {
                Value::WildDrawFour => 200,
                Value::DrawTwo => 150,
                Value::Skip | Value::Reverse => 100,
                _ => 0,
            }
        } else {
            0
        };
        let color_bonus = chosen_color.map_or(0, |color| {
            view.hand
                .iter()
                .filter(|held| held.color() == Some(color))
                .count() as i32
        });
        base + attack + color_bonus
    }
}

impl Bot for HeuristicBot {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn select_action(
        &mut self,
        view: &PlayerView,
        legal_actions: &[Action],
        _player: &str,
    ) -> Option<Action> {
        let danger = Self::next_opponent_hand(view).is_some_and(|size| size <= DANGER_HAND_SIZE);
        let mut best: Option<(i32, &Action)> = None;
        for action in legal_actions {
            let Action::PlayCard { card, chosen_color } = action else {
                continue;
            };
            let score = Self::score_play(*card, *chosen_color, view, danger);
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, action));
            }
        }
        best.map(|(_, action)| action.clone())
            .or_else(|| legal_actions.iter().find(|a| a.is_draw()).cloned())
    }
}
