use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::PlayerView;

/// Baseline bot that samples from the legal action set.
///
/// The eager variant only draws when it has nothing to play, which keeps games
/// short enough for bulk simulation.
pub struct RandomBot<R: Rng> {
    rng: R,
    eager: bool,
}

impl<R: Rng> RandomBot<R> {
    /// Samples uniformly, drawing included.
    pub fn new(rng: R) -> Self {
        Self { rng, eager: false }
    }

    /// Samples uniformly among plays, drawing only when no play exists.
    pub fn eager(rng: R) -> Self {
        Self { rng, eager: true }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn name(&self) -> &str {
        if self.eager { "eager" } else { "random" }
    }

    fn select_action(
        &mut self,
        _view: &PlayerView,
        legal_actions: &[Action],
        _player: &str,
    ) -> Option<Action> {
        if self.eager {
            let plays: Vec<&Action> = legal_actions.iter().filter(|a| !a.is_draw()).collect();
            if let Some(action) = plays.choose(&mut self.rng) {
                return Some((*action).clone());
            }
        }
        legal_actions.choose(&mut self.rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::init_game;

    #[test]
    fn picks_from_legal_actions() {
        let state = init_game(&["p1", "p2"], Some(5)).unwrap();
        let view = PlayerView::from_state(&state, "p1");
        let legal = state.legal_actions("p1");
        let mut bot = RandomBot::new(StdRng::seed_from_u64(1));
        for _ in 0..20 {
            let action = bot.select_action(&view, &legal, "p1").unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn eager_bot_prefers_plays() {
        let state = init_game(&["p1", "p2"], Some(5)).unwrap();
        let view = PlayerView::from_state(&state, "p1");
        let legal = state.legal_actions("p1");
        let mut bot = RandomBot::eager(StdRng::seed_from_u64(1));
        let action = bot.select_action(&view, &legal, "p1").unwrap();
        if legal.len() > 1 {
            assert!(!action.is_draw());
        } else {
            assert_eq!(action, Action::DrawCard);
        }
    }

    #[test]
    fn nothing_to_choose_from() {
        let state = init_game(&["p1", "p2"], Some(5)).unwrap();
        let view = PlayerView::from_state(&state, "p2");
        let mut bot = RandomBot::eager(StdRng::seed_from_u64(1));
        assert_eq!(bot.select_action(&view, &[], "p2"), None);
    }
}
