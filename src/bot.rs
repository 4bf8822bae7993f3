use crate::action::Action;
use crate::state::PlayerView;

/// Interface for anything that picks moves for a seat: scripted bots, humans at a
/// terminal, remote models.
pub trait Bot {
    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// Picks one of `legal_actions` for `player`. Returning `None` asks the driver
    /// to draw, or to take the first legal action when drawing is not allowed.
    fn select_action(
        &mut self,
        view: &PlayerView,
        legal_actions: &[Action],
        player: &str,
    ) -> Option<Action>;
}
