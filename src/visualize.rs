use std::fmt::Write;

use crate::action::Action;
use crate::state::{Direction, PlayerView};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Number of discards under the top card to list.
    pub discard_depth: usize,
    pub show_history: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            discard_depth: 4,
            show_history: true,
        }
    }
}

pub fn render_view(view: &PlayerView) -> String {
    render_view_with_options(view, VisualOptions::default())
}

pub fn render_view_with_options(view: &PlayerView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match &view.winner {
        Some(winner) => format!("Finished (winner: {winner})"),
        None => String::from("Ongoing"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(
        out,
        "Current player: {}{}",
        view.current_player,
        if view.current_player == view.self_player {
            " (You)"
        } else {
            ""
        }
    );
    let direction = match view.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(out, "Direction: {direction}");
    let top = view
        .top_discard
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("--"));
    let color = view
        .effective_color
        .map(|color| color.to_string())
        .unwrap_or_else(|| String::from("any"));
    let _ = writeln!(out, "Top card: {top}  |  Color to match: {color}");
    if options.discard_depth > 0 && view.discard_pile.len() > 1 {
        let below = view
            .discard_pile
            .iter()
            .rev()
            .skip(1)
            .take(options.discard_depth)
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "  beneath: {below}");
    }
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Pending draws: {}",
        view.draw_pile_count, view.pending_draws
    );
    let _ = writeln!(out, "Players:");
    for player in &view.players {
        let label_you = if player.id == view.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(
            out,
            "  {}{} - {} card(s){}",
            player.id, label_you, player.hand_size, current_tag
        );
    }
    if view.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let hand_display = view
            .hand
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "Hand: {hand_display}");
    }
    if options.show_history && !view.history.is_empty() {
        let _ = writeln!(out, "Recent events:");
        for entry in &view.history {
            let _ = writeln!(out, "  > {entry}");
        }
    }
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::PlayCard {
            card,
            chosen_color: Some(color),
        } if card.is_wild() => format!("Play {card} as {color}"),
        Action::PlayCard { card, .. } => format!("Play {card}"),
        Action::DrawCard => String::from("Draw"),
    }
}
