use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::state::PlayerView;
use crate::visualize::{describe_action, render_view};

/// Interactive bot that queries a human through a line-oriented terminal.
pub struct HumanBot<R = StdinLock<'static>, W = Stdout> {
    name: String,
    input: R,
    output: W,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_io(name, io::stdin().lock(), io::stdout())
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl<R: BufRead, W: Write> HumanBot<R, W> {
    pub fn with_io(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn prompt(&mut self, view: &PlayerView, legal_actions: &[Action]) -> io::Result<()> {
        writeln!(self.output, "\n=== {}'s turn ({}) ===", self.name, view.self_player)?;
        writeln!(self.output, "{}", render_view(view))?;
        writeln!(self.output, "Available actions:")?;
        for (index, action) in legal_actions.iter().enumerate() {
            writeln!(self.output, "  [{index}] {}", describe_action(action))?;
        }
        writeln!(self.output, "Type the action index, 'd' to draw, 'help' or 'q' to quit.")?;
        write!(self.output, "Selection: ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Bot for HumanBot<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_action(
        &mut self,
        view: &PlayerView,
        legal_actions: &[Action],
        _player: &str,
    ) -> Option<Action> {
        if legal_actions.is_empty() {
            return None;
        }
        loop {
            if self.prompt(view, legal_actions).is_err() {
                eprintln!("failed to write prompt");
            }
            let mut input = String::new();
            match self.input.read_line(&mut input) {
                // Closed input: hand the decision back to the driver.
                Ok(0) => return None,
                Ok(_) => {}
                Err(_) => {
                    eprintln!("failed to read input");
                    continue;
                }
            }
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                let _ = writeln!(self.output, "Exiting game at user's request.");
                std::process::exit(0);
            }
            if trimmed.eq_ignore_ascii_case("d") || trimmed.eq_ignore_ascii_case("draw") {
                return None;
            }
            if trimmed.eq_ignore_ascii_case("help") {
                let _ = writeln!(
                    self.output,
                    "Enter the number listed next to the action you wish to perform."
                );
                let _ = writeln!(
                    self.output,
                    "Play a card matching the color or value of the top card, or any wild."
                );
                continue;
            }
            let Ok(choice) = trimmed.parse::<usize>() else {
                let _ = writeln!(self.output, "Invalid input: '{trimmed}'. Please enter a number.");
                continue;
            };
            if let Some(action) = legal_actions.get(choice) {
                let _ = writeln!(self.output, "You selected: {}", describe_action(action));
                return Some(action.clone());
            }
            let _ = writeln!(self.output, "Index out of range. Please choose a valid option.");
        }
    }
}
