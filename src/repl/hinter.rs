//! Hinter for reedline - feeds keystrokes to the controller and shows the
//! best suggestion inline

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use crate::autocomplete::AutocompleteController;

use super::command::COMMAND_PREFIX;

/// Inline hinter backed by the autocomplete controller
pub struct IngredientHinter {
    controller: AutocompleteController,
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl IngredientHinter {
    /// Create a hinter driving `controller`
    pub fn new(controller: AutocompleteController) -> Self {
        Self {
            controller,
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    /// Remainder of the first suggestion that extends `line`
    fn hint_for(&self, line: &str) -> Option<String> {
        let lowered = line.to_lowercase();
        self.controller
            .state()
            .filtered
            .iter()
            .map(|c| c.as_str())
            .find(|c| c.len() > line.len() && c.to_lowercase().starts_with(&lowered))
            .and_then(|c| c.get(line.len()..))
            .map(str::to_string)
    }
}

impl Hinter for IngredientHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        _history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        if line.starts_with(COMMAND_PREFIX) {
            return String::new();
        }

        // Each repaint reports the full line; only real edits reach the controller.
        if self.controller.state().query != line {
            self.controller.input_change(line);
        }

        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        match self.hint_for(line) {
            Some(hint) => {
                self.current_hint = hint;
                if use_ansi_coloring {
                    self.style.paint(&self.current_hint).to_string()
                } else {
                    self.current_hint.clone()
                }
            }
            None => String::new(),
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    fn next_hint_token(&self) -> String {
        let trimmed = self.current_hint.trim_start();
        let leading = self.current_hint.len() - trimmed.len();
        let word = trimmed.split_whitespace().next().unwrap_or_default();
        self.current_hint[..leading + word.len()].to_string()
    }
}
