//! Completer for reedline - provides completion suggestions

use reedline::{Completer, Span, Suggestion};
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::autocomplete::{AutocompleteController, ControllerState};

use super::command::{COMMAND_PREFIX, COMMANDS};

/// Ingredient completer for reedline
///
/// Ingredient lines are completed from the controller's settled suggestions;
/// lines starting with `:` complete command names.
pub struct IngredientCompleter {
    controller: AutocompleteController,
}

impl IngredientCompleter {
    /// Create a completer driving `controller`
    pub fn new(controller: AutocompleteController) -> Self {
        Self { controller }
    }

    /// Wait for any outstanding lookup when a multi-threaded runtime is
    /// available, otherwise take the current state.
    fn settled_state(&self) -> ControllerState {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.controller.settled()))
            }
            _ => self.controller.state(),
        }
    }

    fn complete_command(prefix: &str, pos: usize) -> Vec<Suggestion> {
        let prefix = prefix.to_lowercase();
        COMMANDS
            .iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(name, description)| Suggestion {
                value: name.to_string(),
                description: Some(description.to_string()),
                span: Span::new(0, pos),
                append_whitespace: *name == ":remove",
                ..Suggestion::default()
            })
            .collect()
    }
}

impl Completer for IngredientCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let prefix = line.get(..pos).unwrap_or(line);
        if prefix.starts_with(COMMAND_PREFIX) {
            return Self::complete_command(prefix, pos);
        }

        if self.controller.state().query != prefix {
            self.controller.input_change(prefix);
        }
        let state = self.settled_state();
        tracing::debug!(query = %prefix, results = state.filtered.len(), "completing ingredient");

        state
            .filtered
            .into_iter()
            .map(|candidate| Suggestion {
                value: candidate.into_string(),
                span: Span::new(0, pos),
                ..Suggestion::default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::autocomplete::{BoundValue, DynamicSource, SimulatedSearch, StaticSource};
    use crate::config::AutocompleteConfig;

    fn list() -> StaticSource {
        StaticSource::from_strings(["cherry tomatoes", "chicken breast", "chickpeas", "butter"])
    }

    fn create_test_completer() -> IngredientCompleter {
        let controller = AutocompleteController::new(
            Arc::new(list()),
            Arc::new(BoundValue::new()),
            &AutocompleteConfig::default(),
        );
        IngredientCompleter::new(controller)
    }

    #[test]
    fn test_complete_ingredient() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("chick", 5);

        let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["chicken breast", "chickpeas"]);
    }

    #[test]
    fn test_span_covers_whole_prefix() {
        let mut completer = create_test_completer();
        for suggestion in completer.complete("but", 3) {
            assert_eq!(suggestion.span.start, 0);
            assert_eq!(suggestion.span.end, 3);
        }
    }

    #[test]
    fn test_empty_line_browses() {
        let mut completer = create_test_completer();
        assert_eq!(completer.complete("", 0).len(), 4);
    }

    #[test]
    fn test_complete_commands() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete(":g", 2);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, ":generate");

        let all = completer.complete(":", 1);
        assert_eq!(all.len(), COMMANDS.len());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_complete_waits_for_dynamic_lookup() {
        let config = AutocompleteConfig {
            debounce_ms: 10,
            ..AutocompleteConfig::default()
        };
        let search = SimulatedSearch::new(list(), Duration::from_millis(20));
        let controller = AutocompleteController::new(
            Arc::new(DynamicSource::with_config(search, &config)),
            Arc::new(BoundValue::new()),
            &config,
        );
        let mut completer = IngredientCompleter::new(controller);

        let suggestions = completer.complete("chick", 5);
        assert_eq!(suggestions.len(), 2);
    }
}
