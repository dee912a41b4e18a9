//! Output formatting for pantry
//!
//! This module renders the two kinds of results the CLI prints:
//! - Suggestion lists (controller state snapshots)
//! - Recipe generation outcomes
//!
//! Each can be printed as plain text, compact or pretty JSON, or a table.

mod colorizer;
mod table;

pub use colorizer::{AnsiColors, Colorizer};
pub use table::TableFormatter;

use serde::Serialize;
use serde_json::json;

use crate::autocomplete::ControllerState;
use crate::config::OutputFormat;
use crate::error::{PantryError, Result};
use crate::services::GenerationOutcome;

/// Main formatter for command output
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Colorizer for output highlighting
    colorizer: Colorizer,

    use_colors: bool,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            colorizer: Colorizer::new(use_colors),
            use_colors,
        }
    }

    /// The colorizer used for messages
    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    /// Format a suggestion list.
    ///
    /// Plain output prints one suggestion per line and marks the highlighted
    /// row; JSON output serializes the full state snapshot.
    pub fn format_suggestions(&self, state: &ControllerState) -> Result<String> {
        if self.format_type.is_json() {
            return self.to_json(state);
        }
        if state.filtered.is_empty() {
            return Ok(self.colorizer.dim("(no suggestions)"));
        }

        let lines: Vec<String> = state
            .filtered
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if state.highlighted == Some(i) {
                    self.colorizer.highlight(&format!("> {c}"))
                } else {
                    format!("  {c}")
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }

    /// Format a recipe generation outcome
    pub fn format_outcome(&self, outcome: &GenerationOutcome) -> Result<String> {
        if self.format_type.is_json() {
            return match outcome {
                GenerationOutcome::Recipes(recipes) => {
                    self.to_json(&json!({ "status": "ok", "recipes": recipes }))
                }
                GenerationOutcome::Accepted => {
                    self.to_json(&json!({ "status": "accepted", "recipes": [] }))
                }
            };
        }

        match (self.format_type, outcome) {
            (_, GenerationOutcome::Accepted) => Ok(self
                .colorizer
                .success("Request sent. Check your workflow for results.")),
            (OutputFormat::Table, GenerationOutcome::Recipes(recipes)) => {
                Ok(TableFormatter::new(self.use_colors).format_recipes(recipes))
            }
            (_, GenerationOutcome::Recipes(recipes)) if recipes.is_empty() => {
                Ok(self.colorizer.dim("(no recipes)"))
            }
            (_, GenerationOutcome::Recipes(recipes)) => Ok(recipes
                .iter()
                .map(|r| format!("{}\t{}", r.title, r.used_ingredients.join(", ")))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an error message
    pub fn format_error(&self, err: &PantryError) -> String {
        self.colorizer.error(&err.to_string())
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.format_type.is_pretty() {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.map_err(|e| PantryError::Generic(format!("JSON serialization failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::candidates_from;
    use crate::services::RecipeSummary;

    fn state() -> ControllerState {
        ControllerState {
            query: "ch".to_string(),
            is_open: true,
            is_loading: false,
            filtered: candidates_from(["cherry", "chicken"]),
            highlighted: Some(1),
        }
    }

    #[test]
    fn test_plain_suggestions_mark_highlight() {
        let out = Formatter::new(OutputFormat::Plain, false)
            .format_suggestions(&state())
            .unwrap();
        assert_eq!(out, "  cherry\n> chicken");
    }

    #[test]
    fn test_json_suggestions() {
        let out = Formatter::new(OutputFormat::Json, false)
            .format_suggestions(&state())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["query"], "ch");
        assert_eq!(value["filtered"][0], "cherry");
        assert_eq!(value["is_loading"], false);
    }

    #[test]
    fn test_empty_suggestions() {
        let out = Formatter::new(OutputFormat::Plain, false)
            .format_suggestions(&ControllerState::default())
            .unwrap();
        assert_eq!(out, "(no suggestions)");
    }

    #[test]
    fn test_outcome_formats() {
        let recipes = GenerationOutcome::Recipes(vec![RecipeSummary {
            id: Some(1),
            title: "Garlic Rice".to_string(),
            used_ingredients: vec!["garlic".to_string()],
            missed_ingredients: vec![],
        }]);

        let plain = Formatter::new(OutputFormat::Plain, false)
            .format_outcome(&recipes)
            .unwrap();
        assert_eq!(plain, "Garlic Rice\tgarlic");

        let json = Formatter::new(OutputFormat::Json, false)
            .format_outcome(&GenerationOutcome::Accepted)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "accepted");
        assert!(!json.contains('\n'));

        let table = Formatter::new(OutputFormat::Table, false)
            .format_outcome(&recipes)
            .unwrap();
        assert!(table.contains("Garlic Rice"));
    }

    #[test]
    fn test_pretty_json_outcome_lists_recipes() {
        let recipes = GenerationOutcome::Recipes(vec![RecipeSummary {
            id: None,
            title: "Bean Stew".to_string(),
            used_ingredients: vec!["beans".to_string()],
            missed_ingredients: vec!["thyme".to_string()],
        }]);

        let out = Formatter::new(OutputFormat::JsonPretty, false)
            .format_outcome(&recipes)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["recipes"][0]["title"], "Bean Stew");
        assert!(out.contains('\n'));
    }
}
