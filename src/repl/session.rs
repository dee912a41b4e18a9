//! Ingredient entry session: the form plus the controller filling it

use std::sync::Arc;

use crate::autocomplete::{AutocompleteController, BoundValue, CandidateSource, StaticSource};
use crate::config::AutocompleteConfig;
use crate::ingredients::IngredientForm;

/// What happened when a line was entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Added, and the name is on the ingredient list (or no list is loaded)
    Added(String),
    /// Added, but the name is not on the ingredient list
    Unrecognized(String),
    /// Nothing was committed
    Ignored,
}

/// State of one interactive session
pub struct Session {
    controller: AutocompleteController,
    bound: BoundValue,
    form: IngredientForm,
    known: Option<StaticSource>,
}

impl Session {
    /// Create a session
    ///
    /// # Arguments
    /// * `source` - Candidate source for suggestions
    /// * `known` - List used to flag unrecognized ingredients
    /// * `config` - Autocomplete configuration
    pub fn new(
        source: Arc<dyn CandidateSource>,
        known: Option<StaticSource>,
        config: &AutocompleteConfig,
    ) -> Self {
        let bound = BoundValue::new();
        let controller = AutocompleteController::new(source, Arc::new(bound.clone()), config);
        Self {
            controller,
            bound,
            form: IngredientForm::new(),
            known,
        }
    }

    /// Handle to the controller, for the completer and hinter
    pub fn controller(&self) -> AutocompleteController {
        self.controller.clone()
    }

    pub fn form(&self) -> &IngredientForm {
        &self.form
    }

    /// Commit an entered line into the current field and open a new one
    pub fn add(&mut self, entered: &str) -> AddOutcome {
        self.controller.select(Some(entered));
        let value = self.bound.get().trim().to_string();
        // the next field starts empty
        self.controller.set_value(None);

        if value.is_empty() {
            return AddOutcome::Ignored;
        }

        let slot = self.form.last_index();
        self.form.set(slot, value.clone());
        self.form.add_field();
        tracing::debug!(ingredient = %value, slot, "ingredient added");

        match &self.known {
            Some(list) if !list.is_known(&value) => AddOutcome::Unrecognized(value),
            _ => AddOutcome::Added(value),
        }
    }

    /// Remove the ingredient at a 1-based position among the entered ones
    pub fn remove(&mut self, position: usize) -> Option<String> {
        let index = self.entered_indices().into_iter().nth(position.checked_sub(1)?)?;
        self.form.remove(index)
    }

    /// Drop all ingredients
    pub fn clear(&mut self) {
        self.form.clear();
        self.controller.set_value(None);
    }

    /// Ingredients entered so far
    pub fn ingredients(&self) -> Vec<String> {
        self.form.valid_ingredients()
    }

    /// Close the suggestion list without committing
    pub fn dismiss(&self) {
        self.controller.dismiss();
    }

    fn entered_indices(&self) -> Vec<usize> {
        self.form
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.trim().is_empty())
            .map(|(i, _)| i)
            .collect()
    }
}
