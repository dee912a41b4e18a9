//! Custom prompt implementation for the ingredient REPL

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing which ingredient slot is being filled
pub struct IngredientPrompt {
    /// 1-based number of the field being entered
    slot: usize,
    /// Number of ingredients collected so far
    collected: usize,
}

impl IngredientPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `slot` - 1-based field number
    /// * `collected` - Ingredients collected so far
    pub fn new(slot: usize, collected: usize) -> Self {
        Self { slot, collected }
    }
}

impl Prompt for IngredientPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        format!("ingredient {}> ", self.slot).into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        match self.collected {
            0 => "".into(),
            1 => "1 ingredient".into(),
            n => format!("{n} ingredients").into(),
        }
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({prefix}reverse-search: {}) ", history_search.term).into()
    }
}
