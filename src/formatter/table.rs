//! Table formatting for recipe results using tabled

use tabled::{
    Table, Tabled,
    settings::{Alignment, Color, Modify, Style, object::Rows, width::Width},
};

use crate::services::RecipeSummary;

/// Maximum width for the ingredient columns (characters)
const DEFAULT_MAX_COLUMN_WIDTH: usize = 40;

#[derive(Tabled)]
struct RecipeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Recipe")]
    title: String,
    #[tabled(rename = "Uses")]
    used: String,
    #[tabled(rename = "Missing")]
    missed: String,
}

impl RecipeRow {
    fn from_summary(index: usize, recipe: &RecipeSummary) -> Self {
        Self {
            index: index + 1,
            title: recipe.title.clone(),
            used: join_or_dash(&recipe.used_ingredients),
            missed: join_or_dash(&recipe.missed_ingredients),
        }
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Table formatter for recipe summaries
pub struct TableFormatter {
    max_column_width: usize,
    use_colors: bool,
}

impl TableFormatter {
    /// Create a table formatter
    ///
    /// # Arguments
    /// * `use_colors` - Color the header row
    pub fn new(use_colors: bool) -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            use_colors,
        }
    }

    /// Set maximum column width
    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    /// Render recipes as a rounded table
    pub fn format_recipes(&self, recipes: &[RecipeSummary]) -> String {
        if recipes.is_empty() {
            return "(no recipes)".to_string();
        }

        let rows = recipes
            .iter()
            .enumerate()
            .map(|(i, r)| RecipeRow::from_summary(i, r));
        let mut table = Table::new(rows);

        table
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(self.max_column_width)))
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }

        table.to_string()
    }
}
