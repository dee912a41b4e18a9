//! Ingredient list and the ingredient entry form

mod form;

pub use form::IngredientForm;

use crate::autocomplete::StaticSource;
use crate::config::SourceConfig;
use crate::error::Result;

const BUNDLED: &str = include_str!("../../data/top-ingredients.txt");

/// The bundled list of common ingredients
pub fn bundled() -> StaticSource {
    StaticSource::from_lines(BUNDLED)
}

/// Load the configured ingredient list, falling back to the bundled one
pub fn load(config: &SourceConfig) -> Result<StaticSource> {
    match &config.ingredients_file {
        Some(path) => StaticSource::load(path),
        None => Ok(bundled()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_list() {
        let list = bundled();
        assert!(list.len() > 100);
        assert!(list.is_known("salt"));
        assert!(list.is_known("Olive Oil"));
        assert!(!list.is_known("unobtainium"));
        assert!(list.entries().iter().all(|e| !e.as_str().trim().is_empty()));
    }

    #[test]
    fn test_load_prefers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "saffron\n").unwrap();

        let config = SourceConfig {
            ingredients_file: Some(path),
            ..SourceConfig::default()
        };
        let list = load(&config).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.is_known("saffron"));

        assert!(load(&SourceConfig::default()).unwrap().len() > 100);
    }
}
