//! Host-side services: candidate source construction, the Spoonacular
//! search backend and the recipe webhook.

mod spoonacular;
mod webhook;

pub use spoonacular::SpoonacularSearch;
pub use webhook::{
    GenerationOutcome, RecipeSummary, RecipeWebhook, decode_recipes, validate_ingredients,
};

use std::sync::Arc;
use std::time::Duration;

use crate::autocomplete::{CandidateSource, DynamicSource, SimulatedSearch};
use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::ingredients;

/// Build the candidate source selected by the configuration
pub fn candidate_source(config: &Config) -> Result<Arc<dyn CandidateSource>> {
    let source: Arc<dyn CandidateSource> = match config.source.kind {
        SourceKind::Static => Arc::new(ingredients::load(&config.source)?),
        SourceKind::Simulated => {
            let list = ingredients::load(&config.source)?;
            let latency = Duration::from_millis(config.source.simulated_latency_ms);
            Arc::new(DynamicSource::with_config(
                SimulatedSearch::new(list, latency),
                &config.autocomplete,
            ))
        }
        SourceKind::Spoonacular => {
            let search =
                SpoonacularSearch::from_config(&config.source, config.autocomplete.lookup_timeout())?;
            Arc::new(DynamicSource::with_config(search, &config.autocomplete))
        }
    };

    tracing::debug!(kind = ?config.source.kind, "candidate source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::Lookup;

    #[test]
    fn test_static_source_answers_synchronously() {
        let source = candidate_source(&Config::default()).unwrap();
        assert!(matches!(source.lookup("salt"), Lookup::Ready(ref list) if !list.is_empty()));
    }

    #[test]
    fn test_simulated_source_is_pending() {
        let mut config = Config::default();
        config.source.kind = SourceKind::Simulated;
        let source = candidate_source(&config).unwrap();

        assert!(!source.lookup("chi").is_ready());
        assert!(source.lookup("c").is_ready());
    }

    #[test]
    fn test_spoonacular_needs_key() {
        let mut config = Config::default();
        config.source.kind = SourceKind::Spoonacular;
        assert!(candidate_source(&config).is_err());

        config.source.api_key = Some("key".to_string());
        assert!(candidate_source(&config).is_ok());
    }
}
