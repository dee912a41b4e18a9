//! Spoonacular ingredient search backend

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::autocomplete::{CandidateList, IngredientSearch, decode_candidates_str};
use crate::config::SourceConfig;
use crate::error::{ConfigError, Result, SourceError};

const SEARCH_PATH: &str = "food/ingredients/search";

/// Ingredient search over the Spoonacular REST API
#[derive(Clone)]
pub struct SpoonacularSearch {
    base_url: Url,
    api_key: String,
    results: u32,
    client: reqwest::Client,
}

impl SpoonacularSearch {
    /// Create a new search client
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://api.spoonacular.com`
    /// * `api_key` - Spoonacular API key
    /// * `results` - Number of results requested per lookup
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        results: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::from)?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            results,
            client,
        })
    }

    /// Build a search client from the source configuration.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &SourceConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("source.api_key".to_string()))?;
        let base_url = Url::parse(&config.spoonacular_url).map_err(|_| ConfigError::InvalidValue {
            field: "source.spoonacular_url".to_string(),
            value: config.spoonacular_url.clone(),
        })?;
        Self::new(base_url, api_key, config.results, timeout)
    }

    /// Build the search URL for `query`
    fn endpoint(&self, query: &str) -> std::result::Result<Url, SourceError> {
        let base_str = self.base_url.as_str().trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{base_str}/"))
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        let mut url = base
            .join(SEARCH_PATH)
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("number", &self.results.to_string())
            .append_pair("metaInformation", "true")
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl IngredientSearch for SpoonacularSearch {
    async fn search(&self, query: &str) -> std::result::Result<CandidateList, SourceError> {
        let url = self.endpoint(query)?;
        tracing::debug!(query = %query, "querying spoonacular");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        decode_candidates_str(&body)
    }
}

impl std::fmt::Debug for SpoonacularSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularSearch")
            .field("base_url", &self.base_url.as_str())
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::{CandidateSource, DynamicSource};
    use httpmock::prelude::*;
    use serde_json::json;

    fn search(base: &str) -> SpoonacularSearch {
        SpoonacularSearch::new(
            Url::parse(base).unwrap(),
            "secret",
            10,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let url = search("https://api.spoonacular.com").endpoint("olive oil").unwrap();
        assert_eq!(url.path(), "/food/ingredients/search");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".to_string(), "olive oil".to_string())));
        assert!(pairs.contains(&("number".to_string(), "10".to_string())));
        assert!(pairs.contains(&("apiKey".to_string(), "secret".to_string())));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = search("http://localhost:8080/proxy/").endpoint("rice").unwrap();
        assert_eq!(url.path(), "/proxy/food/ingredients/search");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = SourceConfig::default();
        let err = SpoonacularSearch::from_config(&config, Duration::from_secs(1)).unwrap_err();
        assert!(err.to_string().contains("source.api_key"));

        let config = SourceConfig {
            api_key: Some("k".to_string()),
            ..SourceConfig::default()
        };
        assert!(SpoonacularSearch::from_config(&config, Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", search("https://api.spoonacular.com"));
        assert!(!rendered.contains("secret"));
    }

    #[tokio::test]
    async fn test_search_sends_query_and_decodes_results() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/food/ingredients/search")
                    .query_param("query", "olive")
                    .query_param("number", "10")
                    .query_param("apiKey", "secret");
                then.status(200).json_body(json!({
                    "results": [{ "id": 1, "name": "olive oil" }, null, { "name": "olives" }]
                }));
            })
            .await;

        let found = search(&server.base_url()).search("olive").await.unwrap();

        mock.assert_async().await;
        assert_eq!(found, vec!["olive oil", "olives"]);
    }

    #[tokio::test]
    async fn test_error_status_degrades_to_empty_list() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/food/ingredients/search");
                then.status(402).body("quota exceeded");
            })
            .await;

        let source = DynamicSource::new(search(&server.base_url()));
        let list = source.lookup("rice").resolve().await;

        mock.assert_async().await;
        assert!(list.is_empty());
        assert_eq!(source.failure_count(), 1);
        assert_eq!(source.last_failure(), Some(SourceError::Status(402)));
    }
}
