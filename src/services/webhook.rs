//! Recipe generation webhook
//!
//! Posts the selected ingredients to a user-configured workflow endpoint and
//! decodes whatever recipes come back. Workflows often acknowledge the
//! request and deliver results elsewhere, so an empty or non-JSON success
//! body is a valid outcome.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::autocomplete::name_of;
use crate::config::WebhookConfig;
use crate::error::{Result, WebhookError};

/// A recipe returned by the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: Option<u64>,
    pub title: String,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
}

/// Result of a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The workflow answered with recipes (possibly none)
    Recipes(Vec<RecipeSummary>),
    /// The workflow accepted the request without returning recipes
    Accepted,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    ingredients: &'a [String],
}

/// Client for the recipe generation webhook
#[derive(Debug, Clone)]
pub struct RecipeWebhook {
    url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl RecipeWebhook {
    /// Create a webhook client
    ///
    /// # Arguments
    /// * `url` - Webhook URL, must be http or https
    /// * `timeout` - Request timeout
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url.trim())
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| WebhookError::InvalidUrl(url.to_string()))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(WebhookError::from)?;

        Ok(Self {
            url: parsed,
            timeout,
            client,
        })
    }

    /// Create a webhook client from the configuration
    pub fn from_config(config: &WebhookConfig) -> Result<Self> {
        match config.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url, config.timeout()),
            _ => Err(WebhookError::MissingUrl.into()),
        }
    }

    /// Webhook URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send the ingredients and decode the response.
    ///
    /// Blank ingredients are dropped first; at least one must remain.
    pub async fn generate(&self, ingredients: &[String]) -> Result<GenerationOutcome> {
        let ingredients = validate_ingredients(ingredients)?;
        tracing::info!(url = %self.url, count = ingredients.len(), "sending ingredients to webhook");

        let response = self
            .client
            .post(self.url.clone())
            .json(&GenerationRequest {
                ingredients: &ingredients,
            })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(WebhookError::from)?
            .error_for_status()
            .map_err(WebhookError::from)?;

        let body = response.text().await.map_err(WebhookError::from)?;
        Ok(decode_outcome(&body))
    }
}

/// Trim the ingredients and drop blank ones.
pub fn validate_ingredients(ingredients: &[String]) -> std::result::Result<Vec<String>, WebhookError> {
    let valid: Vec<String> = ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();

    if valid.is_empty() {
        return Err(WebhookError::NoIngredients);
    }
    Ok(valid)
}

fn decode_outcome(body: &str) -> GenerationOutcome {
    if body.trim().is_empty() {
        return GenerationOutcome::Accepted;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => GenerationOutcome::Recipes(decode_recipes(&payload)),
        Err(err) => {
            tracing::debug!(error = %err, "webhook body is not JSON");
            GenerationOutcome::Accepted
        }
    }
}

/// Decode recipes from a webhook payload.
///
/// Accepts a bare array or an object with a `recipes` array. Entries without
/// a title are skipped; ingredient lists may hold strings or `{name}`
/// objects.
pub fn decode_recipes(payload: &Value) -> Vec<RecipeSummary> {
    let items = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("recipes").and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => &[],
        },
        _ => &[],
    };

    items.iter().filter_map(decode_recipe).collect()
}

fn decode_recipe(item: &Value) -> Option<RecipeSummary> {
    let title = item
        .get("title")
        .or_else(|| item.get("name"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())?;

    Some(RecipeSummary {
        id: item.get("id").and_then(Value::as_u64),
        title: title.to_string(),
        used_ingredients: names_in(item, "usedIngredients"),
        missed_ingredients: names_in(item, "missedIngredients"),
    })
}

fn names_in(item: &Value, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(name_of)
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PantryError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn hook(server: &MockServer) -> RecipeWebhook {
        RecipeWebhook::new(&server.url("/hook"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_new_rejects_non_http() {
        let err = RecipeWebhook::new("ftp://example.com", Duration::from_secs(1)).unwrap_err();
        assert!(err.to_string().contains("Invalid webhook URL"));
        assert!(RecipeWebhook::new("not a url", Duration::from_secs(1)).is_err());
        assert!(RecipeWebhook::new("https://hooks.example.com/x", Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_from_config_missing_url() {
        let config = WebhookConfig {
            url: Some("   ".to_string()),
            ..WebhookConfig::default()
        };
        let err = RecipeWebhook::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PantryError::Webhook(WebhookError::MissingUrl)
        ));
    }

    #[test]
    fn test_validate_ingredients() {
        let input = vec![" rice ".to_string(), "".to_string(), "  ".to_string(), "beans".to_string()];
        assert_eq!(validate_ingredients(&input).unwrap(), vec!["rice", "beans"]);

        let blank = vec![" ".to_string()];
        assert!(matches!(
            validate_ingredients(&blank),
            Err(WebhookError::NoIngredients)
        ));
    }

    #[tokio::test]
    async fn test_generate_without_ingredients_fails_before_sending() {
        // nothing listens here; validation must fail first
        let hook = RecipeWebhook::new("http://127.0.0.1:9/hook", Duration::from_secs(1)).unwrap();
        let err = hook.generate(&[String::new()]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::PantryError::Webhook(WebhookError::NoIngredients)
        ));
    }

    #[test]
    fn test_decode_recipes_bare_array() {
        let payload = json!([
            {
                "id": 7,
                "title": "Garlic Rice",
                "usedIngredients": [{"name": "garlic"}, {"name": "rice"}],
                "missedIngredients": ["butter"]
            },
            {"title": "  "},
            {"name": "Bean Stew"}
        ]);
        let recipes = decode_recipes(&payload);

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, Some(7));
        assert_eq!(recipes[0].used_ingredients, vec!["garlic", "rice"]);
        assert_eq!(recipes[0].missed_ingredients, vec!["butter"]);
        assert_eq!(recipes[1].title, "Bean Stew");
        assert!(recipes[1].used_ingredients.is_empty());
    }

    #[test]
    fn test_decode_recipes_wrapped_and_unknown() {
        let wrapped = json!({"recipes": [{"title": "Omelette"}]});
        assert_eq!(decode_recipes(&wrapped)[0].title, "Omelette");

        assert!(decode_recipes(&json!({"status": "ok"})).is_empty());
        assert!(decode_recipes(&json!(42)).is_empty());
    }

    #[test]
    fn test_decode_outcome_accepts_empty_and_text() {
        assert_eq!(decode_outcome(""), GenerationOutcome::Accepted);
        assert_eq!(decode_outcome("Workflow was started"), GenerationOutcome::Accepted);
        assert_eq!(
            decode_outcome(r#"{"message":"ok"}"#),
            GenerationOutcome::Recipes(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_generate_posts_ingredients_and_decodes_recipes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/hook")
                    .header("content-type", "application/json")
                    .json_body(json!({ "ingredients": ["rice", "beans"] }));
                then.status(200).json_body(json!({
                    "recipes": [{
                        "id": 7,
                        "title": "Rice and beans",
                        "usedIngredients": [{ "name": "rice" }, "beans"],
                        "missedIngredients": [{ "name": "cumin" }]
                    }]
                }));
            })
            .await;

        let ingredients = vec!["rice".to_string(), "  ".to_string(), " beans ".to_string()];
        let outcome = hook(&server).generate(&ingredients).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            GenerationOutcome::Recipes(vec![RecipeSummary {
                id: Some(7),
                title: "Rice and beans".to_string(),
                used_ingredients: vec!["rice".to_string(), "beans".to_string()],
                missed_ingredients: vec!["cumin".to_string()],
            }])
        );
    }

    #[tokio::test]
    async fn test_generate_empty_body_is_accepted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/hook");
                then.status(200);
            })
            .await;

        let outcome = hook(&server).generate(&["rice".to_string()]).await.unwrap();
        assert_eq!(outcome, GenerationOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_generate_reports_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/hook");
                then.status(500).body("workflow failed");
            })
            .await;

        let err = hook(&server).generate(&["rice".to_string()]).await.unwrap_err();
        assert!(matches!(err, PantryError::Webhook(WebhookError::Status(500))));
    }
}
