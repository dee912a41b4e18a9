//! In-memory search backend with artificial latency
//!
//! Serves a [`StaticSource`] through the asynchronous path so the debounce,
//! loading and stale-response handling can be exercised offline. Individual
//! queries can be scripted with their own latency or a forced failure.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::candidate::CandidateList;
use super::source::{IngredientSearch, StaticSource};
use crate::error::SourceError;

#[derive(Debug, Clone)]
enum Script {
    Delay(Duration),
    Fail(SourceError),
}

/// Search backend answering from a static list after a delay
#[derive(Debug, Clone)]
pub struct SimulatedSearch {
    list: StaticSource,
    latency: Duration,
    scripts: HashMap<String, Script>,
}

impl SimulatedSearch {
    /// Create a simulated backend over `list` with a fixed latency
    pub fn new(list: StaticSource, latency: Duration) -> Self {
        Self {
            list,
            latency,
            scripts: HashMap::new(),
        }
    }

    /// Answer `query` after `latency` instead of the default
    pub fn with_latency_for(mut self, query: &str, latency: Duration) -> Self {
        self.scripts
            .insert(query.to_lowercase(), Script::Delay(latency));
        self
    }

    /// Fail `query` with `error` after the default latency
    pub fn with_failure_for(mut self, query: &str, error: SourceError) -> Self {
        self.scripts.insert(query.to_lowercase(), Script::Fail(error));
        self
    }
}

#[async_trait]
impl IngredientSearch for SimulatedSearch {
    async fn search(&self, query: &str) -> Result<CandidateList, SourceError> {
        let script = self.scripts.get(&query.to_lowercase());
        let delay = match script {
            Some(Script::Delay(d)) => *d,
            _ => self.latency,
        };
        tokio::time::sleep(delay).await;

        if let Some(Script::Fail(err)) = script {
            return Err(err.clone());
        }
        Ok(self.list.matching(query))
    }
}
