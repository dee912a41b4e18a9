//! Candidate sources
//!
//! A [`CandidateSource`] answers a query either immediately
//! ([`Lookup::Ready`]) or with a lazy future ([`Lookup::Pending`]). Pending
//! futures do no work until polled, which lets the controller hold one back
//! for the debounce window without issuing a request.
//!
//! Sources are total: failures are recorded and degrade to an empty list,
//! they never reach the controller as errors.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::candidate::{Candidate, CandidateList, candidates_from};
use super::filter::MatchRule;
use crate::config::AutocompleteConfig;
use crate::error::{Result, SourceError};

/// Outcome of asking a source for candidates
pub enum Lookup {
    /// Candidates available synchronously
    Ready(CandidateList),
    /// Candidates arrive later; the future is lazy and never fails
    Pending(BoxFuture<'static, CandidateList>),
}

impl Lookup {
    /// Check if the lookup completed synchronously
    pub fn is_ready(&self) -> bool {
        matches!(self, Lookup::Ready(_))
    }

    /// Resolve the lookup, awaiting it if necessary
    pub async fn resolve(self) -> CandidateList {
        match self {
            Lookup::Ready(list) => list,
            Lookup::Pending(fut) => fut.await,
        }
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Ready(list) => f.debug_tuple("Ready").field(list).finish(),
            Lookup::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Trait for producing completion candidates for a query
pub trait CandidateSource: Send + Sync {
    /// Look up candidates for `query`
    fn lookup(&self, query: &str) -> Lookup;
}

/// A fixed, preloaded candidate list.
///
/// The list is shared behind an `Arc`, so cloning a source and handing it to
/// many controllers costs nothing and needs no locking.
#[derive(Debug, Clone)]
pub struct StaticSource {
    entries: Arc<[Candidate]>,
}

impl StaticSource {
    /// Create a source over the given entries
    pub fn new(entries: impl IntoIterator<Item = Candidate>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Create a source from plain strings, dropping blank entries
    pub fn from_strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(candidates_from(items))
    }

    /// Parse one entry per line; blank lines are skipped
    pub fn from_lines(text: &str) -> Self {
        Self::from_strings(text.lines())
    }

    /// Load entries from a file with one name per line
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let source = Self::from_lines(&text);
        tracing::debug!(path = %path.display(), entries = source.len(), "loaded ingredient list");
        Ok(source)
    }

    /// All entries in source order
    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether `name` is a known entry (case-insensitive, trimmed)
    pub fn is_known(&self, name: &str) -> bool {
        let name = name.trim();
        !name.is_empty() && self.entries.iter().any(|e| e.as_str().eq_ignore_ascii_case(name))
    }

    /// Uncapped matches for `query`, using the same rule as the filter
    pub fn matching(&self, query: &str) -> CandidateList {
        let rule = MatchRule::for_query(query);
        self.entries
            .iter()
            .filter(|e| rule.matches(e.as_str()))
            .cloned()
            .collect()
    }
}

impl CandidateSource for StaticSource {
    fn lookup(&self, query: &str) -> Lookup {
        Lookup::Ready(self.matching(query))
    }
}

/// Trait for remote ingredient search backends
#[async_trait]
pub trait IngredientSearch: Send + Sync + 'static {
    /// Search for ingredients matching `query`
    async fn search(&self, query: &str) -> std::result::Result<CandidateList, SourceError>;
}

/// Failure bookkeeping for a dynamic source
#[derive(Debug, Default)]
pub struct SourceStats {
    lookups: AtomicU64,
    failures: AtomicU64,
    last_failure: Mutex<Option<SourceError>>,
}

impl SourceStats {
    fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self, err: SourceError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        *self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    /// Number of remote lookups issued
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of lookups that degraded to an empty list
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Most recent failure, if any
    pub fn last_failure(&self) -> Option<SourceError> {
        self.last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Asynchronous source wrapping a remote search backend.
///
/// Queries shorter than `min_query_len` (after trimming) are answered
/// immediately with an empty list. Longer queries produce a lazy future
/// bounded by `timeout`; any failure resolves to an empty list and is
/// recorded in [`SourceStats`].
pub struct DynamicSource<S: IngredientSearch> {
    search: Arc<S>,
    min_query_len: usize,
    timeout: Duration,
    stats: Arc<SourceStats>,
}

impl<S: IngredientSearch> DynamicSource<S> {
    /// Create a dynamic source with default thresholds
    pub fn new(search: S) -> Self {
        Self::with_config(search, &AutocompleteConfig::default())
    }

    /// Create a dynamic source using the autocomplete configuration
    pub fn with_config(search: S, config: &AutocompleteConfig) -> Self {
        Self {
            search: Arc::new(search),
            min_query_len: config.min_query_len,
            timeout: config.lookup_timeout(),
            stats: Arc::new(SourceStats::default()),
        }
    }

    /// Lookup and failure counters
    pub fn stats(&self) -> Arc<SourceStats> {
        Arc::clone(&self.stats)
    }

    /// Number of lookups that degraded to an empty list
    pub fn failure_count(&self) -> u64 {
        self.stats.failure_count()
    }

    /// Most recent failure, if any
    pub fn last_failure(&self) -> Option<SourceError> {
        self.stats.last_failure()
    }
}

impl<S: IngredientSearch> CandidateSource for DynamicSource<S> {
    fn lookup(&self, query: &str) -> Lookup {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.min_query_len {
            return Lookup::Ready(Vec::new());
        }

        let search = Arc::clone(&self.search);
        let stats = Arc::clone(&self.stats);
        let timeout = self.timeout;
        let query = trimmed.to_string();

        Lookup::Pending(Box::pin(async move {
            stats.record_lookup();
            let outcome = match tokio::time::timeout(timeout, search.search(&query)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout),
            };

            match outcome {
                Ok(list) => {
                    tracing::debug!(query = %query, results = list.len(), "ingredient search resolved");
                    list
                }
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "ingredient search failed");
                    stats.record_failure(err);
                    Vec::new()
                }
            }
        }))
    }
}
