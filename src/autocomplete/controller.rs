//! Autocomplete controller - the interactive state machine
//!
//! The controller owns the query, the open/closed state, the loading flag and
//! the displayed suggestions. Event handlers (`input_change`, `select`,
//! `key_down`, `focus`, `blur`, `dismiss`, `set_value`) run to completion
//! synchronously; the only asynchronous work is the debounce timer, the
//! remote lookup and the blur grace timer, each running as a Tokio task.
//!
//! # Ordering
//!
//! Every lookup is tagged with a monotonically increasing request id and the
//! query it was issued for. A resolution is applied only when both still
//! match the current request, so a slow response for an older query can
//! never overwrite fresher results. A new keystroke also cancels the previous
//! debounce timer and aborts its in-flight lookup.
//!
//! # Runtime
//!
//! Handlers that start timers (`input_change`/`set_value` with an
//! asynchronous source, and `blur`) must be called inside a Tokio runtime.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::binding::ValueBinding;
use super::candidate::{Candidate, CandidateList};
use super::filter::{FilterEngine, FilterResult};
use super::source::{CandidateSource, Lookup};
use crate::config::AutocompleteConfig;

/// Snapshot of everything the presentational shell needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControllerState {
    /// Current query text
    pub query: String,
    /// Whether the suggestion list should be rendered
    pub is_open: bool,
    /// Whether a lookup for the current query is outstanding
    pub is_loading: bool,
    /// Suggestions to display, possibly empty
    pub filtered: FilterResult,
    /// Keyboard-highlighted row in `filtered`
    pub highlighted: Option<usize>,
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    ArrowDown,
    ArrowUp,
    Other,
}

/// What the host should do with the key event after the controller saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// The controller handled the key; suppress the default action
    PreventDefault,
    /// The controller ignored the key
    Default,
}

struct PendingLookup {
    id: u64,
    query: String,
    cancel: CancellationToken,
}

struct Inner {
    state: ControllerState,
    /// Current candidate set (static matches or the last accepted response)
    candidates: CandidateList,
    next_request: u64,
    pending: Option<PendingLookup>,
    focused: bool,
    blur_epoch: u64,
}

impl Inner {
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!(request = pending.id, query = %pending.query, "cancelling lookup");
            pending.cancel.cancel();
        }
        self.state.is_loading = false;
    }

    fn close(&mut self) {
        self.state.is_open = false;
        self.state.highlighted = None;
    }
}

struct Shared {
    source: Arc<dyn CandidateSource>,
    binding: Arc<dyn ValueBinding>,
    engine: FilterEngine,
    debounce: Duration,
    blur_grace: Duration,
    commit_on_input: bool,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<ControllerState>,
}

/// Autocomplete controller binding a candidate source and the filter to
/// user input events.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct AutocompleteController {
    shared: Arc<Shared>,
}

impl AutocompleteController {
    /// Create a new controller
    ///
    /// # Arguments
    /// * `source` - Where candidates come from
    /// * `binding` - Receives committed values
    /// * `config` - Timing, capping and commit behaviour
    pub fn new(
        source: Arc<dyn CandidateSource>,
        binding: Arc<dyn ValueBinding>,
        config: &AutocompleteConfig,
    ) -> Self {
        let engine = FilterEngine::from_config(config);

        // Seed the browse list when the source can answer synchronously; a
        // pending lookup is dropped unpolled and costs nothing.
        let candidates = match guarded_lookup(source.as_ref(), "") {
            Lookup::Ready(list) => list,
            Lookup::Pending(_) => Vec::new(),
        };
        let state = ControllerState {
            filtered: engine.filter(&candidates, ""),
            ..ControllerState::default()
        };
        let (state_tx, _) = watch::channel(state.clone());

        Self {
            shared: Arc::new(Shared {
                source,
                binding,
                engine,
                debounce: config.debounce(),
                blur_grace: config.blur_grace(),
                commit_on_input: config.commit_on_input,
                inner: Mutex::new(Inner {
                    state,
                    candidates,
                    next_request: 0,
                    pending: None,
                    focused: false,
                    blur_epoch: 0,
                }),
                state_tx,
            }),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> ControllerState {
        self.shared.lock().state.clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.shared.state_tx.subscribe()
    }

    /// Handle a keystroke that changed the input text.
    ///
    /// Opens the list, re-filters the current candidates against the new
    /// text right away and, for an asynchronous source, schedules a
    /// debounced lookup that supersedes any earlier one.
    pub fn input_change(&self, text: &str) {
        {
            let mut inner = self.shared.lock();
            inner.state.query = text.to_string();
            inner.state.is_open = true;
            inner.state.highlighted = None;
            self.shared.refresh(&mut inner);
            self.shared.publish(&inner);
        }

        if self.shared.commit_on_input {
            self.shared.commit(text);
        }
    }

    /// Handle the selection of a suggestion.
    ///
    /// `None` stands for a missing selection and commits an empty value.
    /// Always closes the list.
    pub fn select(&self, candidate: Option<&str>) {
        let value = candidate.unwrap_or_default().to_string();
        {
            let mut inner = self.shared.lock();
            inner.cancel_pending();
            inner.state.query = value.clone();
            self.shared.refilter(&mut inner);
            inner.close();
            self.shared.publish(&inner);
        }
        debug!(value = %value, "suggestion selected");
        self.shared.commit(&value);
    }

    /// Handle a key press.
    pub fn key_down(&self, key: Key) -> KeyResponse {
        match key {
            Key::Enter => {
                self.enter();
                KeyResponse::PreventDefault
            }
            Key::Escape => {
                let mut inner = self.shared.lock();
                if !inner.state.is_open {
                    return KeyResponse::Default;
                }
                inner.close();
                self.shared.publish(&inner);
                KeyResponse::PreventDefault
            }
            Key::ArrowDown | Key::ArrowUp => {
                let mut inner = self.shared.lock();
                let len = inner.state.filtered.len();
                inner.state.is_open = true;
                inner.state.highlighted = match (len, inner.state.highlighted, key) {
                    (0, _, _) => None,
                    (_, None, Key::ArrowDown) => Some(0),
                    (_, None, _) => Some(len - 1),
                    (_, Some(i), Key::ArrowDown) => Some((i + 1) % len),
                    (_, Some(0), _) => Some(len - 1),
                    (_, Some(i), _) => Some(i - 1),
                };
                self.shared.publish(&inner);
                KeyResponse::PreventDefault
            }
            Key::Other => KeyResponse::Default,
        }
    }

    /// Handle the input gaining focus
    pub fn focus(&self) {
        let mut inner = self.shared.lock();
        inner.focused = true;
        // invalidates any pending blur close
        inner.blur_epoch += 1;
        inner.state.is_open = true;
        self.shared.publish(&inner);
    }

    /// Handle the input losing focus.
    ///
    /// The list closes after the grace delay unless focus came back, so a
    /// click on a suggestion can land first.
    pub fn blur(&self) {
        let epoch = {
            let mut inner = self.shared.lock();
            inner.focused = false;
            inner.blur_epoch += 1;
            inner.blur_epoch
        };

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(shared.blur_grace).await;
            shared.close_after_blur(epoch);
        });
    }

    /// Handle an interaction outside the widget: close immediately
    pub fn dismiss(&self) {
        let mut inner = self.shared.lock();
        inner.close();
        self.shared.publish(&inner);
    }

    /// Track a value pushed by the host.
    ///
    /// `None` (a missing value) is treated as the empty string. Candidates
    /// are refreshed for the new query but the list is not opened and
    /// nothing is committed back.
    pub fn set_value(&self, value: Option<&str>) {
        let value = value.unwrap_or_default();
        let mut inner = self.shared.lock();
        if inner.state.query == value {
            return;
        }
        inner.state.query = value.to_string();
        inner.state.highlighted = None;
        self.shared.refresh(&mut inner);
        self.shared.publish(&inner);
    }

    /// Wait until no debounce timer or lookup is outstanding and return the
    /// resulting state.
    pub async fn settled(&self) -> ControllerState {
        let mut rx = self.subscribe();
        loop {
            {
                let _ = rx.borrow_and_update();
                let inner = self.shared.lock();
                if inner.pending.is_none() {
                    return inner.state.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.state();
            }
        }
    }

    fn enter(&self) {
        let commit = {
            let mut inner = self.shared.lock();
            let highlighted = inner
                .state
                .highlighted
                .and_then(|i| inner.state.filtered.get(i))
                .map(Candidate::to_string);

            let value = match highlighted {
                Some(candidate) => {
                    inner.state.query = candidate.clone();
                    self.shared.refilter(&mut inner);
                    Some(candidate)
                }
                None if !inner.state.query.is_empty() => Some(inner.state.query.clone()),
                None => None,
            };

            inner.cancel_pending();
            inner.close();
            self.shared.publish(&inner);
            value
        };

        if let Some(value) = commit {
            debug!(value = %value, "enter committed value");
            self.shared.commit(&value);
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.state_tx.send_replace(inner.state.clone());
    }

    fn refilter(&self, inner: &mut Inner) {
        inner.state.filtered = self.engine.filter(&inner.candidates, &inner.state.query);
        if inner
            .state
            .highlighted
            .is_some_and(|i| i >= inner.state.filtered.len())
        {
            inner.state.highlighted = None;
        }
    }

    /// Supersede any outstanding lookup and ask the source about the current
    /// query.
    fn refresh(self: &Arc<Self>, inner: &mut Inner) {
        inner.cancel_pending();
        inner.next_request += 1;
        let id = inner.next_request;
        let query = inner.state.query.clone();

        match guarded_lookup(self.source.as_ref(), &query) {
            Lookup::Ready(list) => inner.candidates = list,
            Lookup::Pending(fut) => {
                let cancel = CancellationToken::new();
                inner.pending = Some(PendingLookup {
                    id,
                    query: query.clone(),
                    cancel: cancel.clone(),
                });
                trace!(request = id, query = %query, "scheduling lookup");
                tokio::spawn(Arc::clone(self).run_lookup(id, query, fut, cancel));
            }
        }

        self.refilter(inner);
    }

    async fn run_lookup(
        self: Arc<Self>,
        id: u64,
        query: String,
        fut: BoxFuture<'static, CandidateList>,
        cancel: CancellationToken,
    ) {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(self.debounce) => {}
        }

        if !self.begin_lookup(id) {
            return;
        }

        // The lookup runs in its own task so a panicking source is contained.
        let mut task = tokio::spawn(fut);
        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                task.abort();
                return;
            }
            outcome = &mut task => outcome,
        };

        let candidates = outcome.unwrap_or_else(|err| {
            warn!(query = %query, error = %err, "candidate lookup aborted");
            Vec::new()
        });
        self.resolve(id, &query, candidates);
    }

    fn begin_lookup(&self, id: u64) -> bool {
        let mut inner = self.lock();
        match &inner.pending {
            Some(pending) if pending.id == id => {
                inner.state.is_loading = true;
                self.publish(&inner);
                true
            }
            _ => false,
        }
    }

    fn resolve(&self, id: u64, query: &str, candidates: CandidateList) {
        let mut inner = self.lock();
        let current = matches!(
            &inner.pending,
            Some(pending) if pending.id == id && pending.query == query
        ) && inner.state.query == query;

        if !current {
            debug!(request = id, query = %query, "discarding stale lookup response");
            return;
        }

        debug!(request = id, query = %query, results = candidates.len(), "lookup resolved");
        inner.pending = None;
        inner.state.is_loading = false;
        inner.candidates = candidates;
        inner.state.highlighted = None;
        self.refilter(&mut inner);
        self.publish(&inner);
    }

    fn close_after_blur(&self, epoch: u64) {
        let mut inner = self.lock();
        if inner.focused || inner.blur_epoch != epoch {
            return;
        }
        inner.close();
        self.publish(&inner);
    }

    /// Push a value to the host; a rejected value degrades to an empty commit.
    fn commit(&self, value: &str) {
        match self.binding.value_changed(value) {
            Ok(()) => {}
            Err(err) if value.is_empty() => {
                warn!(error = %err, "value binding rejected empty commit");
            }
            Err(err) => {
                warn!(value = %value, error = %err, "value binding rejected commit, committing empty value");
                if let Err(err) = self.binding.value_changed("") {
                    warn!(error = %err, "value binding rejected empty commit");
                }
            }
        }
    }
}

/// Call a source, turning a panic into an empty answer.
fn guarded_lookup(source: &dyn CandidateSource, query: &str) -> Lookup {
    catch_unwind(AssertUnwindSafe(|| source.lookup(query))).unwrap_or_else(|_| {
        warn!(query = %query, "candidate source panicked");
        Lookup::Ready(Vec::new())
    })
}
