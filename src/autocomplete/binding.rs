//! Host value binding
//!
//! The controller reports committed values through a [`ValueBinding`], the
//! equivalent of a controlled input's `onValueChange`. The host pushes values
//! the other way with [`AutocompleteController::set_value`].
//!
//! [`AutocompleteController::set_value`]: super::AutocompleteController::set_value

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::BindingError;

/// Receives values committed by the controller
pub trait ValueBinding: Send + Sync {
    /// Called whenever the controller commits a value
    fn value_changed(&self, value: &str) -> Result<(), BindingError>;
}

impl<F> ValueBinding for F
where
    F: Fn(&str) -> Result<(), BindingError> + Send + Sync,
{
    fn value_changed(&self, value: &str) -> Result<(), BindingError> {
        self(value)
    }
}

/// A shared string cell that records every commit.
#[derive(Debug, Clone, Default)]
pub struct BoundValue {
    value: Arc<RwLock<String>>,
    commits: Arc<AtomicUsize>,
}

impl BoundValue {
    /// Create an empty bound value
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value
    pub fn get(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the value without counting a commit
    pub fn set(&self, value: impl Into<String>) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value.into();
    }

    /// Number of commits received
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::Relaxed)
    }
}

impl ValueBinding for BoundValue {
    fn value_changed(&self, value: &str) -> Result<(), BindingError> {
        self.set(value);
        self.commits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
