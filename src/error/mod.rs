//! Error handling for pantry.
//!
//! Suggestion lookups are recovered locally and never produce an error for
//! the host; the types here cover configuration, the recipe webhook, the
//! search backends' internal failures and the host value binding.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{BindingError, ConfigError, PantryError, Result, SourceError, WebhookError};
