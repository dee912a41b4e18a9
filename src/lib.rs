//! Pantry Library
//!
//! Ingredient autocomplete core plus the terminal host around it.
//!
//! # Modules
//!
//! - `autocomplete`: Candidate sources, filtering and the autocomplete controller
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `formatter`: Output formatting and display
//! - `ingredients`: Bundled ingredient list and the ingredient form
//! - `repl`: Interactive ingredient entry
//! - `services`: Remote ingredient search and the recipe webhook
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pantry::autocomplete::{AutocompleteController, BoundValue};
//! use pantry::config::AutocompleteConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let bound = BoundValue::new();
//!     let controller = AutocompleteController::new(
//!         Arc::new(pantry::ingredients::bundled()),
//!         Arc::new(bound.clone()),
//!         &AutocompleteConfig::default(),
//!     );
//!
//!     controller.input_change("chi");
//!     for candidate in controller.settled().await.filtered {
//!         println!("{candidate}");
//!     }
//!
//!     controller.select(Some("chickpeas"));
//!     assert_eq!(bound.get(), "chickpeas");
//! }
//! ```

pub mod autocomplete;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod ingredients;
pub mod repl;
pub mod services;

// Re-export commonly used types
pub use autocomplete::{AutocompleteController, CandidateSource, ControllerState, FilterEngine};
pub use config::Config;
pub use error::{PantryError, Result};
pub use formatter::Formatter;
pub use repl::ReplEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
