//! Ingredient autocomplete core
//!
//! This module is split into several submodules:
//! - `candidate`: Candidate type and lenient payload decoding
//! - `filter`: Tiered, capped filtering of candidate sets
//! - `source`: Static and dynamic candidate sources
//! - `simulated`: In-memory search backend with artificial latency
//! - `binding`: Host value binding for committed values
//! - `controller`: The autocomplete state machine

mod binding;
mod candidate;
mod controller;
mod filter;
mod simulated;
mod source;

pub use binding::{BoundValue, ValueBinding};
pub use candidate::{
    Candidate, CandidateList, candidates_from, decode_candidates, decode_candidates_str,
};
pub use controller::{AutocompleteController, ControllerState, Key, KeyResponse};
pub use filter::{FilterEngine, FilterResult, MatchRule};
pub use simulated::SimulatedSearch;
pub(crate) use candidate::name_of;
pub use source::{CandidateSource, DynamicSource, IngredientSearch, Lookup, SourceStats, StaticSource};
