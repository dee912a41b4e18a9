//! Tiered candidate filtering
//!
//! The filter is pure: the same candidates and query always give the same
//! result. Matching is case-insensitive via lowercase normalisation.
//!
//! | query length | rule            | cap          |
//! |--------------|-----------------|--------------|
//! | 0            | everything      | `browse_cap` |
//! | 1            | prefix          | `display_cap`|
//! | 2+           | substring       | `display_cap`|

use std::collections::HashSet;

use super::candidate::Candidate;
use crate::config::AutocompleteConfig;

/// Result of filtering: ordered and capped.
pub type FilterResult = Vec<Candidate>;

/// Matching rule selected by the query length
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Empty query: every candidate matches
    All,
    /// Single character: lowercase prefix
    Prefix(String),
    /// Two or more characters: lowercase substring
    Substring(String),
}

impl MatchRule {
    /// Pick the rule for a query.
    ///
    /// Length is counted in characters, not bytes, so a single accented
    /// letter still selects the prefix rule.
    pub fn for_query(query: &str) -> Self {
        match query.chars().count() {
            0 => MatchRule::All,
            1 => MatchRule::Prefix(query.to_lowercase()),
            _ => MatchRule::Substring(query.to_lowercase()),
        }
    }

    /// Check a candidate against this rule
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            MatchRule::All => true,
            MatchRule::Prefix(needle) => candidate.to_lowercase().starts_with(needle.as_str()),
            MatchRule::Substring(needle) => candidate.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Narrows a candidate set to what should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterEngine {
    /// Cap for non-empty queries
    display_cap: usize,
    /// Cap for the empty query
    browse_cap: usize,
    /// Drop repeated candidates
    dedupe: bool,
}

impl FilterEngine {
    /// Create a filter engine with explicit caps.
    pub fn new(display_cap: usize, browse_cap: usize) -> Self {
        Self {
            display_cap,
            browse_cap,
            dedupe: true,
        }
    }

    /// Build a filter engine from the autocomplete configuration
    pub fn from_config(config: &AutocompleteConfig) -> Self {
        Self::new(config.display_cap, config.browse_cap).with_dedupe(config.dedupe)
    }

    /// Enable or disable duplicate removal
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Cap applied for the given query
    pub fn cap_for(&self, query: &str) -> usize {
        if query.is_empty() {
            self.browse_cap
        } else {
            self.display_cap
        }
    }

    /// Filter `candidates` against `query`.
    ///
    /// Source order is preserved. Duplicates (when enabled) are removed
    /// before the cap is applied, so a repeated entry never costs a slot.
    pub fn filter(&self, candidates: &[Candidate], query: &str) -> FilterResult {
        let rule = MatchRule::for_query(query);
        let cap = self.cap_for(query);
        let mut seen: HashSet<&str> = HashSet::new();

        candidates
            .iter()
            .filter(|c| rule.matches(c.as_str()))
            .filter(|c| !self.dedupe || seen.insert(c.as_str()))
            .take(cap)
            .cloned()
            .collect()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(10, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::candidate::candidates_from;

    fn names(result: &FilterResult) -> Vec<&str> {
        result.iter().map(Candidate::as_str).collect()
    }

    #[test]
    fn test_substring_match() {
        let items = candidates_from(["apple", "banana", "cherry", "chicken", "beef"]);
        let result = FilterEngine::default().filter(&items, "ch");
        assert_eq!(names(&result), vec!["cherry", "chicken"]);
    }

    #[test]
    fn test_empty_query_browse_cap() {
        let items = candidates_from((0..150).map(|i| format!("item {i:03}")));
        let result = FilterEngine::default().filter(&items, "");

        assert_eq!(result.len(), 100);
        for (i, candidate) in result.iter().enumerate() {
            assert_eq!(candidate.as_str(), format!("item {i:03}"));
        }
    }

    #[test]
    fn test_single_char_is_prefix_only() {
        let items = candidates_from(["cherry", "chicken", "beef", "zucchini"]);
        let result = FilterEngine::default().filter(&items, "c");
        assert_eq!(names(&result), vec!["cherry", "chicken"]);

        let result = FilterEngine::default().filter(&items, "e");
        assert!(result.is_empty(), "substring-only match leaked: {result:?}");
    }

    #[test]
    fn test_case_insensitive() {
        let items = candidates_from(["Chicken Breast", "chickpeas", "CHIVES"]);
        let result = FilterEngine::default().filter(&items, "cHi");
        assert_eq!(names(&result), vec!["Chicken Breast", "chickpeas", "CHIVES"]);

        let result = FilterEngine::default().filter(&items, "C");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_display_cap_keeps_source_order() {
        let items = candidates_from((0..30).map(|i| format!("salt {i}")));
        let result = FilterEngine::default().filter(&items, "salt");

        assert_eq!(result.len(), 10);
        assert_eq!(result[0], "salt 0");
        assert_eq!(result[9], "salt 9");
    }

    #[test]
    fn test_single_char_capped() {
        let items = candidates_from((0..25).map(|i| format!("c{i}")));
        let result = FilterEngine::default().filter(&items, "c");
        assert_eq!(result.len(), 10);
        assert!(result.iter().all(|c| c.as_str().starts_with('c')));
    }

    #[test]
    fn test_dedupe_before_cap() {
        let items = candidates_from([
            "egg", "egg", "eggplant", "egg", "egg noodles", "egg whites",
        ]);
        let engine = FilterEngine::new(3, 100);
        assert_eq!(names(&engine.filter(&items, "egg")), vec!["egg", "eggplant", "egg noodles"]);

        let engine = engine.with_dedupe(false);
        assert_eq!(names(&engine.filter(&items, "egg")), vec!["egg", "egg", "eggplant"]);
    }

    #[test]
    fn test_empty_candidates_total() {
        let engine = FilterEngine::default();
        for query in ["", "a", "ab", "zzz", "é", "  "] {
            let result = engine.filter(&[], query);
            assert!(result.is_empty());
        }
    }

    #[test]
    fn test_multibyte_single_char_is_prefix() {
        assert_eq!(MatchRule::for_query("é"), MatchRule::Prefix("é".to_string()));
        let items = candidates_from(["éclair", "crème fraîche"]);
        let result = FilterEngine::default().filter(&items, "é");
        assert_eq!(names(&result), vec!["éclair"]);
    }

    #[test]
    fn test_laws_over_many_queries() {
        let items = candidates_from([
            "salt", "olive oil", "butter", "garlic", "onion", "sugar", "eggs", "water",
            "black pepper", "milk", "vegetable oil", "brown sugar", "baking powder",
            "baking soda", "vanilla extract", "lemon juice", "parmesan cheese", "cinnamon",
        ]);
        let engine = FilterEngine::default();

        for query in ["", "s", "o", "b", "oil", "ar", "Ba", "n", "zz", "e"] {
            let result = engine.filter(&items, query);
            let rule = MatchRule::for_query(query);
            assert!(result.len() <= engine.cap_for(query));
            assert!(result.iter().all(|c| rule.matches(c.as_str())));

            // every match that fits under the cap is present, in source order
            let expected: Vec<&Candidate> = items
                .iter()
                .filter(|c| rule.matches(c.as_str()))
                .take(engine.cap_for(query))
                .collect();
            assert_eq!(result.iter().collect::<Vec<_>>(), expected, "query {query:?}");

            // pure
            assert_eq!(result, engine.filter(&items, query));
        }
    }
}
