//! Candidate values and the payload decode boundary
//!
//! Everything that enters the autocomplete core as a [`Candidate`] has been
//! validated here: blank strings, `null`s, non-string names and unexpected
//! payload shapes are dropped, so the filter and the controller never have to
//! re-check their inputs.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::SourceError;

/// An ordered list of candidates, as produced by a source.
pub type CandidateList = Vec<Candidate>;

/// A single suggestion string. Never blank.
///
/// The text is reference counted, so clones handed out by a static list share
/// its storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(Arc<str>);

impl Candidate {
    /// Build a candidate from raw text.
    ///
    /// Surrounding whitespace is trimmed; returns `None` when nothing is left.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Arc::from(trimmed)))
        }
    }

    /// Borrow the display text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the display text
    pub fn into_string(self) -> String {
        self.0.to_string()
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Candidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Candidate {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Candidate {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Build a candidate list from plain strings, dropping blank entries.
pub fn candidates_from<I, S>(items: I) -> CandidateList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().filter_map(Candidate::new).collect()
}

/// Extract a display name from a JSON item.
///
/// Accepts either a bare string or an object with a string `name` field.
pub(crate) fn name_of(item: &Value) -> Option<&str> {
    match item {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("name").and_then(Value::as_str),
        _ => None,
    }
}

/// Decode candidates from an already-parsed JSON payload.
///
/// Accepted shapes are a bare array, or an object wrapping the array under
/// `results` (the Spoonacular search shape) or `items`. Any other shape
/// decodes to an empty list.
pub fn decode_candidates(payload: &Value) -> CandidateList {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map
            .get("results")
            .or_else(|| map.get("items"))
            .and_then(Value::as_array)
        {
            Some(items) => items,
            None => {
                tracing::debug!("payload object has no candidate array");
                return Vec::new();
            }
        },
        _ => {
            tracing::debug!("payload is neither an array nor an object");
            return Vec::new();
        }
    };

    let before = items.len();
    let decoded: CandidateList = items
        .iter()
        .filter_map(name_of)
        .filter_map(Candidate::new)
        .collect();

    if decoded.len() != before {
        tracing::debug!(
            dropped = before - decoded.len(),
            kept = decoded.len(),
            "dropped malformed candidate entries"
        );
    }

    decoded
}

/// Decode candidates from a raw response body.
///
/// Only a body that is not JSON at all is an error; every JSON document
/// decodes to some (possibly empty) list.
pub fn decode_candidates_str(body: &str) -> Result<CandidateList, SourceError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedPayload(e.to_string()))?;
    Ok(decode_candidates(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_rejects_blank() {
        assert!(Candidate::new("").is_none());
        assert!(Candidate::new("   ").is_none());
        assert_eq!(Candidate::new("  garlic ").unwrap(), "garlic");
    }

    #[test]
    fn test_candidate_serializes_as_plain_string() {
        let list = candidates_from(["rice", "beans"]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!(["rice", "beans"]));
    }

    #[test]
    fn test_decode_bare_array_of_strings() {
        let list = decode_candidates(&json!(["apple", "banana"]));
        assert_eq!(list, vec!["apple", "banana"]);
    }

    #[test]
    fn test_decode_wrapped_results() {
        let payload = json!({
            "results": [
                {"id": 9003, "name": "apple", "image": "apple.jpg"},
                {"id": 9040, "name": "banana"}
            ],
            "offset": 0,
            "number": 2
        });
        assert_eq!(decode_candidates(&payload), vec!["apple", "banana"]);
    }

    #[test]
    fn test_decode_drops_malformed_items() {
        let payload = json!([
            "cherry",
            null,
            42,
            {"id": 1},
            {"name": null},
            {"name": 7},
            {"name": "  "},
            {"name": "chicken"},
            ["nested"]
        ]);
        assert_eq!(decode_candidates(&payload), vec!["cherry", "chicken"]);
    }

    #[test]
    fn test_decode_unexpected_shapes_are_empty() {
        assert!(decode_candidates(&json!(null)).is_empty());
        assert!(decode_candidates(&json!("apple")).is_empty());
        assert!(decode_candidates(&json!({"results": "apple"})).is_empty());
        assert!(decode_candidates(&json!({"status": "failure"})).is_empty());
    }

    #[test]
    fn test_decode_str_rejects_non_json() {
        let err = decode_candidates_str("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, SourceError::MalformedPayload(_)));
        assert_eq!(decode_candidates_str("[]").unwrap(), Vec::<Candidate>::new());
    }
}
