//! Response normalizer: turns raw LLM text into a validated analysis object.
//!
//! Steps: trim → strip a surrounding code fence → locate the first
//! brace-balanced substring that parses as a JSON object → check every
//! required field is an array → deserialize.
//!
//! [`normalize`] never fails: any error in those steps yields the caller's
//! heuristic payload, tagged [`AnalysisOutcome::HeuristicFallback`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// An analysis payload with a fixed set of array fields the LLM must return.
pub trait AnalysisShape: DeserializeOwned {
    const REQUIRED_ARRAYS: &'static [&'static str];
}

/// Provenance-tagged analysis result.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome<T> {
    AiDerived(T),
    HeuristicFallback(T),
}

impl<T> AnalysisOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::HeuristicFallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            AnalysisOutcome::AiDerived(value) | AnalysisOutcome::HeuristicFallback(value) => value,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' is not an array")]
    NotAnArray(&'static str),

    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

/// Normalizes `raw`, falling back to `fallback()` on any failure.
/// `fallback` must derive its payload from structured input, never from `raw`.
pub fn normalize<T, F>(raw: &str, fallback: F) -> AnalysisOutcome<T>
where
    T: AnalysisShape,
    F: FnOnce() -> T,
{
    match parse_analysis::<T>(raw) {
        Ok(value) => AnalysisOutcome::AiDerived(value),
        Err(e) => {
            warn!("AI response rejected ({e}); using heuristic fallback");
            AnalysisOutcome::HeuristicFallback(fallback())
        }
    }
}

pub fn parse_analysis<T: AnalysisShape>(raw: &str) -> Result<T, NormalizeError> {
    let object = extract_json_object(strip_code_fence(raw)).ok_or(NormalizeError::NoJsonObject)?;

    for &field in T::REQUIRED_ARRAYS {
        match object.get(field) {
            None => return Err(NormalizeError::MissingField(field)),
            Some(Value::Array(_)) => {}
            Some(_) => return Err(NormalizeError::NotAnArray(field)),
        }
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| NormalizeError::Shape(e.to_string()))
}

/// Strips a ```` ```json ```` / ```` ``` ```` fence wrapping the whole text, if present.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Finds the first `{` whose depth-balanced closing `}` yields a parseable JSON object.
/// Braces inside string literals are ignored when balancing.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    for (start, _) in text.match_indices('{') {
        let Some(end) = balanced_end(&text[start..]) else {
            continue;
        };
        if let Ok(Value::Object(map)) = serde_json::from_str(&text[start..start + end]) {
            return Some(map);
        }
    }
    None
}

/// Byte length of the brace-balanced span starting at `text[0] == '{'`.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
