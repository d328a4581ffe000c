//! Coercion of free-text model output into JSON.
//!
//! Models are told to return bare JSON but routinely wrap it in prose or a
//! markdown fence. Three strategies are tried in order and the first one
//! that yields a JSON object wins:
//!
//! 1. the whole text parsed as JSON;
//! 2. the interior of the first fenced block tagged `json`;
//! 3. the span from the first `{` to the last `}` in the text.
//!
//! Strategy 3 is greedy and can pick up stray braces in surrounding prose.
//! A coercion failure is terminal for the request; the model is not asked
//! again.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::LlmError;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("fence pattern is valid")
});

/// Which strategy produced the object. Reported in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    Fenced,
    Braces,
}

/// Parse `text` into a JSON object containing `expected_key`.
pub fn coerce_object(text: &str, expected_key: &str) -> Result<Map<String, Value>, LlmError> {
    let (strategy, object) = parse_object(text).ok_or_else(|| {
        warn!(text_len = text.len(), "model output contained no parseable JSON object");
        LlmError::Coercion("failed to parse LLM response".to_string())
    })?;

    debug!(?strategy, expected_key, "model output coerced");

    if !object.contains_key(expected_key) {
        warn!(expected_key, "model output is missing expected key");
        return Err(LlmError::Coercion(format!(
            "invalid response format from LLM: missing \"{expected_key}\""
        )));
    }

    Ok(object)
}

/// Coerce `text` and deserialize the list under `key` into typed items.
///
/// Any field type mismatch rejects the whole list.
pub fn extract_items<T: DeserializeOwned>(text: &str, key: &str) -> Result<Vec<T>, LlmError> {
    let mut object = coerce_object(text, key)?;
    let items = object.remove(key).unwrap_or(Value::Null);

    serde_json::from_value(items).map_err(|e| {
        warn!(key, error = %e, "model output failed schema validation");
        LlmError::SchemaViolation(format!("\"{key}\": {e}"))
    })
}

/// Run the three strategies in order, returning the first JSON object found.
///
/// Text that is already valid JSON is final: a top-level array or scalar is
/// not searched for nested objects.
pub fn parse_object(text: &str) -> Option<(Strategy, Map<String, Value>)> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return match value {
            Value::Object(object) => Some((Strategy::Direct, object)),
            _ => None,
        };
    }

    if let Some(object) = fenced_block(text).and_then(as_object) {
        return Some((Strategy::Fenced, object));
    }

    brace_span(text)
        .and_then(as_object)
        .map(|object| (Strategy::Braces, object))
}

/// Interior of the first fenced code block tagged `json`.
fn fenced_block(text: &str) -> Option<&str> {
    JSON_FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Span from the first `{` through the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn as_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
