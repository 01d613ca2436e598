//! Locating a JSON payload inside a raw LLM reply.
//!
//! Model output is not guaranteed to be well-formed JSON or cleanly fenced.
//! An ordered cascade of span patterns is tried first, each candidate span
//! parsed strictly; if no pattern yields valid JSON, a looser two-pattern
//! search feeds the tolerant repair parser before giving up.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::extraction::repair;

static RE_FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap());
static RE_FENCED_JSON_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```JSON\s*(.*?)\s*```").unwrap());
static RE_FENCED_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").unwrap());
// Greedy by intent: spans from the first `{` to the last `}` in the reply.
// A reply with unfenced commentary after the closing brace therefore fails
// to parse and counts as a miss for this strategy.
static RE_RAW_BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// One way of carving a candidate JSON span out of the reply.
/// Pure: no strategy inspects the outcome of another.
type SpanStrategy = fn(&str) -> Option<&str>;

/// Tried in order; the first span that parses as valid JSON wins.
const STRATEGIES: &[SpanStrategy] = &[fenced_json, fenced_json_upper, fenced_any, raw_braces];

fn fenced_json(text: &str) -> Option<&str> {
    RE_FENCED_JSON.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn fenced_json_upper(text: &str) -> Option<&str> {
    RE_FENCED_JSON_UPPER.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn fenced_any(text: &str) -> Option<&str> {
    RE_FENCED_ANY.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn raw_braces(text: &str) -> Option<&str> {
    RE_RAW_BRACES.find(text).map(|m| m.as_str())
}

/// Extracts the first parseable JSON value from an LLM reply, or `None`.
///
/// Any valid JSON document counts — object, array, or scalar. A span that a
/// pattern matches but that fails strict parsing does not short-circuit the
/// cascade; the next pattern still runs.
pub fn extract_json(reply: &str) -> Option<Value> {
    for strategy in STRATEGIES {
        if let Some(span) = strategy(reply) {
            if let Ok(value) = serde_json::from_str(span.trim()) {
                return Some(value);
            }
        }
    }
    loose_extract(reply)
}

/// Fallback for replies the strict cascade rejected: a simpler two-pattern
/// search (fenced `json` block, else the greedy raw-brace span) whose span
/// gets one strict parse and then a pass through the repair rules.
fn loose_extract(reply: &str) -> Option<Value> {
    let span = fenced_json(reply).or_else(|| raw_braces(reply))?;
    let span = span.trim();
    match serde_json::from_str(span) {
        Ok(value) => Some(value),
        Err(_) => repair::parse_repaired(span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json_block() {
        let reply = "```json\n{\"a\":1}\n```";
        assert_eq!(extract_json(reply), Some(json!({"a": 1})));
    }

    #[test]
    fn test_fenced_json_uppercase_tag() {
        let reply = "Here you go:\n```JSON\n{\"name\": \"Ada\"}\n```";
        assert_eq!(extract_json(reply), Some(json!({"name": "Ada"})));
    }

    #[test]
    fn test_untagged_fence() {
        let reply = "```\n[1, 2, 3]\n```";
        assert_eq!(extract_json(reply), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_raw_braces_without_fence() {
        let reply = "{\"a\": 1, \"b\": [1,2]}";
        assert_eq!(extract_json(reply), Some(json!({"a": 1, "b": [1, 2]})));
    }

    #[test]
    fn test_raw_braces_with_leading_prose() {
        let reply = "Sure! The extracted resume is {\"skills\": [\"rust\"]}";
        assert_eq!(extract_json(reply), Some(json!({"skills": ["rust"]})));
    }

    #[test]
    fn test_no_json_anywhere_is_absent() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn test_fenced_block_wins_over_raw_braces() {
        let reply = "{\"outer\": true}\n```json\n{\"inner\": true}\n```";
        assert_eq!(extract_json(reply), Some(json!({"inner": true})));
    }

    #[test]
    fn test_broken_fence_falls_through_to_braces() {
        // The fenced span is unparseable; the raw-brace strategy still runs.
        let reply = "```json\nnot json\n```\nactual: {\"ok\": true}";
        assert_eq!(extract_json(reply), Some(json!({"ok": true})));
    }

    #[test]
    fn test_greedy_braces_reject_trailing_commentary() {
        // Maximal munch swallows the commentary's final `}`-free text only
        // when there is a later `}`; here the span stays unparseable and the
        // repair rules cannot save it either.
        let reply = "{\"a\": 1} and also note that {this is not json}";
        assert_eq!(extract_json(reply), None);
    }

    #[test]
    fn test_loose_path_repairs_trailing_comma() {
        let reply = "```json\n{\"a\": 1,}\n```";
        assert_eq!(extract_json(reply), Some(json!({"a": 1})));
    }

    #[test]
    fn test_loose_path_repairs_python_literals() {
        let reply = "{\"active\": True, \"middle_name\": None}";
        assert_eq!(
            extract_json(reply),
            Some(json!({"active": true, "middle_name": null}))
        );
    }

    #[test]
    fn test_scalar_json_in_fence_is_valid() {
        assert_eq!(extract_json("```json\n42\n```"), Some(json!(42)));
    }
}
