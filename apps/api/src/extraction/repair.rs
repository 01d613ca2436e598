//! Tolerant repair of almost-JSON spans.
//!
//! The rules fix what models actually emit: word-processor quotes, Python
//! literals leaking out of a code-trained model, trailing commas, and output
//! cut off mid-structure by the token ceiling. Each rule is a pure
//! `&str -> String` pass, applied in a fixed order before one final strict
//! parse. A span the rules cannot save stays absent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Runs the repair rules over `span` and strictly parses the result.
pub fn parse_repaired(span: &str) -> Option<Value> {
    let s = normalize_quotes(span);
    let s = replace_python_literals(&s);
    let s = strip_trailing_commas(&s);
    let s = balance_delimiters(&s);
    serde_json::from_str(&s).ok()
}

// ── Rule 1: curly quotes to straight quotes ──

fn normalize_quotes(input: &str) -> String {
    input
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

// ── Rule 2: Python literals ──

static RE_TRUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bTrue\b").unwrap());
static RE_FALSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFalse\b").unwrap());
static RE_NONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNone\b").unwrap());

fn replace_python_literals(input: &str) -> String {
    let s = RE_TRUE.replace_all(input, "true");
    let s = RE_FALSE.replace_all(&s, "false");
    RE_NONE.replace_all(&s, "null").to_string()
}

// ── Rule 3: trailing commas before a closer ──

static RE_TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").unwrap());

fn strip_trailing_commas(input: &str) -> String {
    RE_TRAILING_COMMA.replace_all(input, "$1").to_string()
}

// ── Rule 4: close what the model left open ──

/// String-aware delimiter balancing. Scans once, tracking whether the cursor
/// is inside a string (escapes respected) and stacking `{`/`[` openers; an
/// unterminated string gets its closing quote, then missing `}`/`]` closers
/// are appended in stack order. Surplus closers are left alone for the final
/// parse to reject.
fn balance_delimiters(input: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.last() == Some(&c) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut out = input.to_string();
    if in_string {
        out.push('"');
    }
    while let Some(closer) = stack.pop() {
        out.push(closer);
    }
    out
}
