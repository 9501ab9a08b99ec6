//! Display heuristics for collaborator error payloads.
//!
//! The persistence services this application talks to return error bodies
//! in a handful of shapes (`message`, `detail`, or `title` fields), and
//! some of them leak framework stack traces. These helpers scrape a single
//! human-readable line out of whatever came back. Best-effort only: nothing
//! may depend on this cleanup succeeding, and the result is used purely for
//! display.

use serde_json::Value;

/// Extract a human-readable message from a collaborator error body.
///
/// Checks `message`, `detail`, then `title`, returning the first non-empty
/// string value. Returns `None` when the body carries none of them.
pub fn extract_error_message(body: &Value) -> Option<String> {
    for field in ["message", "detail", "title"] {
        if let Some(text) = body.get(field).and_then(Value::as_str) {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Reduce a raw collaborator error message to a single display line.
///
/// Keeps only the first line of a multi-line stack trace and strips a
/// leading exception-type prefix of the form `Some.Namespace.SomeException:`.
/// Fragile string matching against a specific backend's exception
/// formatting; a message that doesn't match the shape passes through
/// trimmed but otherwise untouched.
pub fn clean_error_message(raw: &str) -> String {
    let first_line = raw.lines().next().unwrap_or("").trim();
    strip_exception_prefix(first_line).trim().to_string()
}

/// Strip a leading `Dotted.Namespace.SomethingException:` prefix, if present.
fn strip_exception_prefix(line: &str) -> &str {
    if let Some((prefix, rest)) = line.split_once(':') {
        let prefix = prefix.trim();
        if prefix.contains('.')
            && !prefix.contains(char::is_whitespace)
            && prefix.ends_with("Exception")
        {
            return rest;
        }
    }
    line
}
