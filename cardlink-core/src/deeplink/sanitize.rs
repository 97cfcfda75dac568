// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parameter Sanitizer
//!
//! Best-effort denylist scrubbing of navigation parameters. This is
//! defense in depth only: screens must still treat every parameter as
//! untrusted input. Use [`is_safe_identifier`] where a value has a known
//! shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::ParamMap;

/// Maximum length of a sanitized parameter value, in characters.
pub const MAX_PARAM_LENGTH: usize = 1000;

/// Maximum length accepted by [`is_safe_identifier`].
const MAX_IDENTIFIER_LENGTH: usize = 128;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));

static JAVASCRIPT_PROTOCOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));

static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").expect("valid regex"));

static DROP_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)drop\s+table").expect("valid regex"));

/// Scrubs one string value and truncates it to `max_len` characters.
pub fn sanitize_value(value: &str, max_len: usize) -> String {
    // Removing one match can join the halves of another, so scrub until
    // nothing changes. Every pass only removes characters.
    let mut cleaned = value.to_string();
    loop {
        let next = scrub_once(&cleaned);
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    match cleaned.char_indices().nth(max_len) {
        Some((cut, _)) => cleaned[..cut].to_string(),
        None => cleaned,
    }
}

fn scrub_once(value: &str) -> String {
    let mut cleaned = SCRIPT_BLOCK.replace_all(value, "").into_owned();
    cleaned = JAVASCRIPT_PROTOCOL.replace_all(&cleaned, "").into_owned();
    cleaned = EVENT_HANDLER.replace_all(&cleaned, "").into_owned();
    cleaned.retain(|c| !matches!(c, '\'' | '"' | ';'));
    cleaned = cleaned.replace("--", "");
    DROP_TABLE.replace_all(&cleaned, "").into_owned()
}

/// Scrubs every string value of a parameter bag. Other values are kept as-is.
pub fn sanitize_params(params: &ParamMap, max_len: usize) -> ParamMap {
    params
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => Value::String(sanitize_value(s, max_len)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Allow-list check for identifiers: `[A-Za-z0-9_-]`, 1 to 128 characters.
pub fn is_safe_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LENGTH
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
