//! Query-string codec for filter state.
//!
//! The URL query string is the sole persisted representation of filter
//! state across navigations. Encoding omits empty dimensions, joins
//! multi-value dimensions with commas, and never emits the internal
//! `dateFrom`/`dateTo` bounds. Decoding treats absence as "no filter";
//! both directions are pure functions.
//!
//! Round-trip law: `decode(&encode(state)) == state` once empty and absent
//! representations are normalized, `dateFrom`/`dateTo` excluded by design.

use crate::dimensions::{Arity, DIMENSIONS};
use crate::state::FilterState;

/// Query key for the free-text search term.
pub const TERM_KEY: &str = "term";

/// Query key for the sort order.
pub const SORT_KEY: &str = "sortBy";

const MULTI_DELIMITER: &str = ",";

/// Encode filter state as ordered query parameters.
///
/// Dimensions appear in canonical declaration order, then `term`, then
/// `sortBy`. Empty dimensions are omitted entirely.
pub fn encode(state: &FilterState) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for desc in DIMENSIONS.iter().filter(|d| d.user_facing) {
        let values = state.values(desc.id);
        if values.is_empty() {
            continue;
        }
        let value = match desc.arity {
            Arity::Multi => values.join(MULTI_DELIMITER),
            Arity::Single => values[0].clone(),
        };
        params.push((desc.query_key.to_string(), value));
    }

    if let Some(term) = state.term.as_deref() {
        if !term.is_empty() {
            params.push((TERM_KEY.to_string(), term.to_string()));
        }
    }
    if let Some(sort) = state.sort_by.as_deref() {
        if !sort.is_empty() {
            params.push((SORT_KEY.to_string(), sort.to_string()));
        }
    }

    params
}

/// Decode query parameters into filter state.
///
/// Unknown keys are ignored; so are the internal `dateFrom`/`dateTo` keys,
/// which never round-trip through the URL. Multi-value dimensions accept
/// both comma-joined values and repeated parameters, accumulating
/// idempotently.
pub fn decode<K, V>(params: &[(K, V)]) -> FilterState
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut state = FilterState::new();

    for (key, raw) in params {
        let key = key.as_ref();
        let raw = raw.as_ref();
        if raw.is_empty() {
            continue;
        }

        if key == TERM_KEY {
            state.term = Some(raw.to_string());
            continue;
        }
        if key == SORT_KEY {
            state.sort_by = Some(raw.to_string());
            continue;
        }

        let Some(desc) = DIMENSIONS
            .iter()
            .filter(|d| d.user_facing)
            .find(|d| d.query_key == key)
        else {
            continue;
        };

        match desc.arity {
            Arity::Multi => {
                for value in raw.split(MULTI_DELIMITER) {
                    state.add(desc.id, value.trim());
                }
            }
            Arity::Single => state.add(desc.id, raw),
        }
    }

    state
}

/// Render encoded parameters as a `key=value&...` query string with
/// percent-escaped values.
pub fn query_string(state: &FilterState) -> String {
    encode(state)
        .iter()
        .map(|(k, v)| format!("{}={}", k, percent_escape(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Minimal percent-escaping: unreserved ASCII passes through, everything
/// else becomes `%XX` per byte. Enough for terms and comma-joined ids.
fn percent_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
