//! Filter extraction: folds per-key contributions into one [`FilterExpression`].

use super::coerce::{coerce_filter_token, is_or_group_token, is_simple_token};
use super::raw::{RawQuery, RawValue};
use super::types::{CONTROL_KEYS, FilterCondition, FilterExpression, FilterValue};
use crate::config::SearchOptions;
use crate::devlog;
use crate::utils::strings::sanitize_key;

/// Builds the partial expression contributed by one query key.
///
/// A list value sends simple entries to `$and` and comma-grouped entries (flattened)
/// to `$or`; other entries are dropped. A single comma-grouped string goes to `$or`;
/// any other single string becomes a direct field condition.
#[must_use]
pub fn build_field_filter(key: &str, raw: &RawValue) -> FilterExpression {
    let mut part = FilterExpression::new();
    let field = sanitize_key(key);
    if field.is_empty() {
        devlog!("dropped filter key with no usable characters: {key:?}");
        return part;
    }

    match raw {
        RawValue::List(items) => {
            for item in items {
                if is_simple_token(item) {
                    part.and.extend(condition(&field, item));
                } else if is_or_group_token(item) {
                    part.or.extend(item.split(',').filter_map(|t| condition(&field, t)));
                } else {
                    devlog!("dropped list entry for {field:?}: {item:?}");
                }
            }
        }
        RawValue::Single(s) if is_or_group_token(s) => {
            part.or.extend(s.split(',').filter_map(|t| condition(&field, t)));
        }
        RawValue::Single(s) => match coerce_filter_token(s) {
            Some(value) => part.set(field, value),
            None => devlog!("dropped value for {field:?}: {s:?}"),
        },
    }
    part
}

fn condition(field: &str, token: &str) -> Option<FilterCondition> {
    coerce_filter_token(token).map(|value| FilterCondition::new(field, value))
}

/// Extracts the filter from every non-control key, in input order.
#[must_use]
pub fn extract_filter(query: &RawQuery) -> FilterExpression {
    query
        .iter()
        .filter(|(key, _)| !CONTROL_KEYS.contains(key))
        .map(|(key, raw)| build_field_filter(key, raw))
        .fold(FilterExpression::new(), FilterExpression::absorb)
}

/// Search mode: when `search.key` is present, OR a case-insensitive substring match
/// of its value across every configured path. Otherwise falls back to
/// [`extract_filter`].
#[must_use]
pub fn extract_search(query: &RawQuery, search: &SearchOptions) -> FilterExpression {
    let Some(term) = search_term(query, &search.key) else {
        return extract_filter(query);
    };
    let mut out = FilterExpression::new();
    out.or = search
        .paths
        .iter()
        .map(|p| sanitize_key(p))
        .filter(|p| !p.is_empty())
        .map(|p| FilterCondition::new(p, FilterValue::pattern(term)))
        .collect();
    out
}

/// The first non-empty value of `key`.
fn search_term<'a>(query: &'a RawQuery, key: &str) -> Option<&'a str> {
    match query.get(key)? {
        RawValue::Single(s) => Some(s.as_str()).filter(|s| !s.is_empty()),
        RawValue::List(items) => items.iter().map(String::as_str).find(|s| !s.is_empty()),
    }
}
