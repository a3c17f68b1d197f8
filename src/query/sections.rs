//! Pagination, sort, select and populate extraction.

use super::filter::extract_filter;
use super::raw::{RawQuery, RawValue};
use super::types::{
    DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SKIP, FieldDirectionMap, FieldMap, FieldProjectionMap,
    Populate, PopulationSpec, Projection, SortDirection,
};
use crate::devlog;
use crate::utils::strings::{sanitize_key, split_non_empty};
use crate::utils::validate::is_integer_string;

/// Reads `key` as a non-negative integer, or `default` when absent or malformed.
fn int_key(query: &RawQuery, key: &str, default: u64) -> u64 {
    query
        .single(key)
        .filter(|s| is_integer_string(s))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

#[must_use]
pub fn extract_limit(query: &RawQuery) -> u64 {
    int_key(query, "limit", DEFAULT_LIMIT)
}

/// `page` wins over `skip` when present: `(page - 1) * limit`, zero for pages `<= 1`.
#[must_use]
pub fn extract_skip(query: &RawQuery, limit: u64) -> u64 {
    if query.get("page").is_some_and(|p| !p.is_empty()) {
        let page = int_key(query, "page", DEFAULT_PAGE);
        if page > 1 { (page - 1).saturating_mul(limit) } else { 0 }
    } else {
        int_key(query, "skip", DEFAULT_SKIP)
    }
}

/// Parses `a,-b` style field lists. A leading `-` on the raw name selects `negative`.
fn field_list<V: Copy>(raw: &str, positive: V, negative: V) -> FieldMap<V> {
    let mut out = FieldMap::new();
    for name in split_non_empty(raw, ',') {
        let field = sanitize_key(name);
        if field.is_empty() {
            devlog!("dropped field name with no usable characters: {name:?}");
            continue;
        }
        out.insert(field, if name.starts_with('-') { negative } else { positive });
    }
    out
}

/// Repeated keys are read as one comma-joined list.
fn field_list_key<V: Copy>(query: &RawQuery, key: &str, positive: V, negative: V) -> FieldMap<V> {
    match query.get(key) {
        Some(raw) => field_list(&raw.joined(), positive, negative),
        None => FieldMap::new(),
    }
}

#[must_use]
pub fn extract_sort(query: &RawQuery) -> FieldDirectionMap {
    field_list_key(query, "sort", SortDirection::Ascending, SortDirection::Descending)
}

#[must_use]
pub fn extract_select(query: &RawQuery) -> FieldProjectionMap {
    field_list_key(query, "select", Projection::Include, Projection::Exclude)
}

/// Parses `populate` values of the form `path[;select][;filter]`.
///
/// `select` of `all` means no projection. `filter` is URL-encoded query text run
/// through the regular filter extraction. A repeated key yields one spec per value.
#[must_use]
pub fn extract_populate(query: &RawQuery) -> Populate {
    match query.get("populate") {
        None => Populate::default(),
        Some(RawValue::Single(s)) => match population_spec(s) {
            Some(spec) => Populate::One(spec),
            None => Populate::default(),
        },
        Some(RawValue::List(items)) => {
            Populate::Many(items.iter().filter_map(|s| population_spec(s)).collect())
        }
    }
}

fn population_spec(raw: &str) -> Option<PopulationSpec> {
    if raw.is_empty() {
        return None;
    }
    let mut parts = raw.split(';');
    // relation paths are kept verbatim, only projection and filter keys are sanitized
    let path = parts.next().unwrap_or_default();
    if path.is_empty() {
        devlog!("dropped populate entry without a path: {raw:?}");
        return None;
    }
    let mut spec = PopulationSpec::new(path);

    if let Some(select) = parts.next().filter(|s| !s.is_empty() && *s != "all") {
        let fields = field_list(select, Projection::Include, Projection::Exclude);
        spec.select = Some(fields).filter(|f| !f.is_empty());
    }
    if let Some(filter) = parts.next().filter(|s| !s.is_empty()) {
        let nested = extract_filter(&RawQuery::from_query_string(filter));
        spec.match_filter = Some(nested).filter(|f| !f.is_empty());
    }
    Some(spec)
}
