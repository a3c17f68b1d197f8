use super::filter::{extract_filter, extract_search};
use super::raw::RawQuery;
use super::sections::{extract_limit, extract_populate, extract_select, extract_skip, extract_sort};
use super::types::QueryDescriptor;
use crate::config::ParseOptions;

/// Translates raw query parameters into a [`QueryDescriptor`].
///
/// Total: malformed values fall back to defaults or are dropped, never rejected.
/// The input is only read, so callers may reuse it afterwards.
#[must_use]
pub fn parse(query: &RawQuery, options: Option<&ParseOptions>) -> QueryDescriptor {
    let limit = extract_limit(query);
    let skip = extract_skip(query, limit);
    let filter = match options.and_then(|o| o.search.as_ref()) {
        Some(search) => extract_search(query, search),
        None => extract_filter(query),
    };
    let out = QueryDescriptor {
        limit,
        skip,
        select: extract_select(query),
        sort: extract_sort(query),
        populate: extract_populate(query),
        filter,
    };
    log::debug!(
        "parsed query: {} keys -> limit={} skip={} sort={} select={} fields={} and={} or={} populate={}",
        query.len(),
        out.limit,
        out.skip,
        out.sort.len(),
        out.select.len(),
        out.filter.fields.len(),
        out.filter.and.len(),
        out.filter.or.len(),
        out.populate.specs().len(),
    );
    out
}

/// Decodes URL query text and parses it. A leading `?` is ignored.
#[must_use]
pub fn parse_query_string(s: &str, options: Option<&ParseOptions>) -> QueryDescriptor {
    parse(&RawQuery::from_query_string(s), options)
}
