//! Key and token cleaning helpers.

/// Characters allowed in a field path: ASCII letters, digits, `_` and `.`.
#[inline]
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Characters kept in a wildcard pattern body. `.` through `:` is a range, so `/`
/// survives and `-` does not.
#[inline]
fn is_pattern_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || c == '@'
        || ('.'..=':').contains(&c)
        || ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Removes every character outside `[A-Za-z0-9_.]`.
///
/// Applied to every field path before it is used as a document key, so operator
/// names such as `$where` can never be injected through a query parameter name.
#[must_use]
pub fn sanitize_key(s: &str) -> String {
    s.chars().filter(|c| is_key_char(*c)).collect()
}

/// Builds the body of a wildcard pattern from a raw token. `*` and regex
/// metacharacters other than `.` are dropped.
#[must_use]
pub fn clean_pattern_body(s: &str) -> String {
    s.chars().filter(|c| is_pattern_char(*c)).collect()
}

/// Splits on `sep`, discarding empty segments.
pub fn split_non_empty<'a>(s: &'a str, sep: char) -> impl Iterator<Item = &'a str> + 'a {
    s.split(sep).filter(|part| !part.is_empty())
}
