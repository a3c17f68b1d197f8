//! Token classification: turns one raw string into a typed filter value.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{BsonTypeName, CmpOp, FilterValue, Literal};
use crate::devlog;
use crate::utils::strings::clean_pattern_body;
use crate::utils::validate::{is_number_string, parse_iso_date};

static SIMPLE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_\s@.\-:]+[A-Za-z0-9_@.\-:]$").expect("static regex")
});
// `.` through `:` is a range here: `/` and digits belong to the group alphabet, `-` does not
static OR_GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_\s@./:],?)+[A-Za-z0-9_@./:]$").expect("static regex")
});

/// A single filterable token: at least two characters from the simple set, no comma,
/// not ending in whitespace.
#[must_use]
pub fn is_simple_token(t: &str) -> bool {
    SIMPLE_TOKEN_RE.is_match(t)
}

/// A comma-separated run of group characters, e.g. `red,green,blue` or `a/b,c`.
/// Values containing `-` never form a group, so `2021-01-01,2021-02-01` stays whole.
#[must_use]
pub fn is_or_group_token(t: &str) -> bool {
    t.contains(',') && OR_GROUP_RE.is_match(t)
}

/// Coerces one raw token into a filter value.
///
/// Classification order, first match wins: `op:` comparison (recursive on the
/// remainder), `exists:` / `type:` element test, ISO date, number, boolean,
/// `*` wildcard pattern, plain string. Returns `None` for tokens that should not
/// constrain the query.
#[must_use]
pub fn coerce_filter_token(token: &str) -> Option<FilterValue> {
    if token.is_empty() {
        return None;
    }

    if let Some((name, rest)) = token.split_once(':') {
        if let Some(op) = CmpOp::from_name(name) {
            if rest.is_empty() {
                devlog!("dropped comparison without operand: {token:?}");
                return None;
            }
            return match coerce_filter_token(rest) {
                Some(inner) => Some(FilterValue::cmp(op, inner)),
                None => {
                    devlog!("dropped comparison with unusable operand: {token:?}");
                    None
                }
            };
        }
        match name {
            "exists" => return coerce_exists(token, rest),
            "type" => return coerce_type(token, rest),
            _ => {}
        }
    }

    if let Some(date) = parse_iso_date(token) {
        return Some(FilterValue::Literal(Literal::Date(date)));
    }

    if is_number_string(token) {
        if let Some(n) = parse_number(token) {
            return Some(FilterValue::Literal(n));
        }
    }

    match token {
        "true" => return Some(FilterValue::bool(true)),
        "false" => return Some(FilterValue::bool(false)),
        _ => {}
    }

    if token.contains('*') {
        return Some(wildcard_pattern(token));
    }

    Some(FilterValue::string(token))
}

fn coerce_exists(token: &str, rest: &str) -> Option<FilterValue> {
    match rest {
        "true" => Some(FilterValue::Exists(true)),
        "false" => Some(FilterValue::Exists(false)),
        _ => {
            devlog!("dropped exists test with non-boolean operand: {token:?}");
            None
        }
    }
}

fn coerce_type(token: &str, rest: &str) -> Option<FilterValue> {
    let found = BsonTypeName::from_name(rest).map(FilterValue::Type);
    if found.is_none() {
        devlog!("dropped type test with unknown type name: {token:?}");
    }
    found
}

/// Integers without a fractional part stay integral; everything else is a double.
/// Shapes such as `-` or `.` that the numeric pattern admits parse to nothing.
fn parse_number(token: &str) -> Option<Literal> {
    if !token.contains('.') {
        if let Ok(i) = token.parse::<i64>() {
            return Some(Literal::Int(i));
        }
    }
    token.parse::<f64>().ok().filter(|d| d.is_finite()).map(Literal::Double)
}

/// Leading `*` anchors the body to the start, trailing `*` to the end; both mean
/// an unanchored substring match.
fn wildcard_pattern(token: &str) -> FilterValue {
    let body = clean_pattern_body(token);
    let pattern = match (token.starts_with('*'), token.ends_with('*')) {
        (true, false) => format!("^{body}"),
        (false, true) => format!("{body}$"),
        _ => body,
    };
    FilterValue::pattern(pattern)
}
