//! String classifiers used to infer value types from raw query text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").expect("static regex"));
static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(19[6-9][0-9]|2[0-9]{3})-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-9]|3[01])$").expect("static regex")
});
static ISO_DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(19[6-9][0-9]|2[0-9]{3})-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-9]|3[01])T([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]\.[0-9]{3}Z?$",
    )
    .expect("static regex")
});

/// One or more ASCII decimal digits.
#[must_use]
pub fn is_integer_string(s: &str) -> bool {
    INTEGER_RE.is_match(s)
}

/// Optional `-`, digits, optional `.`, digits. Partial forms such as `12.` and `.5` match.
#[must_use]
pub fn is_number_string(s: &str) -> bool {
    NUMBER_RE.is_match(s)
}

#[must_use]
pub fn is_iso_date_string(s: &str) -> bool {
    ISO_DATE_RE.is_match(s)
}

#[must_use]
pub fn is_iso_datetime_string(s: &str) -> bool {
    ISO_DATETIME_RE.is_match(s)
}

/// Parses a string accepted by [`is_iso_date_string`] or [`is_iso_datetime_string`].
///
/// Timestamps without a trailing `Z` are read as UTC. Returns `None` for strings that
/// have the right shape but name no calendar day (e.g. `2021-02-30`).
#[must_use]
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    if is_iso_date_string(s) {
        let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
        return Some(day.and_hms_opt(0, 0, 0)?.and_utc());
    }
    if is_iso_datetime_string(s) {
        let body = s.strip_suffix('Z').unwrap_or(s);
        let ts = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.3f").ok()?;
        return Some(ts.and_utc());
    }
    None
}
