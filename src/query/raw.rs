//! Raw key/value input as decoded from a URL query string.

use indexmap::IndexMap;
use indexmap::map::Entry;

/// A query parameter value: a single string, or every value of a repeated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    List(Vec<String>),
}

impl RawValue {
    /// The value when it is a single non-empty string.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Single values and lists flattened into one comma-joined string.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }

    /// True for an empty string or an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::List(vec![first, value]);
            }
            Self::List(items) => items.push(value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_owned).collect())
    }
}

/// Insertion-ordered parameter map. Keys are unique; a repeated key collects its
/// values into [`RawValue::List`] at the position of its first occurrence.
#[derive(Debug, Clone, Default)]
pub struct RawQuery {
    entries: IndexMap<String, RawValue>,
}

impl PartialEq for RawQuery {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for RawQuery {}

impl RawQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `application/x-www-form-urlencoded` text. A leading `?` is ignored.
    #[must_use]
    pub fn from_query_string(s: &str) -> Self {
        let s = s.strip_prefix('?').unwrap_or(s);
        let mut out = Self::new();
        for (k, v) in url::form_urlencoded::parse(s.as_bytes()) {
            out.append(k.into_owned(), v.into_owned());
        }
        out
    }

    /// Adds one value for `key`, turning an existing entry into a list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut slot) => slot.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(RawValue::Single(value));
            }
        }
    }

    /// Sets `key` to `value`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// Shorthand for `get(key).and_then(RawValue::as_single)`.
    #[must_use]
    pub fn single(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RawValue::as_single)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawQuery
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}
