use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub(crate) const DEFAULT_LIMIT: u64 = 100;
pub(crate) const DEFAULT_SKIP: u64 = 0;
pub(crate) const DEFAULT_PAGE: u64 = 1;

/// Structural keys that never name filter fields.
pub const CONTROL_KEYS: [&str; 6] = ["limit", "skip", "page", "select", "sort", "populate"];

/// Comparison and set-membership operators accepted as `op:value` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
    In,
    Nin,
}

impl CmpOp {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "eq" => Self::Eq,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "ne" => Self::Ne,
            "in" => Self::In,
            "nin" => Self::Nin,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Ne => "ne",
            Self::In => "in",
            Self::Nin => "nin",
        }
    }

    /// Operator spelling in the document store (`$gte`, `$in`, ...).
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Ne => "$ne",
            Self::In => "$in",
            Self::Nin => "$nin",
        }
    }

    #[must_use]
    pub const fn is_set_op(self) -> bool {
        matches!(self, Self::In | Self::Nin)
    }
}

/// Stored value type names accepted by `type:` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BsonTypeName {
    Double,
    String,
    Object,
    Array,
    BinData,
    ObjectId,
    Bool,
    Date,
    Null,
    Regex,
    Javascript,
    Int,
    Timestamp,
    Long,
    Decimal,
    MinKey,
    MaxKey,
}

impl BsonTypeName {
    pub const ALL: [Self; 17] = [
        Self::Double,
        Self::String,
        Self::Object,
        Self::Array,
        Self::BinData,
        Self::ObjectId,
        Self::Bool,
        Self::Date,
        Self::Null,
        Self::Regex,
        Self::Javascript,
        Self::Int,
        Self::Timestamp,
        Self::Long,
        Self::Decimal,
        Self::MinKey,
        Self::MaxKey,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::BinData => "binData",
            Self::ObjectId => "objectId",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Null => "null",
            Self::Regex => "regex",
            Self::Javascript => "javascript",
            Self::Int => "int",
            Self::Timestamp => "timestamp",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::MinKey => "minKey",
            Self::MaxKey => "maxKey",
        }
    }

    /// Case-sensitive lookup; `binData` matches, `bindata` does not.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// A typed literal inferred from token syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

/// The right-hand side of one filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Literal(Literal),
    Comparison { op: CmpOp, value: Box<FilterValue> },
    Exists(bool),
    Type(BsonTypeName),
    Pattern { pattern: String, case_insensitive: bool },
}

impl FilterValue {
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::Literal(Literal::String(s.into()))
    }

    #[must_use]
    pub fn int(i: i64) -> Self {
        Self::Literal(Literal::Int(i))
    }

    #[must_use]
    pub fn double(d: f64) -> Self {
        Self::Literal(Literal::Double(d))
    }

    #[must_use]
    pub fn bool(b: bool) -> Self {
        Self::Literal(Literal::Bool(b))
    }

    #[must_use]
    pub fn cmp(op: CmpOp, value: Self) -> Self {
        Self::Comparison { op, value: Box::new(value) }
    }

    /// Case-insensitive pattern match.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern { pattern: pattern.into(), case_insensitive: true }
    }
}

/// A single-field fragment inside `$and` / `$or`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub field: String,
    pub value: FilterValue,
}

impl FilterCondition {
    #[must_use]
    pub fn new(field: impl Into<String>, value: FilterValue) -> Self {
        Self { field: field.into(), value }
    }
}

/// Insertion-ordered map with unique keys. Re-inserting a key replaces its value
/// in place, keeping the original position. Equality is order-sensitive.
#[derive(Debug, Clone)]
pub struct FieldMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self { entries: IndexMap::new() }
    }
}

impl<V: PartialEq> PartialEq for FieldMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<V> FieldMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
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

    /// Shallow merge: keys of `other` overwrite keys of `self`.
    pub fn merge(&mut self, other: Self) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FieldMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Include,
    Exclude,
}

impl Projection {
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Include => 1,
            Self::Exclude => 0,
        }
    }
}

pub type FieldDirectionMap = FieldMap<SortDirection>;
pub type FieldProjectionMap = FieldMap<Projection>;

/// A filter tree one level deep: direct field conditions AND-ed together, plus
/// optional `$and` / `$or` lists of single-field fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    pub fields: FieldMap<FilterValue>,
    pub and: Vec<FilterCondition>,
    pub or: Vec<FilterCondition>,
}

impl FilterExpression {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the expression matches every document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.and.is_empty() && self.or.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FilterValue) {
        self.fields.insert(field, value);
    }

    /// Folds a per-key contribution into this expression. Direct fields overwrite,
    /// `$and` / `$or` entries are appended after existing ones.
    #[must_use]
    pub fn absorb(mut self, part: Self) -> Self {
        self.fields.merge(part.fields);
        self.and.extend(part.and);
        self.or.extend(part.or);
        self
    }

    /// Shallow merge: fields of `other` overwrite, and a non-empty `$and` / `$or`
    /// in `other` replaces the corresponding list wholesale.
    pub fn merge(&mut self, other: Self) {
        self.fields.merge(other.fields);
        if !other.and.is_empty() {
            self.and = other.and;
        }
        if !other.or.is_empty() {
            self.or = other.or;
        }
    }
}

/// One relation to expand, optionally projected and filtered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationSpec {
    pub path: String,
    pub select: Option<FieldProjectionMap>,
    pub match_filter: Option<FilterExpression>,
}

impl PopulationSpec {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Populate {
    One(PopulationSpec),
    Many(Vec<PopulationSpec>),
}

impl Default for Populate {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Populate {
    #[must_use]
    pub fn specs(&self) -> &[PopulationSpec] {
        match self {
            Self::One(spec) => std::slice::from_ref(spec),
            Self::Many(specs) => specs,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs().is_empty()
    }
}

/// Everything a document-store read needs: pagination, ordering, projection,
/// relation population and the filter tree.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub limit: u64,
    pub skip: u64,
    pub sort: FieldDirectionMap,
    pub select: FieldProjectionMap,
    pub filter: FilterExpression,
    pub populate: Populate,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: DEFAULT_SKIP,
            sort: FieldDirectionMap::new(),
            select: FieldProjectionMap::new(),
            filter: FilterExpression::new(),
            populate: Populate::default(),
        }
    }
}

impl QueryDescriptor {
    pub fn add_sort(&mut self, sort: FieldDirectionMap) {
        self.sort.merge(sort);
    }

    pub fn add_select(&mut self, select: FieldProjectionMap) {
        self.select.merge(select);
    }

    pub fn add_filter(&mut self, filter: FilterExpression) {
        self.filter.merge(filter);
    }

    /// Union of population requests.
    ///
    /// Lists absorb whatever is added. Two single specs collapse into one when their
    /// paths match (the new spec wins) and otherwise become a two-element list. Adding
    /// a list to a single spec appends the existing spec after the new list.
    pub fn add_populate(&mut self, populate: Populate) {
        let current = std::mem::take(&mut self.populate);
        self.populate = match (current, populate) {
            (Populate::Many(mut specs), Populate::Many(more)) => {
                specs.extend(more);
                Populate::Many(specs)
            }
            (Populate::Many(mut specs), Populate::One(spec)) => {
                specs.push(spec);
                Populate::Many(specs)
            }
            (Populate::One(existing), Populate::Many(mut specs)) => {
                specs.push(existing);
                Populate::Many(specs)
            }
            (Populate::One(existing), Populate::One(spec)) => {
                if existing.path == spec.path {
                    Populate::One(spec)
                } else {
                    Populate::Many(vec![existing, spec])
                }
            }
        };
    }
}
