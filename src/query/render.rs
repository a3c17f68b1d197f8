//! Rendering into the document store's native query syntax.

use bson::{Bson, Document as BsonDocument, doc};

use super::types::{
    FieldDirectionMap, FieldProjectionMap, FilterCondition, FilterExpression, FilterValue, Literal,
    Populate, PopulationSpec, QueryDescriptor,
};

impl From<&Literal> for Bson {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::String(s) => Self::String(s.clone()),
            Literal::Int(i) => Self::Int64(*i),
            Literal::Double(d) => Self::Double(*d),
            Literal::Bool(b) => Self::Boolean(*b),
            Literal::Date(dt) => Self::DateTime(bson::DateTime::from_millis(dt.timestamp_millis())),
        }
    }
}

impl From<&FilterValue> for Bson {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Literal(lit) => lit.into(),
            FilterValue::Comparison { op, value } => {
                let inner = Self::from(&**value);
                // set operators need an array operand
                let inner = if op.is_set_op() && !matches!(inner, Self::Array(_)) {
                    Self::Array(vec![inner])
                } else {
                    inner
                };
                let mut d = BsonDocument::new();
                d.insert(op.operator(), inner);
                Self::Document(d)
            }
            FilterValue::Exists(b) => Self::Document(doc! { "$exists": *b }),
            FilterValue::Type(t) => Self::Document(doc! { "$type": t.name() }),
            FilterValue::Pattern { pattern, case_insensitive } => {
                let mut d = doc! { "$regex": pattern.as_str() };
                if *case_insensitive {
                    d.insert("$options", "i");
                }
                Self::Document(d)
            }
        }
    }
}

impl FilterCondition {
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        let mut d = BsonDocument::new();
        d.insert(self.field.as_str(), Bson::from(&self.value));
        d
    }
}

fn conditions(list: &[FilterCondition]) -> Bson {
    Bson::Array(list.iter().map(|c| Bson::Document(c.to_document())).collect())
}

impl FilterExpression {
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        let mut d = BsonDocument::new();
        for (field, value) in self.fields.iter() {
            d.insert(field, Bson::from(value));
        }
        if !self.and.is_empty() {
            d.insert("$and", conditions(&self.and));
        }
        if !self.or.is_empty() {
            d.insert("$or", conditions(&self.or));
        }
        d
    }
}

impl FieldDirectionMap {
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        self.iter().map(|(k, v)| (k.to_owned(), Bson::Int32(v.as_i32()))).collect()
    }
}

impl FieldProjectionMap {
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        self.iter().map(|(k, v)| (k.to_owned(), Bson::Int32(v.as_i32()))).collect()
    }
}

impl PopulationSpec {
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        let mut d = doc! { "path": self.path.as_str() };
        if let Some(select) = &self.select {
            d.insert("select", select.to_document());
        }
        if let Some(filter) = &self.match_filter {
            d.insert("match", filter.to_document());
        }
        d
    }
}

impl From<&Populate> for Bson {
    fn from(p: &Populate) -> Self {
        match p {
            Populate::One(spec) => Self::Document(spec.to_document()),
            Populate::Many(specs) => {
                Self::Array(specs.iter().map(|s| Self::Document(s.to_document())).collect())
            }
        }
    }
}

fn count(v: u64) -> Bson {
    Bson::Int64(i64::try_from(v).unwrap_or(i64::MAX))
}

impl QueryDescriptor {
    /// The whole descriptor as one document: `limit`, `skip`, `sort`, `select`,
    /// `filter`, `populate`.
    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        doc! {
            "limit": count(self.limit),
            "skip": count(self.skip),
            "sort": self.sort.to_document(),
            "select": self.select.to_document(),
            "filter": self.filter.to_document(),
            "populate": Bson::from(&self.populate),
        }
    }

    /// Relaxed Extended JSON rendering of [`to_document`](Self::to_document).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        Bson::Document(self.to_document()).into_relaxed_extjson()
    }
}
