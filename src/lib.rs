//! Translates URL query parameters into a document-store query descriptor:
//! pagination, sort order, field projection, relation population and a flat
//! filter tree inferred from token syntax.
//!
//! ```
//! use mongo_query::query::{parse_query_string, CmpOp, FilterValue};
//!
//! let q = parse_query_string("status=gte:5&sort=-created&limit=20", None);
//! assert_eq!(q.limit, 20);
//! assert_eq!(q.filter.get("status"), Some(&FilterValue::cmp(CmpOp::Gte, FilterValue::int(5))));
//! ```

pub mod config;
pub mod errors;
pub mod logger;
pub mod query;
pub mod utils;

pub use config::{ParseOptions, SearchOptions};
pub use errors::QueryError;
pub use query::{QueryDescriptor, RawQuery, RawValue, parse, parse_query_string};
