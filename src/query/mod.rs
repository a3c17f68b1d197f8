// Submodules for separation of concerns
mod coerce;
mod filter;
mod parse;
mod raw;
mod render;
mod sections;
mod types;

// Public API re-exports
pub use coerce::{coerce_filter_token, is_or_group_token, is_simple_token};
pub use filter::{build_field_filter, extract_filter, extract_search};
pub use parse::{parse, parse_query_string};
pub use raw::{RawQuery, RawValue};
pub use sections::{extract_limit, extract_populate, extract_select, extract_skip, extract_sort};
pub use types::{
    BsonTypeName, CONTROL_KEYS, CmpOp, FieldDirectionMap, FieldMap, FieldProjectionMap,
    FilterCondition, FilterExpression, FilterValue, Literal, Populate, PopulationSpec, Projection,
    QueryDescriptor, SortDirection,
};
