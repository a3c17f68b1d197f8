use bson::{Bson, doc};
use mongo_query::query::{
    CmpOp, FieldDirectionMap, FieldProjectionMap, FilterCondition, FilterExpression, FilterValue,
    Projection, SortDirection, parse_query_string,
};
use mongo_query::{ParseOptions, SearchOptions};

#[test]
fn merging_empty_sections_is_identity() {
    let mut d = parse_query_string("sort=-a&select=b&x=1&y=p,q&z=m1&z=m2", None);
    let before = d.clone();
    d.add_sort(FieldDirectionMap::new());
    d.add_select(FieldProjectionMap::new());
    d.add_filter(FilterExpression::new());
    assert_eq!(d, before);
}

#[test]
fn shallow_merge_overwrites_keys() {
    let mut d = parse_query_string("sort=a,b&select=a&status=open&tag=x,y", None);
    d.add_sort([("a", SortDirection::Descending), ("c", SortDirection::Ascending)].into_iter().collect());
    let sort: Vec<(&str, i32)> = d.sort.iter().map(|(k, v)| (k, v.as_i32())).collect();
    assert_eq!(sort, vec![("a", -1), ("b", 1), ("c", 1)]);

    d.add_select([("a", Projection::Exclude)].into_iter().collect());
    assert_eq!(d.select.get("a"), Some(&Projection::Exclude));

    let mut extra = FilterExpression::new();
    extra.set("status", FilterValue::string("closed"));
    extra.or.push(FilterCondition::new("kind", FilterValue::string("bug")));
    d.add_filter(extra);
    assert_eq!(d.filter.get("status"), Some(&FilterValue::string("closed")));
    // `$or` is replaced wholesale, not concatenated
    assert_eq!(d.filter.or, vec![FilterCondition::new("kind", FilterValue::string("bug"))]);
}

#[test]
fn renders_native_operators() {
    let d = parse_query_string(
        "status=gte:5&tag=a,b&name=*oh*&active=exists:true&n=gt:1&n=lt:9&id=in:7&t=type:long&sort=-a&select=b",
        None,
    );
    let doc = d.to_document();
    assert_eq!(doc.get_i64("limit").unwrap(), 100);
    assert_eq!(doc.get_i64("skip").unwrap(), 0);
    assert_eq!(doc.get_document("sort").unwrap(), &doc! { "a": -1 });
    assert_eq!(doc.get_document("select").unwrap(), &doc! { "b": 1 });

    let filter = doc.get_document("filter").unwrap();
    assert_eq!(filter.get_document("status").unwrap(), &doc! { "$gte": 5_i64 });
    assert_eq!(filter.get_document("name").unwrap(), &doc! { "$regex": "oh", "$options": "i" });
    assert_eq!(filter.get_document("active").unwrap(), &doc! { "$exists": true });
    assert_eq!(filter.get_document("id").unwrap(), &doc! { "$in": [7_i64] });
    assert_eq!(filter.get_document("t").unwrap(), &doc! { "$type": "long" });
    assert_eq!(
        filter.get_array("$or").unwrap(),
        &vec![Bson::Document(doc! { "tag": "a" }), Bson::Document(doc! { "tag": "b" })]
    );
    assert_eq!(
        filter.get_array("$and").unwrap(),
        &vec![
            Bson::Document(doc! { "n": { "$gt": 1_i64 } }),
            Bson::Document(doc! { "n": { "$lt": 9_i64 } }),
        ]
    );
    assert_eq!(doc.get_array("populate").unwrap().len(), 0);
}

#[test]
fn renders_dates_as_datetimes() {
    let d = parse_query_string("at=2020-01-01", None);
    let filter = d.filter.to_document();
    let at = filter.get_datetime("at").unwrap();
    assert_eq!(at.timestamp_millis(), 1_577_836_800_000);
}

#[test]
fn renders_population() {
    let d = parse_query_string("populate=author;name;role=eq:admin", None);
    let doc = d.to_document();
    assert_eq!(
        doc.get_document("populate").unwrap(),
        &doc! { "path": "author", "select": { "name": 1 }, "match": { "role": { "$eq": "admin" } } }
    );
}

#[test]
fn renders_search_mode() {
    let opts = ParseOptions::with_search(SearchOptions::new("q", ["title", "body"]));
    let d = parse_query_string("q=foo", Some(&opts));
    assert_eq!(
        d.filter.to_document(),
        doc! { "$or": [
            { "title": { "$regex": "foo", "$options": "i" } },
            { "body": { "$regex": "foo", "$options": "i" } },
        ] }
    );
}

#[test]
fn json_output_is_plain() {
    let d = parse_query_string("limit=10&page=2&status=ne:gte:3", None);
    let json = d.to_json();
    assert_eq!(json["limit"], serde_json::json!(10));
    assert_eq!(json["skip"], serde_json::json!(10));
    assert_eq!(json["filter"]["status"], serde_json::json!({ "$ne": { "$gte": 3 } }));
    assert_eq!(d.filter.get("status"), Some(&FilterValue::cmp(CmpOp::Ne, FilterValue::cmp(CmpOp::Gte, FilterValue::int(3)))));
}
