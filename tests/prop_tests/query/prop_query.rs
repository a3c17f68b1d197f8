use mongo_query::query::{FilterValue, RawQuery, RawValue, coerce_filter_token, parse, parse_query_string};
use mongo_query::{ParseOptions, SearchOptions};
use proptest::prelude::*;

fn key_is_clean(k: &str) -> bool {
    !k.is_empty() && k.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        .. proptest::test_runner::Config::default()
    })]

    // Any decoded input parses without panicking, in both modes
    #[test]
    fn prop_parse_is_total(s in ".{0,200}") {
        let _ = parse_query_string(&s, None).to_document();
        let opts = ParseOptions::with_search(SearchOptions::new("q", ["title"]));
        let _ = parse_query_string(&s, Some(&opts)).to_document();
    }

    #[test]
    fn prop_limit_roundtrips_integers(n in 0u64..1_000_000_000) {
        prop_assert_eq!(parse_query_string(&format!("limit={n}"), None).limit, n);
    }

    #[test]
    fn prop_page_arithmetic(page in 0u64..10_000, limit in 0u64..1_000) {
        let d = parse_query_string(&format!("page={page}&limit={limit}&skip=3"), None);
        let expected = if page > 1 { (page - 1) * limit } else { 0 };
        prop_assert_eq!(d.skip, expected);
    }

    // Every field path that reaches the output is sanitized
    #[test]
    fn prop_keys_are_sanitized(
        pairs in proptest::collection::vec(("[a-z$.{}_-]{1,8}", "[a-z0-9:,*$-]{0,8}"), 0..8),
        sort in "[a-z$,-]{0,16}",
    ) {
        let mut raw = RawQuery::new();
        for (k, v) in pairs {
            raw.append(k, v);
        }
        raw.insert("sort", RawValue::from(sort.clone()));
        raw.insert("select", RawValue::from(sort));
        let d = parse(&raw, None);
        prop_assert!(d.filter.fields.keys().all(key_is_clean));
        prop_assert!(d.filter.and.iter().all(|c| key_is_clean(&c.field)));
        prop_assert!(d.filter.or.iter().all(|c| key_is_clean(&c.field)));
        prop_assert!(d.sort.keys().all(key_is_clean));
        prop_assert!(d.select.keys().all(key_is_clean));
    }

    #[test]
    fn prop_integers_coerce_to_ints(i in any::<i64>()) {
        prop_assert_eq!(coerce_filter_token(&i.to_string()), Some(FilterValue::int(i)));
    }

    // Tokens outside every special form come back verbatim
    #[test]
    fn prop_plain_words_are_verbatim(w in "[a-z]{2,12}") {
        prop_assume!(w != "true" && w != "false");
        prop_assert_eq!(coerce_filter_token(&w), Some(FilterValue::string(w.clone())));
    }
}
