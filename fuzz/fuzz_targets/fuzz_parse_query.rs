#![no_main]
use libfuzzer_sys::fuzz_target;
use mongo_query::{ParseOptions, SearchOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // parse is total; neither mode may panic
        let q = mongo_query::parse_query_string(s, None);
        let _ = q.to_document();
        let opts = ParseOptions::with_search(SearchOptions::new("q", ["title", "body"]));
        let _ = mongo_query::parse_query_string(s, Some(&opts));
    }
});
