#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(v) = mongo_query::query::coerce_filter_token(s) {
            let _ = bson::Bson::from(&v);
        }
    }
});
