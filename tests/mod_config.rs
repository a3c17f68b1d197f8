use mongo_query::config::{
    ENV_SEARCH_KEY, ENV_SEARCH_PATHS, ParseOptions, SearchOptions, config_paths, find_config_file, load_options,
    split_paths,
};
use mongo_query::QueryError;
use std::collections::HashMap;
use std::io::Write;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn toml_search_section() {
    let opts = ParseOptions::from_toml_str(
        r#"
        [search]
        key = "q"
        paths = ["title", "author.name"]
        "#,
    )
    .unwrap();
    assert_eq!(opts.search, Some(SearchOptions::new("q", ["title", "author.name"])));
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(ParseOptions::from_toml_str("").unwrap(), ParseOptions::default());
}

#[test]
fn blank_search_key_is_rejected() {
    let err = ParseOptions::from_toml_str("[search]\nkey = \"  \"\n").unwrap_err();
    assert!(matches!(err, QueryError::Config(_)));
}

#[test]
fn malformed_toml_is_an_error() {
    let err = ParseOptions::from_toml_str("search = [").unwrap_err();
    assert!(matches!(err, QueryError::Toml(_)));
}

#[test]
fn load_from_file_ignores_cli_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mongo-query.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "log_config = \"log4rs.yaml\"\n[search]\nkey = \"s\"\npaths = [\"body\"]").unwrap();
    drop(f);
    let opts = load_options(&path).unwrap();
    assert_eq!(opts, ParseOptions::with_search(SearchOptions::new("s", ["body"])));
}

#[test]
fn explicit_path_is_found_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explicit.toml");
    std::fs::write(&path, "[search]\nkey = \"k\"\n").unwrap();
    assert_eq!(find_config_file(Some(&path)), Some(path.clone()));
    assert_eq!(config_paths(Some(&path))[0], path);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_options(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, QueryError::Io(_)));
}

#[test]
fn env_overrides_file() {
    let file = ParseOptions::with_search(SearchOptions::new("q", ["title"]));
    let opts = file.clone().with_vars(vars(&[(ENV_SEARCH_KEY, "term"), (ENV_SEARCH_PATHS, "a, b,,c")]));
    assert_eq!(opts.search, Some(SearchOptions::new("term", ["a", "b", "c"])));

    // key alone keeps the file's paths
    let opts = file.clone().with_vars(vars(&[(ENV_SEARCH_KEY, "term")]));
    assert_eq!(opts.search, Some(SearchOptions::new("term", ["title"])));

    // nothing set leaves the file untouched
    assert_eq!(file.clone().with_vars(vars(&[])), file);
}

#[test]
fn split_paths_trims_and_drops_blanks() {
    assert_eq!(split_paths(" a ,b,, "), vec!["a".to_owned(), "b".to_owned()]);
}
