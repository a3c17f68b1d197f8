use std::process::Command;

fn run(args: &[&str]) -> (bool, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_mongo-query"))
        .args(args)
        .env_remove("MONGO_QUERY_CONFIG")
        .env_remove("MONGO_QUERY_SEARCH_KEY")
        .env_remove("MONGO_QUERY_SEARCH_PATHS")
        .output()
        .unwrap();
    (out.status.success(), String::from_utf8_lossy(&out.stdout).into_owned())
}

#[test]
fn prints_descriptor_json() {
    let (ok, stdout) = run(&["--compact", "status=gte:5&sort=-a&limit=10&page=3"]);
    assert!(ok);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["limit"], 10);
    assert_eq!(v["skip"], 20);
    assert_eq!(v["sort"]["a"], -1);
    assert_eq!(v["filter"]["status"]["$gte"], 5);
}

#[test]
fn search_flags_enable_search_mode() {
    let (ok, stdout) = run(&["--search-key", "q", "--search-path", "title,body", "?q=foo"]);
    assert!(ok);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let or = v["filter"]["$or"].as_array().unwrap();
    assert_eq!(or.len(), 2);
    assert_eq!(or[1]["body"]["$regex"], "foo");
    assert_eq!(or[1]["body"]["$options"], "i");
}

#[test]
fn config_file_supplies_search() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    std::fs::write(&cfg, "[search]\nkey = \"s\"\npaths = [\"name\"]\n").unwrap();
    let (ok, stdout) = run(&["--config", cfg.to_str().unwrap(), "s=ann"]);
    assert!(ok);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["filter"]["$or"][0]["name"]["$regex"], "ann");
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    std::fs::write(&cfg, "search = [").unwrap();
    let (ok, _) = run(&["--config", cfg.to_str().unwrap(), "a=1"]);
    assert!(!ok);
}

#[test]
fn log_config_key_is_read_by_the_cli_only() {
    let dir = tempfile::tempdir().unwrap();
    let log_yaml = dir.path().join("log4rs.yaml");
    std::fs::write(
        &log_yaml,
        "appenders:\n  stderr:\n    kind: console\n    target: stderr\nroot:\n  level: warn\n  appenders: [stderr]\n",
    )
    .unwrap();
    let cfg = dir.path().join("cfg.toml");
    let text = format!("log_config = {:?}\n[search]\nkey = \"s\"\npaths = [\"name\"]\n", log_yaml.to_str().unwrap());
    std::fs::write(&cfg, text).unwrap();
    let (ok, stdout) = run(&["--config", cfg.to_str().unwrap(), "s=ann"]);
    assert!(ok);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["filter"]["$or"][0]["name"]["$regex"], "ann");
}
