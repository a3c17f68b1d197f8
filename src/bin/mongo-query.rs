use clap::Parser;
use mongo_query::config::{self, ParseOptions, SearchOptions};
use mongo_query::{QueryError, logger, parse_query_string};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mongo-query", version, about = "Translate URL query strings into document-store queries", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). Falls back to MONGO_QUERY_CONFIG, then ./mongo-query.toml.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Enable search mode on this query key (overrides config/env)")]
    search_key: Option<String>,
    #[arg(long = "search-path", value_delimiter = ',', help = "Field path searched by --search-key; repeat or comma-separate")]
    search_paths: Vec<String>,
    #[arg(long, help = "Log level: off|error|warn|info|debug|trace (default warn)")]
    log_level: Option<String>,
    #[arg(long, help = "Print single-line JSON instead of pretty output")]
    compact: bool,
    #[arg(help = "URL query string, e.g. 'status=gte:5&sort=-created&limit=10'")]
    query: String,
}

/// CLI-only settings read from the same TOML file as the parser options.
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    /// log4rs YAML file, used when `--log-level` is not given.
    #[serde(default)]
    log_config: Option<PathBuf>,
}

fn load_app_config(path: Option<&Path>) -> Result<AppConfig, QueryError> {
    match path {
        Some(p) => Ok(toml::from_str(&std::fs::read_to_string(p)?)?),
        None => Ok(AppConfig::default()),
    }
}

fn resolve_options(cli: &Cli, path: Option<&Path>) -> Result<ParseOptions, QueryError> {
    let mut opts = match path {
        Some(p) => config::load_options(p)?,
        None => ParseOptions::default(),
    }
    .with_env();
    if let Some(key) = &cli.search_key {
        let paths = if cli.search_paths.is_empty() {
            opts.search.take().map(|s| s.paths).unwrap_or_default()
        } else {
            cli.search_paths.clone()
        };
        opts.search = Some(SearchOptions::new(key.clone(), paths));
    }
    Ok(opts)
}

fn init_logging(cli: &Cli, app: &AppConfig) -> Result<(), QueryError> {
    match (&cli.log_level, &app.log_config) {
        (None, Some(path)) => logger::init_path(path),
        (level, _) => logger::configure_logging(level.as_deref()),
    }
}

fn run(cli: &Cli) -> Result<(), QueryError> {
    let path = config::find_config_file(cli.config.as_deref());
    let app = load_app_config(path.as_deref())?;
    if let Err(e) = init_logging(cli, &app) {
        eprintln!("warning: logging disabled: {e}");
    }
    let opts = resolve_options(cli, path.as_deref())?;
    let descriptor = parse_query_string(&cli.query, Some(&opts));
    let json = descriptor.to_json();
    let text = if cli.compact { serde_json::to_string(&json)? } else { serde_json::to_string_pretty(&json)? };
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
