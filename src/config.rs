//! Parser options and their loading from TOML files and the environment.
//!
//! Precedence when assembled by the CLI: command line > environment > config file > defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::QueryError;

pub const ENV_SEARCH_KEY: &str = "MONGO_QUERY_SEARCH_KEY";
pub const ENV_SEARCH_PATHS: &str = "MONGO_QUERY_SEARCH_PATHS";
pub const ENV_CONFIG: &str = "MONGO_QUERY_CONFIG";

/// Expands one query key into a case-insensitive substring match OR-ed over `paths`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub key: String,
    #[serde(default)]
    pub paths: Vec<String>,
}

impl SearchOptions {
    #[must_use]
    pub fn new<I, S>(key: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { key: key.into(), paths: paths.into_iter().map(Into::into).collect() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub search: Option<SearchOptions>,
}

impl ParseOptions {
    #[must_use]
    pub fn with_search(search: SearchOptions) -> Self {
        Self { search: Some(search) }
    }

    /// # Errors
    /// Returns an error if the text is not valid TOML for this structure, or names a
    /// search section without a key.
    pub fn from_toml_str(s: &str) -> Result<Self, QueryError> {
        let opts: Self = toml::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    fn validate(&self) -> Result<(), QueryError> {
        match &self.search {
            Some(search) if search.key.trim().is_empty() => {
                Err(QueryError::Config("search.key must not be empty".into()))
            }
            _ => Ok(()),
        }
    }

    /// Overrides the search section from `MONGO_QUERY_SEARCH_KEY` /
    /// `MONGO_QUERY_SEARCH_PATHS` when the key variable is set. Paths are comma separated.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`with_env`](Self::with_env) with an injectable variable lookup.
    #[must_use]
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = var(ENV_SEARCH_KEY).filter(|k| !k.trim().is_empty()) {
            let paths = match var(ENV_SEARCH_PATHS) {
                Some(p) => split_paths(&p),
                None => self.search.take().map(|s| s.paths).unwrap_or_default(),
            };
            self.search = Some(SearchOptions { key, paths });
        }
        self
    }
}

/// Comma-separated path list, blanks dropped.
#[must_use]
pub fn split_paths(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_owned).collect()
}

/// Reads options from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_options(path: &Path) -> Result<ParseOptions, QueryError> {
    let text = std::fs::read_to_string(path)?;
    let opts = ParseOptions::from_toml_str(&text)?;
    log::debug!("loaded parse options from {}", path.display());
    Ok(opts)
}

/// Candidate config files in lookup order: explicit path, `MONGO_QUERY_CONFIG`,
/// `./mongo-query.toml`.
#[must_use]
pub fn config_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg {
        paths.push(p.to_path_buf());
    }
    if let Ok(p) = std::env::var(ENV_CONFIG) {
        paths.push(PathBuf::from(p));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("mongo-query.toml"));
    }
    paths
}

/// First candidate from [`config_paths`] that exists.
#[must_use]
pub fn find_config_file(cli_cfg: Option<&Path>) -> Option<PathBuf> {
    config_paths(cli_cfg).into_iter().find(|p| p.exists())
}

/// Loads the first existing config file (or defaults) and applies environment overrides.
///
/// # Errors
/// Returns an error if an existing config file cannot be read or parsed.
pub fn discover_options(cli_cfg: Option<&Path>) -> Result<ParseOptions, QueryError> {
    let file_opts = match find_config_file(cli_cfg) {
        Some(path) => load_options(&path)?,
        None => ParseOptions::default(),
    };
    Ok(file_opts.with_env())
}
