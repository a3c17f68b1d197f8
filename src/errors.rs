use thiserror::Error;

/// Errors from the ambient surfaces (configuration, logging, output).
/// Query parsing itself never fails.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
