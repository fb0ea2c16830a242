use thiserror::Error;

/// Errors raised while decoding a stored configuration block
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
