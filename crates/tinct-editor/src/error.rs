#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors that can occur when loading an editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Errors decoding an embed protocol message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed embed message: {0}")]
    Json(#[from] serde_json::Error),
}
