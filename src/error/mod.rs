//! Error handling module for the outer layers (configuration, parsing, I/O)

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for trimline operations outside the domain core
#[derive(Error, Debug)]
pub enum TrimlineError {
    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Configuration file could not be parsed or failed validation
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Catalog file could not be parsed
    #[error("Invalid clip catalog: {message}")]
    CatalogError { message: String },

    /// Replay script could not be parsed
    #[error("Invalid replay script: {message}")]
    ScriptError { message: String },

    /// Domain error surfaced to the outer layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for trimline operations
pub type TrimlineResult<T> = std::result::Result<T, TrimlineError>;
