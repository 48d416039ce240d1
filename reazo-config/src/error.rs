// Error types for configuration loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse {format} configuration: {message}")]
    ParseError { format: &'static str, message: String },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
