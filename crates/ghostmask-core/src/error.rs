//! Error types for Ghostmask Core

use ghostmask_pii::ConfigurationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No patterns found in {}", .0.display())]
    NoPatterns(PathBuf),

    #[error(transparent)]
    Pattern(#[from] ConfigurationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
