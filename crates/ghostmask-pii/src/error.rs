//! Error types for engine construction

use thiserror::Error;

/// Fatal error raised while building an engine from its configuration.
///
/// Redaction itself never fails; every problem surfaces here, before the
/// first input is processed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid custom regex for {kind:?}: {source}")]
    InvalidCustomPattern {
        kind: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigurationError {
    /// Name of the custom kind whose pattern was rejected
    pub fn kind(&self) -> &str {
        match self {
            ConfigurationError::InvalidCustomPattern { kind, .. } => kind,
        }
    }
}
