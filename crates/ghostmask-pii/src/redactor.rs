//! Replacement strategies

mod standard_redactor;

pub use standard_redactor::StandardReplacement;

use crate::detector::Kind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Redaction mode
///
/// Mode is a total switch: any unrecognised name behaves as [`RedactionMode::Mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RedactionMode {
    /// Kind-specific partial masking
    #[default]
    Mask,

    /// Salted digest marker, `<KIND:HEX>`
    Hash,

    /// Bare kind marker, `<KIND>`
    Tag,
}

impl RedactionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionMode::Mask => "mask",
            RedactionMode::Hash => "hash",
            RedactionMode::Tag => "tag",
        }
    }
}

impl From<&str> for RedactionMode {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hash" => RedactionMode::Hash,
            "tag" => RedactionMode::Tag,
            _ => RedactionMode::Mask,
        }
    }
}

impl From<String> for RedactionMode {
    fn from(value: String) -> Self {
        RedactionMode::from(value.as_str())
    }
}

impl fmt::Display for RedactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces the substitute text for an accepted match
///
/// Implementations must be deterministic and free of side effects.
pub trait Replacement: Send + Sync {
    fn replace(&self, kind: &Kind, matched: &str) -> String;

    /// Get the redaction mode
    fn mode(&self) -> RedactionMode;
}
