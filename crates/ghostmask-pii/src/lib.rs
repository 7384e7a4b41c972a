//! Ghostmask PII Detection and Redaction
//!
//! This crate provides the redaction engine:
//! - Built-in detectors for email, phone, card, IP, IBAN and regional identifiers
//! - User-defined detectors compiled at configuration time
//! - Checksum validation for card numbers
//! - Mask, hash and tag replacement modes
//! - Per-kind match counting

pub mod counts;
pub mod detector;
pub mod engine;
pub mod error;
pub mod policy;
pub mod redactor;
pub mod validator;
mod walker;

pub use counts::RedactionCounts;
pub use detector::{CustomPattern, Kind, MatchingRule};
pub use engine::{RedactionEngine, Redactor, Stage};
pub use error::ConfigurationError;
pub use policy::{RedactionConfig, ResolvedPolicy};
pub use redactor::{RedactionMode, Replacement, StandardReplacement};
pub use validator::{LuhnValidator, MatchValidator};
