//! Ghostmask core types
//!
//! Shared error type for the configuration and command-line crates.

pub mod error;

pub use error::{Error, Result};
