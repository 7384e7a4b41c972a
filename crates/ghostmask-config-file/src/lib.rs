//! File-based configuration for Ghostmask
//!
//! Two kinds of file are read here:
//! - the settings file (`Settings`), YAML or TOML, overridable from the
//!   environment
//! - the custom pattern file (`load_custom_patterns`), JSON or YAML
//!
//! # Example
//! ```no_run
//! # use ghostmask_config_file::{Settings, load_custom_patterns};
//! # fn example() -> ghostmask_core::Result<()> {
//! let mut settings = Settings::from_file("ghostmask.yaml")?;
//! settings.merge_env();
//! settings.normalize();
//!
//! let custom = load_custom_patterns("patterns.yaml")?;
//! let config = settings.redaction_config(custom);
//! # Ok(())
//! # }
//! ```

mod patterns;
mod settings;

pub use patterns::load_custom_patterns;
pub use settings::{LoggingConfig, Settings};
