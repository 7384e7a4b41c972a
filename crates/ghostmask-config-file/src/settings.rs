//! Settings file loading and environment overrides

use ghostmask_core::Result;
use ghostmask_pii::{CustomPattern, RedactionConfig, RedactionMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Replacement mode: mask, hash or tag. Anything else masks.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Digest salt for hash mode
    #[serde(default)]
    pub salt: String,

    /// Comma-separated kinds; blank selects the defaults
    #[serde(default)]
    pub types: String,

    /// Comma-separated locale packs
    #[serde(default)]
    pub locale: String,

    /// Custom pattern file
    #[serde(default)]
    pub custom: Option<PathBuf>,

    /// Worker threads for text input
    #[serde(default = "default_threads")]
    pub threads: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            salt: String::new(),
            types: String::new(),
            locale: String::new(),
            custom: None,
            threads: default_threads(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML or TOML file (chosen by extension)
    ///
    /// # Errors
    /// - `Error::Io` if the file can't be read
    /// - `Error::Toml` / `Error::Yaml` if the document is malformed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let settings = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else if contents.trim().is_empty() {
            Self::default()
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(settings)
    }

    /// Merge environment variables into settings (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("GHOSTMASK_MODE") {
            self.mode = val;
        }

        if let Ok(val) = std::env::var("GHOSTMASK_SALT") {
            self.salt = val;
        }

        if let Ok(val) = std::env::var("GHOSTMASK_TYPES") {
            self.types = val;
        }

        if let Ok(val) = std::env::var("GHOSTMASK_LOCALE") {
            self.locale = val;
        }

        if let Ok(val) = std::env::var("GHOSTMASK_CUSTOM") {
            self.custom = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("GHOSTMASK_THREADS") {
            if let Ok(threads) = val.trim().parse::<usize>() {
                self.threads = threads;
            }
        }

        if let Ok(val) = std::env::var("GHOSTMASK_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Lower-case the mode, type and locale lists and clamp threads to at least 1
    pub fn normalize(&mut self) {
        self.mode = self.mode.trim().to_lowercase();
        self.types = self.types.to_lowercase();
        self.locale = self.locale.to_lowercase();
        self.threads = self.threads.max(1);
    }

    pub fn redaction_mode(&self) -> RedactionMode {
        RedactionMode::from(self.mode.as_str())
    }

    /// Engine configuration for these settings plus already loaded custom patterns
    pub fn redaction_config(&self, custom_patterns: Vec<CustomPattern>) -> RedactionConfig {
        RedactionConfig {
            mode: self.redaction_mode(),
            salt: self.salt.clone(),
            types: self.types.clone(),
            locales: self.locale.clone(),
            custom_patterns,
        }
    }
}

fn default_mode() -> String {
    "mask".to_string()
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_log_level() -> String {
    "warn".to_string()
}
