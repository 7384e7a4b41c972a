//! Command-line arguments and settings precedence

use clap::{Parser, ValueEnum};
use ghostmask_config_file::Settings;
use std::path::{Path, PathBuf};

/// Input format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// One record per line
    #[default]
    Text,
    /// A single JSON document; every string value is redacted
    Json,
}

/// Ghostmask - PII redaction for text and JSON streams
#[derive(Debug, Parser)]
#[command(name = "ghostmask")]
#[command(about = "Redact personal data from text and JSON streams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Input path (default: stdin)
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output path (default: stdout)
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Replacement mode: mask, hash or tag
    #[arg(long)]
    pub mode: Option<String>,

    /// Salt for hash mode
    #[arg(long)]
    pub salt: Option<String>,

    /// Comma-separated kinds to detect (default: email,cc,phone,ipv4,ipv6,iban)
    #[arg(long)]
    pub types: Option<String>,

    /// Comma-separated locale packs, e.g. "br"
    #[arg(long)]
    pub locale: Option<String>,

    /// Custom pattern file (.json, .yaml or .yml)
    #[arg(long, value_name = "PATH")]
    pub custom: Option<PathBuf>,

    /// Worker threads for text input
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write per-kind counts as JSON ("-" for stderr)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Path to settings file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "GHOSTMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Settings file, then environment, then flags
    pub fn settings(&self) -> ghostmask_core::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        settings.merge_env();
        self.apply_overrides(&mut settings);
        settings.normalize();

        Ok(settings)
    }

    /// Apply flags given on the command line (highest precedence)
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(mode) = &self.mode {
            settings.mode = mode.clone();
        }
        if let Some(salt) = &self.salt {
            settings.salt = salt.clone();
        }
        if let Some(types) = &self.types {
            settings.types = types.clone();
        }
        if let Some(locale) = &self.locale {
            settings.locale = locale.clone();
        }
        if let Some(custom) = &self.custom {
            settings.custom = Some(custom.clone());
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }
}

/// Filesystem path for an input or output flag; `None` and `-` mean the standard stream
pub fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}
