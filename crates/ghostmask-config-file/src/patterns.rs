//! Custom pattern file loading

use ghostmask_core::{Error, Result};
use ghostmask_pii::CustomPattern;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error};

#[derive(Debug, Default, Deserialize)]
struct PatternFile {
    #[serde(default)]
    patterns: Vec<PatternEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct PatternEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    regex: String,
}

/// Load user-defined detectors from a `.json`, `.yaml` or `.yml` file.
///
/// Entries keep their declaration order. Names and regex sources are trimmed
/// and entries with either one blank are dropped.
///
/// # Errors
/// - `Error::UnsupportedFormat` for any other extension
/// - `Error::Io` if the file can't be read
/// - `Error::Serialization` / `Error::Yaml` if the document is malformed
/// - `Error::NoPatterns` if no usable entry remains
pub fn load_custom_patterns(path: impl AsRef<Path>) -> Result<Vec<CustomPattern>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    // Check the format before touching the filesystem
    if !matches!(extension.as_str(), "json" | "yaml" | "yml") {
        return Err(Error::UnsupportedFormat(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path)?;

    let file: PatternFile = if extension == "json" {
        serde_json::from_str(&contents).map_err(|e| {
            error!("Failed to parse custom pattern JSON {:?}: {}", path, e);
            e
        })?
    } else if contents.trim().is_empty() {
        PatternFile::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|e| {
            error!("Failed to parse custom pattern YAML {:?}: {}", path, e);
            e
        })?
    };

    let patterns: Vec<CustomPattern> = file
        .patterns
        .into_iter()
        .filter_map(|entry| {
            let name = entry.name.trim();
            let regex = entry.regex.trim();
            if name.is_empty() || regex.is_empty() {
                None
            } else {
                Some(CustomPattern::new(name, regex))
            }
        })
        .collect();

    if patterns.is_empty() {
        return Err(Error::NoPatterns(path.to_path_buf()));
    }

    debug!(
        path = %path.display(),
        count = patterns.len(),
        "Loaded custom patterns"
    );

    Ok(patterns)
}
