//! Policy resolution and application order planning

use crate::detector::{BuiltinRule, CustomPattern, CustomRule, Kind, MatchingRule};
use crate::error::ConfigurationError;
use crate::redactor::RedactionMode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Replacement mode applied to every accepted match
    #[serde(default)]
    pub mode: RedactionMode,

    /// Digest salt (hash mode only)
    #[serde(default)]
    pub salt: String,

    /// Comma-separated explicit kind list; blank selects the defaults
    #[serde(default)]
    pub types: String,

    /// Comma-separated locale packs, e.g. "br"
    #[serde(default)]
    pub locales: String,

    /// User-defined detectors, in declaration order. Always enabled.
    #[serde(default)]
    pub custom_patterns: Vec<CustomPattern>,
}

impl RedactionConfig {
    pub fn new(mode: RedactionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    pub fn with_types(mut self, types: impl Into<String>) -> Self {
        self.types = types.into();
        self
    }

    pub fn with_locales(mut self, locales: impl Into<String>) -> Self {
        self.locales = locales.into();
        self
    }

    pub fn with_custom_pattern(mut self, name: impl Into<String>, regex: impl Into<String>) -> Self {
        self.custom_patterns.push(CustomPattern::new(name, regex));
        self
    }
}

/// Enabled kinds bound to their rules
pub struct ResolvedPolicy {
    rules: HashMap<Kind, Arc<dyn MatchingRule>>,
    custom_order: Vec<Kind>,
}

impl ResolvedPolicy {
    /// Resolve the enabled kinds and bind each one to a rule.
    ///
    /// Unknown kind names and unknown locale packs are ignored. Custom
    /// patterns are always enabled and replace a built-in binding of the same
    /// name.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidCustomPattern` if a custom regex does not compile
    pub fn resolve(config: &RedactionConfig) -> Result<Self, ConfigurationError> {
        let mut enabled: HashSet<Kind> = if config.types.trim().is_empty() {
            Kind::DEFAULTS.into_iter().collect()
        } else {
            split_list(&config.types).map(Kind::from_name).collect()
        };

        for pack in split_list(&config.locales) {
            if let Some(kinds) = Kind::locale_pack(pack) {
                enabled.extend(kinds.iter().cloned());
            }
        }

        let mut rules: HashMap<Kind, Arc<dyn MatchingRule>> = HashMap::new();
        for kind in &enabled {
            if let Some(rule) = BuiltinRule::for_kind(kind) {
                rules.insert(kind.clone(), Arc::new(rule));
            }
        }

        let mut custom_order = Vec::new();
        for pattern in &config.custom_patterns {
            let name = pattern.name.trim();
            let source = pattern.regex.trim();
            if name.is_empty() || source.is_empty() {
                continue;
            }

            let rule = CustomRule::compile(name, source)?;
            let kind = Kind::from_name(name);
            rules.insert(kind.clone(), Arc::new(rule));
            custom_order.push(kind);
        }

        Ok(Self {
            rules,
            custom_order,
        })
    }

    /// Names of every kind that has a rule
    pub fn enabled_kinds(&self) -> BTreeSet<String> {
        self.rules.keys().map(|kind| kind.name().to_string()).collect()
    }

    pub fn rule(&self, kind: &Kind) -> Option<Arc<dyn MatchingRule>> {
        self.rules.get(kind).cloned()
    }

    /// Application order: enabled built-ins in canonical order, then custom
    /// kinds in declaration order. A kind appears at its first position only.
    pub fn plan(&self) -> Vec<Kind> {
        let builtins = Kind::CANONICAL_ORDER
            .into_iter()
            .filter(|kind| self.rules.contains_key(kind));

        let mut seen = HashSet::new();
        builtins
            .chain(self.custom_order.iter().cloned())
            .filter(|kind| seen.insert(kind.clone()))
            .collect()
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests;
