//! Redaction engine: the ordered stage pipeline and its counters

use crate::counts::RedactionCounts;
use crate::detector::{Kind, MatchingRule};
use crate::error::ConfigurationError;
use crate::policy::{RedactionConfig, ResolvedPolicy};
use crate::redactor::{RedactionMode, Replacement, StandardReplacement};
use crate::validator::{MatchValidator, validator_for};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One pass of the pipeline: a kind with its rule, validator and replacement
pub struct Stage {
    kind: Kind,
    rule: Arc<dyn MatchingRule>,
    validator: Option<Arc<dyn MatchValidator>>,
    replacement: Arc<dyn Replacement>,
}

impl Stage {
    pub fn new(
        kind: Kind,
        rule: Arc<dyn MatchingRule>,
        validator: Option<Arc<dyn MatchValidator>>,
        replacement: Arc<dyn Replacement>,
    ) -> Self {
        Self {
            kind,
            rule,
            validator,
            replacement,
        }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Rewrite every accepted candidate in `text`.
    ///
    /// Returns `None` when nothing was accepted. Rejected candidates stay in
    /// place and are not counted.
    pub fn apply(&self, text: &str, counts: &mut RedactionCounts) -> Option<String> {
        let spans = self.rule.find_spans(text);
        if spans.is_empty() {
            return None;
        }

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        let mut accepted = 0usize;

        for span in spans {
            let candidate = &text[span.clone()];

            if let Some(validator) = &self.validator {
                if !validator.accepts(candidate) {
                    trace!(kind = %self.kind, "candidate rejected by validator");
                    continue;
                }
            }

            result.push_str(&text[last_end..span.start]);
            result.push_str(&self.replacement.replace(&self.kind, candidate));
            last_end = span.end;

            counts.increment(&self.kind);
            accepted += 1;
        }

        if accepted == 0 {
            return None;
        }

        result.push_str(&text[last_end..]);
        Some(result)
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("kind", &self.kind)
            .field("validated", &self.validator.is_some())
            .field("mode", &self.replacement.mode())
            .finish()
    }
}

/// Immutable redaction pipeline
///
/// Safe to share across threads; callers supply the counts to update, so
/// parallel workers can each keep a private [`RedactionCounts`].
#[derive(Debug)]
pub struct Redactor {
    stages: Vec<Stage>,
    mode: RedactionMode,
}

impl Redactor {
    /// Build the pipeline for `config`.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidCustomPattern` if a custom regex does not compile
    pub fn new(config: &RedactionConfig) -> Result<Self, ConfigurationError> {
        let policy = ResolvedPolicy::resolve(config)?;
        let replacement = Arc::new(StandardReplacement::new(config.mode, config.salt.clone()));

        Ok(Self::from_policy(&policy, replacement))
    }

    /// Build the pipeline from an already resolved policy and a replacement strategy
    pub fn from_policy(policy: &ResolvedPolicy, replacement: Arc<dyn Replacement>) -> Self {
        let stages: Vec<Stage> = policy
            .plan()
            .into_iter()
            .filter_map(|kind| {
                let rule = policy.rule(&kind)?;
                let validator = validator_for(&kind);
                Some(Stage::new(kind, rule, validator, Arc::clone(&replacement)))
            })
            .collect();

        let mode = replacement.mode();
        debug!(
            mode = %mode,
            plan = ?stages.iter().map(|s| s.kind.name()).collect::<Vec<_>>(),
            "Built redaction pipeline"
        );

        Self { stages, mode }
    }

    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Kinds in application order
    pub fn planned_order(&self) -> Vec<&Kind> {
        self.stages.iter().map(Stage::kind).collect()
    }

    /// Run every stage in order over `text`, recording accepted matches in `counts`
    pub fn redact_into(&self, text: &str, counts: &mut RedactionCounts) -> String {
        let mut current = Cow::Borrowed(text);

        for stage in &self.stages {
            if let Some(rewritten) = stage.apply(&current, counts) {
                current = Cow::Owned(rewritten);
            }
        }

        current.into_owned()
    }
}

/// Redaction engine with cumulative per-kind counts
///
/// Built once per run. Counts are never reset between calls.
#[derive(Debug)]
pub struct RedactionEngine {
    pub(crate) redactor: Arc<Redactor>,
    pub(crate) counts: RedactionCounts,
}

impl RedactionEngine {
    /// Construct an engine. Fails without returning a partial engine.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidCustomPattern` if a custom regex does not compile
    pub fn new(config: &RedactionConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::from_redactor(Arc::new(Redactor::new(config)?)))
    }

    pub fn from_redactor(redactor: Arc<Redactor>) -> Self {
        Self {
            redactor,
            counts: RedactionCounts::new(),
        }
    }

    /// Redact one string. Never fails; worst case the input comes back unchanged.
    pub fn redact(&mut self, text: &str) -> String {
        self.redactor.redact_into(text, &mut self.counts)
    }

    /// Copy of kind -> count for every kind matched so far
    pub fn snapshot_counts(&self) -> BTreeMap<String, u64> {
        self.counts.snapshot()
    }

    /// Shared handle to the pipeline, for workers with their own counts
    pub fn redactor(&self) -> Arc<Redactor> {
        Arc::clone(&self.redactor)
    }

    /// Merge counts collected by a worker
    pub fn absorb(&mut self, counts: RedactionCounts) {
        self.counts.merge(counts);
    }

    pub fn planned_order(&self) -> Vec<String> {
        self.redactor
            .planned_order()
            .into_iter()
            .map(|kind| kind.name().to_string())
            .collect()
    }
}
