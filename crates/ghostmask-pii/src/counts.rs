//! Per-kind match counting

use crate::detector::Kind;
use std::collections::{BTreeMap, HashMap};

/// Owned kind -> count aggregator
///
/// Only kinds that matched at least once have an entry. Workers processing
/// inputs in parallel each keep their own instance and [`merge`](Self::merge)
/// at join time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionCounts {
    counts: HashMap<String, u64>,
}

impl RedactionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, kind: &Kind) {
        *self.counts.entry(kind.name().to_string()).or_insert(0) += 1;
    }

    /// Add every count from `other` into `self`
    pub fn merge(&mut self, other: RedactionCounts) {
        for (kind, count) in other.counts {
            *self.counts.entry(kind).or_insert(0) += count;
        }
    }

    pub fn get(&self, kind: &str) -> u64 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Total accepted replacements across all kinds
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Copy of the counts, keys sorted
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(kind, count)| (kind.clone(), *count))
            .collect()
    }
}
