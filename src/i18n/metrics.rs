//! Localization metrics and observability.
//!
//! Counters are owned by whoever owns the controller, not by a global, so two
//! pages (or two tests) never share counts.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for the localization layer.
#[derive(Debug, Default)]
pub struct LocalizationMetrics {
    /// Number of times a language was applied to the document
    applies: AtomicUsize,

    /// Number of node writes performed across all applies
    nodes_localized: AtomicUsize,

    /// Number of catalog keys that had no entry for the target language
    missing_translations: AtomicUsize,

    /// Number of preference reads/writes that failed
    preference_failures: AtomicUsize,

    /// Number of content containers that fell back to the error placeholder
    content_failures: AtomicUsize,
}

impl LocalizationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_apply(&self, nodes: usize) {
        self.applies.fetch_add(1, Ordering::Relaxed);
        self.nodes_localized.fetch_add(nodes, Ordering::Relaxed);
    }

    pub fn record_missing_translation(&self) {
        self.missing_translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_preference_failure(&self) {
        self.preference_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_content_failure(&self) {
        self.content_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn applies(&self) -> usize {
        self.applies.load(Ordering::Relaxed)
    }

    pub fn missing_translations(&self) -> usize {
        self.missing_translations.load(Ordering::Relaxed)
    }

    pub fn preference_failures(&self) -> usize {
        self.preference_failures.load(Ordering::Relaxed)
    }

    pub fn content_failures(&self) -> usize {
        self.content_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let applies = self.applies();
        let nodes = self.nodes_localized.load(Ordering::Relaxed);
        let average_nodes_per_apply = if applies > 0 {
            nodes as f64 / applies as f64
        } else {
            0.0
        };

        MetricsReport {
            applies,
            nodes_localized: nodes,
            average_nodes_per_apply,
            missing_translations: self.missing_translations(),
            preference_failures: self.preference_failures(),
            content_failures: self.content_failures(),
        }
    }
}

/// Snapshot of the localization counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub applies: usize,
    pub nodes_localized: usize,
    pub average_nodes_per_apply: f64,
    pub missing_translations: usize,
    pub preference_failures: usize,
    pub content_failures: usize,
}
