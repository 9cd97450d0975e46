//! Localization controller.
//!
//! Owns the active language and rewrites the document whenever it changes:
//! root `lang`/`dir` markers, the title, and every node that carries
//! translatable content.
//!
//! # Markup conventions
//!
//! - Inline pair: `data-en="..." data-ar="..."` on the node itself
//! - Catalog key: `data-i18n="contactSubmit"`, looked up in the `Catalog`
//!
//! Both are normalized into a `TranslatableNode` and written by one dispatch
//! on the node's `Slot`. When a node carries both, the catalog key wins.

use crate::dom::{Document, ElementId};
use crate::events::{EventBus, SiteEvent};
use crate::i18n::{Catalog, Language, LanguageStrings, LocalizationMetrics, LINE_BREAK_MARKER};
use crate::preference::LanguagePreference;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Attribute holding a catalog key.
pub const CATALOG_KEY_ATTR: &str = "data-i18n";

/// Body class present while a language switch is fading.
pub const TRANSITION_CLASS: &str = "lang-transition";

/// Attribute carrying the inline value for a language, e.g. `data-ar`.
pub fn inline_attr(language: Language) -> String {
    format!("data-{}", language.code())
}

/// Where a localized value is written on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Text content (raw markup if the value holds a line break)
    Text,
    /// Placeholder of an input or textarea
    Placeholder,
    /// Display text of a select option
    OptionLabel,
}

impl Slot {
    fn for_element(document: &Document, id: ElementId) -> Slot {
        let element = document.element(id);
        if element.is_input_like() {
            Slot::Placeholder
        } else if element.tag == "option" {
            Slot::OptionLabel
        } else {
            Slot::Text
        }
    }
}

/// Where a localized value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline { en: String, ar: String },
    Catalog(String),
}

impl TextSource {
    /// Read the source declared on a node, if any.
    ///
    /// Inline pairs only count when both languages are present.
    pub fn from_element(document: &Document, id: ElementId) -> Option<TextSource> {
        if let Some(key) = document.attribute(id, CATALOG_KEY_ATTR) {
            return Some(TextSource::Catalog(key.to_string()));
        }
        let en = document.attribute(id, &inline_attr(Language::ENGLISH))?;
        let ar = document.attribute(id, &inline_attr(Language::ARABIC))?;
        Some(TextSource::Inline {
            en: en.to_string(),
            ar: ar.to_string(),
        })
    }

    /// Resolve the text for a language. `None` means "leave as is".
    pub fn resolve<'a>(&'a self, catalog: &Catalog, language: Language) -> Option<&'a str> {
        match self {
            TextSource::Inline { en, ar } => {
                if language == Language::ARABIC {
                    Some(ar.as_str())
                } else {
                    Some(en.as_str())
                }
            }
            TextSource::Catalog(key) => catalog.lookup(language, key),
        }
    }
}

/// A node that gets rewritten on every language change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableNode {
    pub element: ElementId,
    pub slot: Slot,
    pub source: TextSource,
}

/// Collect every translatable node in document order.
pub fn scan(document: &Document) -> Vec<TranslatableNode> {
    document
        .all()
        .into_iter()
        .filter_map(|id| {
            TextSource::from_element(document, id).map(|source| TranslatableNode {
                element: id,
                slot: Slot::for_element(document, id),
                source,
            })
        })
        .collect()
}

/// Delays of the cosmetic cross-fade around a language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Wait after marking the transition, before rewriting content
    pub fade: Duration,
    /// Wait after rewriting, before clearing the transition mark
    pub settle: Duration,
}

impl TransitionTiming {
    pub fn new(fade: Duration, settle: Duration) -> Self {
        Self { fade, settle }
    }

    /// No delays; the switch completes in one pass.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(150), Duration::from_millis(100))
    }
}

/// A switch that has marked the document and is waiting to rewrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingSwitch {
    target: Language,
}

impl PendingSwitch {
    pub fn target(&self) -> Language {
        self.target
    }
}

/// A switch that has been applied and persisted, waiting to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct CommittedSwitch {
    language: Language,
}

/// Holds the active language and applies it to a document.
pub struct LocalizationController {
    language: Language,
    preference: LanguagePreference,
    events: EventBus,
    timing: TransitionTiming,
    metrics: Arc<LocalizationMetrics>,
    catalog: &'static Catalog,
}

impl LocalizationController {
    pub fn new(preference: LanguagePreference, events: EventBus) -> Self {
        Self {
            language: Language::canonical(),
            preference,
            events,
            timing: TransitionTiming::default(),
            metrics: Arc::new(LocalizationMetrics::new()),
            catalog: Catalog::get(),
        }
    }

    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<LocalizationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_rtl(&self) -> bool {
        self.language.is_rtl()
    }

    pub fn metrics(&self) -> &Arc<LocalizationMetrics> {
        &self.metrics
    }

    /// Resolve the startup language and apply it once.
    ///
    /// Order: stored preference, then the detected locale signal, then the
    /// canonical language. Nothing is written to the store here.
    pub fn initialize(&mut self, document: &mut Document, detected: Option<&str>) -> Language {
        let stored = match self.preference.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Language preference unavailable, using detected locale: {}", e);
                self.metrics.record_preference_failure();
                None
            }
        };
        let language = stored.unwrap_or_else(|| Language::detect(detected));
        info!(
            "Initializing page language: {} ({})",
            language,
            if stored.is_some() { "stored" } else { "detected" }
        );
        self.apply(document, language);
        language
    }

    /// Apply a language to the document and make it the active one.
    ///
    /// Returns the number of node writes performed.
    pub fn apply(&mut self, document: &mut Document, language: Language) -> usize {
        self.language = language;

        // 1. Document-level markers
        let direction = language.direction().as_attr();
        document.lang = language.code().to_string();
        document.dir = direction.to_string();
        let root = document.root();
        document.set_attribute(root, "lang", language.code());
        document.set_attribute(root, "dir", direction);

        // 2. Title
        document.title = LanguageStrings::for_language(language)
            .site_title
            .to_string();

        // 3. Every translatable node
        let nodes = scan(document);
        let mut written = 0;
        for node in &nodes {
            if self.write_node(document, node, language) {
                written += 1;
            }
        }

        // 4. Option labels of select lists, re-applied
        for select in document.query_by_tag("select") {
            for option in document.descendants(select) {
                if document.tag(option) != "option" {
                    continue;
                }
                if let Some(source) = TextSource::from_element(document, option) {
                    if let Some(label) = source.resolve(self.catalog, language) {
                        let label = label.to_string();
                        document.set_text(option, &label);
                    }
                }
            }
        }

        self.metrics.record_apply(written);
        debug!(
            "Applied language {} to {} of {} translatable nodes",
            language,
            written,
            nodes.len()
        );
        written
    }

    fn write_node(&self, document: &mut Document, node: &TranslatableNode, language: Language) -> bool {
        let Some(value) = node.source.resolve(self.catalog, language) else {
            if let TextSource::Catalog(key) = &node.source {
                debug!("No {} translation for key '{}'", language, key);
            }
            self.metrics.record_missing_translation();
            return false;
        };

        match node.slot {
            Slot::Placeholder => document.set_placeholder(node.element, value),
            Slot::OptionLabel => document.set_text(node.element, value),
            Slot::Text if value.contains(LINE_BREAK_MARKER) => {
                document.set_markup(node.element, value)
            }
            Slot::Text => document.set_text(node.element, value),
        }
        true
    }

    // ==================== Language Switching ====================

    /// Start a switch: mark the document as mid-transition.
    ///
    /// Returns `None` when `target` is already active.
    pub fn begin_switch(&self, document: &mut Document, target: Language) -> Option<PendingSwitch> {
        if target == self.language {
            debug!("Language {} already active", target);
            return None;
        }
        let body = document.body();
        document.add_class(body, TRANSITION_CLASS);
        Some(PendingSwitch { target })
    }

    /// Apply the pending language and persist it.
    ///
    /// A failed write is logged and never blocks the visual switch.
    pub fn commit_switch(&mut self, document: &mut Document, pending: PendingSwitch) -> CommittedSwitch {
        let language = pending.target;
        self.apply(document, language);
        if let Err(e) = self.preference.save(language) {
            warn!("Could not save language preference: {}", e);
            self.metrics.record_preference_failure();
        }
        CommittedSwitch { language }
    }

    /// Clear the transition mark and announce the new language.
    pub fn settle_switch(&self, document: &mut Document, committed: CommittedSwitch) {
        let body = document.body();
        document.remove_class(body, TRANSITION_CLASS);
        info!("Language switched to {}", committed.language);
        self.events
            .publish(SiteEvent::language_changed(committed.language));
    }

    /// Switch to `target` with the staged cross-fade.
    ///
    /// Returns false if `target` was already active.
    pub async fn switch_language(&mut self, document: &mut Document, target: Language) -> bool {
        let Some(pending) = self.begin_switch(document, target) else {
            return false;
        };
        sleep(self.timing.fade).await;
        let committed = self.commit_switch(document, pending);
        sleep(self.timing.settle).await;
        self.settle_switch(document, committed);
        true
    }

    /// Switch to the other supported language.
    pub async fn toggle(&mut self, document: &mut Document) -> Language {
        let target = self.language.other();
        self.switch_language(document, target).await;
        self.language
    }
}
