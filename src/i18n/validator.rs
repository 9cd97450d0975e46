//! Translation consistency validation.
//!
//! Checks that the catalog covers both languages evenly and that markup using
//! both conventions on one node agrees with the catalog.

use crate::dom::Document;
use crate::i18n::{Catalog, Language, LanguageRegistry};
use crate::localization::{inline_attr, CATALOG_KEY_ATTR};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a node render differently than intended
    pub errors: Vec<String>,

    /// Suspicious differences that may be intentional
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog and markup consistency.
pub struct CatalogValidator;

static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate the catalog on its own.
    ///
    /// - every key exists in every enabled language (error)
    /// - line-break counts match across languages (warning)
    pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let languages = enabled_languages();

        let mut all_keys: Vec<&str> = languages
            .iter()
            .flat_map(|&language| catalog.keys(language))
            .collect();
        all_keys.sort_unstable();
        all_keys.dedup();

        for key in all_keys {
            let values: Vec<(Language, Option<&str>)> = languages
                .iter()
                .map(|&language| (language, catalog.lookup(language, key)))
                .collect();

            for (language, value) in &values {
                if value.is_none() {
                    report
                        .errors
                        .push(format!("Key '{}' has no {} translation", key, language));
                }
            }

            let break_counts: Vec<usize> = values
                .iter()
                .filter_map(|(_, value)| value.map(Self::count_line_breaks))
                .collect();
            if break_counts.windows(2).any(|pair| pair[0] != pair[1]) {
                report.warnings.push(format!(
                    "Line break mismatch for key '{}': {:?}",
                    key, break_counts
                ));
            }
        }

        report
    }

    /// Validate a document's translatable markup against the catalog.
    ///
    /// - catalog keys referenced by the page must exist (error)
    /// - nodes declaring both an inline pair and a catalog key must resolve
    ///   to the same text in every language (error)
    pub fn validate_document(document: &Document, catalog: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let languages = enabled_languages();

        for id in document.query_by_attribute(CATALOG_KEY_ATTR) {
            let Some(key) = document.attribute(id, CATALOG_KEY_ATTR) else {
                continue;
            };
            for &language in &languages {
                let catalog_value = catalog.lookup(language, key);
                if catalog_value.is_none() {
                    report.errors.push(format!(
                        "<{}> references unknown key '{}' for {}",
                        document.tag(id),
                        key,
                        language
                    ));
                    continue;
                }
                let inline_value = document.attribute(id, &inline_attr(language));
                if let (Some(inline), Some(from_catalog)) = (inline_value, catalog_value) {
                    if inline != from_catalog {
                        report.errors.push(format!(
                            "Key '{}' disagrees with inline {} text: '{}' vs '{}'",
                            key, language, from_catalog, inline
                        ));
                    }
                }
            }
        }

        report
    }

    /// Run both checks.
    pub fn validate(document: &Document, catalog: &Catalog) -> ValidationReport {
        let mut report = Self::validate_catalog(catalog);
        report.merge(Self::validate_document(document, catalog));
        report
    }

    fn count_line_breaks(text: &str) -> usize {
        let regex = LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
        regex.find_iter(text).count()
    }
}

fn enabled_languages() -> Vec<Language> {
    LanguageRegistry::get()
        .list_enabled()
        .into_iter()
        .filter_map(|config| Language::from_code(config.code).ok())
        .collect()
}
