//! Language registry: Single source of truth for the site's two languages.
//!
//! The registry is static data, so it lives behind a `OnceLock` and is shared
//! read-only. The *active* language is never stored here; it is held by the
//! `LocalizationController` and passed to whoever needs it.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code ("en", "ar")
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Native name of the language, used on the language toggle button
    pub native_name: &'static str,

    /// Whether the layout runs right-to-left
    pub rtl: bool,

    /// Whether this is the fallback language (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in toggle order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical (fallback) language configuration.
    ///
    /// Falls back to the first registered language if none is flagged, so a
    /// misconfigured registry still yields a usable page.
    pub fn canonical(&self) -> &LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.is_canonical)
            .unwrap_or(&self.languages[0])
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            rtl: false,
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            rtl: true,
            is_canonical: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get().get_by_code("en").unwrap();
        assert_eq!(config.name, "English");
        assert!(!config.rtl);
        assert!(config.is_canonical);
    }

    #[test]
    fn test_get_by_code_arabic() {
        let config = LanguageRegistry::get().get_by_code("ar").unwrap();
        assert_eq!(config.name, "Arabic");
        assert_eq!(config.native_name, "العربية");
        assert!(config.rtl);
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_enabled_contains_both() {
        let enabled = LanguageRegistry::get().list_enabled();
        let codes: Vec<_> = enabled.iter().map(|lang| lang.code).collect();
        assert_eq!(codes, vec!["en", "ar"]);
    }

    #[test]
    fn test_canonical_is_english() {
        assert_eq!(LanguageRegistry::get().canonical().code, "en");
    }

    #[test]
    fn test_exactly_one_rtl_language() {
        let rtl_count = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .filter(|lang| lang.rtl)
            .count();
        assert_eq!(rtl_count, 1);
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("ar"));
        assert!(!registry.is_enabled("es"));
    }
}
