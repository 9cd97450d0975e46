//! Language type: validated language representation.
//!
//! A `Language` can only be built from a code the registry knows and has
//! enabled, so everything downstream can rely on `config()` resolving.

use crate::error::{Result, SiteError};
use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Layout direction derived from the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value written to the document's `dir` attribute.
    pub fn as_attr(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code ("en" or "ar")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const ARABIC: Language = Language { code: "ar" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => Err(SiteError::LanguageDisabled(code.to_string())),
            None => Err(SiteError::UnknownLanguage(code.to_string())),
        }
    }

    /// The fallback language used when nothing else is known.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Resolve a browser/environment locale signal to a supported language.
    ///
    /// Accepts BCP 47 tags (`ar-EG`), POSIX locales (`ar_SA.UTF-8`) or bare
    /// codes. Anything absent or unrecognized resolves to the canonical
    /// language.
    pub fn detect(signal: Option<&str>) -> Language {
        signal
            .and_then(|raw| {
                raw.split(['-', '_', '.', '@'])
                    .next()
                    .map(|primary| primary.trim().to_ascii_lowercase())
            })
            .and_then(|primary| Language::from_code(&primary).ok())
            .unwrap_or_else(Language::canonical)
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        let registry = LanguageRegistry::get();
        registry
            .get_by_code(self.code)
            .unwrap_or_else(|| registry.canonical())
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_rtl(&self) -> bool {
        self.config().rtl
    }

    pub fn direction(&self) -> Direction {
        if self.is_rtl() {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// The language a toggle switches to.
    ///
    /// With exactly two enabled languages this is simply "the other one".
    pub fn other(&self) -> Language {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .find(|config| config.code != self.code)
            .map(|config| Language { code: config.code })
            .unwrap_or(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Language {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s.trim())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
