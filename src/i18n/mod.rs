//! Internationalization (i18n) module for the English/Arabic site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Validated `Language` type plus layout `Direction`
//! - `catalog`: Key-based translation catalog used by `data-i18n` markup
//! - `strings`: Typed strings emitted by the controllers (validation, captions, errors)
//! - `validator`: Catalog and markup consistency checks
//! - `metrics`: Localization counters
//!
//! # Example
//!
//! ```rust,ignore
//! use bilingual_site::i18n::{Catalog, Language};
//!
//! let arabic = Language::from_code("ar")?;
//! assert!(arabic.is_rtl());
//! let label = Catalog::get().lookup(arabic, "contactSubmit");
//! ```

mod catalog;
mod language;
mod metrics;
mod registry;
mod strings;
mod validator;

pub use catalog::{Catalog, LINE_BREAK_MARKER};
pub use language::{Direction, Language};
pub use metrics::{LocalizationMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
pub use validator::{CatalogValidator, ValidationReport};
