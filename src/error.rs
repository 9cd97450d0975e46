//! Error types shared across the behavior layer.
//!
//! Nothing here is fatal to the page: callers log these and degrade the one
//! feature that failed.

use thiserror::Error;

/// Errors that can occur while localizing, persisting or loading content.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Language code not present in the registry
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    /// Language present in the registry but switched off
    #[error("Language '{0}' is not enabled")]
    LanguageDisabled(String),

    /// Backing store for preferences cannot be reached
    #[error("Preference storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Preference file could not be read or written
    #[error("Preference storage I/O error: {0}")]
    StorageIo(#[from] std::io::Error),

    /// Non-success HTTP status from a content endpoint
    #[error("Content request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Transport-level failure talking to a content endpoint
    #[error("Content request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not valid JSON
    #[error("Content parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON parsed but held no array anywhere
    #[error("No collection found in response from {0}")]
    MissingCollection(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
