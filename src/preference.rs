//! Preference store: one persisted language preference.
//!
//! The backing store may be missing or broken at any time. Stores report that
//! as an error; the localization controller logs it and carries on.

use crate::error::{Result, SiteError};
use crate::i18n::Language;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Key-value storage for string preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, optionally simulating an inaccessible backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, like storage blocked by privacy settings.
    pub fn unavailable() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            unavailable: true,
        }
    }

    /// A store pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(SiteError::StorageUnavailable(
                "storage disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        let values = self
            .values
            .lock()
            .map_err(|e| SiteError::StorageUnavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let mut values = self
            .values
            .lock()
            .map_err(|e| SiteError::StorageUnavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-object file store. The file is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(SiteError::StorageUnavailable(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_all()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }
}

/// The stored language preference: a fixed key over some store.
pub struct LanguagePreference {
    store: Box<dyn PreferenceStore>,
    key: String,
}

impl LanguagePreference {
    pub fn new(store: Box<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored language.
    ///
    /// An unrecognized stored value is logged and treated as absent; only
    /// storage failures come back as errors.
    pub fn load(&self) -> Result<Option<Language>> {
        let Some(code) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        match Language::from_code(&code) {
            Ok(language) => {
                debug!("Stored language preference: {}", language);
                Ok(Some(language))
            }
            Err(e) => {
                warn!("Ignoring stored language preference: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist the language under the preference key.
    pub fn save(&self, language: Language) -> Result<()> {
        self.store.set(&self.key, language.code())
    }
}
