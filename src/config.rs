use crate::localization::TransitionTiming;
use crate::nav::NavStrategy;
use anyhow::{bail, Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Preference storage
    pub preference_key: String,
    pub preference_file: String,

    // Locale signal used when no preference is stored
    pub locale: Option<String>,

    // Content data files
    pub content_base_url: String,
    pub news_path: String,
    pub events_path: String,
    pub fetch_timeout_secs: u64,

    // Language switch cross-fade
    pub transition_fade_ms: u64,
    pub transition_settle_ms: u64,

    // Navigation highlighting
    pub nav_strategy: NavStrategy,
    pub nav_header_offset: f64,
    pub nav_visibility_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preference_key: "siteLanguage".to_string(),
            preference_file: "data/preferences.json".to_string(),
            locale: None,
            content_base_url: "http://localhost:8000".to_string(),
            news_path: "/data/news.json".to_string(),
            events_path: "/data/events.json".to_string(),
            fetch_timeout_secs: 10,
            transition_fade_ms: 150,
            transition_settle_ms: 100,
            nav_strategy: NavStrategy::Scroll,
            nav_header_offset: 100.0,
            nav_visibility_threshold: 0.5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let nav_strategy = match std::env::var("NAV_STRATEGY") {
            Ok(name) => NavStrategy::from_name(&name)
                .with_context(|| {
                    format!("NAV_STRATEGY must be 'scroll' or 'intersection', got '{}'", name)
                })
                .context("Invalid site configuration")?,
            Err(_) => defaults.nav_strategy,
        };

        let config = Self {
            // Preference storage
            preference_key: std::env::var("SITE_PREFERENCE_KEY")
                .unwrap_or(defaults.preference_key),
            preference_file: std::env::var("SITE_PREFERENCE_FILE")
                .unwrap_or(defaults.preference_file),

            // Locale: explicit override first, then the process locale
            locale: std::env::var("SITE_LOCALE")
                .or_else(|_| std::env::var("LANG"))
                .ok()
                .filter(|v| !v.trim().is_empty()),

            // Content
            content_base_url: std::env::var("CONTENT_BASE_URL")
                .unwrap_or(defaults.content_base_url)
                .trim_end_matches('/')
                .to_string(),
            news_path: std::env::var("NEWS_PATH").unwrap_or(defaults.news_path),
            events_path: std::env::var("EVENTS_PATH").unwrap_or(defaults.events_path),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_timeout_secs),

            // Transition
            transition_fade_ms: std::env::var("TRANSITION_FADE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.transition_fade_ms),
            transition_settle_ms: std::env::var("TRANSITION_SETTLE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.transition_settle_ms),

            // Navigation
            nav_strategy,
            nav_header_offset: std::env::var("NAV_HEADER_OFFSET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nav_header_offset),
            nav_visibility_threshold: std::env::var("NAV_VISIBILITY_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nav_visibility_threshold),
        };

        config.validate().context("Invalid site configuration")?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.preference_key.trim().is_empty() {
            bail!("SITE_PREFERENCE_KEY must not be empty");
        }
        if !self.content_base_url.starts_with("http://")
            && !self.content_base_url.starts_with("https://")
        {
            bail!(
                "CONTENT_BASE_URL must be an http(s) URL, got '{}'",
                self.content_base_url
            );
        }
        if !(0.0..=1.0).contains(&self.nav_visibility_threshold) {
            bail!(
                "NAV_VISIBILITY_THRESHOLD must be between 0 and 1, got {}",
                self.nav_visibility_threshold
            );
        }
        Ok(())
    }

    pub fn news_url(&self) -> String {
        format!("{}{}", self.content_base_url, self.news_path)
    }

    pub fn events_url(&self) -> String {
        format!("{}{}", self.content_base_url, self.events_path)
    }

    pub fn transition_timing(&self) -> TransitionTiming {
        TransitionTiming::new(
            Duration::from_millis(self.transition_fade_ms),
            Duration::from_millis(self.transition_settle_ms),
        )
    }
}
