//! Explicit notifications between the site's components.

use crate::i18n::Language;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 64;

/// Something that happened on the page that other components may react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SiteEvent {
    /// Fired once a language switch has been applied and persisted
    LanguageChanged {
        language: Language,
        #[serde(rename = "isRTL")]
        is_rtl: bool,
    },

    /// A field failed validation
    ValidationFailed { field: String, message: String },

    /// A form passed validation and was reset
    FormSubmitted { form: String },

    /// A content container was filled from its data file
    ContentLoaded { container: String, entries: usize },

    /// A content container shows the error placeholder
    ContentFailed { container: String },

    LightboxOpened { index: usize },

    LightboxClosed,
}

impl SiteEvent {
    pub fn language_changed(language: Language) -> Self {
        SiteEvent::LanguageChanged {
            language,
            is_rtl: language.is_rtl(),
        }
    }
}

/// Broadcast channel for `SiteEvent`s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SiteEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish an event. Having no listeners is not an error.
    pub fn publish(&self, event: SiteEvent) {
        debug!("Publishing {:?}", event);
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_listeners() {
        let bus = EventBus::new();
        bus.publish(SiteEvent::LightboxClosed);
    }

    #[test]
    fn test_subscriber_receives_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(SiteEvent::LightboxOpened { index: 2 });
        bus.publish(SiteEvent::LightboxClosed);

        assert_eq!(rx.try_recv().unwrap(), SiteEvent::LightboxOpened { index: 2 });
        assert_eq!(rx.try_recv().unwrap(), SiteEvent::LightboxClosed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_language_changed_payload() {
        let event = SiteEvent::language_changed(Language::ARABIC);
        assert_eq!(
            event,
            SiteEvent::LanguageChanged {
                language: Language::ARABIC,
                is_rtl: true
            }
        );
    }

    #[test]
    fn test_language_changed_serializes_like_custom_event_detail() {
        let json = serde_json::to_value(SiteEvent::language_changed(Language::ARABIC)).unwrap();
        assert_eq!(json["type"], "languageChanged");
        assert_eq!(json["language"], "ar");
        assert_eq!(json["isRTL"], true);
    }
}
