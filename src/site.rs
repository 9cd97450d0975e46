//! The page context: one document and every controller attached to it.
//!
//! Components talk through the `EventBus`. The site drains its own
//! subscription in `dispatch_events`, which is where a language change
//! reaches the gallery, the forms and the content containers.

use crate::config::Config;
use crate::content::ContentLoader;
use crate::dom::Document;
use crate::error::Result;
use crate::events::{EventBus, SiteEvent};
use crate::forms::{refresh_messages, refresh_notification, submit_form, FormSpec, SubmitOutcome};
use crate::gallery::Gallery;
use crate::i18n::{Language, LocalizationMetrics};
use crate::keyboard::{command_for, Command, KeyPress};
use crate::localization::LocalizationController;
use crate::nav::{
    highlight, HighlightStrategy, IntersectionSpy, NavStrategy, ScrollSpy, SectionBounds, Viewport,
};
use crate::preference::{LanguagePreference, PreferenceStore};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

pub struct Site {
    document: Document,
    localization: LocalizationController,
    gallery: Gallery,
    content: ContentLoader,
    forms: Vec<FormSpec>,
    nav: Box<dyn HighlightStrategy + Send + Sync>,
    events: EventBus,
    receiver: broadcast::Receiver<SiteEvent>,
}

impl Site {
    /// Wire up every controller and apply the startup language.
    pub fn load(config: &Config, document: Document, store: Box<dyn PreferenceStore>) -> Result<Self> {
        let events = EventBus::new();
        let receiver = events.subscribe();

        let preference = LanguagePreference::new(store, config.preference_key.clone());
        let mut localization = LocalizationController::new(preference, events.clone())
            .with_timing(config.transition_timing());

        let mut document = document;
        let language = localization.initialize(&mut document, config.locale.as_deref());
        let gallery = Gallery::from_document(&document, language);
        let content = ContentLoader::from_config(config)?;
        let nav: Box<dyn HighlightStrategy + Send + Sync> = match config.nav_strategy {
            NavStrategy::Scroll => Box::new(ScrollSpy {
                header_offset: config.nav_header_offset,
            }),
            NavStrategy::Intersection => Box::new(IntersectionSpy {
                threshold: config.nav_visibility_threshold,
            }),
        };

        info!(
            "Site loaded in {} with {} gallery images",
            language,
            gallery.len()
        );

        Ok(Self {
            document,
            localization,
            gallery,
            content,
            forms: vec![FormSpec::contact(), FormSpec::membership()],
            nav,
            events,
            receiver,
        })
    }

    /// Replace the navigation highlighting strategy.
    pub fn with_nav_strategy(mut self, strategy: Box<dyn HighlightStrategy + Send + Sync>) -> Self {
        self.nav = strategy;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn language(&self) -> Language {
        self.localization.language()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn content(&self) -> &ContentLoader {
        &self.content
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn metrics(&self) -> &Arc<LocalizationMetrics> {
        self.localization.metrics()
    }

    // ==================== Language ====================

    pub async fn switch_language(&mut self, target: Language) -> bool {
        let switched = self
            .localization
            .switch_language(&mut self.document, target)
            .await;
        self.dispatch_events();
        switched
    }

    pub async fn toggle_language(&mut self) -> Language {
        let language = self.localization.toggle(&mut self.document).await;
        self.dispatch_events();
        language
    }

    // ==================== Input ====================

    /// Run the command bound to a key press, if any.
    pub async fn handle_key(&mut self, press: &KeyPress) -> Option<Command> {
        let command = command_for(press, self.gallery.is_open())?;
        debug!("Key {:?} -> {:?}", press.key, command);
        match command {
            Command::ToggleLanguage => {
                self.toggle_language().await;
            }
            Command::CloseLightbox => self.close_lightbox(),
            Command::NextImage => self.gallery.next(&mut self.document),
            Command::PreviousImage => self.gallery.previous(&mut self.document),
        }
        Some(command)
    }

    pub fn open_lightbox(&mut self, index: usize) -> bool {
        if !self.gallery.open(&mut self.document, index) {
            return false;
        }
        self.events.publish(SiteEvent::LightboxOpened {
            index: self.gallery.cursor(),
        });
        true
    }

    pub fn close_lightbox(&mut self) {
        self.gallery.close(&mut self.document);
        self.events.publish(SiteEvent::LightboxClosed);
    }

    /// Submit one of the page's forms by element id.
    ///
    /// Returns `None` for an unknown form id.
    pub fn submit(&mut self, form_id: &str) -> Option<SubmitOutcome> {
        let language = self.language();
        let form = self.forms.iter().find(|form| form.id == form_id)?;
        Some(submit_form(&mut self.document, form, language, &self.events))
    }

    pub fn on_scroll(&mut self, sections: &[SectionBounds], viewport: Viewport) -> Option<String> {
        highlight(&mut self.document, self.nav.as_ref(), sections, viewport)
    }

    // ==================== Content ====================

    /// Fetch the news and events files. Returns the number of failed sources.
    pub async fn load_content(&mut self) -> usize {
        let language = self.language();
        let failures = self
            .content
            .load_all(
                &mut self.document,
                language,
                &self.events,
                self.localization.metrics(),
            )
            .await;
        self.dispatch_events();
        failures
    }

    // ==================== Notifications ====================

    /// Drain pending notifications and let components react.
    ///
    /// Returns the number of events handled.
    pub fn dispatch_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Dropped {} site events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        handled
    }

    fn handle_event(&mut self, event: SiteEvent) {
        let language = match event {
            SiteEvent::LanguageChanged { language, .. } => language,
            other => {
                debug!("Site event: {:?}", other);
                return;
            }
        };

        self.gallery.rebuild(&self.document, language);
        if self.gallery.is_open() {
            self.gallery.render(&mut self.document);
        }
        for form in &self.forms {
            refresh_messages(&mut self.document, form, language);
        }
        refresh_notification(&mut self.document, language);
        self.content.render(&mut self.document, language);
    }
}
