//! Translation catalog: language -> key -> text.
//!
//! Backs the `data-i18n="key"` markup convention. Like the registry, the
//! catalog is immutable static data initialized on first access.

use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Marker that makes a localized value render as raw markup.
pub const LINE_BREAK_MARKER: &str = "<br";

const ENGLISH_ENTRIES: &[(&str, &str)] = &[
    ("navHome", "Home"),
    ("navAbout", "About"),
    ("navEvents", "Events"),
    ("navNews", "News"),
    ("navGallery", "Gallery"),
    ("navContact", "Contact"),
    ("heroTitle", "Welcome to the<br>Arab Student Association"),
    (
        "heroSubtitle",
        "Celebrating culture, building community, supporting students.",
    ),
    ("aboutTitle", "About Us"),
    ("newsTitle", "Latest News"),
    ("eventsTitle", "Upcoming Events"),
    ("galleryTitle", "Gallery"),
    ("contactTitle", "Get in Touch"),
    ("contactName", "Your name"),
    ("contactEmail", "Your email"),
    ("contactSubject", "Choose a subject"),
    ("contactSubjectGeneral", "General inquiry"),
    ("contactSubjectMembership", "Membership"),
    ("contactSubjectEvents", "Events"),
    ("contactMessage", "Your message"),
    ("contactSubmit", "Send Message"),
    ("joinTitle", "Become a Member"),
    ("joinMajor", "Select your major"),
    ("joinSubmit", "Join Now"),
    ("languageToggle", "العربية"),
    ("footerRights", "All rights reserved."),
];

const ARABIC_ENTRIES: &[(&str, &str)] = &[
    ("navHome", "الرئيسية"),
    ("navAbout", "من نحن"),
    ("navEvents", "الفعاليات"),
    ("navNews", "الأخبار"),
    ("navGallery", "المعرض"),
    ("navContact", "تواصل معنا"),
    ("heroTitle", "مرحباً بكم في<br>جمعية الطلاب العرب"),
    ("heroSubtitle", "نحتفي بالثقافة، نبني المجتمع، وندعم الطلاب."),
    ("aboutTitle", "من نحن"),
    ("newsTitle", "آخر الأخبار"),
    ("eventsTitle", "الفعاليات القادمة"),
    ("galleryTitle", "المعرض"),
    ("contactTitle", "تواصل معنا"),
    ("contactName", "اسمك"),
    ("contactEmail", "بريدك الإلكتروني"),
    ("contactSubject", "اختر الموضوع"),
    ("contactSubjectGeneral", "استفسار عام"),
    ("contactSubjectMembership", "العضوية"),
    ("contactSubjectEvents", "الفعاليات"),
    ("contactMessage", "رسالتك"),
    ("contactSubmit", "إرسال الرسالة"),
    ("joinTitle", "انضم إلينا"),
    ("joinMajor", "اختر تخصصك"),
    ("joinSubmit", "انضم الآن"),
    ("languageToggle", "English"),
    ("footerRights", "جميع الحقوق محفوظة."),
];

/// In-memory translation catalog.
pub struct Catalog {
    entries: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Get the global catalog instance.
    pub fn get() -> &'static Catalog {
        CATALOG.get_or_init(|| {
            Catalog::from_entries(&[("en", ENGLISH_ENTRIES), ("ar", ARABIC_ENTRIES)])
        })
    }

    /// Build a catalog from per-language entry tables.
    pub fn from_entries(tables: &[(&'static str, &[(&'static str, &'static str)])]) -> Catalog {
        let entries = tables
            .iter()
            .map(|(code, table)| (*code, table.iter().copied().collect()))
            .collect();
        Catalog { entries }
    }

    /// Look up a key for a language. `None` means "leave content as is".
    pub fn lookup(&self, language: Language, key: &str) -> Option<&'static str> {
        self.entries
            .get(language.code())
            .and_then(|table| table.get(key))
            .copied()
    }

    /// Keys defined for a language, sorted.
    pub fn keys(&self, language: Language) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .entries
            .get(language.code())
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}
