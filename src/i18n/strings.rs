use crate::i18n::Language;

/// Localized strings the behavior layer writes on its own account.
///
/// Page copy lives in the markup (inline pairs) or in the `Catalog`; this
/// table only covers text produced by the controllers themselves.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Document ====================
    /// Document title
    pub site_title: &'static str,

    // ==================== Form Validation ====================
    /// Required field left empty
    pub field_required: &'static str,

    /// Email field with a malformed address
    pub invalid_email: &'static str,

    /// Required select left on its placeholder option
    pub selection_required: &'static str,

    /// Free text shorter than the minimum
    /// Placeholders: {min}
    pub message_too_short: &'static str,

    /// Notification shown after a form passes validation
    pub form_success: &'static str,

    // ==================== Gallery ====================
    /// Caption used when an image carries no caption of its own
    pub gallery_fallback_caption: &'static str,

    // ==================== Content Loader ====================
    /// Placeholder rendered when a data file cannot be fetched or parsed
    pub content_error: &'static str,

    /// Shown when a data file holds an empty collection
    pub content_empty: &'static str,

    /// Label preceding an event's location
    pub location_label: &'static str,

    // ==================== Dates ====================
    /// Month names, January first
    pub months: [&'static str; 12],

    /// Long date layout
    /// Placeholders: {day}, {month}, {year}
    pub date_format: &'static str,

    /// Digit glyphs, zero first
    pub digits: [char; 10],
}

impl LanguageStrings {
    /// Get the string table for a language.
    pub fn for_language(language: Language) -> &'static LanguageStrings {
        match language.code() {
            "ar" => &ARABIC_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }

    /// Minimum-length message with the threshold filled in.
    pub fn too_short(&self, min: usize) -> String {
        self.message_too_short
            .replace("{min}", &self.localize_digits(&min.to_string()))
    }

    /// Replace ASCII digits with this language's digit glyphs.
    pub fn localize_digits(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if c.is_ascii_digit() => self.digits[d as usize],
                _ => c,
            })
            .collect()
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    site_title: "Arab Student Association",

    field_required: "This field is required",
    invalid_email: "Please enter a valid email address",
    selection_required: "Please select an option",
    message_too_short: "Message must be at least {min} characters long",
    form_success: "Thank you! Your message has been sent successfully.",

    gallery_fallback_caption: "Gallery image",

    content_error: "Unable to load content. Please try again later.",
    content_empty: "Nothing to show yet. Check back soon!",
    location_label: "Location",

    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    date_format: "{month} {day}, {year}",
    digits: ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'],
};

// ==================== Arabic Strings ====================

pub const ARABIC_STRINGS: LanguageStrings = LanguageStrings {
    site_title: "جمعية الطلاب العرب",

    field_required: "هذا الحقل مطلوب",
    invalid_email: "يرجى إدخال بريد إلكتروني صحيح",
    selection_required: "يرجى اختيار أحد الخيارات",
    message_too_short: "يجب ألا تقل الرسالة عن {min} أحرف",
    form_success: "شكراً لك! تم إرسال رسالتك بنجاح.",

    gallery_fallback_caption: "صورة من المعرض",

    content_error: "تعذر تحميل المحتوى. يرجى المحاولة لاحقاً.",
    content_empty: "لا يوجد محتوى بعد. تابعونا قريباً!",
    location_label: "المكان",

    months: [
        "يناير",
        "فبراير",
        "مارس",
        "أبريل",
        "مايو",
        "يونيو",
        "يوليو",
        "أغسطس",
        "سبتمبر",
        "أكتوبر",
        "نوفمبر",
        "ديسمبر",
    ],
    date_format: "{day} {month} {year}",
    digits: ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_language_selects_table() {
        assert_eq!(
            LanguageStrings::for_language(Language::ENGLISH).site_title,
            ENGLISH_STRINGS.site_title
        );
        assert_eq!(
            LanguageStrings::for_language(Language::ARABIC).site_title,
            ARABIC_STRINGS.site_title
        );
    }

    #[test]
    fn test_titles_differ() {
        assert_ne!(ENGLISH_STRINGS.site_title, ARABIC_STRINGS.site_title);
    }

    // ==================== Placeholder Tests ====================

    #[test]
    fn test_too_short_placeholder() {
        assert!(ENGLISH_STRINGS.message_too_short.contains("{min}"));
        assert!(ARABIC_STRINGS.message_too_short.contains("{min}"));
        assert_eq!(
            ENGLISH_STRINGS.too_short(10),
            "Message must be at least 10 characters long"
        );
    }

    #[test]
    fn test_localize_digits() {
        assert_eq!(ENGLISH_STRINGS.localize_digits("2024"), "2024");
        assert_eq!(ARABIC_STRINGS.localize_digits("15 / 2024"), "١٥ / ٢٠٢٤");
        assert_eq!(ARABIC_STRINGS.too_short(10), "يجب ألا تقل الرسالة عن ١٠ أحرف");
    }

    #[test]
    fn test_date_format_placeholders() {
        for strings in [&ENGLISH_STRINGS, &ARABIC_STRINGS] {
            assert!(strings.date_format.contains("{day}"));
            assert!(strings.date_format.contains("{month}"));
            assert!(strings.date_format.contains("{year}"));
        }
    }

    #[test]
    fn test_no_empty_messages() {
        for strings in [&ENGLISH_STRINGS, &ARABIC_STRINGS] {
            assert!(!strings.field_required.is_empty());
            assert!(!strings.invalid_email.is_empty());
            assert!(!strings.selection_required.is_empty());
            assert!(!strings.form_success.is_empty());
            assert!(!strings.gallery_fallback_caption.is_empty());
            assert!(!strings.content_error.is_empty());
            assert!(strings.months.iter().all(|m| !m.is_empty()));
        }
    }
}
