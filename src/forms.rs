//! Form validation with localized messages.
//!
//! `validate_value` is pure; `validate_field` mirrors its result onto the
//! document (invalid class plus one message node after the field).

use crate::dom::{Document, ElementId};
use crate::events::{EventBus, SiteEvent};
use crate::i18n::{Language, LanguageStrings};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Minimum length of free-text answers, in characters after trimming.
pub const MIN_MESSAGE_LENGTH: usize = 10;

pub const INVALID_CLASS: &str = "error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";
pub const NOTIFICATION_CLASS: &str = "notification";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// What kind of answer a field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    /// A select list whose empty value means "nothing chosen"
    Choice,
    /// Free text subject to `MIN_MESSAGE_LENGTH`
    FreeText,
}

/// Metadata for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// DOM id of the control
    pub id: &'static str,
    /// Markup input type ("text", "email", "select", "textarea")
    pub input_type: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(id: &'static str, input_type: &'static str, required: bool, kind: FieldKind) -> Self {
        Self {
            id,
            input_type,
            required,
            kind,
        }
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    SelectionRequired,
    TooShort { min: usize },
}

impl FieldError {
    /// Localized message for this failure.
    pub fn message(&self, language: Language) -> String {
        let strings = LanguageStrings::for_language(language);
        match self {
            FieldError::Required => strings.field_required.to_string(),
            FieldError::InvalidEmail => strings.invalid_email.to_string(),
            FieldError::SelectionRequired => strings.selection_required.to_string(),
            FieldError::TooShort { min } => strings.too_short(*min),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    regex.is_match(value)
}

/// Validate a raw value against its field metadata.
pub fn validate_value(value: &str, spec: &FieldSpec) -> Result<(), FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return match (spec.required, spec.kind) {
            (false, _) => Ok(()),
            (true, FieldKind::Choice) => Err(FieldError::SelectionRequired),
            (true, _) => Err(FieldError::Required),
        };
    }

    if (spec.kind == FieldKind::Email || spec.input_type == "email") && !is_valid_email(trimmed) {
        return Err(FieldError::InvalidEmail);
    }

    if spec.kind == FieldKind::FreeText && trimmed.chars().count() < MIN_MESSAGE_LENGTH {
        return Err(FieldError::TooShort {
            min: MIN_MESSAGE_LENGTH,
        });
    }

    Ok(())
}

/// Validate a field in the document and update its markings.
///
/// Any previous marking is cleared first, so repeated calls leave at most one
/// message node. A field missing from the page counts as valid.
pub fn validate_field(
    document: &mut Document,
    spec: &FieldSpec,
    language: Language,
) -> Result<(), FieldError> {
    let Some(field) = document.get_element_by_id(spec.id) else {
        debug!("Field #{} not on this page", spec.id);
        return Ok(());
    };

    clear_field_error(document, field, spec.id);

    let value = document.value(field).to_string();
    let result = validate_value(&value, spec);
    if let Err(error) = result {
        document.add_class(field, INVALID_CLASS);
        let message = document.create_element("div");
        document.add_class(message, ERROR_MESSAGE_CLASS);
        document.set_attribute(message, "data-for", spec.id);
        document.set_text(message, &error.message(language));
        document.insert_after(field, message);
    }
    result
}

fn clear_field_error(document: &mut Document, field: ElementId, field_id: &str) {
    document.remove_class(field, INVALID_CLASS);
    for message in document.query_by_class(ERROR_MESSAGE_CLASS) {
        if document.attribute(message, "data-for") == Some(field_id) {
            document.remove(message);
        }
    }
}

/// Error message nodes currently shown for a field.
pub fn error_messages_for(document: &Document, field_id: &str) -> Vec<ElementId> {
    document
        .query_by_class(ERROR_MESSAGE_CLASS)
        .into_iter()
        .filter(|&message| document.attribute(message, "data-for") == Some(field_id))
        .collect()
}

/// A form and the fields checked on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    /// DOM id of the form element
    pub id: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    pub fn contact() -> Self {
        Self {
            id: "contact-form",
            fields: vec![
                FieldSpec::new("contact-name", "text", true, FieldKind::Text),
                FieldSpec::new("contact-email", "email", true, FieldKind::Email),
                FieldSpec::new("contact-subject", "select", true, FieldKind::Choice),
                FieldSpec::new("contact-message", "textarea", true, FieldKind::FreeText),
            ],
        }
    }

    pub fn membership() -> Self {
        Self {
            id: "join-form",
            fields: vec![
                FieldSpec::new("join-name", "text", true, FieldKind::Text),
                FieldSpec::new("join-email", "email", true, FieldKind::Email),
                FieldSpec::new("join-major", "select", true, FieldKind::Choice),
                FieldSpec::new("join-phone", "text", false, FieldKind::Text),
            ],
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Blocked { errors: Vec<(&'static str, FieldError)> },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Validate every field of a form; on success notify and reset.
///
/// All fields are checked so every problem is shown at once.
pub fn submit_form(
    document: &mut Document,
    form: &FormSpec,
    language: Language,
    events: &EventBus,
) -> SubmitOutcome {
    let errors: Vec<(&'static str, FieldError)> = form
        .fields
        .iter()
        .filter_map(|spec| {
            validate_field(document, spec, language)
                .err()
                .map(|error| (spec.id, error))
        })
        .collect();

    if !errors.is_empty() {
        for (field, error) in &errors {
            events.publish(SiteEvent::ValidationFailed {
                field: field.to_string(),
                message: error.message(language),
            });
        }
        debug!("Form #{} blocked by {} invalid fields", form.id, errors.len());
        return SubmitOutcome::Blocked { errors };
    }

    show_success(document, language);
    reset_form(document, form);
    info!("Form #{} submitted", form.id);
    events.publish(SiteEvent::FormSubmitted {
        form: form.id.to_string(),
    });
    SubmitOutcome::Submitted
}

/// Re-render messages of fields that are currently marked invalid.
pub fn refresh_messages(document: &mut Document, form: &FormSpec, language: Language) {
    for spec in &form.fields {
        let marked = document
            .get_element_by_id(spec.id)
            .map(|field| document.has_class(field, INVALID_CLASS))
            .unwrap_or(false);
        if marked {
            let _ = validate_field(document, spec, language);
        }
    }
}

/// Re-render the text of a success notification that is still showing.
pub fn refresh_notification(document: &mut Document, language: Language) {
    let text = LanguageStrings::for_language(language).form_success;
    for notification in document.query_by_class(NOTIFICATION_CLASS) {
        if document.has_class(notification, "success") {
            document.set_text(notification, text);
        }
    }
}

fn show_success(document: &mut Document, language: Language) {
    for old in document.query_by_class(NOTIFICATION_CLASS) {
        document.remove(old);
    }
    let body = document.body();
    let notification = document.append(body, "div");
    document.add_class(notification, NOTIFICATION_CLASS);
    document.add_class(notification, "success");
    document.set_text(
        notification,
        LanguageStrings::for_language(language).form_success,
    );
}

fn reset_form(document: &mut Document, form: &FormSpec) {
    for spec in &form.fields {
        if let Some(field) = document.get_element_by_id(spec.id) {
            document.set_value(field, "");
            clear_field_error(document, field, spec.id);
        }
    }
}
