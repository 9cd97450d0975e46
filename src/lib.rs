//! Behavior layer for a bilingual (English/Arabic) student-organization site.
//!
//! The page is modelled as an in-process `dom::Document`; the `site::Site`
//! context attaches the localization controller, gallery, forms, navigation
//! highlighter and content loader to it.

pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod events;
pub mod forms;
pub mod gallery;
pub mod i18n;
pub mod keyboard;
pub mod localization;
pub mod nav;
pub mod preference;
pub mod site;
