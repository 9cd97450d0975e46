//! Gallery and lightbox controller.
//!
//! Image descriptors are read from `.gallery-item` markup and fully rebuilt
//! on every language change. The lightbox is optional; without it the cursor
//! still moves and rendering is skipped.

use crate::dom::{Document, ElementId};
use crate::i18n::{Language, LanguageStrings};
use crate::localization::inline_attr;
use tracing::{debug, warn};

pub const GALLERY_ITEM_CLASS: &str = "gallery-item";
pub const LIGHTBOX_ID: &str = "lightbox";
pub const LIGHTBOX_IMAGE_ID: &str = "lightbox-image";
pub const LIGHTBOX_CAPTION_ID: &str = "lightbox-caption";
pub const LIGHTBOX_COUNTER_ID: &str = "lightbox-counter";
pub const ACTIVE_CLASS: &str = "active";
/// Body class that stops the page scrolling behind the lightbox
pub const NO_SCROLL_CLASS: &str = "no-scroll";

/// One image in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub caption: String,
}

/// Cursor after `index` in a list of `len`, wrapping to the start.
pub fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

/// Cursor before `index` in a list of `len`, wrapping to the end.
pub fn wrap_previous(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + len - 1) % len
    }
}

#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<GalleryImage>,
    cursor: usize,
    open: bool,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a gallery from the document in the given language.
    pub fn from_document(document: &Document, language: Language) -> Self {
        let mut gallery = Self::new();
        gallery.rebuild(document, language);
        gallery
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        self.images.get(self.cursor)
    }

    /// Re-read every gallery item, replacing the whole image list.
    pub fn rebuild(&mut self, document: &Document, language: Language) {
        let strings = LanguageStrings::for_language(language);
        self.images = document
            .query_by_class(GALLERY_ITEM_CLASS)
            .into_iter()
            .filter_map(|item| {
                let Some(src) = image_source(document, item) else {
                    warn!("Gallery item without an image source, skipping");
                    return None;
                };
                Some(GalleryImage {
                    src,
                    caption: resolve_caption(document, item, language)
                        .unwrap_or_else(|| strings.gallery_fallback_caption.to_string()),
                })
            })
            .collect();

        self.cursor = if self.images.is_empty() {
            0
        } else {
            self.cursor % self.images.len()
        };
        debug!("Gallery rebuilt with {} images ({})", self.images.len(), language);
    }

    /// Open the lightbox at `index` (wrapped into range).
    ///
    /// Returns false for an empty gallery.
    pub fn open(&mut self, document: &mut Document, index: usize) -> bool {
        if self.images.is_empty() {
            return false;
        }
        self.cursor = index % self.images.len();
        self.open = true;
        if let Some(lightbox) = document.get_element_by_id(LIGHTBOX_ID) {
            document.add_class(lightbox, ACTIVE_CLASS);
        }
        let body = document.body();
        document.add_class(body, NO_SCROLL_CLASS);
        self.render(document);
        debug!("Lightbox opened at {}", self.cursor);
        true
    }

    pub fn next(&mut self, document: &mut Document) {
        if self.images.is_empty() {
            return;
        }
        self.cursor = wrap_next(self.cursor, self.images.len());
        self.render(document);
    }

    pub fn previous(&mut self, document: &mut Document) {
        if self.images.is_empty() {
            return;
        }
        self.cursor = wrap_previous(self.cursor, self.images.len());
        self.render(document);
    }

    /// Hide the lightbox and restore page scrolling.
    pub fn close(&mut self, document: &mut Document) {
        self.open = false;
        if let Some(lightbox) = document.get_element_by_id(LIGHTBOX_ID) {
            document.remove_class(lightbox, ACTIVE_CLASS);
        }
        let body = document.body();
        document.remove_class(body, NO_SCROLL_CLASS);
    }

    /// Write the current image into the lightbox, if the page has one.
    pub fn render(&self, document: &mut Document) {
        let Some(image) = self.current() else {
            return;
        };
        if let Some(img) = document.get_element_by_id(LIGHTBOX_IMAGE_ID) {
            document.set_attribute(img, "src", &image.src);
            document.set_attribute(img, "alt", &image.caption);
        }
        if let Some(caption) = document.get_element_by_id(LIGHTBOX_CAPTION_ID) {
            document.set_text(caption, &image.caption);
        }
        if let Some(counter) = document.get_element_by_id(LIGHTBOX_COUNTER_ID) {
            let text = format!("{} / {}", self.cursor + 1, self.images.len());
            document.set_text(counter, &text);
        }
    }
}

fn image_source(document: &Document, item: ElementId) -> Option<String> {
    document
        .find_descendant_by_tag(item, "img")
        .and_then(|img| document.attribute(img, "src"))
        .or_else(|| document.attribute(item, "data-src"))
        .map(str::to_string)
}

/// Caption lookup order: caption attribute on the item, then the nested
/// caption element's language attribute, then its plain text.
fn resolve_caption(document: &Document, item: ElementId, language: Language) -> Option<String> {
    let caption_attr = format!("data-caption-{}", language.code());
    if let Some(caption) = document.attribute(item, &caption_attr) {
        return Some(caption.to_string());
    }

    let figcaption = document.find_descendant_by_tag(item, "figcaption")?;
    if let Some(caption) = document.attribute(figcaption, &inline_attr(language)) {
        return Some(caption.to_string());
    }

    let text = document.text(figcaption).trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn add_item(doc: &mut Document, parent: ElementId, src: &str) -> ElementId {
        let item = doc.append(parent, "figure");
        doc.add_class(item, GALLERY_ITEM_CLASS);
        let img = doc.append(item, "img");
        doc.set_attribute(img, "src", src);
        item
    }

    fn gallery_page(with_lightbox: bool) -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let grid = doc.append(body, "div");

        let first = add_item(&mut doc, grid, "img/iftar.jpg");
        doc.set_attribute(first, "data-caption-en", "Community iftar");
        doc.set_attribute(first, "data-caption-ar", "إفطار جماعي");

        let second = add_item(&mut doc, grid, "img/dabke.jpg");
        let caption = doc.append(second, "figcaption");
        doc.set_attribute(caption, "data-en", "Dabke night");
        doc.set_attribute(caption, "data-ar", "ليلة الدبكة");

        let third = add_item(&mut doc, grid, "img/fair.jpg");
        let caption = doc.append(third, "figcaption");
        doc.set_text(caption, "  Culture fair  ");

        add_item(&mut doc, grid, "img/untitled.jpg");

        if with_lightbox {
            let lightbox = doc.append(body, "div");
            doc.set_attribute(lightbox, "id", LIGHTBOX_ID);
            for id in [LIGHTBOX_IMAGE_ID, LIGHTBOX_CAPTION_ID, LIGHTBOX_COUNTER_ID] {
                let tag = if id == LIGHTBOX_IMAGE_ID { "img" } else { "p" };
                let child = doc.append(lightbox, tag);
                doc.set_attribute(child, "id", id);
            }
        }
        doc
    }

    // ==================== Caption Tests ====================

    #[test]
    fn test_caption_resolution_order_english() {
        let doc = gallery_page(false);
        let gallery = Gallery::from_document(&doc, Language::ENGLISH);
        let captions: Vec<_> = gallery.images().iter().map(|i| i.caption.as_str()).collect();
        assert_eq!(
            captions,
            vec!["Community iftar", "Dabke night", "Culture fair", "Gallery image"]
        );
    }

    #[test]
    fn test_caption_resolution_order_arabic() {
        let doc = gallery_page(false);
        let gallery = Gallery::from_document(&doc, Language::ARABIC);
        let captions: Vec<_> = gallery.images().iter().map(|i| i.caption.as_str()).collect();
        assert_eq!(
            captions,
            vec!["إفطار جماعي", "ليلة الدبكة", "Culture fair", "صورة من المعرض"]
        );
    }

    #[test]
    fn test_rebuild_replaces_all_captions_and_keeps_cursor() {
        let mut doc = gallery_page(true);
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);
        gallery.open(&mut doc, 1);

        gallery.rebuild(&doc, Language::ARABIC);
        assert_eq!(gallery.cursor(), 1);
        assert_eq!(gallery.len(), 4);
        assert_eq!(gallery.current().unwrap().caption, "ليلة الدبكة");
    }

    #[test]
    fn test_item_without_source_skipped() {
        let mut doc = Document::new();
        let item = doc.append(doc.body(), "div");
        doc.add_class(item, GALLERY_ITEM_CLASS);
        assert!(Gallery::from_document(&doc, Language::ENGLISH).is_empty());
    }

    // ==================== Lightbox Tests ====================

    #[test]
    fn test_open_renders_lightbox() {
        let mut doc = gallery_page(true);
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);

        assert!(gallery.open(&mut doc, 0));
        let lightbox = doc.get_element_by_id(LIGHTBOX_ID).unwrap();
        let img = doc.get_element_by_id(LIGHTBOX_IMAGE_ID).unwrap();
        let counter = doc.get_element_by_id(LIGHTBOX_COUNTER_ID).unwrap();

        assert!(doc.has_class(lightbox, ACTIVE_CLASS));
        assert!(doc.has_class(doc.body(), NO_SCROLL_CLASS));
        assert_eq!(doc.attribute(img, "src"), Some("img/iftar.jpg"));
        assert_eq!(doc.text(counter), "1 / 4");
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut doc = gallery_page(true);
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);
        gallery.open(&mut doc, 0);
        gallery.previous(&mut doc);

        assert_eq!(gallery.cursor(), 3);
        let caption = doc.get_element_by_id(LIGHTBOX_CAPTION_ID).unwrap();
        assert_eq!(doc.text(caption), "Gallery image");
    }

    #[test]
    fn test_close_restores_scroll() {
        let mut doc = gallery_page(true);
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);
        gallery.open(&mut doc, 2);
        gallery.close(&mut doc);

        assert!(!gallery.is_open());
        assert!(!doc.has_class(doc.body(), NO_SCROLL_CLASS));
        let lightbox = doc.get_element_by_id(LIGHTBOX_ID).unwrap();
        assert!(!doc.has_class(lightbox, ACTIVE_CLASS));
    }

    #[test]
    fn test_empty_gallery_is_noop() {
        let mut doc = Document::new();
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);

        assert!(!gallery.open(&mut doc, 3));
        gallery.next(&mut doc);
        gallery.previous(&mut doc);
        gallery.close(&mut doc);
        assert_eq!(gallery.cursor(), 0);
        assert!(!gallery.is_open());
    }

    #[test]
    fn test_missing_lightbox_still_moves_cursor() {
        let mut doc = gallery_page(false);
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);
        assert!(gallery.open(&mut doc, 1));
        gallery.next(&mut doc);
        assert_eq!(gallery.cursor(), 2);
    }

    // ==================== Wraparound Properties ====================

    proptest! {
        #[test]
        fn prop_wrap_stays_in_range(len in 1usize..50, start in 0usize..50) {
            let index = start % len;
            prop_assert!(wrap_next(index, len) < len);
            prop_assert!(wrap_previous(index, len) < len);
        }

        #[test]
        fn prop_next_len_times_returns_home(len in 1usize..50, start in 0usize..50) {
            let home = start % len;
            let mut index = home;
            for _ in 0..len {
                index = wrap_next(index, len);
            }
            prop_assert_eq!(index, home);
        }

        #[test]
        fn prop_previous_undoes_next(len in 1usize..50, start in 0usize..50) {
            let index = start % len;
            prop_assert_eq!(wrap_previous(wrap_next(index, len), len), index);
        }
    }

    #[test]
    fn test_gallery_next_cycles_through_all() {
        let mut doc = gallery_page(false);
        let mut gallery = Gallery::from_document(&doc, Language::ENGLISH);
        gallery.open(&mut doc, 2);
        for _ in 0..gallery.len() {
            gallery.next(&mut doc);
        }
        assert_eq!(gallery.cursor(), 2);
    }
}
