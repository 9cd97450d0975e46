//! In-process document model.
//!
//! A small arena of labeled element nodes standing in for the browser
//! document. Markup attributes, classes and content are the contract between
//! the page and the behavior layer; nothing here knows about styling.

use std::collections::{BTreeMap, BTreeSet};

/// Handle to an element in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// What an element currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Plain text, rendered verbatim
    Text(String),
    /// Raw markup, rendered as HTML
    Markup(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::Empty => "",
            Content::Text(text) | Content::Markup(text) => text,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Content::Markup(_))
    }
}

/// A single element node.
#[derive(Debug, Clone)]
pub struct Element {
    /// Lower-case tag name ("div", "input", "option", ...)
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub content: Content,
    /// Placeholder shown by input-like elements
    pub placeholder: Option<String>,
    /// Current value of form controls
    pub value: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            content: Content::Empty,
            placeholder: None,
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// True for elements whose localized text belongs in the placeholder.
    pub fn is_input_like(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }
}

/// The document: root-level markers plus the element tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// `lang` attribute of the root element
    pub lang: String,
    /// `dir` attribute of the root element
    pub dir: String,
    pub title: String,
    elements: Vec<Element>,
    root: ElementId,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with `html` and `body` elements.
    pub fn new() -> Self {
        let mut doc = Self {
            lang: "en".to_string(),
            dir: "ltr".to_string(),
            title: String::new(),
            elements: vec![Element::new("html")],
            root: ElementId(0),
            body: ElementId(0),
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    // ==================== Tree Construction ====================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(Element::new(tag));
        ElementId(self.elements.len() - 1)
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    /// Insert `new` as the sibling immediately after `reference`.
    ///
    /// A detached `reference` has nowhere to put a sibling, so this returns
    /// false and leaves `new` detached.
    pub fn insert_after(&mut self, reference: ElementId, new: ElementId) -> bool {
        let Some(parent) = self.elements[reference.0].parent else {
            return false;
        };
        self.detach(new);
        let siblings = &mut self.elements[parent.0].children;
        let position = siblings
            .iter()
            .position(|&id| id == reference)
            .map(|pos| pos + 1)
            .unwrap_or(siblings.len());
        siblings.insert(position, new);
        self.elements[new.0].parent = Some(parent);
        true
    }

    /// Detach an element (and its subtree) from the document.
    pub fn remove(&mut self, id: ElementId) {
        self.detach(id);
    }

    /// Remove every child of `id`.
    pub fn clear_children(&mut self, id: ElementId) {
        let children = std::mem::take(&mut self.elements[id.0].children);
        for child in children {
            self.elements[child.0].parent = None;
        }
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.elements[id.0].parent.take() {
            self.elements[parent.0].children.retain(|&c| c != id);
        }
    }

    // ==================== Element Access ====================

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.elements[id.0].tag
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.0].attribute(name)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        self.elements[id.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements[id.0].has_class(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.elements[id.0].classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.elements[id.0].classes.remove(class);
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.elements[id.0].content.as_str()
    }

    pub fn content(&self, id: ElementId) -> &Content {
        &self.elements[id.0].content
    }

    /// Set plain-text content. Any children are replaced.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        self.clear_children(id);
        self.elements[id.0].content = Content::Text(text.to_string());
    }

    /// Set raw-markup content. Any children are replaced.
    pub fn set_markup(&mut self, id: ElementId, markup: &str) {
        self.clear_children(id);
        self.elements[id.0].content = Content::Markup(markup.to_string());
    }

    pub fn placeholder(&self, id: ElementId) -> Option<&str> {
        self.elements[id.0].placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, id: ElementId, placeholder: &str) {
        self.elements[id.0].placeholder = Some(placeholder.to_string());
    }

    pub fn value(&self, id: ElementId) -> &str {
        &self.elements[id.0].value
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        self.elements[id.0].value = value.to_string();
    }

    // ==================== Queries ====================

    /// All attached elements in document order (root first).
    pub fn all(&self) -> Vec<ElementId> {
        self.descendants_inclusive(self.root)
    }

    /// `id` followed by its descendants in document order.
    pub fn descendants_inclusive(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.elements[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Descendants of `id` (excluding itself) in document order.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut all = self.descendants_inclusive(id);
        all.remove(0);
        all
    }

    pub fn get_element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.all()
            .into_iter()
            .find(|&id| self.attribute(id, "id") == Some(dom_id))
    }

    pub fn query_by_class(&self, class: &str) -> Vec<ElementId> {
        self.filter(|el| el.has_class(class))
    }

    pub fn query_by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.filter(|el| el.tag == tag)
    }

    pub fn query_by_attribute(&self, name: &str) -> Vec<ElementId> {
        self.filter(|el| el.attributes.contains_key(name))
    }

    /// First descendant of `id` with the given tag.
    pub fn find_descendant_by_tag(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        self.descendants(id)
            .into_iter()
            .find(|&child| self.tag(child) == tag)
    }

    /// First descendant of `id` carrying the given class.
    pub fn find_descendant_by_class(&self, id: ElementId, class: &str) -> Option<ElementId> {
        self.descendants(id)
            .into_iter()
            .find(|&child| self.has_class(child, class))
    }

    /// Sibling immediately following `id`, if any.
    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.elements[id.0].parent?;
        let siblings = &self.elements[parent.0].children;
        let position = siblings.iter().position(|&c| c == id)?;
        siblings.get(position + 1).copied()
    }

    /// Nearest ancestor (excluding `id`) with the given tag.
    pub fn closest_ancestor(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        let mut current = self.elements[id.0].parent;
        while let Some(ancestor) = current {
            if self.tag(ancestor) == tag {
                return Some(ancestor);
            }
            current = self.elements[ancestor.0].parent;
        }
        None
    }

    fn filter(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.all()
            .into_iter()
            .filter(|&id| predicate(&self.elements[id.0]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_body() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.root()), "html");
        assert_eq!(doc.tag(doc.body()), "body");
        assert_eq!(doc.element(doc.body()).parent(), Some(doc.root()));
    }

    #[test]
    fn test_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let header = doc.append(body, "header");
        let nav = doc.append(header, "nav");
        let main = doc.append(body, "main");

        assert_eq!(doc.all(), vec![doc.root(), body, header, nav, main]);
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let div = doc.append(doc.body(), "div");
        doc.set_attribute(div, "id", "lightbox");

        assert_eq!(doc.get_element_by_id("lightbox"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_insert_after_places_sibling() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append(body, "input");
        let last = doc.append(body, "button");
        let message = doc.create_element("div");

        assert!(doc.insert_after(first, message));
        assert_eq!(doc.element(body).children(), &[first, message, last]);
        assert_eq!(doc.next_sibling(first), Some(message));
    }

    #[test]
    fn test_insert_after_detached_reference() {
        let mut doc = Document::new();
        let detached = doc.create_element("input");
        let message = doc.create_element("div");
        assert!(!doc.insert_after(detached, message));
    }

    #[test]
    fn test_remove_hides_subtree_from_queries() {
        let mut doc = Document::new();
        let wrapper = doc.append(doc.body(), "div");
        let inner = doc.append(wrapper, "span");
        doc.add_class(inner, "error-message");

        doc.remove(wrapper);
        assert!(doc.query_by_class("error-message").is_empty());
    }

    #[test]
    fn test_set_markup_replaces_children() {
        let mut doc = Document::new();
        let container = doc.append(doc.body(), "div");
        doc.append(container, "article");

        doc.set_markup(container, "<p>hi</p>");
        assert!(doc.element(container).children().is_empty());
        assert!(doc.content(container).is_markup());
        assert_eq!(doc.text(container), "<p>hi</p>");
    }

    #[test]
    fn test_classes() {
        let mut doc = Document::new();
        let link = doc.append(doc.body(), "a");
        doc.add_class(link, "active");
        assert!(doc.has_class(link, "active"));
        doc.remove_class(link, "active");
        assert!(!doc.has_class(link, "active"));
    }

    #[test]
    fn test_closest_ancestor() {
        let mut doc = Document::new();
        let select = doc.append(doc.body(), "select");
        let group = doc.append(select, "optgroup");
        let option = doc.append(group, "option");

        assert_eq!(doc.closest_ancestor(option, "select"), Some(select));
        assert_eq!(doc.closest_ancestor(select, "select"), None);
    }

    #[test]
    fn test_input_like() {
        let mut doc = Document::new();
        let input = doc.append(doc.body(), "INPUT");
        let textarea = doc.append(doc.body(), "textarea");
        let option = doc.append(doc.body(), "option");

        assert!(doc.element(input).is_input_like());
        assert!(doc.element(textarea).is_input_like());
        assert!(!doc.element(option).is_input_like());
    }
}
