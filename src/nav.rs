//! Navigation highlighting.
//!
//! Two interchangeable strategies decide which section is "current"; either
//! way exactly one matching nav link is marked active, or none.

use crate::dom::Document;
use tracing::debug;

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Vertical extent of a page section, in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

/// Which highlighting strategy a site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavStrategy {
    #[default]
    Scroll,
    Intersection,
}

impl NavStrategy {
    /// Parse `scroll` or `intersection`, ignoring case and whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "scroll" => Some(NavStrategy::Scroll),
            "intersection" => Some(NavStrategy::Intersection),
            _ => None,
        }
    }
}

/// Picks the current section for a viewport.
pub trait HighlightStrategy {
    fn current_section<'a>(&self, sections: &'a [SectionBounds], viewport: Viewport) -> Option<&'a SectionBounds>;
}

/// Scroll-position strategy: the section containing the scroll offset plus a
/// fixed header bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpy {
    pub header_offset: f64,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self {
            header_offset: 100.0,
        }
    }
}

impl HighlightStrategy for ScrollSpy {
    fn current_section<'a>(&self, sections: &'a [SectionBounds], viewport: Viewport) -> Option<&'a SectionBounds> {
        let probe = viewport.scroll_y + self.header_offset;
        sections
            .iter()
            .find(|section| probe >= section.top && probe < section.bottom())
    }
}

/// Visibility strategy: the most visible section whose visible share meets
/// the threshold. Ties go to the earlier section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSpy {
    /// Fraction of a section (0.0..=1.0) that must be on screen
    pub threshold: f64,
}

impl Default for IntersectionSpy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl IntersectionSpy {
    fn visible_ratio(section: &SectionBounds, viewport: Viewport) -> f64 {
        if section.height <= 0.0 {
            return 0.0;
        }
        let top = section.top.max(viewport.scroll_y);
        let bottom = section.bottom().min(viewport.scroll_y + viewport.height);
        ((bottom - top).max(0.0) / section.height).min(1.0)
    }
}

impl HighlightStrategy for IntersectionSpy {
    fn current_section<'a>(&self, sections: &'a [SectionBounds], viewport: Viewport) -> Option<&'a SectionBounds> {
        let mut best: Option<(&SectionBounds, f64)> = None;
        for section in sections {
            let ratio = Self::visible_ratio(section, viewport);
            if ratio < self.threshold || ratio == 0.0 {
                continue;
            }
            if best.map(|(_, r)| ratio > r).unwrap_or(true) {
                best = Some((section, ratio));
            }
        }
        best.map(|(section, _)| section)
    }
}

/// Mark the nav link of the current section active and clear the rest.
///
/// Returns the id of the highlighted section.
pub fn highlight(
    document: &mut Document,
    strategy: &dyn HighlightStrategy,
    sections: &[SectionBounds],
    viewport: Viewport,
) -> Option<String> {
    let current = strategy
        .current_section(sections, viewport)
        .map(|section| section.id.clone());
    let target_href = current.as_ref().map(|id| format!("#{}", id));

    let mut marked = false;
    for link in document.query_by_class(NAV_LINK_CLASS) {
        let matches = !marked
            && target_href.is_some()
            && document.attribute(link, "href") == target_href.as_deref();
        if matches {
            document.add_class(link, ACTIVE_CLASS);
            marked = true;
        } else {
            document.remove_class(link, ACTIVE_CLASS);
        }
    }

    debug!("Active section: {:?}", current);
    current
}
