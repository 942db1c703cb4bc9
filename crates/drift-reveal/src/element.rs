//! Page elements as seen by the reveal engine.

use std::collections::BTreeMap;

/// Host-assigned identity of a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElementId(pub u32);

/// An element carrying reveal attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkedElement {
    pub id: ElementId,
    /// Document-space top edge in pixels.
    pub top: f32,
    pub height: f32,
    /// Raw `data-aos*` attributes, keyed by full attribute name.
    pub attributes: BTreeMap<String, String>,
}

impl MarkedElement {
    pub fn new(id: ElementId, top: f32, height: f32) -> Self {
        Self {
            id,
            top,
            height,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// The host page, queried for elements marked for reveal.
pub trait RevealSource {
    /// Every element currently marked for reveal, with up-to-date geometry.
    fn marked_elements(&self) -> Vec<MarkedElement>;
}

/// The visible slice of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Document-space offset of the viewport's top edge.
    pub scroll_top: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    /// Whether an element whose top edge sits at document position `top`
    /// has risen at least `offset` pixels above the viewport bottom.
    pub fn reaches(&self, top: f32, offset: f32) -> bool {
        top - self.scroll_top <= self.height - offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_line() {
        let viewport = Viewport::new(0.0, 800.0);
        assert!(!viewport.reaches(760.0, 50.0));
        assert!(viewport.reaches(750.0, 50.0));
        assert!(viewport.reaches(700.0, 50.0));
    }

    #[test]
    fn test_trigger_follows_scroll() {
        let viewport = Viewport::new(400.0, 800.0);
        assert!(viewport.reaches(1100.0, 50.0));
        assert!(!viewport.reaches(1200.0, 50.0));
    }
}
