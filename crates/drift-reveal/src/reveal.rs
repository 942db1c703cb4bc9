//! Visibility tracking and transition progress.

use std::collections::HashMap;
use std::time::Duration;

use drift_config::{ConfigError, RevealDefaults};
use drift_core::Vec2;

use crate::attrs::RevealOptions;
use crate::element::{ElementId, RevealSource, Viewport};

/// A visibility change reported by [`ScrollReveal::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// The element became visible and its entry transition started.
    Revealed(ElementId),
    /// The element scrolled back out and its transition is reversing.
    Hidden(ElementId),
}

/// How to paint an element at the current point of its transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    /// Offset from the resting position, in pixels (y grows down).
    pub translate: Vec2,
    pub scale: f32,
}

impl RevealStyle {
    /// Resting pose of a fully revealed element.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
    };
}

#[derive(Debug, Clone)]
struct RevealElement {
    id: ElementId,
    top: f32,
    height: f32,
    options: RevealOptions,
    /// Result of the last visibility test.
    revealed: bool,
    /// Revealed with `once`; ignores every later visibility test.
    locked: bool,
    /// Linear transition progress, 0.0 hidden to 1.0 shown.
    progress: f32,
    /// Seconds of delay left before progress starts moving.
    delay_left: f32,
}

impl RevealElement {
    fn target(&self) -> f32 {
        if self.revealed { 1.0 } else { 0.0 }
    }

    fn advance(&mut self, secs: f32) {
        let duration = self.options.duration.as_secs_f32();

        if self.revealed {
            let waited = secs.min(self.delay_left);
            self.delay_left -= waited;
            let remaining = secs - waited;
            if remaining <= 0.0 && self.delay_left > 0.0 {
                return;
            }
            let step = if duration > 0.0 { remaining / duration } else { 1.0 };
            self.progress = (self.progress + step).min(1.0);
        } else {
            self.delay_left = 0.0;
            let step = if duration > 0.0 { secs / duration } else { 1.0 };
            self.progress = (self.progress - step).max(0.0);
        }
    }

    fn style(&self) -> RevealStyle {
        let eased = self.options.easing.apply(self.progress);
        let animation = self.options.animation;
        let start_scale = animation.start_scale();
        RevealStyle {
            opacity: eased,
            translate: animation.start_offset() * (1.0 - eased),
            scale: start_scale + (1.0 - start_scale) * eased,
        }
    }
}

/// Reveals marked page elements as they scroll into view.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    elements: Vec<RevealElement>,
    defaults: RevealDefaults,
    viewport: Viewport,
}

impl ScrollReveal {
    /// Register every marked element in `source` and run the first visibility test.
    pub fn init<S: RevealSource + ?Sized>(
        source: &S,
        defaults: RevealDefaults,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        let mut reveal = Self {
            elements: Vec::new(),
            defaults: defaults.validate()?,
            viewport,
        };
        reveal.relayout(source)?;
        let revealed = reveal.refresh(viewport).len();

        tracing::info!(
            elements = reveal.elements.len(),
            revealed,
            "scroll reveal initialized"
        );
        Ok(reveal)
    }

    /// Re-read element geometry and attributes after the page reflowed.
    ///
    /// Known elements keep their reveal state but adopt their current
    /// options; elements no longer marked are dropped and new ones are
    /// registered hidden. On error nothing changes. Call
    /// [`ScrollReveal::refresh`] afterwards to re-test visibility.
    pub fn relayout<S: RevealSource + ?Sized>(&mut self, source: &S) -> Result<(), ConfigError> {
        let known: HashMap<ElementId, &RevealElement> =
            self.elements.iter().map(|el| (el.id, el)).collect();

        let mut elements = Vec::new();
        let mut kept = 0;
        for marked in source.marked_elements() {
            let Some(options) = RevealOptions::from_attributes(&marked.attributes, &self.defaults)?
            else {
                tracing::debug!(id = marked.id.0, "element has no data-aos attribute");
                continue;
            };

            let mut element = RevealElement {
                id: marked.id,
                top: marked.top,
                height: marked.height,
                options,
                revealed: false,
                locked: false,
                progress: 0.0,
                delay_left: 0.0,
            };
            if let Some(existing) = known.get(&marked.id) {
                element.revealed = existing.revealed;
                element.locked = existing.locked;
                element.progress = existing.progress;
                element.delay_left = existing.delay_left;
                kept += 1;
            }
            elements.push(element);
        }

        let dropped = known.len().saturating_sub(kept);
        if dropped > 0 {
            tracing::debug!(dropped, "elements no longer marked");
        }
        self.elements = elements;
        Ok(())
    }

    /// Run the visibility test against `viewport`.
    ///
    /// Returns the elements whose state changed. Elements revealed with
    /// `once` never appear again, so repeated calls are idempotent.
    pub fn refresh(&mut self, viewport: Viewport) -> Vec<RevealEvent> {
        self.viewport = viewport;

        let mut events = Vec::new();
        for el in &mut self.elements {
            if el.locked {
                continue;
            }
            let visible = viewport.reaches(el.top, el.options.offset);
            if visible && !el.revealed {
                el.revealed = true;
                el.locked = el.options.once;
                el.delay_left = el.options.delay.as_secs_f32();
                events.push(RevealEvent::Revealed(el.id));
            } else if !visible && el.revealed {
                el.revealed = false;
                events.push(RevealEvent::Hidden(el.id));
            }
        }

        if !events.is_empty() {
            tracing::debug!(
                changed = events.len(),
                scroll_top = viewport.scroll_top,
                "reveal refresh"
            );
        }
        events
    }

    /// Move every running transition forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32();
        for el in &mut self.elements {
            el.advance(secs);
        }
    }

    /// Whether any element is still mid-transition.
    pub fn is_animating(&self) -> bool {
        self.elements
            .iter()
            .any(|el| el.progress != el.target() || el.delay_left > 0.0)
    }

    /// Current paint style of element `id`, if it is registered.
    pub fn style(&self, id: ElementId) -> Option<RevealStyle> {
        self.find(id).map(RevealElement::style)
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.find(id).is_some_and(|el| el.revealed)
    }

    pub fn options(&self, id: ElementId) -> Option<&RevealOptions> {
        self.find(id).map(|el| &el.options)
    }

    /// Registered element ids in page order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(|el| el.id)
    }

    /// Document-space `(top, height)` of element `id`.
    pub fn bounds(&self, id: ElementId) -> Option<(f32, f32)> {
        self.find(id).map(|el| (el.top, el.height))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn find(&self, id: ElementId) -> Option<&RevealElement> {
        self.elements.iter().find(|el| el.id == id)
    }
}
