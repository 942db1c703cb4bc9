//! Scroll-triggered reveals.
//!
//! Elements carrying a `data-aos` attribute start hidden. Once their top edge
//! rises `offset` pixels above the bottom of the viewport they play an entry
//! transition (fade, slide or zoom) over `duration`. With `once` set the
//! element stays revealed for good; otherwise scrolling it back out of range
//! reverses the transition.

pub mod attrs;
mod element;
mod reveal;

pub use attrs::RevealOptions;
pub use element::{ElementId, MarkedElement, RevealSource, Viewport};
pub use reveal::{RevealEvent, RevealStyle, ScrollReveal};
