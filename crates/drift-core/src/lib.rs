//! Core types shared by the drift crates.
//!
//! Colors, surface geometry, the drawing-surface abstraction the particle
//! field renders into, and the easing curves and animation kinds used by
//! scroll reveals.

mod animation;
mod color;
mod easing;
mod surface;

pub use animation::RevealAnimation;
pub use color::{ParseColorError, Rgb};
pub use easing::Easing;
pub use glam::Vec2;
pub use surface::{DrawCommand, DrawList, Paint, Size, Surface};
