//! Ambient particle field.
//!
//! A [`ParticleField`] owns a set of drifting particles, links the ones that
//! are close together, and reacts to pointer input. Hosts feed it events as
//! [`Intent`]s, call [`ParticleField::tick`] once per display frame and then
//! [`ParticleField::draw`] onto any [`drift_core::Surface`].

mod field;
mod intent;
mod interaction;
mod links;
mod particle;

pub use field::{FieldError, ParticleField, TickStatus};
pub use intent::Intent;
pub use links::line_opacity;
pub use particle::{Oscillator, Particle, spawn};
