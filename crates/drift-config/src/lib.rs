//! Configuration for drift.
//!
//! Three documents are understood here:
//!
//! - [`ParticlesConfig`], the particles.js JSON document describing the
//!   particle field and its pointer interactions;
//! - [`RevealDefaults`], global options for scroll reveals;
//! - [`Settings`], the TOML application config tying the two together.
//!
//! Every field is optional. Present fields are range-checked and rejected with
//! a [`ConfigError`] rather than silently clamped.

mod error;
mod particles;
mod reveal;
mod settings;

pub use error::ConfigError;
pub use particles::{
    BubbleMode, ClickEvent, ClickMode, ColorOptions, Density, Events, GrabLink, GrabMode,
    HoverEvent, HoverMode, Interactivity, LineLinked, Modes, MoveDirection, MoveOptions,
    NumberOptions, OpacityAnim, OpacityOptions, OutMode, ParticleOptions, ParticlesConfig,
    PushMode, RemoveMode, RepulseMode, Shape, ShapeOptions, SizeAnim, SizeOptions,
};
pub use reveal::RevealDefaults;
pub use settings::Settings;

/// Ensure `value` is finite and not negative.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

/// Ensure `value` is finite and strictly positive.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    non_negative(field, value)?;
    if value == 0.0 {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: f32::MIN_POSITIVE,
            max: f32::MAX,
        });
    }
    Ok(())
}

/// Ensure `value` is an opacity in 0.0-1.0.
pub(crate) fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}
