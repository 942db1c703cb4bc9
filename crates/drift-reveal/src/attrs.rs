//! Per-element reveal options read from `data-aos*` attributes.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use drift_config::{ConfigError, RevealDefaults};
use drift_core::{Easing, RevealAnimation};

pub const ANIMATION: &str = "data-aos";
pub const DURATION: &str = "data-aos-duration";
pub const DELAY: &str = "data-aos-delay";
pub const OFFSET: &str = "data-aos-offset";
pub const ONCE: &str = "data-aos-once";
pub const EASING: &str = "data-aos-easing";

/// Resolved options for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub animation: RevealAnimation,
    pub duration: Duration,
    pub delay: Duration,
    pub offset: f32,
    pub once: bool,
    pub easing: Easing,
}

impl RevealOptions {
    /// Options with every field taken from `defaults`.
    pub fn from_defaults(animation: RevealAnimation, defaults: &RevealDefaults) -> Self {
        Self {
            animation,
            duration: defaults.duration(),
            delay: defaults.delay(),
            offset: defaults.offset,
            once: defaults.once,
            easing: defaults.easing,
        }
    }

    /// Read options from an element's attributes, falling back to `defaults`.
    ///
    /// Returns `Ok(None)` when the element has no `data-aos` attribute.
    pub fn from_attributes(
        attributes: &BTreeMap<String, String>,
        defaults: &RevealDefaults,
    ) -> Result<Option<Self>, ConfigError> {
        let Some(name) = attributes.get(ANIMATION) else {
            return Ok(None);
        };
        let animation = RevealAnimation::from_str(name).map_err(ConfigError::UnknownAnimation)?;
        let mut options = Self::from_defaults(animation, defaults);

        if let Some(value) = attributes.get(DURATION) {
            options.duration = Duration::from_millis(parse_attr(DURATION, value)?);
        }
        if let Some(value) = attributes.get(DELAY) {
            options.delay = Duration::from_millis(parse_attr(DELAY, value)?);
        }
        if let Some(value) = attributes.get(OFFSET) {
            let offset: f32 = parse_attr(OFFSET, value)?;
            if !offset.is_finite() || offset < 0.0 {
                return Err(invalid(OFFSET, value));
            }
            options.offset = offset;
        }
        if let Some(value) = attributes.get(ONCE) {
            options.once = match value.trim() {
                // a bare attribute means true
                "" | "true" => true,
                "false" => false,
                _ => return Err(invalid(ONCE, value)),
            };
        }
        if let Some(value) = attributes.get(EASING) {
            options.easing = Easing::from_str(value).map_err(ConfigError::UnknownEasing)?;
        }

        Ok(Some(options))
    }
}

fn parse_attr<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(name, value))
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidAttribute {
        name: name.to_string(),
        value: value.to_string(),
    }
}
