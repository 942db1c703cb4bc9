//! Global scroll-reveal options.

use std::time::Duration;

use drift_core::Easing;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, non_negative};

/// Options applied to every reveal element that does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealDefaults {
    /// Transition length in milliseconds.
    pub duration: u64,
    /// Milliseconds between becoming visible and starting the transition.
    pub delay: u64,
    /// Pixels an element must rise above the viewport bottom before it counts as visible.
    pub offset: f32,
    /// Reveal only the first time; never hide again.
    pub once: bool,
    pub easing: Easing,
}

impl Default for RevealDefaults {
    fn default() -> Self {
        Self {
            duration: 1000,
            delay: 0,
            offset: 50.0,
            once: true,
            easing: Easing::Ease,
        }
    }
}

impl RevealDefaults {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        non_negative("reveal.offset", self.offset)?;
        Ok(self)
    }
}
