//! particles.js-compatible particle field configuration.
//!
//! Field names follow the particles.js JSON document so existing configs load
//! unchanged; keys this engine does not understand are ignored. Defaults are
//! the ambient background of the OtterVoice landing page.

use std::fs;
use std::path::Path;

use drift_core::Rgb;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, non_negative, positive, unit};

/// Secondary text color of the landing page, used for dots and links.
const MUTED: Rgb = Rgb::new(0xa0, 0xae, 0xc0);

/// Root of a particles.js document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub particles: ParticleOptions,
    pub interactivity: Interactivity,
    /// Scale pixel quantities by the surface's device pixel ratio.
    pub retina_detect: bool,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            particles: ParticleOptions::default(),
            interactivity: Interactivity::default(),
            retina_detect: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    pub number: NumberOptions,
    pub color: ColorOptions,
    pub shape: ShapeOptions,
    pub opacity: OpacityOptions,
    pub size: SizeOptions,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub movement: MoveOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberOptions {
    /// Particles per `density.value_area` (or absolute count without density).
    pub value: u32,
    pub density: Density,
    /// Hard cap on the particle count; 0 disables the cap.
    pub limit: u32,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            value: 80,
            density: Density::default(),
            limit: 0,
        }
    }
}

impl NumberOptions {
    /// The configured cap, if any.
    pub fn cap(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Density {
    pub enable: bool,
    /// Reference area, in thousands of square logical pixels.
    pub value_area: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            enable: true,
            value_area: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub value: Rgb,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self { value: MUTED }
    }
}

/// Particle outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    /// Axis-aligned square.
    Edge,
    Triangle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeOptions {
    #[serde(rename = "type")]
    pub kind: Shape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityOptions {
    /// Maximum opacity.
    pub value: f32,
    /// Sample each particle's opacity uniformly from `0..value`.
    pub random: bool,
    pub anim: OpacityAnim,
}

impl Default for OpacityOptions {
    fn default() -> Self {
        Self {
            value: 0.3,
            random: true,
            anim: OpacityAnim::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityAnim {
    pub enable: bool,
    /// Hundredths of opacity per 60 Hz frame.
    pub speed: f32,
    pub opacity_min: f32,
    /// Share one opacity value across every particle.
    pub sync: bool,
}

impl Default for OpacityAnim {
    fn default() -> Self {
        Self {
            enable: true,
            speed: 1.0,
            opacity_min: 0.1,
            sync: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeOptions {
    /// Maximum radius in logical pixels.
    pub value: f32,
    /// Sample each particle's radius uniformly from `0..value`.
    pub random: bool,
    pub anim: SizeAnim,
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            value: 3.0,
            random: true,
            anim: SizeAnim::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeAnim {
    pub enable: bool,
    /// Hundredths of a logical pixel per 60 Hz frame.
    pub speed: f32,
    pub size_min: f32,
    pub sync: bool,
}

impl Default for SizeAnim {
    fn default() -> Self {
        Self {
            enable: false,
            speed: 40.0,
            size_min: 0.1,
            sync: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLinked {
    pub enable: bool,
    /// Maximum link length in logical pixels.
    pub distance: f32,
    pub color: Rgb,
    /// Opacity of a zero-length link.
    pub opacity: f32,
    pub width: f32,
}

impl Default for LineLinked {
    fn default() -> Self {
        Self {
            enable: true,
            distance: 150.0,
            color: MUTED,
            opacity: 0.2,
            width: 1.0,
        }
    }
}

/// Base heading of particle movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveDirection {
    /// Uniformly random heading.
    #[default]
    None,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

/// What happens when a particle reaches the surface boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutMode {
    /// Wrap around to the opposite edge.
    #[default]
    Out,
    /// Reflect off the edge.
    Bounce,
    /// Despawn once fully outside.
    Destroy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveOptions {
    pub enable: bool,
    /// Logical pixels per 60 Hz frame.
    pub speed: f32,
    pub direction: MoveDirection,
    /// Scale each particle's speed by a random factor.
    pub random: bool,
    /// Follow `direction` exactly instead of jittering around it.
    pub straight: bool,
    pub out_mode: OutMode,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            enable: true,
            speed: 1.5,
            direction: MoveDirection::None,
            random: false,
            straight: false,
            out_mode: OutMode::Out,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Interactivity {
    pub events: Events,
    pub modes: Modes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Events {
    pub onhover: HoverEvent,
    pub onclick: ClickEvent,
    /// Rescale the particle count when the surface resizes.
    pub resize: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self {
            onhover: HoverEvent::default(),
            onclick: ClickEvent::default(),
            resize: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// Link nearby particles to the pointer.
    #[default]
    Grab,
    /// Grow and brighten nearby particles.
    Bubble,
    /// Push nearby particles away.
    Repulse,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
    /// Spawn particles at the click point.
    #[default]
    Push,
    /// Delete the particles nearest the click point.
    Remove,
    /// Blast particles away from the click point.
    Repulse,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverEvent {
    pub enable: bool,
    pub mode: HoverMode,
}

impl Default for HoverEvent {
    fn default() -> Self {
        Self {
            enable: true,
            mode: HoverMode::Grab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickEvent {
    pub enable: bool,
    pub mode: ClickMode,
}

impl Default for ClickEvent {
    fn default() -> Self {
        Self {
            enable: true,
            mode: ClickMode::Push,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modes {
    pub grab: GrabMode,
    pub bubble: BubbleMode,
    pub repulse: RepulseMode,
    pub push: PushMode,
    pub remove: RemoveMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabMode {
    pub distance: f32,
    pub line_linked: GrabLink,
}

impl Default for GrabMode {
    fn default() -> Self {
        Self {
            distance: 140.0,
            line_linked: GrabLink::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabLink {
    pub opacity: f32,
}

impl Default for GrabLink {
    fn default() -> Self {
        Self { opacity: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleMode {
    pub distance: f32,
    /// Target radius in logical pixels.
    pub size: f32,
    /// Seconds to grow to the target.
    pub duration: f32,
    /// Target opacity. Values outside 0.0-1.0 are clamped during validation.
    pub opacity: f32,
    /// Multiplier on the rate bubbles shrink back once the pointer leaves.
    pub speed: f32,
}

impl Default for BubbleMode {
    fn default() -> Self {
        Self {
            distance: 400.0,
            size: 40.0,
            duration: 2.0,
            opacity: 8.0,
            speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepulseMode {
    pub distance: f32,
    /// Seconds for an impulse to decay.
    pub duration: f32,
}

impl Default for RepulseMode {
    fn default() -> Self {
        Self {
            distance: 200.0,
            duration: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushMode {
    pub particles_nb: u32,
}

impl Default for PushMode {
    fn default() -> Self {
        Self { particles_nb: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveMode {
    pub particles_nb: u32,
}

impl Default for RemoveMode {
    fn default() -> Self {
        Self { particles_nb: 2 }
    }
}

impl ParticlesConfig {
    /// Parse a particles.js JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a particles.js JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Range-check every numeric option.
    ///
    /// Returns the config with `bubble.opacity` clamped into 0.0-1.0; every
    /// other out-of-range value is an error.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let p = &self.particles;
        if p.number.density.enable {
            positive("particles.number.density.value_area", p.number.density.value_area)?;
        }

        unit("particles.opacity.value", p.opacity.value)?;
        unit("particles.opacity.anim.opacity_min", p.opacity.anim.opacity_min)?;
        non_negative("particles.opacity.anim.speed", p.opacity.anim.speed)?;

        non_negative("particles.size.value", p.size.value)?;
        non_negative("particles.size.anim.size_min", p.size.anim.size_min)?;
        non_negative("particles.size.anim.speed", p.size.anim.speed)?;

        non_negative("particles.line_linked.distance", p.line_linked.distance)?;
        unit("particles.line_linked.opacity", p.line_linked.opacity)?;
        non_negative("particles.line_linked.width", p.line_linked.width)?;

        non_negative("particles.move.speed", p.movement.speed)?;

        let m = &self.interactivity.modes;
        non_negative("interactivity.modes.grab.distance", m.grab.distance)?;
        unit(
            "interactivity.modes.grab.line_linked.opacity",
            m.grab.line_linked.opacity,
        )?;
        non_negative("interactivity.modes.bubble.distance", m.bubble.distance)?;
        non_negative("interactivity.modes.bubble.size", m.bubble.size)?;
        non_negative("interactivity.modes.bubble.duration", m.bubble.duration)?;
        non_negative("interactivity.modes.bubble.speed", m.bubble.speed)?;
        non_negative("interactivity.modes.repulse.distance", m.repulse.distance)?;
        non_negative("interactivity.modes.repulse.duration", m.repulse.duration)?;

        let bubble_opacity = m.bubble.opacity;
        if !bubble_opacity.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "interactivity.modes.bubble.opacity",
            });
        }
        if !(0.0..=1.0).contains(&bubble_opacity) {
            let clamped = bubble_opacity.clamp(0.0, 1.0);
            tracing::warn!(
                value = bubble_opacity,
                clamped,
                "interactivity.modes.bubble.opacity is outside 0..=1; clamping"
            );
            self.interactivity.modes.bubble.opacity = clamped;
        }

        Ok(self)
    }
}
