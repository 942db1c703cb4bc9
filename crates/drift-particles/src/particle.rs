//! Individual particle state.

use std::f32::consts::TAU;

use drift_config::{MoveDirection, ParticlesConfig};
use drift_core::{Size, Vec2};
use rand::Rng;

/// A value bouncing between two bounds at a fixed rate.
///
/// Drives opacity and size animation. A zero step leaves the value fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    value: f32,
    min: f32,
    max: f32,
    /// Change per 60 Hz frame.
    step: f32,
    rising: bool,
}

impl Oscillator {
    pub fn fixed(value: f32) -> Self {
        Self {
            value,
            min: value,
            max: value,
            step: 0.0,
            rising: false,
        }
    }

    /// Start at `value`, heading down toward `min`.
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value,
            min,
            max,
            step,
            rising: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance by `frames` 60 Hz frames, reversing direction at either bound.
    pub fn advance(&mut self, frames: f32) {
        if self.step == 0.0 {
            return;
        }

        let delta = self.step * frames;
        if self.rising {
            self.value += delta;
            if self.value >= self.max {
                self.value = self.max;
                self.rising = false;
            }
        } else {
            self.value -= delta;
            if self.value <= self.min {
                self.value = self.min;
                self.rising = true;
            }
        }
    }

    pub(crate) fn scale(&mut self, factor: f32) {
        self.value *= factor;
        self.min *= factor;
        self.max *= factor;
        self.step *= factor;
    }
}

/// State for a single particle.
///
/// All lengths are device pixels; velocities are device pixels per 60 Hz frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: Oscillator,
    pub(crate) opacity: Oscillator,
    /// How far the particle has grown toward the bubble target (0.0-1.0).
    pub(crate) bubble: f32,
    /// Extra velocity from a repulse, fading out over `impulse_left` seconds.
    pub(crate) impulse: Vec2,
    pub(crate) impulse_left: f32,
}

impl Particle {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Resting radius, before any bubble growth.
    pub fn radius(&self) -> f32 {
        self.radius.value()
    }

    /// Resting opacity, before any bubble brightening.
    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn bubble_level(&self) -> f32 {
        self.bubble
    }

    /// Velocity including any active repulse impulse.
    pub(crate) fn effective_velocity(&self) -> Vec2 {
        self.velocity + self.impulse
    }

    /// Replace the repulse impulse if `impulse` is stronger than the current one.
    pub(crate) fn kick(&mut self, impulse: Vec2, duration: f32) {
        if impulse.length_squared() >= self.impulse.length_squared() {
            self.impulse = impulse;
            self.impulse_left = duration;
        }
    }

    /// Fade the repulse impulse linearly over its remaining lifetime.
    pub(crate) fn decay_impulse(&mut self, secs: f32) {
        if self.impulse_left <= secs {
            self.impulse = Vec2::ZERO;
            self.impulse_left = 0.0;
            return;
        }
        self.impulse *= (self.impulse_left - secs) / self.impulse_left;
        self.impulse_left -= secs;
    }

    /// Rescale pixel quantities after a device pixel ratio change.
    pub(crate) fn rescale(&mut self, factor: f32) {
        self.radius.scale(factor);
        self.velocity *= factor;
        self.impulse *= factor;
    }

    #[cfg(test)]
    pub(crate) fn at(position: Vec2, radius: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: Oscillator::fixed(radius),
            opacity: Oscillator::fixed(opacity),
            bubble: 0.0,
            impulse: Vec2::ZERO,
            impulse_left: 0.0,
        }
    }
}

/// Unit heading for a configured direction, `None` for a random heading.
fn heading(direction: MoveDirection) -> Option<Vec2> {
    let (x, y) = match direction {
        MoveDirection::None => return None,
        MoveDirection::Top => (0.0, -1.0),
        MoveDirection::TopRight => (1.0, -1.0),
        MoveDirection::Right => (1.0, 0.0),
        MoveDirection::BottomRight => (1.0, 1.0),
        MoveDirection::Bottom => (0.0, 1.0),
        MoveDirection::BottomLeft => (-1.0, 1.0),
        MoveDirection::Left => (-1.0, 0.0),
        MoveDirection::TopLeft => (-1.0, -1.0),
    };
    Some(Vec2::new(x, y).normalize())
}

/// Spawn a particle, at `at` or at a random point inside `size`.
///
/// `ratio` scales every pixel quantity (radius, speed) from logical to
/// device pixels.
pub fn spawn(
    config: &ParticlesConfig,
    ratio: f32,
    size: Size,
    at: Option<Vec2>,
    rng: &mut impl Rng,
) -> Particle {
    let p = &config.particles;

    let position = match at {
        Some(point) => point,
        None if size.is_valid() => Vec2::new(
            rng.gen_range(0.0..size.width),
            rng.gen_range(0.0..size.height),
        ),
        None => Vec2::ZERO,
    };

    let max_radius = p.size.value * ratio;
    let radius = if p.size.random {
        rng.gen_range(0.0_f32..=1.0) * max_radius
    } else {
        max_radius
    };
    let radius = if p.size.anim.enable && !p.size.anim.sync {
        let step = p.size.anim.speed / 100.0 * ratio * rng.gen_range(0.0_f32..=1.0);
        Oscillator::new(radius, p.size.anim.size_min * ratio, max_radius, step)
    } else {
        Oscillator::fixed(radius)
    };

    let opacity = if p.opacity.random {
        rng.gen_range(0.0_f32..=1.0) * p.opacity.value
    } else {
        p.opacity.value
    };
    let opacity = if p.opacity.anim.enable && !p.opacity.anim.sync {
        let step = p.opacity.anim.speed / 100.0 * rng.gen_range(0.0_f32..=1.0);
        Oscillator::new(opacity, p.opacity.anim.opacity_min, p.opacity.value, step)
    } else {
        Oscillator::fixed(opacity)
    };

    let velocity = if p.movement.enable {
        let direction = match heading(p.movement.direction) {
            None => Vec2::from_angle(rng.gen_range(0.0..TAU)),
            Some(base) if p.movement.straight => base,
            Some(base) => {
                let jitter = Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5));
                let jittered = (base + jitter).normalize_or_zero();
                if jittered == Vec2::ZERO { base } else { jittered }
            }
        };
        let mut speed = p.movement.speed * ratio;
        if p.movement.random {
            speed *= rng.gen_range(0.0_f32..=1.0);
        }
        direction * speed
    } else {
        Vec2::ZERO
    };

    Particle {
        position,
        velocity,
        radius,
        opacity,
        bubble: 0.0,
        impulse: Vec2::ZERO,
        impulse_left: 0.0,
    }
}
