//! The particle field: owned particles, queued input and per-tick update.

use std::f32::consts::FRAC_PI_6;
use std::time::Duration;

use drift_config::{ClickMode, ConfigError, HoverMode, OutMode, ParticlesConfig, Shape};
use drift_core::{Paint, Size, Surface, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::intent::{Intent, IntentQueue};
use crate::interaction;
use crate::links::{self, LinkStyle};
use crate::particle::{self, Oscillator, Particle};

/// Ticks longer than this are clamped so a stalled host doesn't teleport particles.
const MAX_STEP: Duration = Duration::from_millis(250);

/// Raised by [`ParticleField::draw`]; never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldError {
    #[error("drawing surface is unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f32, height: f32 },
}

/// Outcome of a single [`ParticleField::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Particles moved.
    Advanced,
    /// The surface is zero-sized; intents were applied but nothing moved.
    Skipped,
}

/// An ambient field of drifting, linked particles.
#[derive(Debug)]
pub struct ParticleField {
    config: ParticlesConfig,
    particles: Vec<Particle>,
    /// Current surface size in device pixels.
    size: Size,
    /// Device pixels per logical pixel reported by the surface.
    pixel_ratio: f32,
    /// Scale applied to pixel quantities: `pixel_ratio` with retina
    /// detection, 1.0 without.
    scale: f32,
    /// Last known pointer position, `None` when outside the surface.
    pointer: Option<Vec2>,
    intents: IntentQueue,
    /// Opacity shared by every particle when `opacity.anim.sync` is set.
    shared_opacity: Option<Oscillator>,
    /// Radius shared by every particle when `size.anim.sync` is set.
    shared_radius: Option<Oscillator>,
    rng: StdRng,
}

impl ParticleField {
    /// Build a field filling `size` to its density target, seeded from OS entropy.
    pub fn new(config: ParticlesConfig, size: Size, pixel_ratio: f32) -> Result<Self, ConfigError> {
        Self::build(config, size, pixel_ratio, StdRng::from_entropy())
    }

    /// Like [`ParticleField::new`] but deterministic.
    pub fn with_seed(
        config: ParticlesConfig,
        size: Size,
        pixel_ratio: f32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(config, size, pixel_ratio, StdRng::seed_from_u64(seed))
    }

    fn build(
        config: ParticlesConfig,
        size: Size,
        pixel_ratio: f32,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        if !size.is_valid() {
            return Err(ConfigError::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }
        check_ratio(pixel_ratio)?;

        let scale = if config.retina_detect { pixel_ratio } else { 1.0 };
        let mut field = Self {
            shared_opacity: shared_opacity(&config),
            shared_radius: shared_radius(&config, scale),
            config,
            particles: Vec::new(),
            size,
            pixel_ratio,
            scale,
            pointer: None,
            intents: IntentQueue::default(),
            rng,
        };

        let target = field.target_count();
        field.spawn_random(target);
        tracing::debug!(
            count = target,
            width = size.width,
            height = size.height,
            pixel_ratio,
            "particle field created"
        );
        Ok(field)
    }

    pub fn config(&self) -> &ParticlesConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Intents waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.intents.len()
    }

    /// Whether the surface has a drawable size.
    pub fn is_available(&self) -> bool {
        self.size.is_valid()
    }

    /// Particle count the current surface calls for.
    ///
    /// With density enabled this is `number.value` per `density.value_area`
    /// thousand square logical pixels, and at least one. The result never
    /// exceeds `number.limit` when a limit is set.
    pub fn target_count(&self) -> usize {
        let number = &self.config.particles.number;
        let count = if number.density.enable {
            let logical_area = self.size.area() / (self.scale * self.scale) / 1000.0;
            let count = (logical_area / number.density.value_area * number.value as f32).round();
            (count as usize).max(1)
        } else {
            number.value as usize
        };

        match number.cap() {
            Some(cap) => count.min(cap),
            None => count,
        }
    }

    /// Queue an intent for the next tick.
    pub fn send(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.send(Intent::Hover(position));
    }

    pub fn pointer_left(&mut self) {
        self.send(Intent::Leave);
    }

    /// Queue the configured click action at `position`, if clicks are enabled.
    pub fn clicked(&mut self, position: Vec2) {
        let onclick = &self.config.interactivity.events.onclick;
        if !onclick.enable {
            return;
        }
        let intent = match onclick.mode {
            ClickMode::Push => Intent::Push(position),
            ClickMode::Remove => Intent::Remove(position),
            ClickMode::Repulse => Intent::Repulse(position),
            ClickMode::None => return,
        };
        self.send(intent);
    }

    pub fn resized(&mut self, size: Size, pixel_ratio: f32) {
        self.send(Intent::Resize { size, pixel_ratio });
    }

    /// Apply queued intents, then advance the animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> TickStatus {
        for intent in self.intents.drain() {
            self.apply(intent);
        }

        if !self.size.is_valid() {
            tracing::trace!("surface unavailable, tick skipped");
            return TickStatus::Skipped;
        }

        let secs = dt.min(MAX_STEP).as_secs_f32();
        let frames = secs * 60.0;

        if let Some(shared) = &mut self.shared_opacity {
            shared.advance(frames);
        }
        if let Some(shared) = &mut self.shared_radius {
            shared.advance(frames);
        }

        for particle in &mut self.particles {
            particle.position += particle.effective_velocity() * frames;
            particle.decay_impulse(secs);
            particle.opacity.advance(frames);
            particle.radius.advance(frames);
        }
        self.confine();
        self.hover(secs);

        tracing::trace!(count = self.particles.len(), secs, "field advanced");
        TickStatus::Advanced
    }

    /// Draw links, pointer links and particles onto `surface`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), FieldError> {
        let surface_size = surface.size();
        if !self.size.is_valid() || !surface_size.is_valid() {
            return Err(FieldError::SurfaceUnavailable {
                width: surface_size.width,
                height: surface_size.height,
            });
        }

        let p = &self.config.particles;
        let link_style = LinkStyle {
            distance: p.line_linked.distance * self.scale,
            opacity: p.line_linked.opacity,
            color: p.line_linked.color,
            width: p.line_linked.width * self.scale,
        };
        if p.line_linked.enable {
            links::draw_links(&self.particles, link_style, surface);
        }

        let hover = &self.config.interactivity.events.onhover;
        let grabbing = hover.enable && hover.mode == HoverMode::Grab;
        if let Some(pointer) = self.pointer.filter(|_| grabbing) {
            let grab = &self.config.interactivity.modes.grab;
            let grab_style = LinkStyle {
                distance: grab.distance * self.scale,
                opacity: grab.line_linked.opacity,
                ..link_style
            };
            links::draw_grab(&self.particles, pointer, grab_style, surface);
        }

        for particle in &self.particles {
            let (radius, opacity) = self.appearance(particle);
            if radius <= 0.0 || opacity <= 0.0 {
                continue;
            }
            let paint = Paint::new(p.color.value, opacity);
            match p.shape.kind {
                Shape::Circle => surface.circle(particle.position, radius, paint),
                Shape::Edge => {
                    let corners = [
                        Vec2::new(-radius, -radius),
                        Vec2::new(radius, -radius),
                        Vec2::new(radius, radius),
                        Vec2::new(-radius, radius),
                    ];
                    outline(surface, particle.position, &corners, self.scale, paint);
                }
                Shape::Triangle => {
                    let corners = [-3.0 * FRAC_PI_6, FRAC_PI_6, 5.0 * FRAC_PI_6]
                        .map(|angle| Vec2::from_angle(angle) * radius);
                    outline(surface, particle.position, &corners, self.scale, paint);
                }
            }
        }
        Ok(())
    }

    /// Rendered radius and opacity of `particle`, after sync and bubble.
    pub fn appearance(&self, particle: &Particle) -> (f32, f32) {
        let radius = match &self.shared_radius {
            Some(shared) => shared.value(),
            None => particle.radius(),
        };
        let opacity = match &self.shared_opacity {
            Some(shared) => shared.value(),
            None => particle.opacity(),
        };
        interaction::bubbled(
            radius,
            opacity,
            particle.bubble,
            &self.config.interactivity.modes.bubble,
            self.scale,
        )
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Hover(position) => self.pointer = Some(position),
            Intent::Leave => self.pointer = None,
            Intent::Push(position) => self.push(position),
            Intent::Remove(position) => {
                let count = self.config.interactivity.modes.remove.particles_nb as usize;
                let removed = interaction::remove_nearest(&mut self.particles, position, count);
                tracing::debug!(removed, count = self.particles.len(), "particles removed");
            }
            Intent::Repulse(position) => {
                let mode = &self.config.interactivity.modes.repulse;
                let affected = interaction::repulse(
                    &mut self.particles,
                    position,
                    mode.distance * self.scale,
                    mode.duration,
                    self.scale,
                );
                tracing::debug!(affected, "click repulse");
            }
            Intent::Resize { size, pixel_ratio } => self.resize(size, pixel_ratio),
        }
    }

    fn push(&mut self, position: Vec2) {
        let mut count = self.config.interactivity.modes.push.particles_nb as usize;
        if let Some(cap) = self.config.particles.number.cap() {
            count = count.min(cap.saturating_sub(self.particles.len()));
        }

        for _ in 0..count {
            let particle = particle::spawn(
                &self.config,
                self.scale,
                self.size,
                Some(position),
                &mut self.rng,
            );
            self.particles.push(particle);
        }
        tracing::debug!(pushed = count, count = self.particles.len(), "particles pushed");
    }

    fn resize(&mut self, size: Size, pixel_ratio: f32) {
        self.size = size;
        if !size.is_valid() {
            tracing::debug!(
                width = size.width,
                height = size.height,
                "surface unavailable"
            );
            return;
        }

        if check_ratio(pixel_ratio).is_ok() {
            self.pixel_ratio = pixel_ratio;
        } else {
            tracing::warn!(pixel_ratio, "ignoring invalid pixel ratio");
        }

        let scale = if self.config.retina_detect {
            self.pixel_ratio
        } else {
            1.0
        };
        if scale != self.scale {
            let factor = scale / self.scale;
            for particle in &mut self.particles {
                particle.rescale(factor);
            }
            if let Some(shared) = &mut self.shared_radius {
                shared.scale(factor);
            }
            self.scale = scale;
        }

        for particle in &mut self.particles {
            particle.position = wrap(particle.position, size);
        }

        if self.config.interactivity.events.resize {
            let target = self.target_count();
            let current = self.particles.len();
            if current < target {
                self.spawn_random(target - current);
            } else {
                self.particles.truncate(target);
            }
        }

        tracing::debug!(
            width = size.width,
            height = size.height,
            pixel_ratio = self.pixel_ratio,
            count = self.particles.len(),
            "field resized"
        );
    }

    fn spawn_random(&mut self, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle =
                particle::spawn(&self.config, self.scale, self.size, None, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Apply the out mode to particles that left the surface.
    fn confine(&mut self) {
        let size = self.size;
        match self.config.particles.movement.out_mode {
            OutMode::Out => {
                for particle in &mut self.particles {
                    particle.position = wrap(particle.position, size);
                }
            }
            OutMode::Bounce => {
                for particle in &mut self.particles {
                    bounce(particle, size);
                }
            }
            OutMode::Destroy => {
                let before = self.particles.len();
                self.particles.retain(|particle| {
                    let r = particle.radius();
                    let pos = particle.position;
                    pos.x >= -r
                        && pos.x <= size.width + r
                        && pos.y >= -r
                        && pos.y <= size.height + r
                });
                let destroyed = before - self.particles.len();
                if destroyed > 0 {
                    tracing::trace!(destroyed, "particles left the surface");
                }
            }
        }
    }

    fn hover(&mut self, secs: f32) {
        let hover = &self.config.interactivity.events.onhover;
        let pointer = self.pointer.filter(|_| hover.enable);
        let modes = &self.config.interactivity.modes;

        match hover.mode {
            HoverMode::Bubble => interaction::update_bubbles(
                &mut self.particles,
                pointer,
                &modes.bubble,
                self.scale,
                secs,
            ),
            HoverMode::Repulse => {
                if let Some(pointer) = pointer {
                    interaction::repulse(
                        &mut self.particles,
                        pointer,
                        modes.repulse.distance * self.scale,
                        modes.repulse.duration,
                        self.scale,
                    );
                }
            }
            HoverMode::Grab | HoverMode::None => {}
        }
    }
}

fn check_ratio(pixel_ratio: f32) -> Result<(), ConfigError> {
    if !pixel_ratio.is_finite() {
        return Err(ConfigError::NotFinite {
            field: "pixel_ratio",
        });
    }
    if pixel_ratio <= 0.0 {
        return Err(ConfigError::OutOfRange {
            field: "pixel_ratio",
            value: pixel_ratio,
            min: f32::MIN_POSITIVE,
            max: f32::MAX,
        });
    }
    Ok(())
}

fn shared_opacity(config: &ParticlesConfig) -> Option<Oscillator> {
    let opacity = &config.particles.opacity;
    (opacity.anim.enable && opacity.anim.sync).then(|| {
        Oscillator::new(
            opacity.value,
            opacity.anim.opacity_min,
            opacity.value,
            opacity.anim.speed / 100.0,
        )
    })
}

fn shared_radius(config: &ParticlesConfig, scale: f32) -> Option<Oscillator> {
    let size = &config.particles.size;
    (size.anim.enable && size.anim.sync).then(|| {
        let max = size.value * scale;
        Oscillator::new(max, size.anim.size_min * scale, max, size.anim.speed / 100.0 * scale)
    })
}

/// Toroidal wrap into `[0, width] x [0, height]`.
fn wrap(position: Vec2, size: Size) -> Vec2 {
    Vec2::new(
        position.x.rem_euclid(size.width),
        position.y.rem_euclid(size.height),
    )
}

/// Reflect off whichever edge the particle crossed.
fn bounce(particle: &mut Particle, size: Size) {
    let pos = &mut particle.position;
    if pos.x < 0.0 {
        pos.x = 0.0;
        particle.velocity.x = particle.velocity.x.abs();
        particle.impulse.x = particle.impulse.x.abs();
    } else if pos.x > size.width {
        pos.x = size.width;
        particle.velocity.x = -particle.velocity.x.abs();
        particle.impulse.x = -particle.impulse.x.abs();
    }
    if pos.y < 0.0 {
        pos.y = 0.0;
        particle.velocity.y = particle.velocity.y.abs();
        particle.impulse.y = particle.impulse.y.abs();
    } else if pos.y > size.height {
        pos.y = size.height;
        particle.velocity.y = -particle.velocity.y.abs();
        particle.impulse.y = -particle.impulse.y.abs();
    }
}

/// Stroke a closed polygon of `corners` around `center`.
fn outline<S: Surface + ?Sized>(
    surface: &mut S,
    center: Vec2,
    corners: &[Vec2],
    width: f32,
    paint: Paint,
) {
    for (i, corner) in corners.iter().enumerate() {
        let next = corners[(i + 1) % corners.len()];
        surface.line(center + *corner, center + next, width, paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_config::MoveDirection;
    use drift_core::{DrawCommand, DrawList};

    const FRAME: Duration = Duration::from_millis(16);

    fn site_field(size: Size) -> ParticleField {
        ParticleField::with_seed(ParticlesConfig::default(), size, 1.0, 42).unwrap()
    }

    /// A field with no initial particles and no motion.
    fn empty_config() -> ParticlesConfig {
        let mut config = ParticlesConfig::default();
        config.particles.number.value = 0;
        config.particles.number.density.enable = false;
        config.particles.movement.enable = false;
        config.particles.opacity.random = false;
        config.particles.opacity.anim.enable = false;
        config.particles.size.random = false;
        config
    }

    fn empty_field(config: ParticlesConfig) -> ParticleField {
        ParticleField::with_seed(config, Size::new(1000.0, 800.0), 1.0, 7).unwrap()
    }

    #[test]
    fn test_initial_count_from_density() {
        assert_eq!(site_field(Size::new(1000.0, 800.0)).len(), 80);
        assert_eq!(site_field(Size::new(2000.0, 800.0)).len(), 160);
        assert_eq!(site_field(Size::new(10.0, 10.0)).len(), 1);
    }

    #[test]
    fn test_retina_scales_count_and_sizes() {
        let size = Size::new(2000.0, 1600.0);
        let retina = ParticleField::with_seed(ParticlesConfig::default(), size, 2.0, 1).unwrap();
        assert_eq!(retina.len(), 80);
        assert!(retina.particles().iter().all(|p| p.radius() <= 6.0));

        let mut config = ParticlesConfig::default();
        config.retina_detect = false;
        let flat = ParticleField::with_seed(config, size, 2.0, 1).unwrap();
        assert_eq!(flat.len(), 320);
        assert!(flat.particles().iter().all(|p| p.radius() <= 3.0));
    }

    #[test]
    fn test_invalid_construction() {
        let err = ParticleField::new(ParticlesConfig::default(), Size::new(0.0, 600.0), 1.0);
        assert!(matches!(err, Err(ConfigError::InvalidSurface { .. })));

        let err = ParticleField::new(ParticlesConfig::default(), Size::new(800.0, 600.0), 0.0);
        assert!(err.is_err());

        let mut config = ParticlesConfig::default();
        config.interactivity.modes.grab.distance = -5.0;
        assert!(ParticleField::new(config, Size::new(800.0, 600.0), 1.0).is_err());
    }

    #[test]
    fn test_seeded_fields_match() {
        let a = site_field(Size::new(640.0, 480.0));
        let b = site_field(Size::new(640.0, 480.0));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_wrap_keeps_particles_in_bounds() {
        let size = Size::new(300.0, 200.0);
        let mut config = ParticlesConfig::default();
        config.particles.movement.speed = 25.0;
        let mut field = ParticleField::with_seed(config, size, 1.0, 9).unwrap();

        for i in 0..2000 {
            let dt = Duration::from_millis(if i % 7 == 0 { 100 } else { 16 });
            assert_eq!(field.tick(dt), TickStatus::Advanced);
            for p in field.particles() {
                assert!(size.contains(p.position()), "{:?} escaped", p.position());
            }
        }
        assert_eq!(field.len(), 6);
    }

    #[test]
    fn test_bounce_keeps_particles_in_bounds() {
        let size = Size::new(400.0, 300.0);
        let mut config = ParticlesConfig::default();
        config.particles.movement.out_mode = OutMode::Bounce;
        config.particles.movement.speed = 10.0;
        let mut field = ParticleField::with_seed(config, size, 1.0, 3).unwrap();

        for _ in 0..500 {
            field.tick(FRAME);
            assert!(field.particles().iter().all(|p| size.contains(p.position())));
        }
    }

    #[test]
    fn test_destroy_despawns_leavers() {
        let mut config = ParticlesConfig::default();
        config.particles.movement.out_mode = OutMode::Destroy;
        config.particles.movement.direction = MoveDirection::Right;
        config.particles.movement.straight = true;
        config.particles.movement.speed = 20.0;
        let mut field = ParticleField::with_seed(config, Size::new(1000.0, 800.0), 1.0, 5).unwrap();
        assert_eq!(field.len(), 80);

        for _ in 0..200 {
            field.tick(FRAME);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn test_push_without_cap() {
        let mut field = site_field(Size::new(1000.0, 800.0));
        let start = field.len();
        for _ in 0..5 {
            field.clicked(Vec2::new(500.0, 400.0));
        }
        field.tick(FRAME);
        assert_eq!(field.len(), start + 5 * 4);
    }

    #[test]
    fn test_push_respects_cap() {
        let mut config = ParticlesConfig::default();
        config.particles.number.limit = 90;
        let mut field = ParticleField::with_seed(config, Size::new(1000.0, 800.0), 1.0, 2).unwrap();
        assert_eq!(field.len(), 80);

        for n in 1..=5 {
            field.clicked(Vec2::new(10.0, 10.0));
            field.tick(FRAME);
            assert_eq!(field.len(), (80 + n * 4).min(90));
        }
    }

    #[test]
    fn test_pushed_particles_start_at_click() {
        let mut config = empty_config();
        config.interactivity.modes.push.particles_nb = 3;
        let mut field = empty_field(config);

        field.send(Intent::Push(Vec2::new(120.0, 80.0)));
        field.tick(FRAME);
        assert_eq!(field.len(), 3);
        assert!(
            field
                .particles()
                .iter()
                .all(|p| p.position() == Vec2::new(120.0, 80.0))
        );
    }

    #[test]
    fn test_remove_never_below_zero() {
        let mut config = ParticlesConfig::default();
        config.interactivity.events.onclick.mode = ClickMode::Remove;
        let mut field = ParticleField::with_seed(config, Size::new(100.0, 100.0), 1.0, 4).unwrap();
        assert_eq!(field.len(), 1);

        field.clicked(Vec2::ZERO);
        field.tick(FRAME);
        assert_eq!(field.len(), 0);

        field.clicked(Vec2::ZERO);
        field.tick(FRAME);
        assert_eq!(field.len(), 0);
    }

    #[test]
    fn test_disabled_click_is_ignored() {
        let mut config = ParticlesConfig::default();
        config.interactivity.events.onclick.enable = false;
        let mut field = ParticleField::with_seed(config, Size::new(1000.0, 800.0), 1.0, 4).unwrap();
        field.clicked(Vec2::ZERO);
        assert_eq!(field.pending(), 0);
        field.tick(FRAME);
        assert_eq!(field.len(), 80);
    }

    #[test]
    fn test_resize_adjusts_count_proportionally() {
        let mut field = site_field(Size::new(1000.0, 800.0));

        field.resized(Size::new(2000.0, 800.0), 1.0);
        field.tick(FRAME);
        assert_eq!(field.len(), 160);

        field.resized(Size::new(500.0, 800.0), 1.0);
        field.tick(FRAME);
        assert_eq!(field.len(), 40);
        assert!(
            field
                .particles()
                .iter()
                .all(|p| field.size().contains(p.position()))
        );
    }

    #[test]
    fn test_resize_without_resize_event_keeps_count() {
        let mut config = ParticlesConfig::default();
        config.interactivity.events.resize = false;
        let mut field = ParticleField::with_seed(config, Size::new(1000.0, 800.0), 1.0, 8).unwrap();
        field.resized(Size::new(2000.0, 800.0), 1.0);
        field.tick(FRAME);
        assert_eq!(field.len(), 80);
    }

    #[test]
    fn test_resizes_between_ticks_coalesce() {
        let mut field = site_field(Size::new(1000.0, 800.0));
        field.resized(Size::new(3000.0, 800.0), 1.0);
        field.resized(Size::new(0.0, 0.0), 1.0);
        field.resized(Size::new(500.0, 800.0), 1.0);
        assert_eq!(field.pending(), 3);

        assert_eq!(field.tick(FRAME), TickStatus::Advanced);
        assert_eq!(field.size(), Size::new(500.0, 800.0));
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn test_zero_size_skips_ticks() {
        let mut field = site_field(Size::new(1000.0, 800.0));
        field.resized(Size::new(0.0, 800.0), 1.0);
        assert_eq!(field.tick(FRAME), TickStatus::Skipped);
        assert!(!field.is_available());

        let mut list = DrawList::new(Size::new(0.0, 800.0));
        assert!(matches!(
            field.draw(&mut list),
            Err(FieldError::SurfaceUnavailable { .. })
        ));

        field.resized(Size::new(1000.0, 800.0), 1.0);
        assert_eq!(field.tick(FRAME), TickStatus::Advanced);
        assert_eq!(field.len(), 80);
    }

    #[test]
    fn test_pixel_ratio_change_rescales() {
        let mut config = ParticlesConfig::default();
        config.particles.size.random = false;
        let mut field = ParticleField::with_seed(config, Size::new(1000.0, 800.0), 1.0, 6).unwrap();
        field.resized(Size::new(2000.0, 1600.0), 2.0);
        field.tick(FRAME);

        assert_eq!(field.len(), 80);
        assert!(field.particles().iter().all(|p| (p.radius() - 6.0).abs() < 1e-4));
        assert!(
            field
                .particles()
                .iter()
                .all(|p| (p.velocity().length() - 3.0).abs() < 1e-3)
        );
    }

    #[test]
    fn test_grab_links_pointer() {
        let mut config = empty_config();
        config.interactivity.modes.push.particles_nb = 1;
        config.particles.line_linked.enable = false;
        let mut field = empty_field(config);

        field.send(Intent::Push(Vec2::new(100.0, 100.0)));
        field.pointer_moved(Vec2::new(170.0, 100.0));
        field.tick(FRAME);

        let mut list = DrawList::new(field.size());
        field.draw(&mut list).unwrap();
        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1, Vec2::new(170.0, 100.0));
        assert!((lines[0].2.alpha - 0.25).abs() < 1e-6);

        field.pointer_left();
        field.tick(FRAME);
        list.reset(field.size());
        field.draw(&mut list).unwrap();
        assert_eq!(list.lines().count(), 0);
        assert_eq!(list.circle_count(), 1);
    }

    #[test]
    fn test_links_drawn_between_close_particles() {
        let mut config = empty_config();
        config.interactivity.modes.push.particles_nb = 1;
        let mut field = empty_field(config);
        field.send(Intent::Push(Vec2::new(100.0, 100.0)));
        field.send(Intent::Push(Vec2::new(100.0, 175.0)));
        field.send(Intent::Push(Vec2::new(900.0, 700.0)));
        field.tick(FRAME);

        let mut list = DrawList::new(field.size());
        field.draw(&mut list).unwrap();
        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!((lines[0].2.alpha - 0.1).abs() < 1e-6);
        assert_eq!(list.circle_count(), 3);
    }

    #[test]
    fn test_opacity_stays_in_bounds() {
        let mut field = site_field(Size::new(800.0, 600.0));
        for _ in 0..600 {
            field.tick(FRAME);
            for p in field.particles() {
                let (_, opacity) = field.appearance(p);
                assert!((0.0..=0.3).contains(&opacity), "{opacity}");
            }
        }
    }

    #[test]
    fn test_sync_opacity_is_shared() {
        let mut config = ParticlesConfig::default();
        config.particles.opacity.anim.sync = true;
        let mut field = ParticleField::with_seed(config, Size::new(800.0, 600.0), 1.0, 11).unwrap();
        for _ in 0..30 {
            field.tick(FRAME);
        }

        let first = field.appearance(&field.particles()[0]).1;
        assert!(first < 0.3);
        assert!(field.particles().iter().all(|p| field.appearance(p).1 == first));
    }

    #[test]
    fn test_bubble_hover_grows_nearby() {
        let mut config = empty_config();
        config.interactivity.events.onhover.mode = HoverMode::Bubble;
        config.interactivity.modes.push.particles_nb = 1;
        let mut field = empty_field(config);

        field.send(Intent::Push(Vec2::new(100.0, 100.0)));
        field.send(Intent::Push(Vec2::new(900.0, 700.0)));
        field.pointer_moved(Vec2::new(100.0, 100.0));
        for _ in 0..200 {
            field.tick(FRAME);
        }

        let (near_radius, near_opacity) = field.appearance(&field.particles()[0]);
        let (far_radius, _) = field.appearance(&field.particles()[1]);
        assert!((near_radius - 40.0).abs() < 1e-3);
        assert!((near_opacity - 1.0).abs() < 1e-3);
        assert_eq!(far_radius, 3.0);

        field.pointer_left();
        for _ in 0..60 {
            field.tick(FRAME);
        }
        assert_eq!(field.appearance(&field.particles()[0]), (3.0, 0.3));
    }

    #[test]
    fn test_click_repulse_pushes_away() {
        let mut config = empty_config();
        config.interactivity.events.onclick.mode = ClickMode::Repulse;
        config.interactivity.modes.push.particles_nb = 1;
        let mut field = empty_field(config);

        field.send(Intent::Push(Vec2::new(150.0, 100.0)));
        field.tick(FRAME);
        field.clicked(Vec2::new(100.0, 100.0));
        field.tick(FRAME);
        let x = field.particles()[0].position().x;
        assert!(x > 150.0);

        // the impulse is gone after repulse.duration
        for _ in 0..60 {
            field.tick(FRAME);
        }
        let settled = field.particles()[0].position();
        field.tick(FRAME);
        assert_eq!(field.particles()[0].position(), settled);
    }

    #[test]
    fn test_shapes_draw_outlines() {
        let mut config = empty_config();
        config.interactivity.modes.push.particles_nb = 1;
        config.particles.shape.kind = Shape::Triangle;
        let mut field = empty_field(config);
        field.send(Intent::Push(Vec2::new(500.0, 400.0)));
        field.tick(FRAME);

        let mut list = DrawList::new(field.size());
        field.draw(&mut list).unwrap();
        assert_eq!(list.circle_count(), 0);
        assert_eq!(
            list.commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::Line { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_edge_draws_square() {
        let mut config = empty_config();
        config.interactivity.modes.push.particles_nb = 1;
        config.particles.shape.kind = Shape::Edge;
        let mut field = empty_field(config);
        field.send(Intent::Push(Vec2::new(500.0, 400.0)));
        field.tick(FRAME);

        let mut list = DrawList::new(field.size());
        field.draw(&mut list).unwrap();
        assert_eq!(list.circle_count(), 0);
        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|(from, to, _)| from.x == to.x || from.y == to.y));
    }

    #[test]
    fn test_hover_repulse_pushes_away() {
        let mut config = empty_config();
        config.interactivity.events.onhover.mode = HoverMode::Repulse;
        config.interactivity.modes.push.particles_nb = 1;
        let mut field = empty_field(config);

        field.send(Intent::Push(Vec2::new(150.0, 100.0)));
        field.send(Intent::Push(Vec2::new(900.0, 700.0)));
        field.pointer_moved(Vec2::new(100.0, 100.0));
        for _ in 0..5 {
            field.tick(FRAME);
        }

        let near = field.particles()[0].position();
        assert!(near.x > 150.0);
        assert!((near.y - 100.0).abs() < 1e-3);
        assert_eq!(field.particles()[1].position(), Vec2::new(900.0, 700.0));

        field.pointer_left();
        for _ in 0..60 {
            field.tick(FRAME);
        }
        let settled = field.particles()[0].position();
        field.tick(FRAME);
        assert_eq!(field.particles()[0].position(), settled);
    }
}
