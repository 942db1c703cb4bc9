//! Pointer interaction modes.

use drift_config::BubbleMode;
use drift_core::Vec2;

use crate::particle::Particle;

/// Peak repulse impulse, in logical pixels per 60 Hz frame.
const REPULSE_VELOCITY: f32 = 6.0;

/// Grow or shrink each particle's bubble level toward its pointer target.
///
/// Particles within `distance` of the pointer target `1 - d / distance`;
/// everything else (or everything, with no pointer) targets 0. Growth takes
/// `mode.duration` seconds for a full swing; shrinking runs `mode.speed`
/// times faster, and never slower than growth.
pub(crate) fn update_bubbles(
    particles: &mut [Particle],
    pointer: Option<Vec2>,
    mode: &BubbleMode,
    ratio: f32,
    secs: f32,
) {
    let distance = mode.distance * ratio;
    let grow = if mode.duration > 0.0 {
        secs / mode.duration
    } else {
        1.0
    };
    let shrink = grow * mode.speed.max(1.0);

    for particle in particles {
        let target = match pointer {
            Some(pointer) if distance > 0.0 => {
                let d = particle.position.distance(pointer);
                if d < distance { 1.0 - d / distance } else { 0.0 }
            }
            _ => 0.0,
        };

        if particle.bubble < target {
            particle.bubble = (particle.bubble + grow).min(target);
        } else if particle.bubble > target {
            particle.bubble = (particle.bubble - shrink).max(target);
        }
    }
}

/// Radius and opacity grown `level` of the way toward the bubble target.
pub(crate) fn bubbled(
    radius: f32,
    opacity: f32,
    level: f32,
    mode: &BubbleMode,
    ratio: f32,
) -> (f32, f32) {
    if level <= 0.0 {
        return (radius, opacity);
    }

    let target_radius = mode.size * ratio;
    let target_opacity = mode.opacity.clamp(0.0, 1.0);
    (
        radius + (target_radius - radius) * level,
        opacity + (target_opacity - opacity) * level,
    )
}

/// Push every particle within `distance` of `origin` outward.
///
/// The impulse falls off with the square of the distance and decays over
/// `duration` seconds. Returns how many particles were affected.
pub(crate) fn repulse(
    particles: &mut [Particle],
    origin: Vec2,
    distance: f32,
    duration: f32,
    ratio: f32,
) -> usize {
    if distance <= 0.0 {
        return 0;
    }

    let max_sq = distance * distance;
    let mut affected = 0;
    for particle in particles {
        let offset = particle.position - origin;
        let dist_sq = offset.length_squared();
        if dist_sq >= max_sq {
            continue;
        }
        let direction = offset.try_normalize().unwrap_or(Vec2::X);
        let falloff = 1.0 - dist_sq / max_sq;
        particle.kick(direction * REPULSE_VELOCITY * ratio * falloff, duration);
        affected += 1;
    }
    affected
}

/// Delete up to `count` particles nearest `point`. Returns how many were removed.
pub(crate) fn remove_nearest(particles: &mut Vec<Particle>, point: Vec2, count: usize) -> usize {
    let count = count.min(particles.len());
    if count == 0 {
        return 0;
    }

    let mut order: Vec<usize> = (0..particles.len()).collect();
    order.sort_by(|&a, &b| {
        let da = particles[a].position.distance_squared(point);
        let db = particles[b].position.distance_squared(point);
        da.total_cmp(&db)
    });

    let mut doomed = vec![false; particles.len()];
    for &i in &order[..count] {
        doomed[i] = true;
    }

    let mut index = 0;
    particles.retain(|_| {
        let keep = !doomed[index];
        index += 1;
        keep
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(xs: &[f32]) -> Vec<Particle> {
        xs.iter()
            .map(|&x| Particle::at(Vec2::new(x, 0.0), 2.0, 0.3))
            .collect()
    }

    #[test]
    fn test_remove_nearest_first() {
        let mut particles = row(&[0.0, 50.0, 100.0, 500.0]);
        let removed = remove_nearest(&mut particles, Vec2::new(90.0, 0.0), 2);

        assert_eq!(removed, 2);
        let left: Vec<f32> = particles.iter().map(|p| p.position().x).collect();
        assert_eq!(left, vec![0.0, 500.0]);
    }

    #[test]
    fn test_remove_more_than_present() {
        let mut particles = row(&[0.0]);
        assert_eq!(remove_nearest(&mut particles, Vec2::ZERO, 5), 1);
        assert!(particles.is_empty());
        assert_eq!(remove_nearest(&mut particles, Vec2::ZERO, 5), 0);
    }

    #[test]
    fn test_repulse_pushes_outward() {
        let mut particles = row(&[10.0, -10.0, 500.0]);
        let affected = repulse(&mut particles, Vec2::ZERO, 200.0, 0.4, 1.0);

        assert_eq!(affected, 2);
        assert!(particles[0].effective_velocity().x > 0.0);
        assert!(particles[1].effective_velocity().x < 0.0);
        assert_eq!(particles[2].effective_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_repulse_weaker_further_out() {
        let mut particles = row(&[10.0, 150.0]);
        repulse(&mut particles, Vec2::ZERO, 200.0, 0.4, 1.0);
        assert!(
            particles[0].effective_velocity().length() > particles[1].effective_velocity().length()
        );
    }

    #[test]
    fn test_bubble_grows_and_decays() {
        let mode = BubbleMode {
            opacity: 1.0,
            ..BubbleMode::default()
        };
        let mut particles = row(&[0.0]);

        update_bubbles(&mut particles, Some(Vec2::ZERO), &mode, 1.0, 1.0);
        assert!((particles[0].bubble_level() - 0.5).abs() < 1e-6);
        update_bubbles(&mut particles, Some(Vec2::ZERO), &mode, 1.0, 5.0);
        assert_eq!(particles[0].bubble_level(), 1.0);

        let (radius, opacity) = bubbled(2.0, 0.3, particles[0].bubble_level(), &mode, 1.0);
        assert!((radius - 40.0).abs() < 1e-5);
        assert!((opacity - 1.0).abs() < 1e-6);

        // shrinks three times faster once the pointer leaves
        update_bubbles(&mut particles, None, &mode, 1.0, 0.5);
        assert!((particles[0].bubble_level() - 0.25).abs() < 1e-6);
        update_bubbles(&mut particles, None, &mode, 1.0, 1.0);
        assert_eq!(particles[0].bubble_level(), 0.0);
        assert_eq!(
            bubbled(2.0, 0.3, particles[0].bubble_level(), &mode, 1.0),
            (2.0, 0.3)
        );
    }
}
