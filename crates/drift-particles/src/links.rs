//! Line links between nearby particles and to the pointer.

use drift_core::{Paint, Rgb, Surface, Vec2};

use crate::particle::Particle;

/// Opacity of a link of length `distance`.
///
/// Falls linearly from `max_opacity` at zero length to exactly 0.0 at
/// `max_distance`, and stays 0.0 beyond it.
pub fn line_opacity(distance: f32, max_distance: f32, max_opacity: f32) -> f32 {
    if max_distance <= 0.0 || distance >= max_distance {
        return 0.0;
    }
    max_opacity * (1.0 - distance / max_distance)
}

/// How links are stroked. Lengths are device pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkStyle {
    pub distance: f32,
    pub opacity: f32,
    pub color: Rgb,
    pub width: f32,
}

/// Draw a line for every unordered pair of particles closer than `style.distance`.
pub(crate) fn draw_links<S: Surface + ?Sized>(
    particles: &[Particle],
    style: LinkStyle,
    surface: &mut S,
) {
    let max_sq = style.distance * style.distance;

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            // Compare squared lengths; only linked pairs pay for the sqrt.
            let dist_sq = a.position.distance_squared(b.position);
            if dist_sq >= max_sq {
                continue;
            }
            let alpha = line_opacity(dist_sq.sqrt(), style.distance, style.opacity);
            if alpha > 0.0 {
                surface.line(
                    a.position,
                    b.position,
                    style.width,
                    Paint::new(style.color, alpha),
                );
            }
        }
    }
}

/// Draw a line from the pointer to every particle within `style.distance`.
pub(crate) fn draw_grab<S: Surface + ?Sized>(
    particles: &[Particle],
    pointer: Vec2,
    style: LinkStyle,
    surface: &mut S,
) {
    let max_sq = style.distance * style.distance;

    for particle in particles {
        let dist_sq = particle.position.distance_squared(pointer);
        if dist_sq >= max_sq {
            continue;
        }
        let alpha = line_opacity(dist_sq.sqrt(), style.distance, style.opacity);
        if alpha > 0.0 {
            surface.line(
                particle.position,
                pointer,
                style.width,
                Paint::new(style.color, alpha),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{DrawList, Size};

    fn style() -> LinkStyle {
        LinkStyle {
            distance: 150.0,
            opacity: 0.2,
            color: Rgb::new(0xa0, 0xae, 0xc0),
            width: 1.0,
        }
    }

    #[test]
    fn test_opacity_monotonic_and_zero_at_max() {
        assert!((line_opacity(0.0, 150.0, 0.2) - 0.2).abs() < 1e-6);
        assert_eq!(line_opacity(150.0, 150.0, 0.2), 0.0);
        assert_eq!(line_opacity(400.0, 150.0, 0.2), 0.0);

        let mut prev = f32::INFINITY;
        for d in 0..=150 {
            let o = line_opacity(d as f32, 150.0, 0.2);
            assert!(o <= prev, "opacity rose at {d}");
            prev = o;
        }
    }

    #[test]
    fn test_zero_distance_disables_links() {
        assert_eq!(line_opacity(0.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_links_only_near_pairs() {
        let particles = vec![
            Particle::at(Vec2::new(0.0, 0.0), 1.0, 1.0),
            Particle::at(Vec2::new(75.0, 0.0), 1.0, 1.0),
            Particle::at(Vec2::new(500.0, 500.0), 1.0, 1.0),
        ];
        let mut list = DrawList::new(Size::new(600.0, 600.0));
        draw_links(&particles, style(), &mut list);

        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 1);
        let (from, to, paint) = lines[0];
        assert_eq!((from, to), (Vec2::new(0.0, 0.0), Vec2::new(75.0, 0.0)));
        assert!((paint.alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_grab_links_to_pointer() {
        let particles = vec![
            Particle::at(Vec2::new(10.0, 10.0), 1.0, 1.0),
            Particle::at(Vec2::new(300.0, 10.0), 1.0, 1.0),
        ];
        let pointer = Vec2::new(10.0, 80.0);
        let mut list = DrawList::new(Size::new(600.0, 600.0));
        let grab = LinkStyle {
            distance: 140.0,
            opacity: 0.5,
            ..style()
        };
        draw_grab(&particles, pointer, grab, &mut list);

        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1, pointer);
        assert!((lines[0].2.alpha - 0.25).abs() < 1e-6);
    }
}
