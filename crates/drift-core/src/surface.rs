//! Drawing-surface abstraction.
//!
//! The particle field never talks to a concrete canvas. It draws circles and
//! lines into anything implementing [`Surface`], measured in device pixels.

use glam::Vec2;

use crate::color::Rgb;

/// Surface dimensions in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// A surface is usable only with finite, strictly positive dimensions.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Whether `point` lies inside the closed rectangle `[0, width] x [0, height]`.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Color plus opacity for a single primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    /// Opacity in 0.0-1.0.
    pub alpha: f32,
}

impl Paint {
    pub const fn new(color: Rgb, alpha: f32) -> Self {
        Self { color, alpha }
    }
}

/// A 2D drawing target supporting the two primitives the field needs.
pub trait Surface {
    /// Current dimensions in device pixels.
    fn size(&self) -> Size;

    /// Draw a filled circle.
    fn circle(&mut self, center: Vec2, radius: f32, paint: Paint);

    /// Draw a straight line segment.
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint);
}

/// A recorded drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        paint: Paint,
    },
}

/// A surface that records commands instead of rasterizing them.
///
/// Hosts replay the list onto their real canvas; tests inspect it directly.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands and adopt new dimensions.
    pub fn reset(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
    }

    /// Number of recorded circles.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Recorded lines as `(from, to, paint)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Paint)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { from, to, paint, .. } => Some((from, to, paint)),
            DrawCommand::Circle { .. } => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> Size {
        self.size
    }

    fn circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            paint,
        });
    }
}
