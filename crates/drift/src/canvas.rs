//! Braille rasterizer backing the particle field.
//!
//! Each terminal cell is treated as an 8x16 pixel block holding a 2x4 grid
//! of braille dots, so one dot covers 4x4 virtual pixels.

use drift_core::{Paint, Rgb, Size, Surface, Vec2};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Virtual pixels per terminal column.
pub const CELL_WIDTH: f32 = 8.0;
/// Virtual pixels per terminal row.
pub const CELL_HEIGHT: f32 = 16.0;
/// Virtual pixels per braille dot, in both directions.
const DOT: f32 = 4.0;

/// Bit for each dot of a braille cell, indexed `[y][x]`.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Center of a terminal cell in virtual pixels.
pub fn cell_center(column: u16, row: u16) -> Vec2 {
    Vec2::new(
        (column as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

/// Virtual pixel size of a `columns` x `rows` terminal area.
pub fn surface_size(columns: u16, rows: u16) -> Size {
    Size::new(columns as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    mask: u8,
    /// Strongest paint that touched the cell, with alpha accumulated.
    ink: Option<Paint>,
}

/// A grid of braille cells implementing [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct BrailleCanvas {
    columns: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl BrailleCanvas {
    pub fn new(columns: u16, rows: u16) -> Self {
        let mut canvas = Self::default();
        canvas.reset(columns, rows);
        canvas
    }

    /// Blank every cell, adopting new dimensions.
    pub fn reset(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.cells.clear();
        self.cells
            .resize(columns as usize * rows as usize, Cell::default());
    }

    /// Turn on the dot at dot coordinates `(x, y)`.
    fn plot(&mut self, x: i32, y: i32, paint: Paint) {
        if x < 0 || y < 0 {
            return;
        }
        let (column, row) = (x as usize / 2, y as usize / 4);
        if column >= self.columns as usize || row >= self.rows as usize {
            return;
        }

        let cell = &mut self.cells[row * self.columns as usize + column];
        cell.mask |= DOT_BITS[y as usize % 4][x as usize % 2];
        cell.ink = Some(match cell.ink {
            None => paint,
            Some(ink) => {
                let alpha = 1.0 - (1.0 - ink.alpha) * (1.0 - paint.alpha);
                let color = if paint.alpha > ink.alpha {
                    paint.color
                } else {
                    ink.color
                };
                Paint::new(color, alpha.min(1.0))
            }
        });
    }

    /// Styled rows of braille characters blended over `background`.
    pub fn lines(&self, background: Rgb) -> Vec<Line<'static>> {
        if self.columns == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.columns as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| render_cell(cell, background))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn render_cell(cell: &Cell, background: Rgb) -> Span<'static> {
    let Some(ink) = cell.ink.filter(|_| cell.mask != 0) else {
        return Span::raw(" ");
    };
    let glyph = char::from_u32(0x2800 + cell.mask as u32).unwrap_or(' ');
    let color = ink.color.over(background, ink.alpha);
    Span::styled(glyph.to_string(), Style::new().fg(to_color(color)))
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

impl Surface for BrailleCanvas {
    fn size(&self) -> Size {
        surface_size(self.columns, self.rows)
    }

    fn circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        let c = center / DOT;
        let r = radius / DOT;
        if r < 0.5 {
            self.plot(c.x.floor() as i32, c.y.floor() as i32, paint);
            return;
        }

        let r_sq = r * r;
        for y in (c.y - r).floor() as i32..=(c.y + r).ceil() as i32 {
            for x in (c.x - r).floor() as i32..=(c.x + r).ceil() as i32 {
                let dot = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if dot.distance_squared(c) <= r_sq {
                    self.plot(x, y, paint);
                }
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, _width: f32, paint: Paint) {
        let a = from / DOT;
        let b = to / DOT;
        let delta = (b - a).abs();
        let steps = delta.x.max(delta.y).ceil().max(1.0);

        for i in 0..=steps as i32 {
            let p = a.lerp(b, i as f32 / steps);
            self.plot(p.x.floor() as i32, p.y.floor() as i32, paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Paint = Paint::new(Rgb::WHITE, 1.0);

    fn glyphs(canvas: &BrailleCanvas) -> Vec<String> {
        canvas
            .lines(Rgb::BLACK)
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_size_in_virtual_pixels() {
        let canvas = BrailleCanvas::new(80, 24);
        assert_eq!(canvas.size(), Size::new(640.0, 384.0));
        assert_eq!(cell_center(0, 0), Vec2::new(4.0, 8.0));
    }

    #[test]
    fn test_small_circle_sets_one_dot() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.circle(Vec2::new(1.0, 1.0), 1.0, INK);
        assert_eq!(glyphs(&canvas), vec!["\u{2801} ".to_string()]);
    }

    #[test]
    fn test_line_fills_cells() {
        let mut canvas = BrailleCanvas::new(3, 1);
        canvas.line(Vec2::new(0.0, 1.0), Vec2::new(23.0, 1.0), 1.0, INK);
        // top row of dots across all three cells
        assert_eq!(glyphs(&canvas), vec!["\u{2809}\u{2809}\u{2809}".to_string()]);
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.circle(Vec2::new(-50.0, 500.0), 3.0, INK);
        canvas.line(Vec2::new(-100.0, -100.0), Vec2::new(-10.0, -10.0), 1.0, INK);
        assert!(glyphs(&canvas).iter().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_alpha_blends_over_background() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.circle(Vec2::new(1.0, 1.0), 1.0, Paint::new(Rgb::WHITE, 0.5));
        let lines = canvas.lines(Rgb::BLACK);
        let fg = lines[0].spans[0].style.fg;
        assert_eq!(fg, Some(Color::Rgb(128, 128, 128)));
    }

    #[test]
    fn test_reset_clears() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.circle(Vec2::new(1.0, 1.0), 1.0, INK);
        canvas.reset(2, 1);
        assert_eq!(glyphs(&canvas), vec!["  ".to_string()]);
    }
}
