//! The demo landing page drawn over the particle field.

use drift_core::Rgb;
use drift_reveal::{
    ElementId, MarkedElement, RevealSource, RevealStyle, ScrollReveal, Viewport, attrs,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
};

use crate::canvas::{CELL_HEIGHT, CELL_WIDTH, to_color};

/// Page background.
pub const BACKGROUND: Rgb = Rgb::new(0x1a, 0x20, 0x2c);
const HEADING: Rgb = Rgb::new(0x63, 0xb3, 0xed);
const TEXT: Rgb = Rgb::new(0xe2, 0xe8, 0xf0);

/// Columns kept clear on either side of the text.
const MARGIN: u16 = 4;
/// Blank rows between sections.
const GAP: u16 = 4;

struct SectionCopy {
    animation: &'static str,
    delay_ms: Option<u32>,
    title: &'static str,
    body: &'static str,
}

const SECTIONS: &[SectionCopy] = &[
    SectionCopy {
        animation: "fade-up",
        delay_ms: None,
        title: "OtterVoice",
        body: "Crystal-clear voice calls, straight from one device to another. \
               No accounts, no servers in the middle, nothing to configure.",
    },
    SectionCopy {
        animation: "fade-right",
        delay_ms: None,
        title: "Peer to peer",
        body: "OtterVoice punches through NAT so your audio travels directly \
               between peers. Your conversations never pass through a relay \
               you don't control.",
    },
    SectionCopy {
        animation: "fade-left",
        delay_ms: Some(100),
        title: "Low latency",
        body: "Small audio frames and a lean transport keep the delay short \
               enough that talking feels like sitting in the same room.",
    },
    SectionCopy {
        animation: "fade-right",
        delay_ms: Some(200),
        title: "Simple by default",
        body: "Start the app, share your address, press call. Mute, volume and \
               device selection are one keystroke away.",
    },
    SectionCopy {
        animation: "zoom-in",
        delay_ms: None,
        title: "How it works",
        body: "Both peers learn their public address from a lightweight \
               discovery step, exchange it, and open a direct UDP path. If the \
               network allows it, audio starts flowing within a second.",
    },
    SectionCopy {
        animation: "fade-up",
        delay_ms: None,
        title: "Get OtterVoice",
        body: "Available for Windows, macOS and Linux. Free and open source.",
    },
];

#[derive(Debug, Clone)]
struct Section {
    id: ElementId,
    animation: &'static str,
    delay_ms: Option<u32>,
    title: &'static str,
    lines: Vec<String>,
    /// Document row of the title.
    top: u16,
}

impl Section {
    fn height(&self) -> u16 {
        2 + self.lines.len() as u16
    }
}

/// Landing page laid out for a terminal width, scrolled by whole rows.
#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<Section>,
    width: u16,
    /// Total document height in rows.
    height: u16,
    scroll: u16,
}

impl Page {
    pub fn new(width: u16, viewport_rows: u16) -> Self {
        let mut page = Self {
            sections: Vec::new(),
            width: 0,
            height: 0,
            scroll: 0,
        };
        page.layout(width, viewport_rows);
        page
    }

    /// Re-wrap every section for `width` columns.
    ///
    /// The hero section sits a third of the way down and owns the first screen.
    pub fn layout(&mut self, width: u16, viewport_rows: u16) {
        self.width = width;
        let text_width = width.saturating_sub(MARGIN * 2).max(1) as usize;

        let mut top = viewport_rows / 3;
        self.sections = SECTIONS
            .iter()
            .enumerate()
            .map(|(i, copy)| {
                let section = Section {
                    id: ElementId(i as u32 + 1),
                    animation: copy.animation,
                    delay_ms: copy.delay_ms,
                    title: copy.title,
                    lines: wrap(copy.body, text_width),
                    top,
                };
                top += section.height() + GAP;
                if i == 0 {
                    top = top.max(viewport_rows);
                }
                section
            })
            .collect();
        self.height = top;
        self.scroll_to(self.scroll, viewport_rows);
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self, viewport_rows: u16) -> u16 {
        self.height.saturating_sub(viewport_rows)
    }

    /// Scroll to `row`, clamped to the document. Returns whether it moved.
    pub fn scroll_to(&mut self, row: u16, viewport_rows: u16) -> bool {
        let row = row.min(self.max_scroll(viewport_rows));
        let moved = row != self.scroll;
        self.scroll = row;
        moved
    }

    pub fn scroll_by(&mut self, delta: i32, viewport_rows: u16) -> bool {
        let row = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        self.scroll_to(row, viewport_rows)
    }

    pub fn scroll_to_end(&mut self, viewport_rows: u16) -> bool {
        self.scroll_to(u16::MAX, viewport_rows)
    }

    /// The visible slice of the document, in virtual pixels.
    pub fn viewport(&self, viewport_rows: u16) -> Viewport {
        Viewport::new(
            self.scroll as f32 * CELL_HEIGHT,
            viewport_rows as f32 * CELL_HEIGHT,
        )
    }

    /// Paint every section at its current reveal style.
    pub fn render(&self, reveal: &ScrollReveal, area: Rect, buf: &mut Buffer) {
        for section in &self.sections {
            let style = reveal.style(section.id).unwrap_or(RevealStyle::SHOWN);
            if style.opacity <= 0.01 {
                continue;
            }

            let shift_rows = (style.translate.y / CELL_HEIGHT).round() as i32;
            let shift_cols = (style.translate.x / CELL_WIDTH).round() as i32;
            // zooms shrink the text column around its center
            let inset = ((1.0 - style.scale) * self.width as f32 / 2.0).round() as i32;
            let left = MARGIN as i32 + shift_cols + inset.max(0);
            let right = MARGIN as i32 + inset.max(0);
            let max_width = (self.width as i32 - left - right).max(1) as usize;

            let heading = Style::new()
                .fg(to_color(HEADING.over(BACKGROUND, style.opacity)))
                .bold();
            let text = Style::new().fg(to_color(TEXT.over(BACKGROUND, style.opacity)));

            let rows = std::iter::once((section.title, heading))
                .chain(std::iter::once(("", text)))
                .chain(section.lines.iter().map(|line| (line.as_str(), text)));
            for (offset, (content, line_style)) in rows.enumerate() {
                let row = section.top as i32 + offset as i32 + shift_rows - self.scroll as i32;
                if row < 0 || row >= area.height as i32 || left < 0 || left >= area.width as i32 {
                    continue;
                }
                buf.set_stringn(
                    area.x + left as u16,
                    area.y + row as u16,
                    content,
                    max_width,
                    line_style,
                );
            }
        }
    }
}

impl RevealSource for Page {
    fn marked_elements(&self) -> Vec<MarkedElement> {
        self.sections
            .iter()
            .map(|section| {
                let element = MarkedElement::new(
                    section.id,
                    section.top as f32 * CELL_HEIGHT,
                    section.height() as f32 * CELL_HEIGHT,
                )
                .with_attr(attrs::ANIMATION, section.animation);
                match section.delay_ms {
                    Some(delay) => element.with_attr(attrs::DELAY, delay.to_string()),
                    None => element,
                }
            })
            .collect()
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
