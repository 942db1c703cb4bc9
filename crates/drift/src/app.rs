use std::time::{Duration, Instant};

use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use drift_config::{ParticlesConfig, Settings};
use drift_particles::{ParticleField, TickStatus};
use drift_reveal::{RevealEvent, ScrollReveal};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::canvas::{self, BrailleCanvas};
use crate::page::{self, Page};

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// The main application: particle background, landing page and the frame loop.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    field: ParticleField,
    reveal: ScrollReveal,
    page: Page,
    canvas: BrailleCanvas,
    /// How long to wait for input before drawing the next frame.
    tick_rate: Duration,
    last_frame: Instant,
    /// Terminal height in rows.
    rows: u16,
}

impl App {
    /// Build the field and page for a `columns` x `rows` terminal.
    pub fn new(
        settings: &Settings,
        particles: ParticlesConfig,
        (columns, rows): (u16, u16),
    ) -> color_eyre::Result<Self> {
        // keep the surface valid even for a terminal reported as 0x0
        let size = canvas::surface_size(columns.max(1), rows.max(1));
        let field = match settings.seed {
            Some(seed) => ParticleField::with_seed(particles, size, 1.0, seed),
            None => ParticleField::new(particles, size, 1.0),
        }
        .wrap_err("invalid particle configuration")?;

        let page = Page::new(columns, rows);
        let reveal = ScrollReveal::init(&page, settings.reveal.clone(), page.viewport(rows))
            .wrap_err("invalid reveal configuration")?;

        Ok(Self {
            running: false,
            field,
            reveal,
            page,
            canvas: BrailleCanvas::new(columns, rows),
            tick_rate: settings.tick_rate(),
            last_frame: Instant::now(),
            rows,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.last_frame = Instant::now();
        while self.running {
            let now = Instant::now();
            let dt = now - self.last_frame;
            self.last_frame = now;

            if self.field.tick(dt) == TickStatus::Skipped {
                tracing::trace!("particle tick skipped");
            }
            self.reveal.advance(dt);

            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        tracing::info!("shutting down");
        Ok(())
    }

    /// Renders the particle canvas, the page and the help line.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let background = Style::new().bg(canvas::to_color(page::BACKGROUND));

        self.canvas.reset(area.width, area.height);
        if let Err(err) = self.field.draw(&mut self.canvas) {
            tracing::trace!(%err, "particle field not drawn");
        }
        frame.render_widget(
            Paragraph::new(self.canvas.lines(page::BACKGROUND)).style(background),
            area,
        );

        let [content, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        self.page.render(&self.reveal, content, frame.buffer_mut());

        let help = Line::from(vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "j/k".bold(),
            " scroll  ".dark_gray(),
            "click".bold(),
            " interact".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the tick rate as timeout so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(columns, rows) => self.on_resize(columns, rows)?,
                Event::FocusLost => self.field.pointer_left(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let page_rows = self.rows.saturating_sub(2).max(1) as i32;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll_by(1),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll_by(-1),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_by(page_rows),
            (_, KeyCode::PageUp) => self.scroll_by(-page_rows),
            (_, KeyCode::Home | KeyCode::Char('g')) => {
                self.page.scroll_to(0, self.rows);
                self.refresh_reveals();
            }
            (_, KeyCode::End | KeyCode::Char('G')) => {
                self.page.scroll_to_end(self.rows);
                self.refresh_reveals();
            }
            _ => {}
        }
    }

    /// Routes pointer input to the particle field and wheel input to the page.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let position = canvas::cell_center(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.field.pointer_moved(position),
            MouseEventKind::Down(MouseButton::Left) => {
                self.field.pointer_moved(position);
                self.field.clicked(position);
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            _ => {}
        }
    }

    fn on_resize(&mut self, columns: u16, rows: u16) -> color_eyre::Result<()> {
        tracing::debug!(columns, rows, "terminal resized");
        self.rows = rows;
        self.field.resized(canvas::surface_size(columns, rows), 1.0);

        self.page.layout(columns, rows);
        self.reveal
            .relayout(&self.page)
            .wrap_err("page layout produced invalid reveal attributes")?;
        self.refresh_reveals();
        Ok(())
    }

    fn scroll_by(&mut self, rows: i32) {
        if self.page.scroll_by(rows, self.rows) {
            self.refresh_reveals();
        }
    }

    /// Re-run the visibility test for the current scroll position.
    fn refresh_reveals(&mut self) {
        for event in self.reveal.refresh(self.page.viewport(self.rows)) {
            match event {
                RevealEvent::Revealed(id) => tracing::debug!(id = id.0, "section revealed"),
                RevealEvent::Hidden(id) => tracing::debug!(id = id.0, "section hidden"),
            }
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
