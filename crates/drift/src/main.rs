//! drift: an ambient particle field with scroll reveals, in the terminal.

mod app;
mod canvas;
mod logging;
mod page;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use drift_config::{ParticlesConfig, Settings};

use crate::app::App;

#[derive(Debug, Parser)]
#[command(name = "drift", version, about)]
struct Cli {
    /// Settings file [default: config.toml in the platform config directory]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// particles.js JSON document to use instead of the built-in field
    #[arg(short, long, value_name = "PATH")]
    particles: Option<PathBuf>,

    /// Seed the particle field for a reproducible layout
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Print the default settings and particles document, then exit
    #[arg(long)]
    print_defaults: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.print_defaults {
        println!("{}", Settings::default().to_toml()?);
        println!("{}", ParticlesConfig::default().to_json_pretty()?);
        return Ok(());
    }

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .wrap_err("failed to load settings")?;
    if cli.particles.is_some() {
        settings.particles = cli.particles;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    if let Some(path) = Settings::log_path() {
        logging::init(&path, &settings.log_level)?;
    }

    let particles = settings
        .particles_config()
        .wrap_err("failed to load particles document")?;
    // build before touching the terminal so config errors print normally
    let app = App::new(&settings, particles, crossterm::terminal::size()?)?;

    let terminal = ratatui::init();
    if let Err(err) = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange) {
        ratatui::restore();
        return Err(err).wrap_err("failed to enable mouse capture");
    }
    let result = app.run(terminal);
    let restored = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();

    result?;
    restored?;
    Ok(())
}
