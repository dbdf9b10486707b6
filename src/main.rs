mod app;
mod config;
mod error;
mod logging;

use std::{
    io::{self, stdout},
    path::PathBuf,
};

use anyhow::Context;
use app::GradeBook;
use clap::Parser;
use config::Config;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};

/// Credit weighted CGPA calculator for the terminal.
#[derive(Parser, Debug)]
#[command(name = "gradebook", version, about)]
struct Cli {
    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of empty subject rows to start with
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    let level = if cli.debug {
        "debug"
    } else {
        config.log_level.as_str()
    };
    // the form still works without a log file
    if let Ok(path) = logging::init(level) {
        tracing::info!(log = %path.display(), ?config, "starting");
    }

    let mut app = GradeBook::new(cli.rows.unwrap_or(config.initial_rows));

    run(&mut app).context("terminal error")
}

fn run(app: &mut GradeBook) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnableMouseCapture)?;

    let mut terminal = ratatui::init();

    // Run the app
    let app_result = app.run(&mut terminal);

    // Restore terminal settings
    execute!(stdout, DisableMouseCapture)?;
    disable_raw_mode()?;
    ratatui::restore();

    app_result
}
