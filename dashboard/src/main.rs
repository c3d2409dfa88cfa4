//! sales-dashboard - terminal dashboard for monthly sales forecasts.

mod app;
mod config;
mod event;
mod logging;
mod plain;
mod ui;
mod widgets;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use sales_forecast::render_dashboard;
use tracing::{debug, error, info};

use app::App;
use config::AppConfig;
use event::{handle_key_event, poll_event};
use logging::init_logging;
use plain::render_report;
use ui::draw_ui;

#[derive(Parser)]
#[command(name = "sales-dashboard")]
#[command(about = "Monthly sales forecast dashboard", long_about = None)]
struct Cli {
    /// CSV file to load on start
    file: Option<PathBuf>,

    /// Configuration file (defaults to ./dashboard.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the dashboard as text instead of starting the terminal UI
    #[arg(long)]
    plain: bool,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.log_dir {
        config.logging.directory = dir;
    }
    let _guard = init_logging(&config.logging)?;
    info!(version = sales_forecast::VERSION, "sales-dashboard starting");
    let settings = config.pipeline.to_toml_string()?;
    debug!(%settings, "pipeline settings");

    if cli.plain {
        return run_plain(cli.file, &config);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config.pipeline);
    if let Some(path) = cli.file {
        app.upload_file(&path);
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return rather than exit so dropping the log guard flushes the file
    if let Err(err) = &result {
        error!(error = %err, "sales-dashboard failed");
    } else {
        info!("sales-dashboard exiting");
    }
    result
}

fn run_plain(file: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<()> {
    let bytes = match &file {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?,
        ),
        None => None,
    };

    let view = render_dashboard(bytes.as_deref(), &config.pipeline)?;
    print!("{}", render_report(&view));
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        // Draw UI
        terminal.draw(|frame| draw_ui(frame, app))?;

        // Clear expired status messages
        app.clear_expired_status();

        // Handle events
        if let Some(event) = poll_event(tick_rate)? {
            if let Event::Key(key) = event {
                handle_key_event(app, key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
