use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod config;
mod error;
mod forecast;
mod openmeteo;
mod units;
mod weather;

use crate::app::{run_app, App};
use crate::cli::Args;
use crate::config::Config;
use crate::error::Result;
use crate::forecast::ForecastView;
use crate::openmeteo::ForecastClient;

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tiempo")
        .join("tiempo.log")
}

/// `RUST_LOG` wins over the configured level. The TUI owns stdout, so it logs
/// to a file; the plain report logs to stderr.
fn init_logging(config: &Config, args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if args.plain {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    let path = args.log_file.clone().unwrap_or_else(default_log_file);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn print_report(config: &Config, client: &ForecastClient) -> Result<()> {
    let forecast = client.fetch(&config.location).await?;
    let view = ForecastView::build(&forecast, &config.display)?;
    print!("{}", view.report(&config.location));
    Ok(())
}

/// Raw mode for as long as the guard lives, including early returns and panics.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(error = %err, "Failed to disable raw mode");
        }
    }
}

fn enter_screen<W: Write>(mut out: W) -> Result<Terminal<CrosstermBackend<W>>> {
    execute!(out, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

async fn run_tui(config: Config, client: &ForecastClient) -> Result<()> {
    // setup terminal
    let raw_mode = RawMode::enable()?;
    let mut terminal = enter_screen(io::stdout())?;

    // create app and run it
    let mut app = App::new(config);
    let res = run_app(&mut terminal, client, &mut app).await;

    // restore terminal
    drop(raw_mode);
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_args(&args)?;
    init_logging(&config, &args)?;
    tracing::info!(
        location = %config.location.name,
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        "Starting"
    );

    let client = ForecastClient::new(&config.api)?;
    if args.plain {
        print_report(&config, &client).await
    } else {
        run_tui(config, &client).await
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Exiting with error");
            eprintln!("{}", err.user_message());
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
