//! phonetrack - Phone Number Lookup Utility
//!
//! A terminal application for inspecting international phone numbers. Built
//! with Rust and ratatui.
//!
//! phonetrack lets you:
//! - Look up a number's type, formats, country, time zones and (optionally) location and carrier
//! - Keep named number templates organized by category
//! - Revisit recent searches and export results to CSV
//!
//! Run without arguments for the TUI, or with a subcommand for scripted use.

use crate::app::App;
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::models::StorageManager;
use clap::Parser;
use log::LevelFilter;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::error::Error;
use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

mod app;
mod cli;
mod config;
mod error;
mod handlers;
mod lookup;
mod models;
mod ui;

fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(AppConfig::default_path);
    let config = match &config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let data_dir = cli.data_dir.clone().or_else(|| config.data_dir.clone());
    let storage = StorageManager::new(data_dir)?;

    let log_level_filter = cli
        .log_level
        .as_deref()
        .unwrap_or(config.log_level.as_str())
        .parse()
        .unwrap_or(LevelFilter::Info);

    match cli.command {
        Some(command) => {
            env_logger::Builder::new()
                .filter_level(log_level_filter)
                .init();

            cli::execute_cli(command, &storage, &config)?;
        }
        None => {
            // Logs go to a file so they never draw over the alternate screen
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(storage.log_file())?;
            env_logger::Builder::new()
                .filter_level(log_level_filter)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();

            log::info!("Starting TUI with data directory {}", storage.data_dir().display());
            let app = App::new(config, config_path, storage);
            run_tui(app)?;
        }
    }

    Ok(())
}

/// Sets up the terminal, runs the event loop and always restores the terminal,
/// even when the loop fails.
fn run_tui(mut app: App) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("TUI exited with error: {}", e);
    }
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if handlers::keys::handle_key_events(key, app) {
                    return Ok(());
                }
            }
        }
    }
}
