//! launchwx - Launch weather dashboard for a paragliding site
//!
//! A terminal UI application that displays current conditions at a launch
//! weather station, with derived summaries (wind direction, pressure and
//! comfort bands, lapse rate against a ground station) rendered as cards.

mod app;
mod cache;
mod cli;
mod data;
mod refresh;
mod summary;
mod ui;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use cli::{Cli, StartupConfig};
use refresh::{RefreshConfig, RefreshHandle};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::Dashboard => {
            ui::render_dashboard(frame, app);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading station observations...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr before the terminal enters raw mode; quiet unless RUST_LOG is set
    env_logger::init();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::with_startup_config(config.clone());

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    // Trigger initial data load
    app.load_all_data().await;

    // Background refresh keyed to the launch cache TTL
    let refresh_interval = if config.launch_ttl.is_zero() {
        RefreshConfig::default().interval
    } else {
        config.launch_ttl
    };
    let mut refresh_handle = RefreshHandle::spawn(
        RefreshConfig {
            interval: refresh_interval,
            enabled: config.refresh_enabled,
        },
        app.station_client(),
        config,
    );

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Apply any background refresh results
        while let Some(message) = refresh::try_recv(&mut refresh_handle) {
            app.handle_refresh_message(message);
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Manual refresh requested via 'r'
        if app.refresh_requested {
            app.refresh_requested = false;
            app.load_all_data().await;
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Stop the background task and restore terminal
    refresh_handle.shutdown().await;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
