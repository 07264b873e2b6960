//! airops - Airline operations from the terminal
//!
//! Lists and filters flights, looks up reservations and luggage, creates
//! reservations, and checks passengers in against the operations service.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use airops::api::ApiClient;
use airops::app::{App, AppState};
use airops::cli::{Cli, Command, Config};
use airops::{commands, logging, ui};

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
    match app.state {
        AppState::Loading => render_loading(frame),
        AppState::FlightList | AppState::EditingFilter(_) => ui::render_flight_list(frame, app),
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

    let loading_text = Paragraph::new("Loading flights...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Runs the interactive flight browser until the user quits
async fn run_browser(client: ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;
    app.load_flights().await;

    // Main event loop
    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.reload_requested {
            app.state = AppState::Loading;
            terminal.draw(|f| render_ui(f, &app))?;
            app.reload().await;
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        }
    };

    // The browser owns the terminal, so only the plain commands log
    if !matches!(cli.command, Command::Browse) {
        logging::init(config.verbosity);
    }

    let client = config.build_client();

    match cli.command {
        Command::Browse => {
            if let Err(err) = run_browser(client).await {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
        }
        ref command => {
            let mut stdout = io::stdout().lock();
            if let Err(err) = commands::run(command, &client, &mut stdout).await {
                tracing::debug!(error = %err, "command failed");
                eprintln!("error: {}", err.user_message());
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
