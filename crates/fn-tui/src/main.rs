mod app;
mod client;
mod render;
mod theme;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use app::App;
use clap::Parser;
use client::ApiClient;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use theme::Theme;
use tracing_subscriber::EnvFilter;

/// Terminal client for the Fn puzzle services.
#[derive(Debug, Parser)]
#[command(name = "fnc", version, about)]
struct Args {
    /// Base URL of the service API
    #[arg(long, default_value = "http://localhost:8000")]
    api: String,

    /// Color theme: dark, light, or high-contrast
    #[arg(long, default_value = "dark")]
    theme: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

/// Logs go to a file; the terminal is in raw mode and cannot take stderr.
fn init_logging() -> anyhow::Result<()> {
    let dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join("fnc.log");
    let file =
        File::create(&path).with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(stdout: &mut io::Stdout, args: &Args) -> anyhow::Result<()> {
    let theme = match args.theme.as_str() {
        "light" => Theme::light(),
        "high-contrast" => Theme::high_contrast(),
        _ => Theme::dark(),
    };

    let (tx, rx) = mpsc::channel();
    let client = ApiClient::new(&args.api, tx);
    let mut app = App::new(client, theme);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Apply completions that arrived while we were drawing. Arrival
        // order decides nothing by itself; the app arbitrates overlapping
        // requests by sequence number.
        while let Ok(api_event) = rx.try_recv() {
            app.handle_api_event(api_event);
        }

        // Handle input with a timeout so completions keep draining
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick the message timer
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
