//! radiotui - Internet radio browser for the terminal
//!
//! Browse the Radio Browser directory, keep a list of favorite stations and
//! play streams through mpv or VLC.
//!
//! # Usage
//!
//! ```bash
//! radiotui
//! radiotui --player vlc --page-size 20
//! RUST_LOG=radiotui=trace radiotui --log-file /tmp/radiotui.log
//! ```

use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use radiotui::api::RadioBrowserClient;
use radiotui::cli::Cli;
use radiotui::config::Config;
use radiotui::favorites::{FavoritesStorage, JsonFileStorage, MemoryStorage};
use radiotui::search::{SearchCompletion, SearchScheduler};
use radiotui::stream::{PlaybackController, ProcessOutput};
use radiotui::{ui, App, RadioStore};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.clone())?;
    info!(version = env!("CARGO_PKG_VERSION"), "radiotui starting");

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let client = RadioBrowserClient::with_base_url(config.api_url(cli.api_url.as_deref()))
        .with_page_size(config.page_size(cli.page_size));
    let (scheduler, completions) = SearchScheduler::new(client, config.debounce(cli.debounce_ms));

    let storage: Box<dyn FavoritesStorage> = if cli.no_persist {
        Box::new(MemoryStorage::new())
    } else {
        let path = config
            .favorites_path(cli.favorites.as_deref())
            .context("Could not determine favorites path")?;
        info!(path = %path.display(), "favorites file");
        Box::new(JsonFileStorage::new(path))
    };

    let player = config.player(cli.player_type());
    let output = ProcessOutput::new(player);
    let (playback, missing_player) = if output.is_available().await {
        (PlaybackController::new(Box::new(output)), false)
    } else {
        warn!(%player, "player not installed, playback disabled");
        (PlaybackController::unmounted(), true)
    };

    let mut store = RadioStore::new(storage, playback, Box::new(scheduler));
    store.refresh();

    let mut app = App::new(store);
    if missing_player {
        app.playback_warning = Some(format!("{} not found: playback disabled", player));
    }

    run_tui(&mut app, completions).await
}

/// Send logs to a file; the terminal belongs to the TUI
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => dirs::data_dir()
            .map(|p| p.join("radiotui"))
            .unwrap_or_else(std::env::temp_dir)
            .join("radiotui.log"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,radiotui=debug"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Ok(())
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_tui(
    app: &mut App,
    completions: mpsc::UnboundedReceiver<SearchCompletion>,
) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, app, completions).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;
    info!("radiotui exiting");

    result
}

/// Main event loop - handles input, folds in search results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    mut completions: mpsc::UnboundedReceiver<SearchCompletion>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(completion) = completions.try_recv() {
            app.on_search_completion(completion);
        }
    }

    Ok(())
}
