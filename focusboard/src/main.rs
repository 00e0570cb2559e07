//! `Focusboard`: terminal task board with a Pomodoro timer.
//!
//! Launches the TUI over a task list persisted in the data directory.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/focusboard/config.toml`).
//!
//! ```bash
//! # Tasks saved under the platform data dir
//! cargo run --bin focusboard
//!
//! # Custom data directory, verbose logs
//! cargo run --bin focusboard -- --data-dir ./board --log-level debug
//!
//! # Throwaway session, nothing saved
//! cargo run --bin focusboard -- --ephemeral
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use focusboard::app::App;
use focusboard::config::{AppConfig, CliArgs, StorageLocation};
use focusboard::storage::{FileStorage, MemoryStorage, Storage};
use focusboard::timer::Tick;
use focusboard::ui;

/// Capacity of the tick channel shared by the clock and the timer.
const TICK_CHANNEL_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("focusboard starting");

    let storage = open_storage(&config.storage);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config, storage);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("focusboard exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("focusboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Build the storage adapter for the configured location.
fn open_storage(location: &StorageLocation) -> Arc<dyn Storage> {
    match location {
        StorageLocation::Directory(dir) => {
            tracing::info!(dir = %dir.display(), "using file storage");
            Arc::new(FileStorage::new(dir.clone()))
        }
        StorageLocation::Ephemeral => {
            tracing::info!("using in-memory storage, nothing will be saved");
            Arc::new(MemoryStorage::new())
        }
    }
}

/// Main application loop.
///
/// Runs on the tokio runtime thread; the tickers' tasks only feed the tick
/// channel, and every state change happens here, one event at a time.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AppConfig,
    storage: Arc<dyn Storage>,
) -> io::Result<()> {
    let (tick_tx, mut tick_rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);
    let mut app = App::new(config, storage, tick_tx);
    app.start_clock();

    loop {
        // Step 1: Draw the UI frame (and remember where the list landed).
        terminal.draw(|frame| {
            app.list_area = ui::Areas::new(frame.area()).task_rows();
            app.sync_scroll();
            ui::draw(frame, &app);
        })?;

        // Step 2: Apply pending ticks (non-blocking).
        drain_ticks(&mut app, &mut tick_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Drain all pending ticks from the receiver and apply them to the app.
fn drain_ticks(app: &mut App, rx: &mut mpsc::Receiver<Tick>) {
    while let Ok(tick) = rx.try_recv() {
        app.handle_tick(tick);
    }
}
