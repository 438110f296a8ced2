//! KatPhone CLI - Binary entry point and terminal session management.
//!
//! The CLI bridges [`katphone_engine`] (phone state) and [`katphone_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed
//! cleanup.
//!
//! # Event Loop
//!
//! A fixed 16ms (~60 FPS) render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`katphone_tui::InputPump`])
//! 3. Advance timers and animations by the real elapsed time
//! 4. Render frame

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use katphone_config::{KatConfig, config_path};
use katphone_engine::{App, AppDeps, AppSettings, SystemClock, SystemOpener, ThreadRandom};
use katphone_store::JsonFileStore;
use katphone_tui::{InputPump, PhoneLayout, draw, handle_events};

const STORE_FILE_NAME: &str = "store.json";
const LOCAL_DATA_DIR: &str = ".katphone";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than writing over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.katphone/logs/katphone.log
    if let Some(config_path) = config_path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("katphone.log"));
    }

    // Fallback: ./.katphone/logs/katphone.log
    candidates.push(PathBuf::from(LOCAL_DATA_DIR).join("logs").join("katphone.log"));

    candidates
}

fn load_config() -> Option<KatConfig> {
    match KatConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Ignoring config: {err}");
            None
        }
    }
}

fn store_path(config: Option<&KatConfig>) -> PathBuf {
    let dir = match config {
        Some(config) => config.data_dir(),
        None => katphone_config::default_data_dir(),
    };
    dir.unwrap_or_else(|| PathBuf::from(LOCAL_DATA_DIR))
        .join(STORE_FILE_NAME)
}

/// Owns the terminal for the lifetime of the UI; `Drop` restores it even on
/// early return or panic unwinding.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            let _ = execute!(out, DisableMouseCapture, LeaveAlternateScreen);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = Write::flush(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    let settings = AppSettings {
        display: config
            .as_ref()
            .map(KatConfig::display_size)
            .unwrap_or_default(),
        ui: config
            .as_ref()
            .map(KatConfig::ui_options)
            .unwrap_or_default(),
    };
    let store = JsonFileStore::new(store_path(config.as_ref()));
    tracing::info!(path = %store.path().display(), "Using store");

    let mut app = App::new(
        AppDeps {
            store: Box::new(store),
            clock: Box::new(SystemClock),
            opener: Box::new(SystemOpener),
            spawner: Box::new(ThreadRandom),
        },
        settings,
    );

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    tracing::info!("Phone shut down");
    Ok(())
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let area = terminal.size()?;
    let mut layout = PhoneLayout::compute(
        Rect::new(0, 0, area.width, area.height),
        app.display(),
        katphone_engine::HOME_COLUMNS,
    );
    let mut last_frame = Instant::now();

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input, &layout) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        let now = Instant::now();
        app.frame_tick(now.duration_since(last_frame));
        last_frame = now;

        if let Err(e) = terminal.draw(|frame| layout = draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
