#![forbid(unsafe_code)]

//! seekbox demo
//!
//! Two fruit pickers side by side: one single-select, one multi-select.
//!
//! # Running
//!
//! ```sh
//! cargo run -p seekbox-demo
//! ```
//!
//! # Controls
//!
//! - Tab / Shift+Tab: move focus between pickers
//! - Type to filter, Up/Down to move, Enter to choose, Esc to close
//! - Click an option to choose it, click × on a chip to remove it
//! - Ctrl+C / Ctrl+Q: quit
//!
//! # Logging
//!
//! The terminal is taken over by the UI, so logs go to a file:
//!
//! - `SEEKBOX_LOG_FILE`: path to append logs to (logging is off when unset)
//! - `SEEKBOX_LOG`: filter directives, e.g. `seekbox_widgets=trace`
//!
//! Widget tunables come from `SEEKBOX_DEBOUNCE_MS`, `SEEKBOX_MAX_VISIBLE`,
//! and `SEEKBOX_POPOVER_GAP`.

mod app;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use seekbox::{
    AutocompleteConfig, Error, Event, Frame, Presenter, Result, SessionOptions, TerminalSession,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use web_time::Instant;

/// Longest wait for input before timers are serviced.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

const DEFAULT_FILTER: &str = "seekbox_widgets=debug,seekbox_demo=info";

fn main() {
    if let Err(err) = run() {
        eprintln!("seekbox-demo: {err}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("SEEKBOX_LOG_FILE") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| Error::Logging(format!("{path}: {err}")))?;

    let filter =
        EnvFilter::try_from_env("SEEKBOX_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))
}

fn run() -> Result<()> {
    init_logging()?;
    let config = AutocompleteConfig::from_env();

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: true,
        bracketed_paste: true,
        focus_events: true,
    })?;
    let (width, height) = session.size()?;
    tracing::info!(width, height, debounce_ms = config.debounce.as_millis() as u64, "demo started");

    let mut frame = Frame::with_hit_grid(width, height);
    let mut presenter = Presenter::new(io::stdout());
    let mut app = app::App::new(config);
    let mut dirty = true;

    while !app.should_quit() {
        if dirty {
            frame.clear();
            app.view(&mut frame);
            presenter.present_frame(&frame)?;
            dirty = false;
        }

        if session.poll_event(POLL_INTERVAL)?
            && let Some(event) = session.read_event()?
        {
            if let Event::Resize { width, height } = event {
                frame = Frame::with_hit_grid(width, height);
            }
            app.handle_event(&event, &frame, Instant::now());
            dirty = true;
        }

        if app.tick(Instant::now()) {
            dirty = true;
        }
    }

    tracing::info!("demo finished");
    presenter.flush()?;
    drop(session);
    Ok(())
}
