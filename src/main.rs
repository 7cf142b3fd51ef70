// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Pomodoro Timer TUI.
//!
//! A terminal countdown timer for the pomodoro technique: work intervals
//! separated by short breaks, with a long break after every fourth work
//! interval.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns all state, manages the terminal lifecycle and
//!   renders the UI.
//! * An **Input Thread** forwards keyboard, mouse and resize events.
//! * A **Tick Thread** wakes the main loop so that due countdown callbacks
//!   fire and the screen refreshes.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern so the
//! terminal state is restored even when the event loop fails. The helper
//! threads only send [`AppEvent`]s over a `std::sync::mpsc` channel.

mod actions;
mod commander;
mod config;
mod logging;
mod render;
mod theme;
mod timer;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    actions::events::{AppEvent, process_events},
    commander::Commander,
    config::AppConfig,
    render::{ButtonAreas, TOMATO},
    theme::Theme,
    timer::Pomodoro,
};

/// How often the main loop is woken to fire due callbacks.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Application state.
pub(crate) struct App {
    pub config: AppConfig,
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub pomodoro: Pomodoro,
    pub commander: Commander,

    pub tomato_art: String,
    pub buttons: ButtonAreas,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// `tomato_art` replaces the built-in timer face when given.
    pub fn new(config: AppConfig, tomato_art: Option<String>) -> Result<Self> {
        let durations = config.durations()?;
        let (event_tx, event_rx) = mpsc::channel();

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            pomodoro: Pomodoro::new(durations),
            commander: Commander::new(),
            tomato_art: tomato_art.unwrap_or_else(|| TOMATO.to_string()),
            buttons: ButtonAreas::default(),
        })
    }
}

/// The entry point of the application.
///
/// Loads the configuration, initializes the application state, manages the
/// terminal lifecycle, and returns an error if any part of the execution
/// fails.
fn main() -> Result<()> {
    match logging::init_logging() {
        Ok(path) => tracing::info!(log = %path.display(), "logging initialised"),
        Err(e) => eprintln!("Logging disabled: {e:#}"),
    }

    let config = config::load_config();
    tracing::info!(?config, "starting");

    let tomato_art = config.load_tomato_art().context("Failed to load timer face")?;

    let mut app = App::new(config, tomato_art).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!(error = %format!("{e:#}"), "exiting with error");
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background colour based on the theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches to the alternate screen buffer and captures the mouse.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();

    // Without this the emulator shows a thin border in its own background
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&mut stdout, &hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg(terminal.backend_mut()).ok();
    terminal.show_cursor().ok();
}

/// Starts the helper threads and enters the main event loop.
///
/// * An input thread translates terminal events to application events.
/// * A tick thread sends a periodic [`AppEvent::Tick`], which fires due
///   countdown callbacks and is effectively the minimum frame rate.
///
/// # Errors
///
/// Returns an error if the event loop encounters an unrecoverable error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    let message = format!("Failed to read terminal input: {e}");
                    tx_input.send(AppEvent::Error(message)).ok();
                    break;
                }
            };
            if tx_input.send(event).is_err() {
                break;
            }
        }
    });

    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_RATE);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
