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

//! Application event distribution.
//!
//! All state lives on the main thread. Helper threads only produce
//! [`AppEvent`]s into a channel and the loop in [`process_events`] applies
//! them one at a time:
//!
//! 1. **Capture**: events arrive through the application channel.
//! 2. **Process**: [`handle_event`] updates the [`App`] state, starting,
//!    resetting or advancing the pomodoro.
//! 3. **Render**: after each event the screen is re-drawn.

use std::{
    io::{self, Stdout},
    time::Instant,
};

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, layout::Position, prelude::CrosstermBackend};

use crate::{App, render::draw, timer::Phase, util};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,

    Start,
    Reset,
    SetMinutes(Phase, u64),

    Tick,

    ExitApplication,

    Error(String),
}

/// Whether the event loop keeps running after an event.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Runs the main application loop, handling events and rendering the UI.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if handle_event(app, event, Instant::now())? == Flow::Exit {
            break;
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
///
/// # Errors
///
/// Returns an error if a follow-up event cannot be sent because the channel
/// has closed.
pub(crate) fn handle_event(app: &mut App, event: AppEvent, now: Instant) -> Result<Flow> {
    match event {
        AppEvent::ExitApplication => return Ok(Flow::Exit),

        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Mouse(mouse) => process_mouse_event(app, mouse)?,
        AppEvent::Resize => {}

        AppEvent::Start => {
            app.pomodoro.start(now);
        }
        AppEvent::Reset => {
            tracing::debug!(
                reps = app.pomodoro.reps(),
                phase = ?app.pomodoro.phase(),
                remaining = app.pomodoro.remaining_secs(),
                running = app.pomodoro.is_running(),
                "reset requested"
            );
            app.pomodoro.reset();
        }

        AppEvent::SetMinutes(phase, minutes) => {
            let message = match app.pomodoro.durations_mut().set_minutes(phase, minutes) {
                Ok(()) => format!("{} set to {} min", phase, minutes),
                Err(e) => e.to_string(),
            };
            app.commander.message = Some(message);
        }

        AppEvent::Tick => {
            if app.pomodoro.next_deadline().is_none_or(|deadline| deadline > now) {
                return Ok(Flow::Continue);
            }

            let started = app.pomodoro.fire_due(now);
            if !started.is_empty() && app.config.bell {
                if let Err(e) = util::term::ring_bell(&mut io::stdout()) {
                    tracing::warn!(error = %e, "failed to ring bell");
                }
            }
        }

        AppEvent::Error(message) => {
            tracing::error!(%message, "application error");
            app.commander.message = Some(message);
        }
    }

    Ok(Flow::Continue)
}

/// Routes keyboard input to the command line first, then to the global
/// shortcuts.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.commander.handle_event(&Event::Key(key), &app.event_tx)? {
        return Ok(());
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
            app.event_tx.send(AppEvent::ExitApplication)?
        }

        (KeyCode::Char('s'), _) | (KeyCode::Enter, _) => app.event_tx.send(AppEvent::Start)?,
        (KeyCode::Char('r'), _) => app.event_tx.send(AppEvent::Reset)?,

        _ => {}
    }

    Ok(())
}

/// Left clicks on the on-screen buttons behave like their shortcuts.
fn process_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(());
    }

    let position = Position::new(mouse.column, mouse.row);
    if app.buttons.start.contains(position) {
        app.event_tx.send(AppEvent::Start)?;
    } else if app.buttons.reset.contains(position) {
        app.event_tx.send(AppEvent::Reset)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use ratatui::layout::Rect;

    use crate::{config::AppConfig, render::ButtonAreas};

    fn test_app() -> App {
        let config = AppConfig {
            bell: false,
            ..AppConfig::default()
        };
        App::new(config, None).unwrap()
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    // Applies an event and everything it queues, like the real loop does.
    fn apply(app: &mut App, event: AppEvent, now: Instant) -> Flow {
        let mut flow = handle_event(app, event, now).unwrap();
        while let Ok(next) = app.event_rx.try_recv() {
            if flow == Flow::Exit {
                break;
            }
            flow = handle_event(app, next, now).unwrap();
        }
        flow
    }

    #[test]
    fn shortcuts_start_and_reset() {
        let mut app = test_app();
        let t0 = Instant::now();

        apply(&mut app, key(KeyCode::Char('s')), t0);
        assert_eq!(app.pomodoro.reps(), 1);
        assert_eq!(app.pomodoro.face().time, "25:00");

        apply(&mut app, AppEvent::Tick, t0 + Duration::from_secs(1));
        assert_eq!(app.pomodoro.face().time, "24:59");

        apply(&mut app, key(KeyCode::Char('r')), t0);
        assert_eq!(app.pomodoro.reps(), 0);
        assert_eq!(app.pomodoro.face().title, "Timer");
    }

    #[test]
    fn quit_exits_the_loop() {
        let mut app = test_app();
        assert_eq!(apply(&mut app, key(KeyCode::Char('q')), Instant::now()), Flow::Exit);

        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(apply(&mut app, ctrl_c, Instant::now()), Flow::Exit);
    }

    #[test]
    fn clicking_buttons() {
        let mut app = test_app();
        app.buttons = ButtonAreas {
            start: Rect::new(2, 10, 9, 3),
            reset: Rect::new(40, 10, 9, 3),
        };
        let t0 = Instant::now();

        apply(&mut app, click(0, 0), t0);
        assert_eq!(app.pomodoro.reps(), 0);

        apply(&mut app, click(5, 11), t0);
        assert_eq!(app.pomodoro.reps(), 1);

        apply(&mut app, click(48, 12), t0);
        assert_eq!(app.pomodoro.reps(), 0);
    }

    #[test]
    fn mouse_release_is_ignored() {
        let mut app = test_app();
        app.buttons.start = Rect::new(0, 0, 10, 3);
        let release = AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });

        apply(&mut app, release, Instant::now());
        assert_eq!(app.pomodoro.reps(), 0);
    }

    #[test]
    fn command_line_swallows_shortcuts() {
        let mut app = test_app();
        let t0 = Instant::now();

        apply(&mut app, key(KeyCode::Char(':')), t0);
        for c in "short 10".chars() {
            apply(&mut app, key(KeyCode::Char(c)), t0);
        }
        // The 's' typed above must not have started the timer.
        assert_eq!(app.pomodoro.reps(), 0);

        apply(&mut app, key(KeyCode::Enter), t0);
        assert_eq!(app.pomodoro.durations().short_break, Duration::from_secs(600));
        assert_eq!(app.commander.message.as_deref(), Some("short break set to 10 min"));
    }

    #[test]
    fn zero_minutes_are_reported() {
        let mut app = test_app();
        apply(&mut app, AppEvent::SetMinutes(Phase::Work, 0), Instant::now());

        assert_eq!(app.pomodoro.durations().work, Duration::from_secs(25 * 60));
        assert_eq!(
            app.commander.message.as_deref(),
            Some("work duration must be at least one minute")
        );
    }

    #[test]
    fn oversized_minutes_are_reported() {
        let mut app = test_app();
        let t0 = Instant::now();
        let event = crate::commander::parse_command("work 18446744073709551615").unwrap();

        assert_eq!(apply(&mut app, event, t0), Flow::Continue);
        assert_eq!(app.pomodoro.durations().work, Duration::from_secs(25 * 60));
        assert_eq!(
            app.commander.message.as_deref(),
            Some("work duration must be at most 1440 minutes")
        );

        apply(&mut app, AppEvent::SetMinutes(Phase::Work, 1440), t0);
        assert_eq!(app.pomodoro.durations().work, Duration::from_secs(1440 * 60));
        apply(&mut app, AppEvent::SetMinutes(Phase::Work, 1441), t0);
        assert_eq!(app.pomodoro.durations().work, Duration::from_secs(1440 * 60));
    }
}
