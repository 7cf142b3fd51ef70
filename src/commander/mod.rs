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

//! The `:` command line.
//!
//! Pressing `:` focuses a single-line input at the bottom of the screen.
//! Enter runs the typed command and Esc leaves command mode. Commands are
//! translated into the same [`AppEvent`]s the keyboard shortcuts and
//! buttons produce.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{actions::events::AppEvent, timer::Phase};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0} <minutes>")]
    MissingMinutes(&'static str),

    #[error("not a number of minutes: {0}")]
    InvalidMinutes(String),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
    /// Outcome of the last command, shown until command mode is re-entered.
    pub(crate) message: Option<String>,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
            message: None,
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers an input event to the command line.
    ///
    /// Returns `true` if the event was consumed and must not be handled as
    /// a global shortcut.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                self.message = None;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    match parse_command(&buffer) {
                        Ok(event) => event_tx.send(event)?,
                        Err(e) => {
                            tracing::debug!(command = %buffer, error = %e, "rejected command");
                            self.message = Some(e.to_string());
                        }
                    }
                }
            }

            // Delegate everything else to the managed input component.
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

/// Translates a command line into the event it requests.
pub(crate) fn parse_command(buffer: &str) -> Result<AppEvent, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    match parts.as_slice() {
        ["q"] | ["quit"] => Ok(AppEvent::ExitApplication),

        ["start"] => Ok(AppEvent::Start),
        ["reset"] => Ok(AppEvent::Reset),

        ["work", rest @ ..] => set_minutes(Phase::Work, "work", rest),
        ["short", rest @ ..] => set_minutes(Phase::ShortBreak, "short", rest),
        ["long", rest @ ..] => set_minutes(Phase::LongBreak, "long", rest),

        _ => Err(CommandError::Unknown(buffer.to_string())),
    }
}

fn set_minutes(phase: Phase, name: &'static str, args: &[&str]) -> Result<AppEvent, CommandError> {
    match args {
        [value] => value
            .parse()
            .map(|minutes| AppEvent::SetMinutes(phase, minutes))
            .map_err(|_| CommandError::InvalidMinutes(value.to_string())),
        _ => Err(CommandError::MissingMinutes(name)),
    }
}
