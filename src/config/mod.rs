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

//! Application configuration.
//!
//! This module manages the application configuration file. The file lives in
//! the platform config directory chosen by `confy`, and any field missing
//! from it falls back to the default value.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timer::{Durations, TimerError};

pub(crate) const CONFIG_NAME: &str = "tomatui";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid phase duration: {0}")]
    Duration(#[from] TimerError),

    #[error("failed to read tomato art from {path}")]
    TomatoArt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) work_minutes: u64,
    pub(crate) short_break_minutes: u64,
    pub(crate) long_break_minutes: u64,
    /// Text file drawn as the timer face instead of the built-in tomato.
    pub(crate) tomato_art: Option<PathBuf>,
    /// Ring the terminal bell when a countdown runs out.
    pub(crate) bell: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 20,
            tomato_art: None,
            bell: true,
        }
    }
}

impl AppConfig {
    /// Phase durations described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Duration`] if any duration is zero minutes.
    pub(crate) fn durations(&self) -> Result<Durations, ConfigError> {
        let durations = Durations::from_minutes(
            self.work_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
        )?;
        Ok(durations)
    }

    /// Reads the configured tomato art, if any.
    ///
    /// A configured file that cannot be read is an error rather than a
    /// silent fallback to the built-in art.
    pub(crate) fn load_tomato_art(&self) -> Result<Option<String>, ConfigError> {
        let Some(path) = &self.tomato_art else {
            return Ok(None);
        };

        fs::read_to_string(path)
            .map(Some)
            .map_err(|source| ConfigError::TomatoArt {
                path: path.clone(),
                source,
            })
    }
}

pub(crate) fn load_config() -> AppConfig {
    match confy::load(CONFIG_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load configuration, using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn default_durations_are_classic_pomodoro() {
        let durations = AppConfig::default().durations().unwrap();
        assert_eq!(durations.work, Duration::from_secs(25 * 60));
        assert_eq!(durations.short_break, Duration::from_secs(5 * 60));
        assert_eq!(durations.long_break, Duration::from_secs(20 * 60));
    }

    #[test]
    fn zero_minutes_are_rejected() {
        let config = AppConfig {
            short_break_minutes: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.durations(), Err(ConfigError::Duration(_))));
    }

    #[test]
    fn huge_minutes_are_rejected() {
        let config = AppConfig {
            work_minutes: u64::MAX,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.durations(),
            Err(ConfigError::Duration(TimerError::TooLong(_)))
        ));
    }

    #[test]
    fn no_tomato_art_configured() {
        assert!(AppConfig::default().load_tomato_art().unwrap().is_none());
    }

    #[test]
    fn missing_tomato_art_is_an_error() {
        let config = AppConfig {
            tomato_art: Some(PathBuf::from("/nonexistent/tomatui/tomato.txt")),
            ..AppConfig::default()
        };
        let err = config.load_tomato_art().unwrap_err();
        assert!(matches!(err, ConfigError::TomatoArt { .. }));
        assert!(err.to_string().contains("tomato.txt"));
    }

    #[test]
    fn tomato_art_is_read_from_file() {
        let path = std::env::temp_dir().join(format!("tomatui-art-{}.txt", std::process::id()));
        fs::write(&path, " (o) \n").unwrap();

        let config = AppConfig {
            tomato_art: Some(path.clone()),
            ..AppConfig::default()
        };
        let art = config.load_tomato_art().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(art.as_deref(), Some(" (o) \n"));
    }
}
