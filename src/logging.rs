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

//! File logging.
//!
//! The terminal belongs to the UI, so diagnostics go to `tomatui.log` next to
//! the configuration file. The filter comes from `RUST_LOG` and defaults to
//! `tomatui=info`.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_NAME;

const LOG_FILE: &str = "tomatui.log";
const DEFAULT_FILTER: &str = "tomatui=info";

/// Where the log file is written.
pub(crate) fn log_file_path() -> PathBuf {
    let dir = confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir);
    dir.join(LOG_FILE)
}

/// Installs the global `tracing` subscriber, returning the log file path.
pub(crate) fn init_logging() -> Result<PathBuf> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(path)
}
