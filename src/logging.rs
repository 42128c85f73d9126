// This file is part of the tf-azurerm-network project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log file setup
//!
//! The host captures the standard streams of the plugin, so logs are written to a file.

use std::{
    env,
    fs::{File, OpenOptions},
    io,
    path::Path,
    str::FromStr,
    sync::Mutex,
};

use anyhow::{anyhow, Result};
use tracing::Level;

/// File to write the logs into
pub const LOG_FILE_ENV: &str = "TF_AZURERM_NETWORK_LOG_FILE";
/// Log file variable understood by every provider built on the same plugin runtime
pub const PLUGIN_LOG_FILE_ENV: &str = "PLUGIN_LOG_FILE";
/// Maximum level of the logs (`TRACE` when unset)
pub const LOG_LEVEL_ENV: &str = "TF_AZURERM_NETWORK_LOG_LEVEL";
/// `json` to write one JSON object per event
pub const LOG_FORMAT_ENV: &str = "TF_AZURERM_NETWORK_LOG_FORMAT";

/// Logging options read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub path: Option<String>,
    pub level: Level,
    pub json: bool,
}

impl LogOptions {
    /// Read the options with `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(LOG_FILE_ENV).or_else(|| lookup(PLUGIN_LOG_FILE_ENV));
        let level = match lookup(LOG_LEVEL_ENV) {
            Some(level) => Level::from_str(level.trim())
                .map_err(|err| anyhow!("invalid {LOG_LEVEL_ENV} {level:?}: {err}"))?,
            None => Level::TRACE,
        };
        let json = lookup(LOG_FORMAT_ENV)
            .map(|format| format.trim().eq_ignore_ascii_case("json"))
            .unwrap_or_default();
        Ok(Self { path, level, json })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

/// Open the log file for appending, creating it if missing
fn open_log_file(path: impl AsRef<Path>) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber if a log file is configured
///
/// Returns `true` if this call installed the subscriber. Subsequent calls are no-ops.
pub fn init() -> Result<bool> {
    let options = LogOptions::from_env()?;
    let Some(path) = &options.path else {
        return Ok(false);
    };
    let log_file = open_log_file(path)?;

    let builder = tracing_subscriber::fmt()
        .with_max_level(options.level)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file));

    let installed = if options.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
