pub mod io;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tables::database::DbConfig;

/// User settings persisted as JSON in the platform config directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Overrides the default `<Documents>/TableDesk/tables.db`.
    pub database_path: Option<PathBuf>,
    pub log_level: String,
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "warn".to_string(),
            log_filter: "bevy_app=warn,bevy_ecs=warn".to_string(),
        }
    }
}

impl AppSettings {
    /// Database file to open. `--db` wins over the settings file, which wins
    /// over the default location.
    pub fn database_file(&self, cli_override: Option<&PathBuf>) -> PathBuf {
        cli_override
            .or(self.database_path.as_ref())
            .cloned()
            .unwrap_or_else(|| DbConfig::default().database_file())
    }

    /// Parses `log_level`, falling back to `WARN` for unknown names.
    pub fn level(&self) -> bevy::log::Level {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" => bevy::log::Level::TRACE,
            "debug" => bevy::log::Level::DEBUG,
            "info" => bevy::log::Level::INFO,
            "error" => bevy::log::Level::ERROR,
            _ => bevy::log::Level::WARN,
        }
    }
}
