//! `config.json` stored next to the database.
//!
//! Every field is optional on disk; a missing or unreadable file yields the
//! defaults so that read-only commands never fail on configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::connection;
use crate::error::ProjaiError;

pub const DEFAULT_SPRINT_DAYS: u32 = 14;
pub const DEFAULT_DAYS_AHEAD: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_project_id: Option<String>,
    pub sprint_days: u32,
    pub days_ahead: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_project_id: None,
            sprint_days: DEFAULT_SPRINT_DAYS,
            days_ahead: DEFAULT_DAYS_AHEAD,
            log_level: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        match connection::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("event=config_load module=config status=invalid error={e}");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), ProjaiError> {
        self.save_to(&connection::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ProjaiError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| ProjaiError::validation(e.to_string()))?;
        fs::write(path, body)?;
        Ok(())
    }
}
