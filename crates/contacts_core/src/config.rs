//! Layered settings for the contacts store.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults (`Settings::default()`).
//! 2. Environment variables `CONTACTS_DB_PATH`, `CONTACTS_LOG_LEVEL`,
//!    `CONTACTS_LOG_DIR`.
//!
//! Extracted values are normalized afterwards: blank paths count as unset,
//! the log level is canonicalized and the log dir must be absolute.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LogLevel};
use figment::providers::{Env, Serialized};
use figment::Figment;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "CONTACTS_";

/// Settings could not be loaded or hold an unusable value.
#[derive(Debug)]
pub enum SettingsError {
    /// Boxed to keep `Result<Settings, _>` small.
    Load(Box<figment::Error>),
    Invalid { key: &'static str, message: String },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load settings: {err}"),
            Self::Invalid { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err.as_ref()),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<figment::Error> for SettingsError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// `None` selects an in-memory store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// `None` leaves logging uninitialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `CONTACTS_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_figment(Self::figment())
    }

    /// Extracts and normalizes settings from any provider stack.
    ///
    /// # Errors
    /// - `Load` when extraction fails (wrong types, unreadable source).
    /// - `Invalid` for an unknown log level or a relative log dir.
    pub fn from_figment(figment: Figment) -> Result<Self, SettingsError> {
        let raw: Self = figment.extract()?;

        let log_level = LogLevel::parse(&raw.log_level).map_err(|message| {
            SettingsError::Invalid {
                key: "log_level",
                message,
            }
        })?;

        let log_dir = match non_blank(raw.log_dir) {
            Some(dir) if !dir.is_absolute() => {
                return Err(SettingsError::Invalid {
                    key: "log_dir",
                    message: format!("must be an absolute path, got `{}`", dir.display()),
                });
            }
            other => other,
        };

        Ok(Self {
            db_path: non_blank(raw.db_path),
            log_level: log_level.as_str().to_string(),
            log_dir,
        })
    }

    /// Opens the configured store with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Starts file logging when `log_dir` is set; no-op otherwise.
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(dir) = &self.log_dir else {
            return Ok(());
        };
        let dir = dir
            .to_str()
            .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", dir.display()))?;
        init_logging(&self.log_level, dir)
    }
}

fn non_blank(path: Option<PathBuf>) -> Option<PathBuf> {
    path.and_then(|path| {
        let trimmed = path.to_str().map_or("", str::trim);
        if trimmed.is_empty() {
            None
        } else {
            Some(Path::new(trimmed).to_path_buf())
        }
    })
}
