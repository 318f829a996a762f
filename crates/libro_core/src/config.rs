//! Runtime configuration for catalog hosts.
//!
//! # Responsibility
//! - Resolve database, logging and seeding settings from the environment.
//! - Reject malformed values with the offending variable name.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults; they never error.
//! - Resolution is pure over the injected lookup, so tests need no env.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "LIBRO_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "LIBRO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LIBRO_LOG_DIR";
pub const SEED_VAR: &str = "LIBRO_SEED";

/// Invalid environment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                var,
                value,
                expected,
            } => write!(f, "invalid {var} value `{value}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings a catalog host needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite file path; `None` selects a private in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute log directory; `None` leaves logging disabled.
    pub log_dir: Option<PathBuf>,
    /// Populate an empty catalog with the sample books.
    pub seed_on_empty: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
            seed_on_empty: false,
        }
    }
}

impl CatalogConfig {
    /// Resolves settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// - `LIBRO_LOG_LEVEL` is not one of trace|debug|info|warn|error.
    /// - `LIBRO_LOG_DIR` is not an absolute path.
    /// - `LIBRO_SEED` is not a recognized boolean.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level =
                normalize_level(&level).map_err(|_| ConfigError::InvalidValue {
                    var: LOG_LEVEL_VAR,
                    value: level.clone(),
                    expected: "trace|debug|info|warn|error",
                })?;
        }

        if let Some(dir) = read(LOG_DIR_VAR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    var: LOG_DIR_VAR,
                    value: dir,
                    expected: "an absolute path",
                });
            }
            config.log_dir = Some(path);
        }

        if let Some(seed) = read(SEED_VAR) {
            config.seed_on_empty = parse_flag(&seed).ok_or_else(|| ConfigError::InvalidValue {
                var: SEED_VAR,
                value: seed.clone(),
                expected: "1|0|true|false|yes|no|on|off",
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
