//! Engine configuration loaded from TOML.
//!
//! # Invariants
//! - Every field has a default, so an empty document is a valid config.
//! - `periods_per_day` stays within `1..=MAX_PERIODS_PER_DAY`.
//! - Unknown keys are rejected rather than ignored.
//!
//! ```toml
//! periods_per_day = 6
//! random_seed = 42
//! database_path = "/var/lib/timetable/timetable.sqlite3"
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/timetable"
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_PERIODS_PER_DAY: u8 = 6;
pub const MAX_PERIODS_PER_DAY: u8 = 12;
pub const DEFAULT_DATABASE_PATH: &str = "timetable.db";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Toml(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Toml(value)
    }
}

/// Top-level timetable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimetableConfig {
    /// Periods per teaching day; the slot set is 5 x this value.
    pub periods_per_day: u8,
    /// Pins the occurrence shuffle. `None` seeds from the OS.
    pub random_seed: Option<u64>,
    /// SQLite file; relative paths resolve against the working directory.
    pub database_path: PathBuf,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when absent.
    pub level: Option<String>,
    /// Absolute directory for rolling log files. Logging stays off when absent.
    pub dir: Option<PathBuf>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            periods_per_day: DEFAULT_PERIODS_PER_DAY,
            random_seed: None,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            logging: LoggingConfig::default(),
        }
    }
}

impl TimetableConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PERIODS_PER_DAY).contains(&self.periods_per_day) {
            return Err(ConfigError::Invalid(format!(
                "periods_per_day must be within 1..={MAX_PERIODS_PER_DAY}, got {}",
                self.periods_per_day
            )));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path cannot be empty".to_string()));
        }
        if let Some(dir) = &self.logging.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Random source for occurrence shuffling.
    pub fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
