//! Configuration loading and typed config structures for Posturemon.
//!
//! The canonical configuration lives in `posturemon-config.yaml` at the
//! project root. Every section and field is optional; an empty file yields
//! the built-in game constants.

use std::path::{Path, PathBuf};

use posturemon_progression::{ProgressionConfig, ProgressionError};
use posturemon_quests::RewardConfig;
use posturemon_scoring::ScoringConfig;
use serde::Deserialize;

/// Environment variable overriding [`StorageConfig::snapshot_path`].
pub const ENV_SNAPSHOT_PATH: &str = "POSTUREMON_SNAPSHOT_PATH";

/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG: &str = "POSTUREMON_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The progression section failed validation.
    #[error("invalid progression config: {source}")]
    Invalid {
        /// The validation failure.
        #[from]
        source: ProgressionError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `posturemon-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Level curve, gauge gains, and streak rules.
    #[serde(default)]
    pub progression: ProgressionConfig,

    /// Mood thresholds, breakdown weights, and history sizing.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Flat quest reward bonuses.
    #[serde(default)]
    pub rewards: RewardConfig,

    /// Game store behavior.
    #[serde(default)]
    pub store: StoreConfig,

    /// Snapshot location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `POSTUREMON_SNAPSHOT_PATH` overrides `storage.snapshot_path`
    /// - `POSTUREMON_LOG` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the progression section is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the progression section is unusable.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        config.progression.validate()?;
        Ok(config)
    }

    /// Apply `POSTUREMON_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_SNAPSHOT_PATH) {
            self.storage.snapshot_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }
    }
}

/// Game store behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Consecutive readings without a person before the pet falls asleep.
    /// 0 disables sleeping.
    #[serde(default)]
    pub sleep_after_absent_readings: u32,

    /// Whether unlocked achievements pay out their reward XP.
    #[serde(default = "default_true")]
    pub award_achievement_xp: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sleep_after_absent_readings: 0,
            award_achievement_xp: true,
        }
    }
}

/// Snapshot location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_true() -> bool {
    true
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("posturemon-snapshot.json")
}

fn default_log_level() -> String {
    String::from("info")
}
