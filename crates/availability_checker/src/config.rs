use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use notification_services::SendConfig;
use park_availability::DEFAULT_SNAPSHOT_FILENAME;
use serde::Deserialize;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Configuration file used when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Environment variable that swaps SMTP delivery for a logging mock
pub const DRY_RUN_VAR: &str = "DRY_RUN";

/// Errors raised while loading the configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration file is not valid
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// End date lies before the start date
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// First date to check
        start: NaiveDate,
        /// Last date to check
        end: NaiveDate,
    },
}

/// Settings for one availability check
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Dates to ask the calendar about
    pub date_range: DateRange,
    /// Where the snapshot is written
    #[serde(default)]
    pub output: OutputConfig,
    /// SMTP account and recipients
    pub send_config: SendConfig,
}

/// Inclusive range of dates, written as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    /// First date
    pub start: NaiveDate,
    /// Last date
    pub end: NaiveDate,
}

impl DateRange {
    /// Start date in the calendar API's format
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End date in the calendar API's format
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Snapshot output settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Snapshot file name inside the data directory
    #[serde(default)]
    pub filename: Option<String>,
}

impl OutputConfig {
    /// Configured file name, or `availability.json` when missing or blank
    pub fn snapshot_filename(&self) -> &str {
        self.filename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_SNAPSHOT_FILENAME)
    }
}

impl Config {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;

        if config.date_range.end < config.date_range.start {
            return Err(ConfigError::InvalidDateRange {
                start: config.date_range.start,
                end: config.date_range.end,
            });
        }

        Ok(config)
    }

    /// Read and validate the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&json)?;
        log::info!(
            "⚙️ Loaded config from {} ({} to {})",
            path.display(),
            config.date_range.start,
            config.date_range.end
        );

        Ok(config)
    }
}

/// Configuration file path, from `CONFIG_PATH` or the default
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Whether `DRY_RUN` asks for emails to be logged instead of sent
pub fn dry_run() -> bool {
    std::env::var(DRY_RUN_VAR)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
