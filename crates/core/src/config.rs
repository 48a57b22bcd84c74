//! Layered configuration: built-in defaults, an optional TOML file, then
//! `REFGRADE_*` environment overrides.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::{GradingWindows, GRADE_ADMISSION_TIME_WINDOW, GRADING_OPENS_AFTER_HOURS};
use crate::status::GradeStatusCalculator;

/// Directory under the user's config dir holding the config file.
pub const CONFIG_DIR: &str = "refgrade";
/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "REFGRADE";
const MAX_OFFSET_MINUTES: i32 = 24 * 60;
/// Longest window accepted from configuration, one year.
pub const MAX_WINDOW_HOURS: i64 = 24 * 366;

/// Tunables for classification and label rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Hours after kick-off after which grades count as received or overdue.
    pub grading_opens_after_hours: i64,
    /// Hours after kick-off at which the admission window closes.
    pub admission_window_hours: i64,
    /// Offset from UTC, in minutes, used for date labels and calendar days.
    pub utc_offset_minutes: i32,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            grading_opens_after_hours: GRADING_OPENS_AFTER_HOURS,
            admission_window_hours: GRADE_ADMISSION_TIME_WINDOW,
            utc_offset_minutes: 0,
        }
    }
}

impl GradingConfig {
    /// Load from the default location, falling back to defaults when the file is missing.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load using `path` as the optional file layer.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default(
                "grading_opens_after_hours",
                defaults.grading_opens_after_hours,
            )?
            .set_default("admission_window_hours", defaults.admission_window_hours)?
            .set_default("utc_offset_minutes", i64::from(defaults.utc_offset_minutes))?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        info!(
            path = %path.display(),
            grading_opens_after_hours = config.grading_opens_after_hours,
            admission_window_hours = config.admission_window_hours,
            "loaded grading config"
        );
        Ok(config)
    }

    /// Reject windows outside `0..=MAX_WINDOW_HOURS` and offsets outside a day.
    pub fn validate(&self) -> Result<()> {
        check_window("grading_opens_after_hours", self.grading_opens_after_hours)?;
        check_window("admission_window_hours", self.admission_window_hours)?;
        if self.utc_offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            bail!(
                "utc_offset_minutes must be within a day (got {})",
                self.utc_offset_minutes
            );
        }
        Ok(())
    }

    /// Grading windows described by this config.
    pub fn windows(&self) -> GradingWindows {
        GradingWindows::from_hours(self.grading_opens_after_hours, self.admission_window_hours)
    }

    /// Calculator classifying against this config's windows.
    pub fn calculator(&self) -> GradeStatusCalculator {
        GradeStatusCalculator::new(self.windows())
    }

    /// Offset used for labels; UTC when the configured value is out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    fn to_toml(self) -> String {
        format!(
            "grading_opens_after_hours = {}\nadmission_window_hours = {}\nutc_offset_minutes = {}\n",
            self.grading_opens_after_hours, self.admission_window_hours, self.utc_offset_minutes
        )
    }
}

fn check_window(key: &str, hours: i64) -> Result<()> {
    if hours < 0 {
        bail!("{key} must not be negative (got {hours})");
    }
    if hours > MAX_WINDOW_HOURS {
        bail!("{key} must be at most {MAX_WINDOW_HOURS} hours (got {hours})");
    }
    Ok(())
}

/// Default config file location under the user's config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default config file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    write_default_config(&path)?;
    Ok(path)
}

/// Write defaults to `path` unless a file is already there.
pub fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, GradingConfig::default().to_toml())
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "wrote default grading config");
    Ok(())
}
