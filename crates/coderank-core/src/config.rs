use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoderankError, Result};

pub const DEFAULT_LEADERBOARD_URL: &str = "https://lmarena.ai/leaderboard";

/// Runtime settings. Precedence, lowest first: built-in defaults, the TOML
/// config file, environment variables, command-line flags (applied by the
/// caller).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub leaderboard_url: String,
    pub timeout_secs: u64,
    pub top_n: usize,
    pub use_mock: bool,
    pub data_path: PathBuf,
    pub refresh_interval_hours: u64,
    pub stale_after_hours: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            leaderboard_url: DEFAULT_LEADERBOARD_URL.to_string(),
            timeout_secs: 30,
            top_n: 10,
            use_mock: false,
            data_path: default_data_path(),
            refresh_interval_hours: 24,
            stale_after_hours: 24,
        }
    }
}

/// `<data dir>/coderank/models.json`, or `./data/models.json` when the
/// platform has no data directory.
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("coderank"))
        .unwrap_or_else(|| PathBuf::from("data"))
        .join("models.json")
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("coderank").join("config.toml"))
    }

    /// Defaults, overlaid with the user config file (if any) and the
    /// process environment.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoderankError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| CoderankError::Other(format!("bad config.toml: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the refresh loop can't run with.
    pub fn validate(&self) -> Result<()> {
        refresh_period(self.refresh_interval_hours)
            .map_err(|e| CoderankError::Other(format!("bad config.toml: {e}")))?;
        Ok(())
    }

    /// Apply `DATA_PATH`, `USE_MOCK_DATA` and `CODERANK_LEADERBOARD_URL`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("DATA_PATH").filter(|p| !p.is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(flag) = var("USE_MOCK_DATA") {
            self.use_mock = flag.trim().eq_ignore_ascii_case("true");
        }
        if let Some(url) = var("CODERANK_LEADERBOARD_URL").filter(|u| !u.is_empty()) {
            self.leaderboard_url = url;
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::hours(self.stale_after_hours as i64)
    }
}

/// Wall-clock period of a refresh loop that runs every `hours` hours.
pub fn refresh_period(hours: u64) -> Result<std::time::Duration> {
    if hours == 0 {
        return Err(CoderankError::Other(
            "refresh_interval_hours must be at least 1".to_string(),
        ));
    }
    hours
        .checked_mul(3600)
        .map(std::time::Duration::from_secs)
        .ok_or_else(|| CoderankError::Other(format!("refresh interval of {hours} hours is too long")))
}
