use crate::error::{MoodError, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Session history file read when no `--input` is given.
    pub history_file: Option<PathBuf>,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from default path (~/.config/mood-patterns/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.analysis.utc_offset()?;
        Ok(config)
    }

    /// Write current configuration to the default path.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mood-patterns")
            .join("config.toml")
    }

    /// Data directory for session history.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mood-patterns")
    }

    /// Resolved history file: configured path or `<data_dir>/history.json`.
    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("history.json"))
    }
}

/// Pattern analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fixed offset from UTC, in minutes, used for every hour/weekday/date
    /// derivation. 0 means UTC.
    pub utc_offset_minutes: i32,
    /// Sessions required before patterns are considered meaningful.
    pub min_sessions_for_insights: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            min_sessions_for_insights: 3,
        }
    }
}

impl AnalysisConfig {
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        offset_from_minutes(self.utc_offset_minutes)
    }
}

/// Convert a minute offset into a `FixedOffset`, rejecting anything outside ±24h.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| MoodError::Config(format!("UTC offset out of range: {} minutes", minutes)))
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Json,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Markdown,
    Text,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Bearer token for authentication (None = no auth).
    pub auth_token: Option<String>,
    /// Enable CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            auth_token: None,
            cors: true,
        }
    }
}
