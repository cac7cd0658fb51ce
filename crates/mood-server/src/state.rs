use chrono::FixedOffset;
use mood_core::config::AppConfig;

/// Shared application state for the server.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Offset used when a request does not carry its own.
    pub default_offset: FixedOffset,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let default_offset = config.analysis.utc_offset()?;
        Ok(Self {
            config,
            default_offset,
        })
    }
}
