use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{info, warn};

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Persistent configuration (`app_config.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    /// Defaults to `<data dir>/eduverse.db`
    pub database_path: Option<PathBuf>,
    pub leaderboard_limit: u32,
    pub recent_games_limit: u32,
    pub store_busy_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            database_path: None,
            leaderboard_limit: 50,
            recent_games_limit: 10,
            store_busy_timeout_secs: 5,
        }
    }
}

pub struct ConfigService {
    config: RwLock<AppConfig>,
    config_path: PathBuf,
}

impl ConfigService {
    pub const FILE_NAME: &'static str = "app_config.json";

    /// Load `<config_dir>/app_config.json`; a missing or unreadable file
    /// falls back to defaults.
    pub fn load(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir)?;
        let config_path = config_dir.join(Self::FILE_NAME);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
                warn!("Invalid config at {:?}, using defaults: {}", config_path, e);
                AppConfig::default()
            })
        } else {
            AppConfig::default()
        };

        Ok(Self {
            config: RwLock::new(config),
            config_path,
        })
    }

    pub fn snapshot(&self) -> AppConfig {
        self.config
            .read()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.snapshot().log_level
    }

    /// Set log level and persist to disk. Takes effect on next start.
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        let updated = {
            let mut config = self
                .config
                .write()
                .map_err(|_| anyhow::anyhow!("Config lock poisoned"))?;
            config.log_level = level;
            config.clone()
        };

        self.persist(&updated)?;
        info!("Log level saved to {:?}: {}", self.config_path, level.as_str());
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn persist(&self, config: &AppConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }
}
