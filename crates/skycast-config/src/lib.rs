use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamConfig {
    pub geocode_url: Option<String>,
    pub forecast_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    pub backend: Option<HistoryBackend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogConfig {
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub upstream: Option<UpstreamConfig>,
    pub database: Option<DatabaseConfig>,
    pub history: Option<HistoryConfig>,
    pub log: Option<LogConfig>,
}

/// Fully defaulted database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

impl AppConfig {
    /// Load from the SKYCAST_CONFIG path (TOML) if present, then apply
    /// DB_* and SKYCAST_BIND environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SKYCAST_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Read a TOML file; a missing file yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let s = fs::read_to_string(path)?;
        Ok(toml::from_str::<AppConfig>(&s)?)
    }

    /// Overlay values from `lookup`, which maps a variable name to its value
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("SKYCAST_BIND") {
            self.server.get_or_insert_with(Default::default).bind = Some(bind);
        }

        let db = self.database.get_or_insert_with(Default::default);
        if let Some(host) = lookup("DB_HOST") {
            db.host = Some(host);
        }
        if let Some(port) = lookup("DB_PORT") {
            let parsed = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "DB_PORT",
                value: port.clone(),
            })?;
            db.port = Some(parsed);
        }
        if let Some(user) = lookup("DB_USER") {
            db.user = Some(user);
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            db.password = Some(password);
        }
        if let Some(name) = lookup("DB_NAME") {
            db.name = Some(name);
        }
        Ok(())
    }

    /// HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn geocode_url(&self) -> String {
        self.upstream
            .as_ref()
            .and_then(|u| u.geocode_url.clone())
            .unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_string())
    }

    pub fn forecast_url(&self) -> String {
        self.upstream
            .as_ref()
            .and_then(|u| u.forecast_url.clone())
            .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string())
    }

    /// Per-request timeout for upstream calls
    pub fn upstream_timeout(&self) -> Duration {
        let secs = self
            .upstream
            .as_ref()
            .and_then(|u| u.timeout_secs)
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn history_backend(&self) -> HistoryBackend {
        self.history
            .as_ref()
            .and_then(|h| h.backend)
            .unwrap_or_default()
    }

    pub fn log_format(&self) -> LogFormat {
        self.log.as_ref().and_then(|l| l.format).unwrap_or_default()
    }

    pub fn database(&self) -> DatabaseSettings {
        let db = self.database.clone().unwrap_or_default();
        DatabaseSettings {
            host: db.host.unwrap_or_else(|| "localhost".to_string()),
            port: db.port.unwrap_or(5432),
            user: db.user.unwrap_or_else(|| "postgres".to_string()),
            password: db.password,
            name: db.name.unwrap_or_else(|| "weather".to_string()),
            max_connections: db.max_connections.unwrap_or(10),
        }
    }
}
