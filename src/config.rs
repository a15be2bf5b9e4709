use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not valid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// | Env Var            | Default              |
/// |--------------------|----------------------|
/// | `DATABASE_PATH`    | `weather.sqlite3`    |
/// | `SCHEMA_PATH`      | `sql/schema.sql`     |
/// | `BIND_ADDR`        | `127.0.0.1:3000`     |
/// | `MAX_WORKERS`      | `8`                  |
/// | `AUDIT_LOG_PATH`   | `logfolder/log.txt`  |
/// | `MAX_UPLOAD_BYTES` | `16777216` (16 MiB)  |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub schema_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Overwritten by every import run.
    pub audit_log_path: PathBuf,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: "weather.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            audit_log_path: PathBuf::from("logfolder/log.txt"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v.parse().map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: format!("{e}"),
            })?,
            None => defaults.bind_addr,
        };

        let max_workers = match get("MAX_WORKERS") {
            Some(v) => v.parse().map_err(|e| ConfigError::Invalid {
                var: "MAX_WORKERS",
                reason: format!("{e}"),
            })?,
            None => defaults.max_workers,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(v) => v.parse().map_err(|e| ConfigError::Invalid {
                var: "MAX_UPLOAD_BYTES",
                reason: format!("{e}"),
            })?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            database_path: get("DATABASE_PATH").unwrap_or(defaults.database_path),
            schema_path: get("SCHEMA_PATH").unwrap_or(defaults.schema_path),
            bind_addr,
            max_workers,
            audit_log_path: get("AUDIT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.audit_log_path),
            max_upload_bytes,
        })
    }
}
