use std::env;
use std::path::PathBuf;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub http_timeout_ms: u64,
    pub log_level: String,
    pub map_backend: String,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            poll_interval_ms: parse_or_default("POLL_INTERVAL_MS", 5_000)?,
            // Timeout below the poll interval keeps at most one request in flight.
            http_timeout_ms: parse_or_default("HTTP_TIMEOUT_MS", 4_000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            map_backend: env::var("MAP_BACKEND").unwrap_or_else(|_| "text".to_string()),
            session_file: PathBuf::from(
                env::var("SESSION_FILE")
                    .unwrap_or_else(|_| ".parcel-track-session.json".to_string()),
            ),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Config(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
