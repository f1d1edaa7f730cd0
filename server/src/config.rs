//! Environment-driven server settings.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON file the events are persisted to; in-memory only when unset.
    pub data_file: Option<PathBuf>,
    /// Browser origin allowed by CORS.
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: None,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `PORT`, `COUNTDOWN_DATA_FILE` and `COUNTDOWN_ALLOWED_ORIGIN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            data_file: lookup("COUNTDOWN_DATA_FILE")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            allowed_origin: lookup("COUNTDOWN_ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
        }
    }
}
