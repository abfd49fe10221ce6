//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if required vars are missing or
//! malformed. Sensitive values wrapped in secrecy::SecretString to
//! prevent log leaks.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::{Error, Result};

/// Default debounce between a creator's activity and their scan.
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_secs(300);

#[derive(Debug)]
pub struct Config {
    pub database_url: SecretString,
    pub scan_delay: Duration,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    /// In production, systemd EnvironmentFile provides the vars.
    pub fn from_env() -> Result<Self> {
        let scan_delay = match std::env::var("SCAN_DELAY_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    Error::Config(format!("SCAN_DELAY_SECS must be an integer, got {raw:?}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_SCAN_DELAY,
        };

        Ok(Self {
            database_url: SecretString::from(required_var("DATABASE_URL")?),
            scan_delay,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("required environment variable {name} is not set")))
}
