//! services/dashboard/src/config.rs
//!
//! Defines the service's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use crate::web::analyzer_task::PipelineTimings;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub allowed_origin: String,
    pub session_store_path: PathBuf,
    pub export_dir: PathBuf,
    pub login_latency: Duration,
    pub upload_tick: Duration,
    pub upload_increment: u8,
    pub step_delay: Duration,
    pub step_duration: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:8080".to_string());

        // --- Storage Locations ---
        let session_store_path = lookup("SESSION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./legalvision_session.json"));
        let export_dir = lookup("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./exports"));

        // --- Simulated Latencies ---
        let login_latency = millis(&lookup, "LOGIN_LATENCY_MS", 800)?;
        let upload_tick = millis(&lookup, "UPLOAD_TICK_MS", 150)?;
        let step_delay = millis(&lookup, "STEP_DELAY_MS", 500)?;
        let step_duration = millis(&lookup, "STEP_DURATION_MS", 1000)?;

        let upload_increment = match lookup("UPLOAD_INCREMENT") {
            None => 10,
            Some(raw) => match raw.parse::<u8>() {
                Ok(n) if (1..=100).contains(&n) => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "UPLOAD_INCREMENT".to_string(),
                        format!("'{}' is not a percentage between 1 and 100", raw),
                    ))
                }
            },
        };

        Ok(Self {
            bind_address,
            log_level,
            allowed_origin,
            session_store_path,
            export_dir,
            login_latency,
            upload_tick,
            upload_increment,
            step_delay,
            step_duration,
        })
    }

    pub fn pipeline_timings(&self) -> PipelineTimings {
        PipelineTimings {
            upload_tick: self.upload_tick,
            upload_increment: self.upload_increment,
            step_delay: self.step_delay,
            step_duration: self.step_duration,
        }
    }
}

fn millis<F>(lookup: &F, key: &str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(Duration::from_millis(default)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
    }
}
