//! Startup configuration from environment variables.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Channel capacity of every resource actor.
    pub buffer_size: usize,
    pub admin_username: String,
    /// Seeding the administrator is skipped when unset.
    pub admin_password: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("COURSE_ADMIN_PORT", "3000")?,
            buffer_size: try_load("COURSE_ADMIN_BUFFER", "32")?,
            admin_username: try_load("COURSE_ADMIN_USERNAME", "admin")?,
            admin_password: var("COURSE_ADMIN_PASSWORD").filter(|p| !p.is_empty()),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}
