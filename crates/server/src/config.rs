// =============================================================================
// pngico Server - Configuration
// =============================================================================

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1:3000")
    pub bind_address: String,

    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,

    /// Largest accepted source width or height after decoding
    pub max_source_dimension: u32,

    /// Most distinct sizes a single request may ask for
    pub max_sizes: usize,

    /// Time budget for one conversion
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".into(),
            max_upload_bytes: 10 * 1024 * 1024,
            max_source_dimension: 8192,
            max_sizes: 16,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults; set but unparseable or zero values
    /// are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            max_upload_bytes: positive("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            max_source_dimension: positive("MAX_SOURCE_DIMENSION", defaults.max_source_dimension)?,
            max_sizes: positive("MAX_SIZES", defaults.max_sizes)?,
            request_timeout: Duration::from_secs(positive(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        })
    }
}

fn positive<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value != T::default() => Ok(value),
            _ => Err(ConfigError::Invalid(name)),
        },
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
