use std::env;

use dotenvy::dotenv;

pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5555";
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database path or `file:` URI
    pub database_url: String,
    pub bind_address: String,
    pub pool_size: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidPoolSize { name: &'static str, value: String },
}

impl Config {
    /// Reads configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidPoolSize {
                    name: "DATABASE_POOL_SIZE",
                    value,
                })?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            bind_address,
            pool_size,
        })
    }
}
