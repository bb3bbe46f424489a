use std::env;

use thiserror::Error;

use crate::domain::catalog::WarehouseId;

const DEFAULT_POOL_SIZE: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    /// The warehouse the session acts for; new drafts are opened for it.
    pub warehouse_id: WarehouseId,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let pool_size = match lookup("DB_POOL_SIZE") {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DB_POOL_SIZE",
                        value: raw,
                    })
                }
            },
        };

        let raw = lookup("WAREHOUSE_ID").ok_or(ConfigError::Missing("WAREHOUSE_ID"))?;
        let warehouse_id = raw.parse::<i32>().map(WarehouseId).map_err(|_| ConfigError::Invalid {
            name: "WAREHOUSE_ID",
            value: raw.clone(),
        })?;

        Ok(Self {
            database_url,
            pool_size,
            warehouse_id,
        })
    }
}
