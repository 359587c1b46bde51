use std::{str::FromStr, time::Duration};

use sea_orm::IsolationLevel;

use crate::{
    client::{ClientOptions, TransactionOptions},
    error::config::ConfigError,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TRANSACTION_MAX_WAIT_MS: u64 = 2_000;
const DEFAULT_TRANSACTION_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_EXPIRY_SWEEP_INTERVAL_SECS: u64 = 3_600;

pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub sql_logging: bool,
    pub isolation_level: Option<IsolationLevel>,
    pub transaction_max_wait: Duration,
    pub transaction_timeout: Duration,
    pub expiry_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            sql_logging: parse_var("SQL_LOGGING", false)?,
            isolation_level: isolation_level_var("TRANSACTION_ISOLATION_LEVEL")?,
            transaction_max_wait: Duration::from_millis(parse_var(
                "TRANSACTION_MAX_WAIT_MS",
                DEFAULT_TRANSACTION_MAX_WAIT_MS,
            )?),
            transaction_timeout: Duration::from_millis(parse_var(
                "TRANSACTION_TIMEOUT_MS",
                DEFAULT_TRANSACTION_TIMEOUT_MS,
            )?),
            expiry_sweep_interval: Duration::from_secs(parse_var(
                "EXPIRY_SWEEP_INTERVAL_SECS",
                DEFAULT_EXPIRY_SWEEP_INTERVAL_SECS,
            )?),
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            sql_logging: self.sql_logging,
            transaction: TransactionOptions {
                isolation_level: self.isolation_level,
                max_wait: self.transaction_max_wait,
                timeout: self.transaction_timeout,
            },
        }
    }
}

/// Read `var`, falling back to `default` when unset.
fn parse_var<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

fn isolation_level_var(var: &str) -> Result<Option<IsolationLevel>, ConfigError> {
    let Ok(value) = std::env::var(var) else {
        return Ok(None);
    };

    parse_isolation_level(&value)
        .map(Some)
        .ok_or_else(|| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!(
                "expected one of ReadUncommitted, ReadCommitted, RepeatableRead, Serializable, got {:?}",
                value
            ),
        })
}

/// Parse an isolation level name, accepting `ReadCommitted` and `READ_COMMITTED` forms.
pub fn parse_isolation_level(value: &str) -> Option<IsolationLevel> {
    let normalized: String = value
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match normalized.as_str() {
        "readuncommitted" => Some(IsolationLevel::ReadUncommitted),
        "readcommitted" => Some(IsolationLevel::ReadCommitted),
        "repeatableread" => Some(IsolationLevel::RepeatableRead),
        "serializable" => Some(IsolationLevel::Serializable),
        _ => None,
    }
}
