use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const CREDENTIALS_PATH_VAR: &str = "DYNAMODB_CONSOLE_CREDENTIALS";
pub const ENDPOINT_URL_VAR: &str = "AWS_ENDPOINT_URL";
pub const WAIT_INTERVAL_VAR: &str = "DYNAMODB_CONSOLE_WAIT_INTERVAL_SECS";
pub const WAIT_ATTEMPTS_VAR: &str = "DYNAMODB_CONSOLE_WAIT_ATTEMPTS";

const DEFAULT_CREDENTIALS_PATH: &str = "credentials.txt";
const DEFAULT_WAIT_INTERVAL_SECS: u64 = 2;
const DEFAULT_WAIT_ATTEMPTS: usize = 60;

/// How long `create_table` waits for a new table to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWait {
    pub interval: Duration,
    pub max_attempts: usize,
}

impl Default for TableWait {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_WAIT_INTERVAL_SECS),
            max_attempts: DEFAULT_WAIT_ATTEMPTS,
        }
    }
}

/// Process configuration, built once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub endpoint_url: Option<String>,
    pub table_wait: TableWait,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            endpoint_url: None,
            table_wait: TableWait::default(),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Empty
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let credentials_path = get(CREDENTIALS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.credentials_path);

        let interval = match get(WAIT_INTERVAL_VAR) {
            Some(value) => Duration::from_secs(parse_setting(WAIT_INTERVAL_VAR, value)?),
            None => defaults.table_wait.interval,
        };
        let max_attempts = match get(WAIT_ATTEMPTS_VAR) {
            Some(value) => parse_setting(WAIT_ATTEMPTS_VAR, value)?,
            None => defaults.table_wait.max_attempts,
        };

        Ok(Self {
            credentials_path,
            endpoint_url: get(ENDPOINT_URL_VAR),
            table_wait: TableWait {
                interval,
                max_attempts,
            },
        })
    }
}

fn parse_setting<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSetting { name, value })
}
