use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const REGION: &str = "region";

/// Static AWS credentials read from a `key=value` file.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl Credentials {
    /// Reads and parses the credentials file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read credentials from {}", path.display());
        Self::parse(&contents)
    }

    /// Parses `key=value` lines. Blank lines are skipped and surrounding
    /// whitespace is trimmed; unknown keys are ignored. A later line for the
    /// same key replaces an earlier one.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut access_key_id = None;
        let mut secret_access_key = None;
        let mut region = None;

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or(ConfigError::Malformed {
                line_number: index + 1,
            })?;
            let slot = match key {
                ACCESS_KEY_ID => &mut access_key_id,
                SECRET_ACCESS_KEY => &mut secret_access_key,
                REGION => &mut region,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }

        Ok(Self {
            access_key_id: access_key_id.ok_or(ConfigError::MissingKey(ACCESS_KEY_ID))?,
            secret_access_key: secret_access_key
                .ok_or(ConfigError::MissingKey(SECRET_ACCESS_KEY))?,
            region: region.ok_or(ConfigError::MissingKey(REGION))?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("region", &self.region)
            .finish()
    }
}
