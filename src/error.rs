//! Error kinds surfaced to the operator.

use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration failures. These are fatal: the process reports them
/// and exits before any table operation runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credentials line {line_number}: expected key=value")]
    Malformed { line_number: usize },

    #[error("Missing required credentials in the file: {0}")]
    MissingKey(&'static str),

    #[error("invalid value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

/// Operator input that cannot be turned into a request. The operation is
/// abandoned before the store is contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid partition key type '{0}'. Expected S or N.")]
    InvalidKeyType(String),

    #[error("Invalid filter type '{0}'. Expected 1, 2, 3 or 4.")]
    InvalidFilterChoice(String),
}

/// Failures reported by the remote store, one variant per operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{message}")]
    TableCreation { message: String },

    #[error("{message}")]
    Write { message: String },

    #[error("{message}")]
    Delete { message: String },

    #[error("{message}")]
    Scan { message: String },
}
