use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// These are the only errors that stop the process; everything below is
/// recovered somewhere inside the cycle.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors reading or writing the durable seen-listings file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read store file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode store: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unsupported store version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// Errors fetching or parsing the listing page.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to fetch listing page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid listing url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to parse listing page: {0}")]
    Parse(String),
}

/// Errors delivering a single message through the notification channel.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("send failed: {0}")]
    Send(String),

    #[error("send timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("channel already closed")]
    Closed,
}

/// Errors releasing the notification channel.
#[derive(Error, Debug)]
#[error("failed to close notification channel: {0}")]
pub struct ChannelCloseError(pub String);

/// Errors acquiring the single-writer cycle lock.
#[derive(Error, Debug)]
pub enum LockError {
    #[error("another cycle holds the lock at {path}")]
    Held { path: PathBuf },

    #[error("failed to create lock file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub type Result<T> = std::result::Result<T, Error>;
