//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the bot token and chat ID are
//! read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use lotwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::delivery::DeliveryConfig;
use super::filter::FilterConfig;
use super::logging::LoggingConfig;
use super::store::StoreConfig;
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::avito::AvitoConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`] or
/// parse directly with [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Search page and HTTP settings.
    #[serde(default)]
    pub source: AvitoConfig,

    /// Price range and name keywords.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Durable seen-listings file and cycle lock.
    #[serde(default)]
    pub store: StoreConfig,

    /// Pacing and per-send timeout.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Log notifications instead of sending them.
    ///
    /// Defaults to false.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the bot token and chat ID overrides from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., `min_price` above `max_price`)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.telegram.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Self::parse_toml(""),
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.filter.min_price > self.filter.max_price {
            return Err(ConfigError::InvalidValue {
                field: "min_price",
                reason: "must be <= max_price".to_string(),
            }
            .into());
        }
        if self.filter.criteria().keywords().is_empty() {
            return Err(ConfigError::MissingField { field: "keywords" }.into());
        }

        if self.source.search_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "search_url",
            }
            .into());
        }
        Url::parse(&self.source.search_url).map_err(|e| ConfigError::InvalidValue {
            field: "search_url",
            reason: e.to_string(),
        })?;
        self.base_url()?;

        if self.delivery.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.delivery.send_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "send_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "store.path" }.into());
        }
        Ok(())
    }

    /// Site root that listing detail paths are resolved against.
    #[allow(clippy::result_large_err)]
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.source.domain).map_err(|e| {
            ConfigError::InvalidValue {
                field: "domain",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// The bot token, required whenever messages really go out.
    #[allow(clippy::result_large_err)]
    pub fn require_bot_token(&self) -> Result<&str> {
        self.telegram
            .bot_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField { field: "BOT_TOKEN" }.into())
    }

    /// The destination chat, required whenever messages really go out.
    #[allow(clippy::result_large_err)]
    pub fn require_chat_id(&self) -> Result<&str> {
        self.telegram
            .chat_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: "telegram.chat_id",
                }
                .into()
            })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
