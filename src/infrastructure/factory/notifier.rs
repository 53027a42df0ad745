//! Notifier factory.
//!
//! Chooses the notification channel for a run: the log in dry-run mode,
//! Telegram otherwise.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Destination, LogNotifier, Notifier};

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::TelegramNotifier;

/// Build the notifier for this run.
///
/// # Errors
///
/// Outside dry-run mode, fails with a missing-field error when no bot token
/// is set in the environment.
#[cfg(feature = "telegram")]
#[allow(clippy::result_large_err)]
pub fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    if config.dry_run {
        info!("Dry-run mode, notifications go to the log");
        return Ok(Arc::new(LogNotifier));
    }

    let token = config.require_bot_token()?;
    info!("Telegram notifier enabled");
    Ok(Arc::new(TelegramNotifier::new(token)))
}

/// Build the notifier for this run (non-Telegram variant).
///
/// Without the `telegram` feature every run logs its notifications.
#[cfg(not(feature = "telegram"))]
#[allow(clippy::result_large_err)]
pub fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    if !config.dry_run {
        tracing::warn!("Built without telegram support, notifications go to the log");
    }
    Ok(Arc::new(LogNotifier))
}

/// Resolve where notifications are addressed.
///
/// Dry runs fall back to a placeholder when no chat is configured.
#[allow(clippy::result_large_err)]
pub fn build_destination(config: &Config) -> Result<Destination> {
    if config.dry_run {
        let id = config.telegram.chat_id.clone().unwrap_or_else(|| "log".into());
        return Ok(Destination::new(id));
    }
    config.require_chat_id().map(Destination::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_needs_no_token_or_chat() {
        let config = Config {
            dry_run: true,
            ..Default::default()
        };

        assert!(build_notifier(&config).is_ok());
        assert_eq!(build_destination(&config).unwrap().as_str(), "log");
    }

    #[cfg(feature = "telegram")]
    #[test]
    fn live_run_requires_token() {
        let config = Config::default();
        assert!(build_notifier(&config).is_err());
    }

    #[test]
    fn live_run_requires_chat_id() {
        let config = Config::default();
        assert!(build_destination(&config).is_err());
    }
}
