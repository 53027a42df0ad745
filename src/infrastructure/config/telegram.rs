//! Telegram notification configuration.

use serde::Deserialize;

/// Telegram notification configuration.
///
/// The bot token is never read from the config file. It comes from
/// `BOT_TOKEN`, or `TELEGRAM_BOT_TOKEN` when the former is unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Chat ID or `@channel` that receives notifications.
    ///
    /// `TELEGRAM_CHAT_ID` overrides this value when set.
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Loaded from the environment.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl TelegramAppConfig {
    /// Fill secrets and overrides from the environment.
    pub(crate) fn apply_env(&mut self) {
        self.bot_token = env_non_empty("BOT_TOKEN").or_else(|| env_non_empty("TELEGRAM_BOT_TOKEN"));
        if let Some(chat_id) = env_non_empty("TELEGRAM_CHAT_ID") {
            self.chat_id = Some(chat_id);
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
