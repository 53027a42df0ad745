use std::path::Path;

use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::Destination;

/// Send a test message through the configured bot.
#[cfg(feature = "telegram")]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    use crate::adapter::outbound::notifier::telegram::TelegramNotifier;
    use crate::port::{Message, Notifier};

    let config = Config::load_or_default(config_path)?;
    let token = config.require_bot_token()?;
    let destination = Destination::new(config.require_chat_id()?);

    output::section("Telegram Check");
    output::key_value("Bot token", output::mask_secret(token));
    output::key_value("Chat ID", &destination);

    let notifier = TelegramNotifier::new(token);
    let message = Message::Notice(format!(
        "lotwatch test message. Watching {} to {} for: {}",
        config.filter.min_price,
        config.filter.max_price,
        config.filter.keywords.join(", ")
    ));

    let sent = notifier.send(&destination, &message).await;
    if let Err(e) = notifier.close().await {
        output::warn(&e.to_string());
    }
    sent?;

    output::ok("Telegram test message sent");
    output::note("Check Telegram for the message.");
    Ok(())
}

/// Send a test message through the configured bot (non-Telegram variant).
#[cfg(not(feature = "telegram"))]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let destination = Destination::new(config.require_chat_id()?);
    output::warn(&format!(
        "Built without the telegram feature, nothing sent to {destination}"
    ));
    Ok(())
}
