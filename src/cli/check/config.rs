use std::path::Path;

use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file without starting a cycle.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::section("Configuration Check");
    output::key_value("File", path.display());

    if !path.exists() {
        output::warn("Configuration file not found, built-in defaults apply");
    }

    let config = Config::load_or_default(path)?;
    output::ok("Configuration is valid");

    output::section("Summary");
    output::key_value("Search URL", &config.source.search_url);
    output::key_value(
        "Price range",
        format!("{}..={}", config.filter.min_price, config.filter.max_price),
    );
    output::key_value("Keywords", config.filter.keywords.join(", "));
    output::key_value("Store", config.store.path.display());
    output::key_value("Lock", config.store.lock_path().display());
    output::key_value(
        "Pacing",
        format!(
            "{} sends, then {}s pause",
            config.delivery.batch_size, config.delivery.pause_secs
        ),
    );
    output::key_value("Dry-run", config.dry_run);

    output::section("Telegram");
    match config.telegram.bot_token.as_deref() {
        Some(token) => output::key_value("Bot token", output::mask_secret(token)),
        None => output::warn("No bot token, set BOT_TOKEN to send notifications"),
    }
    match config.telegram.chat_id.as_deref() {
        Some(chat_id) => output::key_value("Chat ID", chat_id),
        None => output::warn("No chat ID, set telegram.chat_id or TELEGRAM_CHAT_ID"),
    }

    Ok(())
}
