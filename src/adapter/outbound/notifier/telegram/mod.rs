//! Telegram notification channel.
//!
//! Delivers listing notifications to one chat through the Bot API using
//! `MarkdownV2` markup.

mod format;
mod notifier;

pub use format::{escape_markdown, format_message};
pub use notifier::TelegramNotifier;
