//! Telegram Bot API notifier.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use tracing::{debug, info};

use super::format::format_message;
use crate::error::{ChannelCloseError, DeliveryError};
use crate::port::{Destination, Message, Notifier};

/// Notifier that posts messages to Telegram chats.
///
/// Sends are awaited so the caller sees every failure. After
/// [`Notifier::close`] the notifier refuses further sends.
pub struct TelegramNotifier {
    bot: Bot,
    closed: AtomicBool,
}

impl TelegramNotifier {
    /// Create a notifier for the bot identified by `bot_token`.
    #[must_use]
    pub fn new(bot_token: &str) -> Self {
        Self {
            bot: Bot::new(bot_token),
            closed: AtomicBool::new(false),
        }
    }
}

/// Numeric destinations are chat IDs, anything else a `@channel` username.
fn recipient(destination: &Destination) -> Recipient {
    match destination.as_str().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(destination.as_str().to_string()),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(
        &self,
        destination: &Destination,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DeliveryError::Closed);
        }

        let text = format_message(message);
        self.bot
            .send_message(recipient(destination), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        debug!(destination = %destination, "Telegram message sent");
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelCloseError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(ChannelCloseError("already closed".into()));
        }
        info!("Telegram notifier closed");
        Ok(())
    }
}
