//! Notifier port for outbound messages.
//!
//! This module defines the trait for delivering listing notifications and
//! cycle diagnostics to an operator chat.

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use crate::domain::Listing;
use crate::error::{ChannelCloseError, DeliveryError};

/// Identifier of the chat or user that receives notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Messages the cycle can send.
///
/// Adapters decide the markup: a listing is rendered as its title linked to
/// the page URL followed by an emphasised price label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A newly selected listing.
    Listing(Listing),
    /// Human-readable report that the fetch stage failed.
    Diagnostic(String),
    /// Plain operator notice, e.g. a connectivity test.
    Notice(String),
}

/// Outbound notification channel.
///
/// # Implementation Notes
///
/// - `send` reports failures instead of swallowing them; the delivery loop
///   decides whether to continue.
/// - `close` releases the channel. Sends after `close` fail with
///   [`DeliveryError::Closed`].
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, destination: &Destination, message: &Message)
        -> Result<(), DeliveryError>;

    async fn close(&self) -> Result<(), ChannelCloseError>;
}

/// A notifier that writes messages to the log instead of a chat.
///
/// Used for dry runs.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(
        &self,
        destination: &Destination,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        match message {
            Message::Listing(listing) => {
                info!(
                    destination = %destination,
                    title = %listing.title(),
                    price = listing.price(),
                    url = %listing.page_url(),
                    "Listing notification (dry run)"
                );
            }
            Message::Diagnostic(text) => {
                info!(destination = %destination, text = %text, "Diagnostic notification (dry run)");
            }
            Message::Notice(text) => {
                info!(destination = %destination, text = %text, "Notice (dry run)");
            }
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelCloseError> {
        Ok(())
    }
}
