//! Delivery loop for newly selected listings.
//!
//! Each listing moves from [`DeliveryState::Pending`] to either
//! [`DeliveryState::Sent`] or [`DeliveryState::Failed`]. A failed send is
//! logged and the loop moves on; one bad message never blocks the rest.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::domain::{Listing, ListingKey};
use crate::error::DeliveryError;
use crate::port::{Destination, Message, Notifier, Pacer};

/// Per-listing delivery state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryState {
    /// Selected, not yet attempted.
    Pending,
    /// The channel accepted the message.
    Sent,
    /// The send failed; carries the reason.
    Failed(String),
}

impl DeliveryState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Outcome of delivering one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub key: ListingKey,
    pub state: DeliveryState,
}

/// Outcomes of one delivery loop, in attempt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub deliveries: Vec<Delivery>,
}

impl DeliveryReport {
    #[must_use]
    pub fn sent(&self) -> usize {
        self.count(|s| matches!(s, DeliveryState::Sent))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DeliveryState::Failed(_)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    fn count(&self, pred: impl Fn(&DeliveryState) -> bool) -> usize {
        self.deliveries.iter().filter(|d| pred(&d.state)).count()
    }
}

/// Sends listing notifications one at a time through a [`Notifier`].
pub struct DeliveryLoop<'a> {
    notifier: &'a dyn Notifier,
    destination: &'a Destination,
    send_timeout: Option<Duration>,
}

impl<'a> DeliveryLoop<'a> {
    #[must_use]
    pub fn new(notifier: &'a dyn Notifier, destination: &'a Destination) -> Self {
        Self {
            notifier,
            destination,
            send_timeout: None,
        }
    }

    /// Bound every send; an expired send counts as failed.
    #[must_use]
    pub const fn with_send_timeout(mut self, send_timeout: Option<Duration>) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// Attempt every listing in order, consulting `pacer` before each send.
    pub async fn run(&self, listings: &[Listing], pacer: &mut dyn Pacer) -> DeliveryReport {
        let mut deliveries: Vec<Delivery> = listings
            .iter()
            .map(|listing| Delivery {
                key: listing.key().clone(),
                state: DeliveryState::Pending,
            })
            .collect();

        for (index, (listing, delivery)) in listings.iter().zip(&mut deliveries).enumerate() {
            pacer.before_send(index).await;

            delivery.state = match self.send(&Message::Listing(listing.clone())).await {
                Ok(()) => {
                    info!(index, title = %listing.title(), price = listing.price(), "Listing sent");
                    DeliveryState::Sent
                }
                Err(e) => {
                    warn!(
                        index,
                        title = %listing.title(),
                        url = %listing.page_url(),
                        error = %e,
                        "Failed to deliver listing"
                    );
                    DeliveryState::Failed(e.to_string())
                }
            };
        }

        DeliveryReport { deliveries }
    }

    /// Send one message, applying the configured timeout.
    pub async fn send(&self, message: &Message) -> Result<(), DeliveryError> {
        let send = self.notifier.send(self.destination, message);
        match self.send_timeout {
            Some(limit) => timeout(limit, send)
                .await
                .map_err(|_| DeliveryError::Timeout(limit))?,
            None => send.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::application::pacing::{FixedWindowPacer, NoopPacer};
    use crate::error::ChannelCloseError;

    /// Fails the sends whose 0-based index is listed.
    #[derive(Default)]
    struct FlakyNotifier {
        fail_at: Vec<usize>,
        calls: AtomicUsize,
        sent_at: Mutex<Vec<tokio::time::Instant>>,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn send(&self, _: &Destination, _: &Message) -> Result<(), DeliveryError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent_at.lock().push(tokio::time::Instant::now());
            if self.fail_at.contains(&call) {
                Err(DeliveryError::Send(format!("boom at {call}")))
            } else {
                Ok(())
            }
        }

        async fn close(&self) -> Result<(), ChannelCloseError> {
            Ok(())
        }
    }

    struct HangingNotifier;

    #[async_trait]
    impl Notifier for HangingNotifier {
        async fn send(&self, _: &Destination, _: &Message) -> Result<(), DeliveryError> {
            std::future::pending().await
        }

        async fn close(&self) -> Result<(), ChannelCloseError> {
            Ok(())
        }
    }

    fn listings(n: usize) -> Vec<Listing> {
        (0..n)
            .map(|i| Listing::new(format!("Index {i}"), 50_000, format!("https://x/{i}"), "", ""))
            .collect()
    }

    #[tokio::test]
    async fn failed_send_does_not_stop_the_loop() {
        let notifier = FlakyNotifier {
            fail_at: vec![1],
            ..Default::default()
        };
        let dest = Destination::new("1");

        let report = DeliveryLoop::new(&notifier, &dest)
            .run(&listings(3), &mut NoopPacer)
            .await;

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 3);
        assert_eq!(report.sent(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(report.deliveries[1].state, DeliveryState::Failed(_)));
        assert!(report.deliveries.iter().all(|d| d.state.is_terminal()));
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_before_index_ten_and_twenty() {
        let notifier = FlakyNotifier {
            fail_at: vec![9],
            ..Default::default()
        };
        let dest = Destination::new("1");
        let mut pacer = FixedWindowPacer::new(10, Duration::from_secs(10));

        let report = DeliveryLoop::new(&notifier, &dest)
            .run(&listings(25), &mut pacer)
            .await;

        assert_eq!(report.deliveries.len(), 25);
        assert_eq!(pacer.pauses(), 2);

        let times = notifier.sent_at.lock().clone();
        let gaps: Vec<usize> = times
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[1] - w[0] >= Duration::from_secs(10))
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(gaps, vec![10, 20]);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_send_times_out() {
        let dest = Destination::new("1");
        let report = DeliveryLoop::new(&HangingNotifier, &dest)
            .with_send_timeout(Some(Duration::from_secs(5)))
            .run(&listings(2), &mut NoopPacer)
            .await;

        assert_eq!(report.failed(), 2);
    }

    #[tokio::test]
    async fn empty_input_sends_nothing() {
        let notifier = FlakyNotifier::default();
        let dest = Destination::new("1");

        let report = DeliveryLoop::new(&notifier, &dest)
            .run(&[], &mut NoopPacer)
            .await;

        assert!(report.is_empty());
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }
}
