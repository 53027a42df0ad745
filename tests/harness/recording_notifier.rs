use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lotwatch::error::{ChannelCloseError, DeliveryError};
use lotwatch::port::{Destination, Message, Notifier};

/// Thread-safe message collector for notification assertions in tests.
///
/// Sends whose 0-based attempt index is in `fail_at` return an error and
/// are not recorded. An optional hook runs at the start of every send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<(Destination, Message)>>>,
    fail_at: Arc<HashSet<usize>>,
    attempts: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    on_send: Option<Arc<dyn Fn(usize) + Send + Sync>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_at: Arc::new(indices.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn on_send(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_send = Some(Arc::new(hook));
        self
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .expect("lock notifier messages")
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn listing_titles(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Listing(l) => Some(l.title().to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        destination: &Destination,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = &self.on_send {
            hook(attempt);
        }
        if self.fail_at.contains(&attempt) {
            return Err(DeliveryError::Send(format!("scripted failure at {attempt}")));
        }
        self.messages
            .lock()
            .expect("lock notifier messages")
            .push((destination.clone(), message.clone()));
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelCloseError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
