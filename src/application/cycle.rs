//! One fetch → filter → dedup → persist → deliver pass.
//!
//! Recovery points, per error kind:
//!
//! - [`PersistenceError`](crate::error::PersistenceError) on load: start
//!   from an empty set. On save: log and keep delivering.
//! - [`SourceError`](crate::error::SourceError): send a best-effort
//!   diagnostic to the destination and end the cycle.
//! - [`DeliveryError`](crate::error::DeliveryError): handled per listing by
//!   the delivery loop.
//! - [`ChannelCloseError`](crate::error::ChannelCloseError): logged.
//!
//! Listings are marked seen when they are selected, before delivery, so a
//! failed send is not retried by a later cycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::delivery::{DeliveryLoop, DeliveryReport};
use super::lock::CycleLock;
use crate::domain::{Listing, ListingFilter, RawListing, SeenListings};
use crate::error::SourceError;
use crate::port::{Destination, ListingSource, Message, Notifier, Pacer, SeenStore};

/// Counters for one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Raw records returned by the source.
    pub fetched: usize,
    /// Records that passed the filter.
    pub accepted: usize,
    /// Accepted listings not seen before.
    pub selected: usize,
    pub sent: usize,
    pub failed: usize,
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    /// Fetch succeeded; every selected listing was attempted.
    Completed {
        stats: CycleStats,
        deliveries: DeliveryReport,
    },
    /// The source failed; nothing was selected or saved.
    SourceFailed {
        error: String,
        diagnostic_sent: bool,
    },
    /// Another cycle holds the lock.
    Skipped { reason: String },
}

/// Load the seen set, treating any failure as an empty set.
///
/// A corrupt or unreadable store may cause repeat notifications on this
/// run, but never stops the pipeline.
pub fn load_or_empty(store: &dyn SeenStore) -> SeenListings {
    match store.load() {
        Ok(seen) => seen,
        Err(e) => {
            error!(error = %e, "Failed to load seen listings, starting empty");
            SeenListings::new()
        }
    }
}

/// Wiring for one cycle.
pub struct Cycle {
    source: Arc<dyn ListingSource>,
    filter: ListingFilter,
    store: Arc<dyn SeenStore>,
    notifier: Arc<dyn Notifier>,
    destination: Destination,
    send_timeout: Option<Duration>,
    lock: Option<CycleLock>,
}

impl Cycle {
    pub fn new(
        source: Arc<dyn ListingSource>,
        filter: ListingFilter,
        store: Arc<dyn SeenStore>,
        notifier: Arc<dyn Notifier>,
        destination: Destination,
    ) -> Self {
        Self {
            source,
            filter,
            store,
            notifier,
            destination,
            send_timeout: None,
            lock: None,
        }
    }

    #[must_use]
    pub const fn with_send_timeout(mut self, send_timeout: Option<Duration>) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    #[must_use]
    pub fn with_lock(mut self, lock: CycleLock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Run the cycle and release the notification channel.
    pub async fn run(&self, pacer: &mut dyn Pacer) -> CycleReport {
        let report = match self.lock.as_ref().map(CycleLock::acquire).transpose() {
            Ok(_guard) => self.run_locked(pacer).await,
            Err(e) => {
                warn!(error = %e, "Skipping cycle");
                CycleReport::Skipped {
                    reason: e.to_string(),
                }
            }
        };

        if let Err(e) = self.notifier.close().await {
            warn!(error = %e, "Failed to close notification channel");
        }

        report
    }

    async fn run_locked(&self, pacer: &mut dyn Pacer) -> CycleReport {
        let mut seen = load_or_empty(self.store.as_ref());
        debug!(known = seen.len(), "Seen listings loaded");

        let raw = match self.source.fetch().await {
            Ok(raw) => raw,
            Err(e) => return self.report_source_failure(e).await,
        };
        let fetched = raw.len();

        let accepted = self.accept_all(raw);
        let accepted_count = accepted.len();

        let selected = seen.select_unseen(accepted);
        seen.insert_all(selected.iter().map(|l| l.key().clone()));

        if let Err(e) = self.store.save(&seen) {
            error!(error = %e, "Failed to persist seen listings");
        }

        let deliveries = DeliveryLoop::new(self.notifier.as_ref(), &self.destination)
            .with_send_timeout(self.send_timeout)
            .run(&selected, pacer)
            .await;

        let stats = CycleStats {
            fetched,
            accepted: accepted_count,
            selected: selected.len(),
            sent: deliveries.sent(),
            failed: deliveries.failed(),
        };
        info!(
            source = self.source.name(),
            fetched = stats.fetched,
            accepted = stats.accepted,
            selected = stats.selected,
            sent = stats.sent,
            failed = stats.failed,
            known = seen.len(),
            "Cycle complete"
        );

        CycleReport::Completed { stats, deliveries }
    }

    fn accept_all(&self, raw: Vec<RawListing>) -> Vec<Listing> {
        raw.into_iter()
            .filter_map(|record| {
                let name = record.name.clone();
                match self.filter.accept(record) {
                    Ok(listing) => Some(listing),
                    Err(rejection) => {
                        debug!(name = %name, reason = %rejection, "Listing rejected");
                        None
                    }
                }
            })
            .collect()
    }

    async fn report_source_failure(&self, err: SourceError) -> CycleReport {
        error!(source = self.source.name(), error = %err, "Failed to fetch listings");

        let text = format!("{} fetch failed: {err}", self.source.name());
        let diagnostic_sent = match DeliveryLoop::new(self.notifier.as_ref(), &self.destination)
            .with_send_timeout(self.send_timeout)
            .send(&Message::Diagnostic(text))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to send failure diagnostic");
                false
            }
        };

        CycleReport::SourceFailed {
            error: err.to_string(),
            diagnostic_sent,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use url::Url;

    use super::*;
    use crate::adapter::outbound::store::MemorySeenStore;
    use crate::application::pacing::NoopPacer;
    use crate::domain::{FilterCriteria, ListingKey};
    use crate::error::{ChannelCloseError, DeliveryError, PersistenceError};

    struct StaticSource(Result<Vec<RawListing>, String>);

    #[async_trait]
    impl ListingSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<RawListing>, SourceError> {
            self.0.clone().map_err(SourceError::Parse)
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<Message>>,
        fail_all: bool,
        closed: Mutex<usize>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn send(&self, _: &Destination, message: &Message) -> Result<(), DeliveryError> {
            self.messages.lock().push(message.clone());
            if self.fail_all {
                return Err(DeliveryError::Send("down".into()));
            }
            Ok(())
        }

        async fn close(&self) -> Result<(), ChannelCloseError> {
            *self.closed.lock() += 1;
            Ok(())
        }
    }

    struct BrokenStore;

    impl SeenStore for BrokenStore {
        fn load(&self) -> Result<SeenListings, PersistenceError> {
            Err(PersistenceError::Version {
                found: 0,
                expected: 1,
            })
        }

        fn save(&self, _: &SeenListings) -> Result<(), PersistenceError> {
            Err(PersistenceError::Encode(serde::ser::Error::custom("disk full")))
        }
    }

    fn raw(name: &str, price: u64, path: &str) -> RawListing {
        RawListing {
            name: name.into(),
            price: Some(price.to_string()),
            description: String::new(),
            image: None,
            detail_path: path.into(),
        }
    }

    fn filter() -> ListingFilter {
        ListingFilter::new(
            FilterCriteria::new(20_000, 100_000, ["valve", "index"]),
            Url::parse("https://www.avito.ru").unwrap(),
        )
    }

    fn cycle(
        source: StaticSource,
        store: Arc<dyn SeenStore>,
        notifier: Arc<Recorder>,
    ) -> Cycle {
        Cycle::new(
            Arc::new(source),
            filter(),
            store,
            notifier,
            Destination::new("1"),
        )
    }

    #[tokio::test]
    async fn rejected_and_known_listings_are_not_sent() {
        let known = ListingKey::new("Valve Index", 50_000, "https://www.avito.ru/a");
        let store = Arc::new(MemorySeenStore::with_seen([known].into_iter().collect()));
        let notifier = Arc::new(Recorder::default());
        let source = StaticSource(Ok(vec![
            raw("Valve Index", 50_000, "/a"),
            raw("Valve Index", 60_000, "/b"),
            raw("Oculus", 60_000, "/c"),
            raw("Index", 5_000, "/d"),
        ]));

        let report = cycle(source, store.clone(), notifier.clone())
            .run(&mut NoopPacer)
            .await;

        let stats = match report {
            CycleReport::Completed { stats, .. } => stats,
            other => panic!("expected completed cycle, got {other:?}"),
        };
        assert_eq!(
            stats,
            CycleStats {
                fetched: 4,
                accepted: 2,
                selected: 1,
                sent: 1,
                failed: 0
            }
        );
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(*notifier.closed.lock(), 1);
    }

    #[tokio::test]
    async fn source_failure_sends_diagnostic_and_keeps_store() {
        let store = Arc::new(MemorySeenStore::new());
        let notifier = Arc::new(Recorder::default());

        let report = cycle(StaticSource(Err("captcha".into())), store.clone(), notifier.clone())
            .run(&mut NoopPacer)
            .await;

        assert!(matches!(
            report,
            CycleReport::SourceFailed {
                diagnostic_sent: true,
                ..
            }
        ));
        let messages = notifier.messages.lock();
        assert!(matches!(&messages[0], Message::Diagnostic(t) if t.contains("captcha")));
        assert_eq!(store.save_count(), 0);
        assert_eq!(*notifier.closed.lock(), 1);
    }

    #[tokio::test]
    async fn failing_diagnostic_is_swallowed() {
        let notifier = Arc::new(Recorder {
            fail_all: true,
            ..Default::default()
        });

        let report = cycle(
            StaticSource(Err("timeout".into())),
            Arc::new(MemorySeenStore::new()),
            notifier.clone(),
        )
        .run(&mut NoopPacer)
        .await;

        assert!(matches!(
            report,
            CycleReport::SourceFailed {
                diagnostic_sent: false,
                ..
            }
        ));
        assert_eq!(*notifier.closed.lock(), 1);
    }

    #[tokio::test]
    async fn broken_store_still_delivers() {
        let notifier = Arc::new(Recorder::default());
        let source = StaticSource(Ok(vec![raw("Valve Index", 50_000, "/a")]));

        let report = cycle(source, Arc::new(BrokenStore), notifier.clone())
            .run(&mut NoopPacer)
            .await;

        assert!(matches!(report, CycleReport::Completed { .. }));
        assert_eq!(notifier.messages.lock().len(), 1);
    }

    #[tokio::test]
    async fn held_lock_skips_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let lock = CycleLock::new(dir.path().join("cycle.lock"), Duration::from_secs(3600));
        let _held = lock.acquire().unwrap();

        let notifier = Arc::new(Recorder::default());
        let report = cycle(
            StaticSource(Ok(vec![raw("Valve Index", 50_000, "/a")])),
            Arc::new(MemorySeenStore::new()),
            notifier.clone(),
        )
        .with_lock(lock)
        .run(&mut NoopPacer)
        .await;

        assert!(matches!(report, CycleReport::Skipped { .. }));
        assert!(notifier.messages.lock().is_empty());
    }
}
