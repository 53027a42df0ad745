//! Cycle factory.

use std::sync::Arc;

use crate::adapter::outbound::avito::AvitoSource;
use crate::adapter::outbound::store::FileSeenStore;
use crate::application::{Cycle, CycleLock};
use crate::domain::ListingFilter;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Destination, Notifier};

/// The durable store named in the configuration.
#[must_use]
pub fn build_store(config: &Config) -> FileSeenStore {
    FileSeenStore::new(&config.store.path)
}

/// Wire a cycle over the configured Avito search page.
///
/// # Errors
///
/// Fails when the configured domain is not a valid base URL.
#[allow(clippy::result_large_err)]
pub fn build_cycle(
    config: &Config,
    notifier: Arc<dyn Notifier>,
    destination: Destination,
) -> Result<Cycle> {
    let filter = ListingFilter::new(config.filter.criteria(), config.base_url()?);
    let source = Arc::new(AvitoSource::from_config(&config.source));
    let store = Arc::new(build_store(config));
    let lock = CycleLock::new(config.store.lock_path(), config.store.lock_stale_after());

    Ok(Cycle::new(source, filter, store, notifier, destination)
        .with_send_timeout(config.delivery.send_timeout())
        .with_lock(lock))
}
