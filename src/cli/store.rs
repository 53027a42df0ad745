//! Handler for the `store` commands.

use crate::cli::{output, StoreStatsArgs};
use crate::domain::SeenListings;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::build_store;
use crate::port::SeenStore;

/// Print the size of the seen-listings store.
///
/// An unreadable store is reported and counted as empty, which is how the
/// next cycle will treat it.
pub fn execute_stats(args: &StoreStatsArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let store = build_store(&config);
    let seen = store.load().unwrap_or_else(|e| {
        output::warn(&format!("Store unreadable, treated as empty: {e}"));
        SeenListings::new()
    });

    output::section("Seen Listings");
    output::key_value("Store", store.path().display());
    output::key_value("Remembered", seen.len());

    if args.list {
        output::section("Listings");
        for key in seen.sorted_keys() {
            output::note(&key.to_string());
        }
    }

    Ok(())
}
