//! In-memory store implementation for testing.

use parking_lot::Mutex;

use crate::domain::SeenListings;
use crate::error::PersistenceError;
use crate::port::SeenStore;

/// In-memory [`SeenStore`] for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    seen: Mutex<SeenListings>,
    saves: Mutex<usize>,
}

impl MemorySeenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set, as if it had been saved earlier.
    #[must_use]
    pub fn with_seen(seen: SeenListings) -> Self {
        Self {
            seen: Mutex::new(seen),
            saves: Mutex::new(0),
        }
    }

    /// Copy of the currently persisted set.
    #[must_use]
    pub fn snapshot(&self) -> SeenListings {
        self.seen.lock().clone()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl SeenStore for MemorySeenStore {
    fn load(&self) -> Result<SeenListings, PersistenceError> {
        Ok(self.seen.lock().clone())
    }

    fn save(&self, seen: &SeenListings) -> Result<(), PersistenceError> {
        *self.seen.lock() = seen.clone();
        *self.saves.lock() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListingKey;

    #[test]
    fn save_replaces_contents() {
        let store = MemorySeenStore::new();
        let seen: SeenListings = [ListingKey::new("a", 1, "u")].into_iter().collect();

        store.save(&seen).unwrap();

        assert_eq!(store.load().unwrap(), seen);
        assert_eq!(store.save_count(), 1);
    }
}
