//! Persistence port for the seen-listings set.

use crate::domain::SeenListings;
use crate::error::PersistenceError;

/// Durable storage for [`SeenListings`].
///
/// After `save` returns `Ok`, a later `load` (in this or another process)
/// observes exactly the saved identities.
pub trait SeenStore: Send + Sync {
    /// Read the persisted set. A store that was never saved loads as empty.
    fn load(&self) -> Result<SeenListings, PersistenceError>;

    /// Replace the persisted set with `seen`.
    fn save(&self, seen: &SeenListings) -> Result<(), PersistenceError>;
}
