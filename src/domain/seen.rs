//! The set of listing identities already selected for notification.

use std::collections::HashSet;

use super::listing::{Listing, ListingKey};

/// Identities selected in any previous cycle.
///
/// Owned by the caller for the duration of one cycle: loaded from a
/// [`SeenStore`](crate::port::outbound::store::SeenStore), grown with the
/// cycle's selection, then saved back. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenListings {
    keys: HashSet<ListingKey>,
}

impl SeenListings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &ListingKey) -> bool {
        self.keys.contains(key)
    }

    /// Add a batch of identities. Returns how many were not already present.
    pub fn insert_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = ListingKey>,
    {
        keys.into_iter()
            .filter(|key| self.keys.insert(key.clone()))
            .count()
    }

    /// Keep candidates whose identity is unknown, in discovery order.
    ///
    /// Repeats of the same identity within one batch are collapsed to the
    /// first occurrence.
    #[must_use]
    pub fn select_unseen<I>(&self, candidates: I) -> Vec<Listing>
    where
        I: IntoIterator<Item = Listing>,
    {
        let mut batch = HashSet::new();
        candidates
            .into_iter()
            .filter(|listing| !self.contains(listing.key()))
            .filter(|listing| batch.insert(listing.key().clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListingKey> {
        self.keys.iter()
    }

    /// Identities in a stable order, used for serialization.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&ListingKey> {
        let mut keys: Vec<_> = self.keys.iter().collect();
        keys.sort();
        keys
    }
}

impl FromIterator<ListingKey> for SeenListings {
    fn from_iter<T: IntoIterator<Item = ListingKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
