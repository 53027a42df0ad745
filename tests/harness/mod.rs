//! Test doubles and fixtures shared by the integration tests.

#![allow(dead_code)]

pub mod recording_notifier;
pub mod scripted_source;
pub mod temp_store;

use lotwatch::domain::RawListing;

/// A raw record as the Avito parser would produce it.
pub fn raw(name: &str, price: &str, path: &str) -> RawListing {
    RawListing {
        name: name.to_string(),
        price: Some(price.to_string()),
        description: format!("{name} description"),
        image: None,
        detail_path: path.to_string(),
    }
}
