//! Marketplace listing types.
//!
//! A [`Listing`] carries the full payload of one accepted item, while its
//! [`ListingKey`] is the identity used for deduplication. Two listings with
//! the same key are the same listing even when their description or image
//! differ.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a listing: `(title, price, page_url)`.
///
/// Fields are private so the identity cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingKey {
    title: String,
    price: u64,
    page_url: String,
}

impl ListingKey {
    /// Create a new identity key.
    pub fn new(title: impl Into<String>, price: u64, page_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            page_url: page_url.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn price(&self) -> u64 {
        self.price
    }

    #[must_use]
    pub fn page_url(&self) -> &str {
        &self.page_url
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.title, self.price, self.page_url)
    }
}

/// An accepted marketplace item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    key: ListingKey,
    /// Preview image URL, empty when the page had none.
    pub image_url: String,
    pub description: String,
}

impl Listing {
    pub fn new(
        title: impl Into<String>,
        price: u64,
        page_url: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: ListingKey::new(title, price, page_url),
            image_url: image_url.into(),
            description: description.into(),
        }
    }

    /// The identity used for deduplication.
    #[must_use]
    pub const fn key(&self) -> &ListingKey {
        &self.key
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.key.title()
    }

    #[must_use]
    pub const fn price(&self) -> u64 {
        self.key.price()
    }

    #[must_use]
    pub fn page_url(&self) -> &str {
        self.key.page_url()
    }
}

/// A raw candidate record as extracted from the listing page.
///
/// Nothing here has been validated yet; the filter turns it into a
/// [`Listing`] or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub name: String,
    /// Price as embedded in the page metadata, usually a bare integer string.
    pub price: Option<String>,
    pub description: String,
    pub image: Option<String>,
    /// Detail page path relative to the site domain.
    pub detail_path: String,
}
