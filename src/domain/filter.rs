//! Name and price filter over raw listing records.

use thiserror::Error;
use url::Url;

use super::listing::{Listing, RawListing};

/// Inclusive price interval and keyword set an item must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    min_price: u64,
    max_price: u64,
    /// Stored lowercased.
    keywords: Vec<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(min_price: u64, max_price: u64, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            min_price,
            max_price,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub const fn min_price(&self) -> u64 {
        self.min_price
    }

    #[must_use]
    pub const fn max_price(&self) -> u64 {
        self.max_price
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Case-insensitive substring match against any keyword.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }

    #[must_use]
    pub const fn price_in_range(&self, price: u64) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}

/// Why a raw record was not turned into a listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("name {0:?} matches no keyword")]
    NoKeyword(String),

    #[error("no price")]
    MissingPrice,

    #[error("unparsable price {0:?}")]
    InvalidPrice(String),

    #[error("price {0} outside range")]
    PriceOutOfRange(u64),

    #[error("cannot resolve detail path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}

/// Turns raw records into accepted [`Listing`]s.
///
/// Pure: the only inputs are the record and the fixed criteria and site URL.
#[derive(Debug, Clone)]
pub struct ListingFilter {
    criteria: FilterCriteria,
    base_url: Url,
}

impl ListingFilter {
    #[must_use]
    pub const fn new(criteria: FilterCriteria, base_url: Url) -> Self {
        Self { criteria, base_url }
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Accept or reject one raw record.
    ///
    /// The keyword check runs first so off-topic items are rejected
    /// regardless of their price.
    pub fn accept(&self, raw: RawListing) -> Result<Listing, Rejection> {
        if !self.criteria.matches_name(&raw.name) {
            return Err(Rejection::NoKeyword(raw.name));
        }

        let price = parse_price(raw.price.as_deref())?;
        if !self.criteria.price_in_range(price) {
            return Err(Rejection::PriceOutOfRange(price));
        }

        let page_url = self
            .base_url
            .join(&raw.detail_path)
            .map_err(|e| Rejection::InvalidPath {
                path: raw.detail_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Listing::new(
            raw.name.trim(),
            price,
            page_url.as_str(),
            raw.image.unwrap_or_default(),
            raw.description,
        ))
    }
}

/// Parse a metadata price such as `"45000"` or `"45 000"`.
fn parse_price(raw: Option<&str>) -> Result<u64, Rejection> {
    let raw = raw.ok_or(Rejection::MissingPrice)?;
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Err(Rejection::MissingPrice);
    }
    digits
        .parse()
        .map_err(|_| Rejection::InvalidPrice(raw.to_string()))
}
