//! Marketplace-agnostic domain logic.

mod filter;
mod listing;
mod seen;

pub use filter::{FilterCriteria, ListingFilter, Rejection};
pub use listing::{Listing, ListingKey, RawListing};
pub use seen::SeenListings;
