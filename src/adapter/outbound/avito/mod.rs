//! Avito marketplace listing source.
//!
//! Fetches one search results page over HTTP and extracts the result
//! cards into raw listing records.

mod client;
mod parse;
pub mod settings;

pub use client::AvitoSource;
pub use parse::parse_listings;
pub use settings::{AvitoConfig, AvitoHttpConfig};
