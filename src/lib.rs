//! lotwatch - Marketplace listing watcher with Telegram notifications.
//!
//! Each invocation runs one cycle: fetch a search results page, keep the
//! listings whose name and price match the filter, drop the ones already
//! notified in earlier runs, remember the rest and send them to a chat.
//!
//! # Architecture
//!
//! - **`domain`** - Listings, identity keys, the filter and the seen set
//! - **`port`** - Traits at the seams: listing source, notifier, store, pacer
//! - **`adapter`** - Avito page source, Telegram notifier, JSON file store
//! - **`application`** - The cycle, the delivery loop and send pacing
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` - Telegram Bot API notifier (enabled by default)
//!
//! # Example
//!
//! ```no_run
//! use lotwatch::domain::{FilterCriteria, Listing, SeenListings};
//!
//! let criteria = FilterCriteria::new(20_000, 100_000, ["valve", "index"]);
//! assert!(criteria.matches_name("VALVE Index headset"));
//!
//! let mut seen = SeenListings::new();
//! let listing = Listing::new("Valve Index", 50_000, "https://www.avito.ru/1", "", "");
//! let fresh = seen.select_unseen(vec![listing]);
//! seen.insert_all(fresh.iter().map(|l| l.key().clone()));
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
