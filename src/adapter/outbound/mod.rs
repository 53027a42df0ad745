//! Outbound adapters (driven side).

pub mod avito;
pub mod notifier;
pub mod store;
