//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the listing page, the durable seen set, the
//! notification channel, and the send pacing policy.

pub mod notifier;
pub mod pacer;
pub mod source;
pub mod store;
