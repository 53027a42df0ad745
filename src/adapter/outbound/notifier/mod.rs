//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for chat backends. The log-only
//! notifier used for dry runs lives with the port.

#[cfg(feature = "telegram")]
pub mod telegram;
