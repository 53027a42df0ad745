//! Factory functions for wiring components from configuration.

mod cycle;
mod notifier;

pub use cycle::{build_cycle, build_store};
pub use notifier::{build_destination, build_notifier};
