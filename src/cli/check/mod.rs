//! Diagnostic commands that validate setup without running a cycle.

mod config;
mod telegram;

pub use config::execute_config;
pub use telegram::execute_telegram;
