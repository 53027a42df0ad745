//! Infrastructure configuration modules.

pub mod delivery;
pub mod filter;
pub mod logging;
pub mod settings;
pub mod store;
pub mod telegram;
