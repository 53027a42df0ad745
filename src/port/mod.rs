//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the cycle meets the outside world: the page
//! the listings come from, the file the seen set lives in, the chat the
//! notifications go to, and the pacing policy between sends.
//!
//! ```text
//!  ┌──────────────┐   ┌─────────────────────────┐   ┌───────────┐
//!  │ListingSource │──▶│  Application (cycle)    │──▶│ Notifier  │
//!  └──────────────┘   │  Domain + Port          │   └───────────┘
//!                     └────────────┬────────────┘
//!                                  ▼
//!                            ┌───────────┐
//!                            │ SeenStore │
//!                            └───────────┘
//! ```

pub mod outbound;

pub use outbound::notifier::{Destination, LogNotifier, Message, Notifier};
pub use outbound::pacer::Pacer;
pub use outbound::source::ListingSource;
pub use outbound::store::SeenStore;
