//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters to run
//! one watch cycle.

pub mod cycle;
pub mod delivery;
pub mod lock;
pub mod pacing;

pub use cycle::{load_or_empty, Cycle, CycleReport, CycleStats};
pub use delivery::{Delivery, DeliveryLoop, DeliveryReport, DeliveryState};
pub use lock::{CycleLock, CycleLockGuard};
pub use pacing::{FixedWindowPacer, NoopPacer};
