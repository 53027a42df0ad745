//! Seen-listings storage backends.

mod file;
mod memory;

pub use file::FileSeenStore;
pub use memory::MemorySeenStore;
