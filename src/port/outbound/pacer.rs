//! Pacing port for the delivery loop.

use async_trait::async_trait;

/// Rate policy consulted before every send attempt.
///
/// Implementations may suspend the caller to respect the channel's outbound
/// rate limit. `index` is the 0-based position of the attempt in the cycle.
#[async_trait]
pub trait Pacer: Send {
    async fn before_send(&mut self, index: usize);
}
