//! Send pacing policies for the delivery loop.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use crate::port::Pacer;

/// Pauses once after every full window of send attempts.
///
/// With a window of 10 the loop sleeps before attempts 10, 20, 30, ...
/// Failed attempts count toward the window like successful ones.
#[derive(Debug, Clone)]
pub struct FixedWindowPacer {
    window: usize,
    pause: Duration,
    pauses: usize,
}

impl FixedWindowPacer {
    /// A window of 0 is treated as 1.
    #[must_use]
    pub fn new(window: usize, pause: Duration) -> Self {
        Self {
            window: window.max(1),
            pause,
            pauses: 0,
        }
    }

    /// Whether a pause precedes the attempt at `index`.
    #[must_use]
    pub const fn should_pause(&self, index: usize) -> bool {
        index > 0 && index % self.window == 0
    }

    /// Number of pauses taken so far.
    #[must_use]
    pub const fn pauses(&self) -> usize {
        self.pauses
    }
}

impl Default for FixedWindowPacer {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(10))
    }
}

#[async_trait]
impl Pacer for FixedWindowPacer {
    async fn before_send(&mut self, index: usize) {
        if self.should_pause(index) {
            debug!(index, pause = ?self.pause, "Pausing before next send window");
            self.pauses += 1;
            sleep(self.pause).await;
        }
    }
}

/// Never pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn before_send(&mut self, _index: usize) {}
}
