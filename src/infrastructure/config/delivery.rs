//! Delivery pacing configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::FixedWindowPacer;

const fn default_batch_size() -> usize {
    10
}

const fn default_pause_secs() -> u64 {
    10
}

/// Pacing and timeout settings for the delivery loop.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Send attempts per window before a pause.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
    /// Upper bound on a single send. Unbounded when absent.
    #[serde(default)]
    pub send_timeout_secs: Option<u64>,
}

impl DeliveryConfig {
    #[must_use]
    pub fn pacer(&self) -> FixedWindowPacer {
        FixedWindowPacer::new(self.batch_size, Duration::from_secs(self.pause_secs))
    }

    #[must_use]
    pub fn send_timeout(&self) -> Option<Duration> {
        self.send_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            pause_secs: default_pause_secs(),
            send_timeout_secs: None,
        }
    }
}
