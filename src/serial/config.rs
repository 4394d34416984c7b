//! Serial link configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the serial link and loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Baud rate the port is opened at
    pub baud_rate: u32,
    /// Read timeout applied when opening the port, in milliseconds
    pub read_timeout_ms: u64,
    /// Pause after each transmitted line, in milliseconds
    pub write_delay_ms: u64,
    /// Idle delay between monitoring cycles, in milliseconds
    pub idle_delay_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: crate::DEFAULT_BAUD_RATE,
            read_timeout_ms: crate::DEFAULT_READ_TIMEOUT_MS,
            write_delay_ms: crate::DEFAULT_WRITE_DELAY_MS,
            idle_delay_ms: crate::DEFAULT_IDLE_DELAY_MS,
        }
    }
}

impl LinkConfig {
    /// Create a new link configuration with a custom baud rate.
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Default::default()
        }
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the read timeout in milliseconds.
    pub fn with_read_timeout_ms(mut self, read_timeout_ms: u64) -> Self {
        self.read_timeout_ms = read_timeout_ms;
        self
    }

    /// Set the pause after each transmitted line in milliseconds.
    pub fn with_write_delay_ms(mut self, write_delay_ms: u64) -> Self {
        self.write_delay_ms = write_delay_ms;
        self
    }

    /// Set the idle delay between monitoring cycles in milliseconds.
    pub fn with_idle_delay_ms(mut self, idle_delay_ms: u64) -> Self {
        self.idle_delay_ms = idle_delay_ms;
        self
    }

    /// Read timeout as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Inter-write delay as a [`Duration`].
    pub fn write_delay(&self) -> Duration {
        Duration::from_millis(self.write_delay_ms)
    }

    /// Idle delay as a [`Duration`].
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }
}
