//! Loop configuration.

use crate::error::ConfigError;
use std::time::Duration;

/// Default number of free event records kept by the tracker's pool.
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Default number of simultaneous contacts tracked.
pub const DEFAULT_MAX_POINTERS: usize = 10;

/// Default sleep when the consumer has nothing to draw.
pub const DEFAULT_IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Configuration shared by the tracker and the pacer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Maximum number of free event records retained between ticks.
    pub pool_capacity: usize,
    /// Number of pointer slots (simultaneous contacts).
    pub max_pointers: usize,
    /// How long the loop sleeps when `draw_request` yields no frame.
    pub idle_sleep: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            max_pointers: DEFAULT_MAX_POINTERS,
            idle_sleep: DEFAULT_IDLE_SLEEP,
        }
    }
}

impl LoopConfig {
    /// Set the event pool capacity.
    #[must_use]
    pub const fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Set the number of pointer slots.
    #[must_use]
    pub const fn with_max_pointers(mut self, max_pointers: usize) -> Self {
        self.max_pointers = max_pointers;
        self
    }

    /// Set the idle sleep duration.
    #[must_use]
    pub const fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool capacity or the pointer slot count is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_capacity == 0 {
            return Err(ConfigError::ZeroPoolCapacity);
        }
        if self.max_pointers == 0 {
            return Err(ConfigError::ZeroPointerSlots);
        }
        Ok(())
    }
}
