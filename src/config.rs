//! Timing configuration.

use std::time::Duration;

use crate::annotations::DEFAULT_TTL;

pub const DEFAULT_TICK: Duration = Duration::from_millis(1000);
pub const DEFAULT_CALC_DELAY: Duration = Duration::from_millis(500);

/// Timing of the calculation and live-update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Period of the live-update tick
    pub tick: Duration,
    /// Pause before a calculation produces results
    pub calc_delay: Duration,
    /// How long a field error stays on screen
    pub error_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            calc_delay: DEFAULT_CALC_DELAY,
            error_ttl: DEFAULT_TTL,
        }
    }
}
