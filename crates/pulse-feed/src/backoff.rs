//! Capped exponential backoff for reconnect attempts

use crate::FeedConfig;
use std::time::Duration;

/// Reconnect delay schedule: `initial`, `initial × factor`, ... up to `max`
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    factor: f64,
    current: Duration,
    attempts: u32,
}

impl Backoff {
    /// Create a schedule
    pub fn new(initial: Duration, max: Duration, factor: f64) -> Self {
        let initial = initial.min(max);
        Self {
            initial,
            max,
            factor: if factor.is_finite() { factor.max(1.0) } else { 1.0 },
            current: initial,
            attempts: 0,
        }
    }

    /// Schedule described by a feed configuration
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(
            config.initial_backoff(),
            config.max_backoff(),
            config.backoff_factor,
        )
    }

    /// Delay before the next attempt; advances the schedule
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = Duration::try_from_secs_f64(self.current.as_secs_f64() * self.factor)
            .map_or(self.max, |next| next.min(self.max));
        self.attempts = self.attempts.saturating_add(1);
        delay
    }

    /// Delays handed out since the last reset
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Start over from the initial delay
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.attempts = 0;
    }
}
