//! Retry policy and backoff schedule.

use crate::domain::AdminError;
use std::time::Duration;

/// Bounded exponential backoff.
///
/// `delay_for(n) = min(base_delay * multiplier^(n-1), max_delay)` with `n`
/// 1-indexed. The policy does not count calls itself; the invoker stops after
/// `max_attempts` total attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            backoff_multiplier: 2.0,
            max_delay_ms: 8000,
        }
    }
}

impl RetryPolicy {
    /// Total call attempts allowed. Never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after failed attempt `attempt` (1-indexed) before the next one.
    /// `attempt == 0` is treated as 1.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.base_delay_ms == 0 {
            return Duration::ZERO;
        }
        // powi takes i32; saturate larger attempt numbers.
        let exponent = i32::try_from(attempt.max(1) - 1).unwrap_or(i32::MAX);
        let factor = self.backoff_multiplier.max(0.0).powi(exponent);
        let raw = self.base_delay_ms as f64 * factor;
        let capped = raw.min(self.max_delay_ms as f64);
        Duration::from_millis(capped.round() as u64)
    }
}

/// One retry about to happen. Emitted to the attempt sink, never persisted.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub action: String,
    /// 1-indexed number of the attempt that just failed.
    pub attempt_number: u32,
    pub delay: Duration,
    pub error: AdminError,
}

impl AttemptRecord {
    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }
}
