use crate::{ConfigErrorResult, ensure_within};

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Deserialize;

const FAILURE_THRESHOLD: RangeInclusive<u32> = 1..=100;
const OPEN_SECS: RangeInclusive<u64> = 1..=300;
const HALF_OPEN_SUCCESSES: RangeInclusive<u32> = 1..=50;
const FAILURE_WINDOW_SECS: RangeInclusive<u64> = 1..=600;

/// Breaker tuning shared by every downstream client. The identity, tenant
/// and resource authorities plus the proxied backends each get their own
/// breaker instance built from these values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_duration_secs: u64,
    /// Consecutive successes while half-open before the breaker closes
    pub half_open_success_threshold: u32,
    pub failure_window_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_duration_secs: 30,
            half_open_success_threshold: 3,
            failure_window_secs: 60,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_within(
            "circuit_breaker.failure_threshold",
            self.failure_threshold,
            FAILURE_THRESHOLD,
        )?;
        ensure_within(
            "circuit_breaker.open_duration_secs",
            self.open_duration_secs,
            OPEN_SECS,
        )?;
        ensure_within(
            "circuit_breaker.half_open_success_threshold",
            self.half_open_success_threshold,
            HALF_OPEN_SUCCESSES,
        )?;
        ensure_within(
            "circuit_breaker.failure_window_secs",
            self.failure_window_secs,
            FAILURE_WINDOW_SECS,
        )
    }

    pub fn open_duration(&self) -> Duration {
        Duration::from_secs(self.open_duration_secs)
    }

    pub fn failure_window(&self) -> Duration {
        Duration::from_secs(self.failure_window_secs)
    }
}
