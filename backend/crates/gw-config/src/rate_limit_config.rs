use crate::{ConfigErrorResult, ensure_within};

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Deserialize;

const REQUESTS_PER_SUBJECT: RangeInclusive<u32> = 1..=10_000;
const WINDOW_SECS: RangeInclusive<u64> = 1..=3600;

/// Per-subject request quota. Anonymous traffic never reaches the limiter,
/// the identity stage rejects it first.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_within("rate_limit.max_requests", self.max_requests, REQUESTS_PER_SUBJECT)?;
        ensure_within("rate_limit.window_secs", self.window_secs, WINDOW_SECS)
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}
