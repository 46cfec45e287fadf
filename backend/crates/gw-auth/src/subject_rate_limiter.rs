use crate::{AuthError, RateLimitConfig, Result};

use std::num::NonZeroU32;
use std::panic::Location;

use error_location::ErrorLocation;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Per-subject rate limiter.
///
/// Each subject may burst up to `max_requests` and regains capacity evenly
/// across the window.
pub struct SubjectRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    config: RateLimitConfig,
}

impl SubjectRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::MIN.saturating_add(config.max_requests.saturating_sub(1));
        let period = config.window() / burst.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Check if a request from `subject` is allowed, returns error if rate limited
    #[track_caller]
    pub fn check(&self, subject: &str) -> Result<()> {
        self.limiter
            .check_key(&subject.to_string())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_requests,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Forget subjects whose capacity has fully recovered.
    pub fn prune(&self) {
        self.limiter.retain_recent();
    }

    pub fn tracked_subjects(&self) -> usize {
        self.limiter.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
