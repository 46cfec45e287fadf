use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

// Defaults for downstream services:
// - Open after 5 failures in 60 seconds (failure_threshold/failure_window)
// - Stay open for 30 seconds before testing recovery (open_duration)
// - Require 3 consecutive successes to fully close (half_open_success_threshold)
const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
const DEFAULT_OPEN_DURATION_SECS: u64 = 30;
const DEFAULT_HALF_OPEN_SUCCESS_THRESHOLD: u32 = 3;
const DEFAULT_FAILURE_WINDOW_SECS: u64 = 60;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation - requests flow through
    Closed,
    /// Too many failures - requests rejected immediately
    Open,
    /// Testing if service recovered - requests allowed, one failure reopens
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Number of failures before opening circuit
    pub failure_threshold: u32,
    /// Duration to keep circuit open before testing
    pub open_duration: Duration,
    /// Number of successful requests in half-open to close circuit
    pub half_open_success_threshold: u32,
    /// Window for counting failures
    pub failure_window: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            open_duration: Duration::from_secs(DEFAULT_OPEN_DURATION_SECS),
            half_open_success_threshold: DEFAULT_HALF_OPEN_SUCCESS_THRESHOLD,
            failure_window: Duration::from_secs(DEFAULT_FAILURE_WINDOW_SECS),
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    window_started_at: Option<Instant>,
    opened_at: Option<Instant>,
}

/// Thread-safe circuit breaker
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                window_started_at: None,
                opened_at: None,
            }),
        }
    }

    // The critical sections never panic, so a poisoned lock still holds consistent state
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check if request should be allowed
    pub fn allow_request(&self) -> Result<(), CircuitBreakerError> {
        let mut inner = self.lock();

        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => Ok(()),
            CircuitState::Open => {
                let elapsed = inner
                    .opened_at
                    .map(|opened_at| opened_at.elapsed())
                    .unwrap_or(self.config.open_duration);

                if elapsed >= self.config.open_duration {
                    inner.state = CircuitState::HalfOpen;
                    inner.success_count = 0;
                    log::info!("Circuit breaker '{}' transitioning to HalfOpen", self.name);
                    Ok(())
                } else {
                    let remaining = self.config.open_duration - elapsed;
                    Err(CircuitBreakerError::CircuitOpen {
                        retry_after_secs: remaining.as_secs().max(1),
                    })
                }
            }
        }
    }

    /// Record a successful request
    pub fn record_success(&self) {
        let mut inner = self.lock();

        match inner.state {
            CircuitState::Closed => {
                inner.failure_count = 0;
                inner.window_started_at = None;
            }
            CircuitState::HalfOpen => {
                inner.success_count += 1;
                if inner.success_count >= self.config.half_open_success_threshold {
                    inner.state = CircuitState::Closed;
                    inner.failure_count = 0;
                    inner.window_started_at = None;
                    inner.opened_at = None;
                    log::info!(
                        "Circuit breaker '{}' closed after {} successes",
                        self.name,
                        inner.success_count
                    );
                }
            }
            CircuitState::Open => {} // Late result from a call admitted before opening
        }
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        let now = Instant::now();
        let mut inner = self.lock();

        match inner.state {
            CircuitState::Closed => {
                let window_expired = inner
                    .window_started_at
                    .is_none_or(|started| now.duration_since(started) > self.config.failure_window);
                if window_expired {
                    inner.failure_count = 0;
                    inner.window_started_at = Some(now);
                }

                inner.failure_count += 1;
                if inner.failure_count >= self.config.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(now);
                    log::warn!(
                        "Circuit breaker '{}' OPEN after {} failures",
                        self.name,
                        inner.failure_count
                    );
                }
            }
            CircuitState::HalfOpen => {
                // Single failure in half-open reopens circuit
                inner.state = CircuitState::Open;
                inner.opened_at = Some(now);
                log::warn!(
                    "Circuit breaker '{}' reopened due to failure in HalfOpen state",
                    self.name
                );
            }
            CircuitState::Open => {}
        }
    }

    /// Get current state
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitBreakerError {
    CircuitOpen { retry_after_secs: u64 },
}

impl std::fmt::Display for CircuitBreakerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CircuitOpen { retry_after_secs } => {
                write!(
                    f,
                    "Circuit breaker open. Retry after {} seconds",
                    retry_after_secs
                )
            }
        }
    }
}

impl std::error::Error for CircuitBreakerError {}
