//! Exponential backoff retry policy.
//!
//! Delays run base, 2*base, 4*base, ... capped at `max_delay`. Only errors the
//! caller's classifier marks as retryable are retried.

use std::thread;
use std::time::Duration;

use galaksio_core::config::RetryConfig;
use galaksio_core::errors::GalaxyError;

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

/// The error of the last attempt, with the number of attempts made.
#[derive(Debug)]
pub struct Attempted<E> {
    pub attempts: u32,
    pub error: E,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first try and is at least 1.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: max_delay.max(base_delay),
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.effective_max_attempts(),
            Duration::from_millis(config.effective_base_delay_ms()),
            Duration::from_millis(config.effective_max_delay_ms()),
        )
    }

    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget runs out. `op` receives the 1-based attempt number.
    pub fn run<T, E, F, C>(&self, mut op: F, is_retryable: C) -> Result<T, Attempted<E>>
    where
        F: FnMut(u32) -> Result<T, E>,
        C: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.max_attempts && is_retryable(&error) => {
                    let delay = self.delay_for(attempt);
                    tracing::debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "retrying after transient failure"
                    );
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(error) => {
                    return Err(Attempted {
                        attempts: attempt,
                        error,
                    })
                }
            }
        }
    }

    /// [`run`](Self::run) specialised to Galaxy calls, retrying transient
    /// failures.
    pub fn run_galaxy<T, F>(&self, op: F) -> Result<T, GalaxyError>
    where
        F: FnMut(u32) -> Result<T, GalaxyError>,
    {
        self.run(op, GalaxyError::is_transient).map_err(GalaxyError::from)
    }
}

impl From<Attempted<GalaxyError>> for GalaxyError {
    /// A transient error that survived more than one attempt becomes
    /// `RetriesExhausted`; anything else passes through unchanged.
    fn from(failed: Attempted<GalaxyError>) -> Self {
        if failed.attempts > 1 && failed.error.is_transient() {
            GalaxyError::RetriesExhausted {
                attempts: failed.attempts,
                last_error: failed.error.to_string(),
            }
        } else {
            failed.error
        }
    }
}
