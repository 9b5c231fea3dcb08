//! Retry policy

use super::response::RawResponse;
use crate::error::{is_retryable_status, Error};
use crate::types::BackoffType;
use std::time::Duration;

/// Retries used when `enable_retries` is given zero
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Delay cap used when `enable_retries` is given zero
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);

/// First backoff delay
pub const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_secs(1);

/// Which failures are retried, how often, and how long to wait in between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay for backoff
    pub initial_interval: Duration,
    /// Upper bound on any single delay
    pub max_interval: Duration,
    /// How the delay grows between attempts
    pub backoff: BackoffType,
    /// Retry connect failures and timeouts
    pub retry_transport_errors: bool,
    /// Retry 429 and 5xx (except 501)
    pub retry_statuses: bool,
    /// Retry 2xx responses whose body failed to decode
    pub retry_decode_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_interval: DEFAULT_INITIAL_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
            backoff: BackoffType::Exponential,
            retry_transport_errors: true,
            retry_statuses: true,
            retry_decode_errors: false,
        }
    }
}

impl RetryPolicy {
    /// Create a policy; zero values select the defaults
    pub fn new(max_retries: u32, max_interval: Duration) -> Self {
        let mut policy = Self::default();
        if max_retries > 0 {
            policy.max_retries = max_retries;
        }
        if !max_interval.is_zero() {
            policy.max_interval = max_interval;
        }
        policy.initial_interval = policy.initial_interval.min(policy.max_interval);
        policy
    }

    /// Set backoff shape and base delay
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffType, initial_interval: Duration) -> Self {
        self.backoff = backoff;
        self.initial_interval = initial_interval;
        self
    }

    /// Opt in to retrying decode errors
    #[must_use]
    pub fn retry_decode_errors(mut self, retry: bool) -> Self {
        self.retry_decode_errors = retry;
        self
    }

    /// Whether an error should be retried under this policy
    pub fn should_retry(&self, error: &Error) -> bool {
        match error {
            Error::Timeout(_) | Error::Http(_) => {
                self.retry_transport_errors && error.is_retryable()
            }
            Error::Api { status, .. } => self.retry_statuses && is_retryable_status(*status),
            Error::Decode { .. } => self.retry_decode_errors,
            _ => false,
        }
    }

    /// Backoff delay for a zero-based retry number
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.initial_interval,
            BackoffType::Linear => self.initial_interval.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_interval.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_interval)
    }

    /// Delay before the next attempt after `error`
    ///
    /// A `Retry-After` header on 429 or 503 replaces the computed backoff.
    pub fn delay_for(&self, attempt: u32, error: &Error) -> Duration {
        let delay = match error {
            Error::Api { response, .. } => {
                retry_after(response).unwrap_or_else(|| self.backoff_delay(attempt))
            }
            _ => self.backoff_delay(attempt),
        };
        std::cmp::min(delay, self.max_interval)
    }
}

/// Parse `Retry-After` seconds from a throttling response
fn retry_after(response: &RawResponse) -> Option<Duration> {
    if !matches!(response.status.as_u16(), 429 | 503) {
        return None;
    }
    response
        .header("retry-after")
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
