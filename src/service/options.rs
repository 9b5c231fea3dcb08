//! Shared plumbing for per-operation options

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Options accepted by every operation
pub trait CallOptions {
    /// Check required fields before any request is sent
    fn validate(&self) -> Result<()>;
}

/// Fail with [`Error::MissingParameter`] when a required value is empty
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::missing_param(name));
    }
    Ok(())
}

/// Deadline `timeout` from now
pub(crate) fn deadline_after(timeout: Duration) -> Instant {
    Instant::now() + timeout
}

/// Adds the `headers` / `deadline` setters every options struct shares
macro_rules! call_settings {
    ($options:ty) => {
        impl $options {
            /// Add a request header
            #[must_use]
            pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.headers.insert(key.into(), value.into());
                self
            }

            /// Replace the request headers
            #[must_use]
            pub fn headers(mut self, headers: $crate::types::StringMap) -> Self {
                self.headers = headers;
                self
            }

            /// Abandon the call, including pending retries, at this instant
            #[must_use]
            pub fn deadline(mut self, deadline: std::time::Instant) -> Self {
                self.deadline = Some(deadline);
                self
            }

            /// Abandon the call once `timeout` has elapsed
            #[must_use]
            pub fn timeout(self, timeout: std::time::Duration) -> Self {
                self.deadline($crate::service::options::deadline_after(timeout))
            }
        }
    };
}

pub(crate) use call_settings;
