//! HTTP pipeline
//!
//! Turns a [`RequestConfig`] into an authenticated HTTP call and decodes the
//! answer into a [`DetailedResponse`].
//!
//! # Features
//!
//! - **Path templating**: `{name}` placeholders filled with escaped values
//! - **Automatic Retries**: opt-in [`RetryPolicy`] with backoff and `Retry-After`
//! - **Deadlines**: per-call deadline that also bounds pending retries
//! - **Authentication**: integration with the auth module

mod client;
mod request;
mod response;
mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use request::{RequestBody, RequestConfig};
pub use response::{DetailedResponse, RawResponse};
pub use retry::{RetryPolicy, DEFAULT_INITIAL_INTERVAL, DEFAULT_MAX_INTERVAL, DEFAULT_MAX_RETRIES};

#[cfg(test)]
mod tests;
