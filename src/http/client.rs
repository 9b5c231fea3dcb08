//! HTTP client for the Resource Configuration API
//!
//! Every API call goes through one pipeline:
//! - Validate and render the request path before any network I/O
//! - Attach default headers, per-call headers and credentials
//! - Send, then classify the response (2xx, API error, transport error)
//! - Decode the body into the caller's result type
//! - Retry transient failures when a [`RetryPolicy`] is set
//! - Abort everything once the call's deadline has passed

use super::request::RequestConfig;
use super::response::{DetailedResponse, RawResponse};
use super::retry::RetryPolicy;
use crate::auth::{Authenticate, AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL that request paths are appended to
    pub service_url: String,
    /// Timeout applied to each individual attempt
    pub timeout: Duration,
    /// Retry policy; `None` disables retries
    pub retry: Option<RetryPolicy>,
    /// Headers sent with every request
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            timeout: Duration::from_secs(30),
            retry: None,
            default_headers: StringMap::new(),
            user_agent: format!("cos-resource-config/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the service URL
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_url = url.into();
        self
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = Some(policy);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with authentication, retries and deadlines
///
/// Cloning is cheap; clones share the connection pool and the
/// authenticator's token cache.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Arc<dyn Authenticate>,
}

impl HttpClient {
    /// Create a client for the given auth config
    pub fn new(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let client = build_reqwest_client(&config)?;
        let authenticator = Authenticator::with_client(auth, client.clone());
        Self::assemble(client, config, Arc::new(authenticator))
    }

    /// Create a client with a custom authenticator
    pub fn with_authenticator(
        config: HttpClientConfig,
        authenticator: Arc<dyn Authenticate>,
    ) -> Result<Self> {
        let client = build_reqwest_client(&config)?;
        Self::assemble(client, config, authenticator)
    }

    fn assemble(
        client: Client,
        config: HttpClientConfig,
        authenticator: Arc<dyn Authenticate>,
    ) -> Result<Self> {
        authenticator.validate()?;
        check_service_url(&config.service_url)?;
        Ok(Self {
            client,
            config,
            authenticator,
        })
    }

    /// Get the client config
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the authenticator
    pub fn authenticator(&self) -> &Arc<dyn Authenticate> {
        &self.authenticator
    }

    /// Current service URL
    pub fn service_url(&self) -> &str {
        &self.config.service_url
    }

    /// Replace the service URL
    ///
    /// An empty URL is accepted; every later call then fails with
    /// [`Error::ServiceUrlMissing`].
    pub fn set_service_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        check_service_url(&url)?;
        self.config.service_url = url;
        Ok(())
    }

    /// Replace the headers sent with every request
    pub fn set_default_headers(&mut self, headers: StringMap) {
        self.config.default_headers = headers;
    }

    /// Turn on retries; zero values select the defaults
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.config.retry = Some(RetryPolicy::new(max_retries, max_interval));
    }

    /// Install a fully specified retry policy
    pub fn set_retry_policy(&mut self, policy: RetryPolicy) {
        self.config.retry = Some(policy);
    }

    /// Turn off retries
    pub fn disable_retries(&mut self) {
        self.config.retry = None;
    }

    /// Current retry policy, if retries are on
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.config.retry.as_ref()
    }

    /// Issue a request and decode a JSON result
    ///
    /// An empty 2xx body yields `result: None`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        req: RequestConfig,
    ) -> Result<DetailedResponse<T>> {
        self.run(req, decode_json::<T>).await
    }

    /// Issue a request whose response has no result model
    pub async fn request_no_result(&self, req: RequestConfig) -> Result<DetailedResponse<()>> {
        self.run(req, |_: &RawResponse| Ok(None)).await
    }

    /// Validate, then run the retry loop under the call's deadline
    async fn run<T, F>(&self, req: RequestConfig, decode: F) -> Result<DetailedResponse<T>>
    where
        F: Fn(&RawResponse) -> Result<Option<T>>,
    {
        let url = self.build_url(&req)?;
        let headers = self.build_headers(&req)?;

        let attempts = self.execute(&req, &url, &headers, &decode);
        match req.deadline {
            Some(deadline) => {
                tokio::time::timeout_at(tokio::time::Instant::from_std(deadline), attempts)
                    .await
                    .map_err(|_| {
                        warn!("{} abandoned: deadline exceeded", req.operation);
                        Error::DeadlineExceeded
                    })?
            }
            None => attempts.await,
        }
    }

    async fn execute<T, F>(
        &self,
        req: &RequestConfig,
        url: &Url,
        headers: &HeaderMap,
        decode: &F,
    ) -> Result<DetailedResponse<T>>
    where
        F: Fn(&RawResponse) -> Result<Option<T>>,
    {
        let mut attempt = 0;

        loop {
            let outcome = match self.send_once(req, url, headers).await {
                Ok(raw) => decode(&raw).map(|result| DetailedResponse::new(raw, result)),
                Err(e) => Err(e),
            };

            let error = match outcome {
                Ok(response) => {
                    debug!(
                        "{} succeeded: {} {} -> {}",
                        req.operation,
                        req.method,
                        url,
                        response.status_code()
                    );
                    return Ok(response);
                }
                Err(e) => e,
            };

            let Some(policy) = self.config.retry.as_ref() else {
                return Err(error);
            };
            if attempt >= policy.max_retries || !policy.should_retry(&error) {
                return Err(error);
            }

            let delay = policy.delay_for(attempt, &error);
            warn!(
                "{} failed ({}), attempt {}/{}, retrying in {:?}",
                req.operation,
                error,
                attempt + 1,
                policy.max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// One attempt: authenticate, send, read the whole body, classify
    async fn send_once(
        &self,
        req: &RequestConfig,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(req.method.clone(), url.clone())
            .headers(headers.clone());

        if let Some(body) = &req.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type())
                .body(body.to_bytes()?);
        }

        let builder = self.authenticator.authenticate(builder).await?;

        debug!("Sending {} {} ({})", req.method, url, req.operation);
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;
        let raw = RawResponse {
            status,
            headers,
            body,
        };

        if status.is_success() {
            return Ok(raw);
        }

        Err(Error::Api {
            status: status.as_u16(),
            message: raw.error_message(),
            body: raw.json(),
            response: Box::new(raw),
        })
    }

    /// Build the full URL from service URL, rendered path and query
    pub fn build_url(&self, req: &RequestConfig) -> Result<Url> {
        let base = self.config.service_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(Error::ServiceUrlMissing);
        }

        let path = req.render_path()?;
        let mut url = Url::parse(&format!("{base}{path}"))?;
        if !req.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&req.query);
        }
        Ok(url)
    }

    fn build_headers(&self, req: &RequestConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let pairs = self
            .config
            .default_headers
            .iter()
            .chain(req.headers.iter().map(|(k, v)| (k, v)));
        for (key, value) in pairs {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::InvalidHeader {
                name: key.clone(),
                message: e.to_string(),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: key.clone(),
                message: e.to_string(),
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("auth_type", &self.authenticator.auth_type())
            .finish_non_exhaustive()
    }
}

fn build_reqwest_client(config: &HttpClientConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .build()?;
    Ok(client)
}

/// A non-empty service URL must be an absolute http or https URL
fn check_service_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Ok(());
    }
    let parsed = Url::parse(url).map_err(|e| Error::InvalidServiceUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidServiceUrl {
            url: url.to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(())
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e)
    } else {
        Error::Http(e)
    }
}

/// Decode a JSON body; an empty body has no result
fn decode_json<T: DeserializeOwned>(raw: &RawResponse) -> Result<Option<T>> {
    if raw.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(&raw.body)
        .map(Some)
        .map_err(|e| Error::decode(e.to_string(), raw.clone()))
}
