//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing IAM token refresh.

use super::types::{
    AuthConfig, AuthType, CachedToken, DEFAULT_IAM_URL, IAM_GRANT_TYPE_APIKEY, IAM_TOKEN_PATH,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Something that can attach credentials to an outgoing request
///
/// The client calls [`Authenticate::validate`] once at construction and
/// [`Authenticate::authenticate`] before every request attempt.
#[async_trait]
pub trait Authenticate: Send + Sync {
    /// The kind of credentials this authenticator applies
    fn auth_type(&self) -> AuthType;

    /// Check the credentials without touching the network
    fn validate(&self) -> Result<()>;

    /// Attach credentials to a request
    async fn authenticate(&self, req: RequestBuilder) -> Result<RequestBuilder>;
}

/// Authenticator driven by an [`AuthConfig`]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached IAM access token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Clear the cached token, forcing a refresh on the next request
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock.
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_iam_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange the API key for an access token
    async fn fetch_iam_token(&self) -> Result<CachedToken> {
        let AuthConfig::Iam {
            apikey,
            url,
            client_id,
            client_secret,
            scope,
        } = &self.config
        else {
            return Err(Error::auth(
                "Token refresh not supported for this auth type",
            ));
        };

        let base = url.as_deref().unwrap_or(DEFAULT_IAM_URL).trim_end_matches('/');
        let token_url = if base.ends_with(IAM_TOKEN_PATH) {
            base.to_string()
        } else {
            format!("{base}{IAM_TOKEN_PATH}")
        };

        let mut form = vec![
            ("grant_type", IAM_GRANT_TYPE_APIKEY),
            ("apikey", apikey.as_str()),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope.as_str()));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header(ACCEPT, "application/json")
            .form(&form);
        if let (Some(id), Some(secret)) = (client_id, client_secret) {
            req = req.basic_auth(id, Some(secret));
        }

        debug!("Requesting IAM access token from {}", token_url);
        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = error_body(response.text().await);
            return Err(Error::TokenRequest { status, body });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }
}

/// Body of a failed token response, or a note saying why it is missing
pub(crate) fn error_body<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    match body {
        Ok(body) => body,
        Err(e) => {
            debug!("Could not read IAM error response body: {}", e);
            format!("<unreadable body: {e}>")
        }
    }
}

#[async_trait]
impl Authenticate for Authenticator {
    fn auth_type(&self) -> AuthType {
        self.config.auth_type()
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    async fn authenticate(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::NoAuth => Ok(req),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }
            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_type", &self.config.auth_type())
            .finish_non_exhaustive()
    }
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry, seconds since the epoch
    #[serde(default)]
    expiration: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        if let Some(at) = self
            .expiration
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        {
            return CachedToken::new(self.access_token, Some(at));
        }
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}
