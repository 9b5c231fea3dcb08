//! Error types for the Resource Configuration client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::http::RawResponse;
use serde_json::Value;
use thiserror::Error;

/// The main error type for the Resource Configuration client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors (raised before any network I/O)
    // ============================================================================
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid value for '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Service URL is missing")]
    ServiceUrlMissing,

    #[error("Invalid service URL '{url}': {message}")]
    InvalidServiceUrl { url: String, message: String },

    #[error("Unknown region: {region}")]
    UnknownRegion { region: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read credentials file: {0}")]
    CredentialsFile(#[from] dotenvy::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Invalid authenticator: {message}")]
    InvalidAuthenticator { message: String },

    #[error("Token request failed with status {status}: {body}")]
    TokenRequest { status: u16, body: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout: {0}")]
    Timeout(reqwest::Error),

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode {
        message: String,
        response: Box<RawResponse>,
    },

    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
        response: Box<RawResponse>,
    },

    #[error("No more pages available")]
    PagesExhausted,

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing parameter error
    pub fn missing_param(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an invalid authenticator error
    pub fn invalid_auth(message: impl Into<String>) -> Self {
        Self::InvalidAuthenticator {
            message: message.into(),
        }
    }

    /// Create a decode error that keeps the raw response around
    pub fn decode(message: impl Into<String>, response: RawResponse) -> Self {
        Self::Decode {
            message: message.into(),
            response: Box::new(response),
        }
    }

    /// True for errors raised by local validation, before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter { .. }
                | Error::InvalidParameter { .. }
                | Error::ServiceUrlMissing
                | Error::InvalidServiceUrl { .. }
                | Error::InvalidAuthenticator { .. }
        )
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout(_) => true,
            Error::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Error::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// HTTP status code of the response that produced this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Decode { response, .. } => Some(response.status.as_u16()),
            Error::TokenRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response carried by decode and API errors
    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            Error::Decode { response, .. } | Error::Api { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || ((500..600).contains(&status) && status != 501)
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
