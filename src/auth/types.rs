//! Auth configuration types

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default IAM token service
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Path of the token endpoint, relative to the IAM URL
pub const IAM_TOKEN_PATH: &str = "/identity/token";

/// Grant type for the API key exchange
pub const IAM_GRANT_TYPE_APIKEY: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Kind of authenticator, as named in external configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// No credentials
    NoAuth,
    /// Static bearer token
    BearerToken,
    /// HTTP Basic
    Basic,
    /// IAM API key exchange
    Iam,
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "noauth" => Ok(Self::NoAuth),
            "bearertoken" => Ok(Self::BearerToken),
            "basic" => Ok(Self::Basic),
            "iam" => Ok(Self::Iam),
            other => Err(Error::config(format!(
                "Unrecognized authentication type: {other}"
            ))),
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoAuth => "noAuth",
            Self::BearerToken => "bearerToken",
            Self::Basic => "basic",
            Self::Iam => "iam",
        };
        f.write_str(name)
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    NoAuth,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// IAM API key exchanged for short-lived access tokens
    Iam {
        /// The API key
        apikey: String,
        /// IAM base URL (defaults to [`DEFAULT_IAM_URL`])
        url: Option<String>,
        /// Optional client id, sent as basic auth to the token endpoint
        client_id: Option<String>,
        /// Optional client secret
        client_secret: Option<String>,
        /// Optional scope requested with the token
        scope: Option<String>,
    },
}

impl AuthConfig {
    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create a basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create an IAM config against the default token service
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// The kind of this config
    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::NoAuth => AuthType::NoAuth,
            Self::Bearer { .. } => AuthType::BearerToken,
            Self::Basic { .. } => AuthType::Basic,
            Self::Iam { .. } => AuthType::Iam,
        }
    }

    /// Check the credentials are usable before any request is made
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::NoAuth => Ok(()),
            Self::Bearer { token } => {
                if token.is_empty() {
                    return Err(Error::invalid_auth("bearer token cannot be empty"));
                }
                Ok(())
            }
            Self::Basic { username, password } => {
                check_credential("username", username)?;
                check_credential("password", password)
            }
            Self::Iam {
                apikey,
                client_id,
                client_secret,
                ..
            } => {
                check_credential("apikey", apikey)?;
                match (client_id, client_secret) {
                    (Some(_), None) | (None, Some(_)) => Err(Error::invalid_auth(
                        "client_id and client_secret must be set together",
                    )),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// A credential must be non-empty and not wrapped in braces or quotes
fn check_credential(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_auth(format!("{name} cannot be empty")));
    }
    let wrapped = |open: char, close: char| value.starts_with(open) && value.ends_with(close);
    if wrapped('{', '}') || wrapped('"', '"') {
        return Err(Error::invalid_auth(format!(
            "{name} cannot start or end with curly brackets or quotes"
        )));
    }
    Ok(())
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_inside_buffer_is_expired() {
        let token = CachedToken::expires_in("test".to_string(), 10);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_auth_config_default() {
        assert_eq!(AuthConfig::default(), AuthConfig::NoAuth);
    }

    #[test_case("noauth", AuthType::NoAuth)]
    #[test_case("NOAuth", AuthType::NoAuth)]
    #[test_case("bearerToken", AuthType::BearerToken)]
    #[test_case("BASIC", AuthType::Basic)]
    #[test_case("iam", AuthType::Iam)]
    fn test_auth_type_parse(input: &str, expected: AuthType) {
        assert_eq!(input.parse::<AuthType>().unwrap(), expected);
    }

    #[test]
    fn test_auth_type_parse_unknown() {
        assert!("someOtherAuth".parse::<AuthType>().is_err());
    }

    #[test_case(AuthConfig::NoAuth, true)]
    #[test_case(AuthConfig::bearer("token"), true)]
    #[test_case(AuthConfig::bearer(""), false)]
    #[test_case(AuthConfig::basic("user", "pass"), true)]
    #[test_case(AuthConfig::basic("", ""), false)]
    #[test_case(AuthConfig::basic("{user}", "pass"), false)]
    #[test_case(AuthConfig::iam("my-apikey"), true)]
    #[test_case(AuthConfig::iam(""), false)]
    #[test_case(AuthConfig::iam("\"quoted\""), false)]
    fn test_auth_config_validate(config: AuthConfig, valid: bool) {
        assert_eq!(config.validate().is_ok(), valid);
    }

    #[test]
    fn test_iam_requires_client_pair() {
        let config = AuthConfig::Iam {
            apikey: "key".to_string(),
            url: None,
            client_id: Some("id".to_string()),
            client_secret: None,
            scope: None,
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidAuthenticator { .. })
        ));
    }
}
