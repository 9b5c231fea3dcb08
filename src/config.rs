//! Client configuration
//!
//! Three ways to point a client at the service:
//!
//! - [`ServiceOptions`] built in code
//! - a region name mapped to its endpoint with [`service_url_for_region`]
//! - external configuration ([`ExternalConfig`]) read from a credentials file
//!   or the process environment
//!
//! External properties are named `RESOURCE_CONFIGURATION_<KEY>`, for example
//! `RESOURCE_CONFIGURATION_APIKEY` or `RESOURCE_CONFIGURATION_AUTH_TYPE`.

use crate::auth::{AuthConfig, AuthType, Authenticate};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RetryPolicy};
use crate::types::{OptionStringExt, StringMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Public endpoint of the service
pub const DEFAULT_SERVICE_URL: &str = "https://config.cloud-object-storage.cloud.ibm.com/v1";

/// Prefix of every external configuration property
pub const PROPERTY_PREFIX: &str = "RESOURCE_CONFIGURATION_";

/// Environment variable naming the credentials file
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Credentials file looked up in the working and home directories
pub const DEFAULT_CREDENTIALS_FILE: &str = "ibm-credentials.env";

/// Endpoint for a named region
///
/// | region    | endpoint                                                  |
/// |-----------|-----------------------------------------------------------|
/// | `global`  | `https://config.cloud-object-storage.cloud.ibm.com/v1`         |
/// | `private` | `https://config.private.cloud-object-storage.cloud.ibm.com/v1` |
/// | `direct`  | `https://config.direct.cloud-object-storage.cloud.ibm.com/v1`  |
pub fn service_url_for_region(region: &str) -> Result<&'static str> {
    match region {
        "global" => Ok(DEFAULT_SERVICE_URL),
        "private" => Ok("https://config.private.cloud-object-storage.cloud.ibm.com/v1"),
        "direct" => Ok("https://config.direct.cloud-object-storage.cloud.ibm.com/v1"),
        other => Err(Error::UnknownRegion {
            region: other.to_string(),
        }),
    }
}

// ============================================================================
// Service Options
// ============================================================================

/// Options for constructing a client
#[derive(Clone)]
pub struct ServiceOptions {
    /// Service URL; `None` selects [`DEFAULT_SERVICE_URL`]
    pub service_url: Option<String>,
    /// Credentials
    pub auth: AuthConfig,
    /// Custom authenticator, used instead of `auth` when set
    pub authenticator: Option<Arc<dyn Authenticate>>,
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Retry policy; `None` disables retries
    pub retry: Option<RetryPolicy>,
    /// Headers sent with every request
    pub default_headers: StringMap,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        let http = HttpClientConfig::default();
        Self {
            service_url: None,
            auth: AuthConfig::NoAuth,
            authenticator: None,
            timeout: http.timeout,
            retry: None,
            default_headers: StringMap::new(),
            user_agent: None,
        }
    }
}

impl ServiceOptions {
    /// Options with the given credentials and default everything else
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            ..Self::default()
        }
    }

    /// Set the service URL
    #[must_use]
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Use the endpoint of a named region
    pub fn region(self, region: &str) -> Result<Self> {
        Ok(self.service_url(service_url_for_region(region)?))
    }

    /// Use a custom authenticator
    #[must_use]
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticate>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// HTTP client configuration for these options
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .service_url(self.service_url.as_deref().unwrap_or(DEFAULT_SERVICE_URL))
            .timeout(self.timeout);
        if let Some(policy) = &self.retry {
            builder = builder.retry(policy.clone());
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder.build()
    }
}

impl std::fmt::Debug for ServiceOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceOptions")
            .field("service_url", &self.service_url)
            .field("auth_type", &self.auth.auth_type())
            .field("has_custom_authenticator", &self.authenticator.is_some())
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// External Configuration
// ============================================================================

/// Settings read from a credentials file or the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalConfig {
    /// `URL`
    pub service_url: Option<String>,
    /// Credentials built from `AUTH_TYPE` and friends
    pub auth: AuthConfig,
    /// Retry policy when `ENABLE_RETRIES` is true
    pub retry: Option<RetryPolicy>,
}

impl ExternalConfig {
    /// Load from the default sources
    ///
    /// The credentials file (`IBM_CREDENTIALS_FILE`, else
    /// `./ibm-credentials.env`, else `$HOME/ibm-credentials.env`) is read
    /// first; the process environment is used when the file holds no
    /// properties for this service.
    pub fn load() -> Result<Self> {
        let file = default_credentials_file();
        Self::load_from(file.as_deref(), std::env::vars())
    }

    /// Load from an explicit credentials file and set of variables
    pub fn load_from(
        credentials_file: Option<&Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        if let Some(path) = credentials_file {
            let props = properties_from_file(path)?;
            if !props.is_empty() {
                debug!("Using configuration from {}", path.display());
                return Self::from_properties(&props);
            }
        }

        let props = properties_from_vars(vars);
        if props.is_empty() {
            return Err(Error::config(format!(
                "no configuration found: set {PROPERTY_PREFIX}* properties in the environment or a credentials file"
            )));
        }
        debug!("Using configuration from environment");
        Self::from_properties(&props)
    }

    /// Build from properties whose prefix has already been stripped
    pub fn from_properties(props: &StringMap) -> Result<Self> {
        let get = |key: &str| props.get(key).cloned().none_if_empty();

        let auth_type = match get("AUTH_TYPE") {
            Some(name) => name.parse::<AuthType>()?,
            None => AuthType::Iam,
        };

        let auth = match auth_type {
            AuthType::NoAuth => AuthConfig::NoAuth,
            AuthType::BearerToken => AuthConfig::bearer(get("BEARER_TOKEN").unwrap_or_default()),
            AuthType::Basic => AuthConfig::basic(
                get("USERNAME").unwrap_or_default(),
                get("PASSWORD").unwrap_or_default(),
            ),
            AuthType::Iam => AuthConfig::Iam {
                apikey: get("APIKEY").unwrap_or_default(),
                url: get("AUTH_URL"),
                client_id: get("CLIENT_ID"),
                client_secret: get("CLIENT_SECRET"),
                scope: get("SCOPE"),
            },
        };
        auth.validate()?;

        let retry = if parse_bool("ENABLE_RETRIES", get("ENABLE_RETRIES"))? {
            let max_retries = parse_number("MAX_RETRIES", get("MAX_RETRIES"))?.unwrap_or(0);
            let interval = parse_number("RETRY_INTERVAL", get("RETRY_INTERVAL"))?.unwrap_or(0);
            Some(RetryPolicy::new(
                u32::try_from(max_retries).unwrap_or(u32::MAX),
                Duration::from_secs(interval),
            ))
        } else {
            None
        };

        Ok(Self {
            service_url: get("URL"),
            auth,
            retry,
        })
    }

    /// Service options for this configuration
    pub fn into_service_options(self) -> ServiceOptions {
        ServiceOptions {
            service_url: self.service_url,
            auth: self.auth,
            retry: self.retry,
            ..ServiceOptions::default()
        }
    }
}

/// First credentials file that exists
fn default_credentials_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CREDENTIALS_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    let mut candidates = vec![PathBuf::from(DEFAULT_CREDENTIALS_FILE)];
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(Path::new(&home).join(DEFAULT_CREDENTIALS_FILE));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Read `RESOURCE_CONFIGURATION_*` entries from a dotenv-style file
pub fn properties_from_file(path: &Path) -> Result<StringMap> {
    let mut props = StringMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        if let Some(name) = key.strip_prefix(PROPERTY_PREFIX) {
            props.insert(name.to_string(), value);
        }
    }
    Ok(props)
}

/// Keep the `RESOURCE_CONFIGURATION_*` variables, prefix stripped
pub fn properties_from_vars(vars: impl IntoIterator<Item = (String, String)>) -> StringMap {
    vars.into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(PROPERTY_PREFIX)
                .map(|name| (name.to_string(), value))
        })
        .collect()
}

fn parse_bool(key: &str, value: Option<String>) -> Result<bool> {
    match value {
        None => Ok(false),
        Some(v) => v.trim().to_ascii_lowercase().parse::<bool>().map_err(|_| {
            Error::config(format!("{PROPERTY_PREFIX}{key} must be true or false, got '{v}'"))
        }),
    }
}

fn parse_number(key: &str, value: Option<String>) -> Result<Option<u64>> {
    value
        .map(|v| {
            v.trim().parse::<u64>().map_err(|_| {
                Error::config(format!("{PROPERTY_PREFIX}{key} must be a whole number, got '{v}'"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use test_case::test_case;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test_case("global", DEFAULT_SERVICE_URL)]
    #[test_case("private", "https://config.private.cloud-object-storage.cloud.ibm.com/v1")]
    #[test_case("direct", "https://config.direct.cloud-object-storage.cloud.ibm.com/v1")]
    fn test_service_url_for_region(region: &str, expected: &str) {
        assert_eq!(service_url_for_region(region).unwrap(), expected);
    }

    #[test]
    fn test_unknown_region() {
        let err = service_url_for_region("INVALID_REGION").unwrap_err();
        assert!(matches!(err, Error::UnknownRegion { region } if region == "INVALID_REGION"));
    }

    #[test]
    fn test_service_options_defaults_to_public_endpoint() {
        let config = ServiceOptions::default().http_config();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert!(config.retry.is_none());
    }

    #[test]
    fn test_service_options_builder() {
        let options = ServiceOptions::new(AuthConfig::bearer("t"))
            .region("private")
            .unwrap()
            .timeout(Duration::from_secs(5))
            .retry(RetryPolicy::default())
            .header("X-Test", "1")
            .user_agent("ops-tool/2.0");
        let config = options.http_config();

        assert_eq!(
            config.service_url,
            "https://config.private.cloud-object-storage.cloud.ibm.com/v1"
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "ops-tool/2.0");
        assert_eq!(config.default_headers.get("X-Test"), Some(&"1".to_string()));
        assert!(config.retry.is_some());
    }

    #[test]
    fn test_properties_from_vars_filters_prefix() {
        let props = properties_from_vars(vars(&[
            ("RESOURCE_CONFIGURATION_URL", "https://h/v1"),
            ("RESOURCE_CONFIGURATION_AUTH_TYPE", "noauth"),
            ("PATH", "/usr/bin"),
        ]));
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("URL"), Some(&"https://h/v1".to_string()));
    }

    #[test]
    fn test_from_properties_bearer_with_retries() {
        let props = properties_from_vars(vars(&[
            ("RESOURCE_CONFIGURATION_URL", "https://resourceconfigurationv1/api"),
            ("RESOURCE_CONFIGURATION_AUTH_TYPE", "bearerToken"),
            ("RESOURCE_CONFIGURATION_BEARER_TOKEN", "0ui9876453"),
            ("RESOURCE_CONFIGURATION_ENABLE_RETRIES", "true"),
            ("RESOURCE_CONFIGURATION_MAX_RETRIES", "2"),
            ("RESOURCE_CONFIGURATION_RETRY_INTERVAL", "10"),
        ]));
        let config = ExternalConfig::from_properties(&props).unwrap();

        assert_eq!(
            config.service_url.as_deref(),
            Some("https://resourceconfigurationv1/api")
        );
        assert_eq!(config.auth, AuthConfig::bearer("0ui9876453"));
        let retry = config.retry.unwrap();
        assert_eq!(retry.max_retries, 2);
        assert_eq!(retry.max_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_from_properties_defaults_to_iam() {
        let props = properties_from_vars(vars(&[
            ("RESOURCE_CONFIGURATION_APIKEY", "my-key"),
            ("RESOURCE_CONFIGURATION_AUTH_URL", "https://iam.test.cloud.ibm.com"),
        ]));
        let config = ExternalConfig::from_properties(&props).unwrap();

        assert_eq!(config.auth.auth_type(), AuthType::Iam);
        assert!(config.service_url.is_none());
        assert!(config.retry.is_none());
    }

    #[test]
    fn test_from_properties_invalid_auth_type() {
        let props = properties_from_vars(vars(&[
            ("RESOURCE_CONFIGURATION_URL", "https://resourceconfigurationv1/api"),
            ("RESOURCE_CONFIGURATION_AUTH_TYPE", "someOtherAuth"),
        ]));
        let err = ExternalConfig::from_properties(&props).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_properties_missing_credentials() {
        let props = properties_from_vars(vars(&[("RESOURCE_CONFIGURATION_AUTH_TYPE", "iam")]));
        let err = ExternalConfig::from_properties(&props).unwrap_err();
        assert!(matches!(err, Error::InvalidAuthenticator { .. }));
    }

    #[test_case("ENABLE_RETRIES", "maybe")]
    #[test_case("MAX_RETRIES", "-1")]
    #[test_case("RETRY_INTERVAL", "soon")]
    fn test_from_properties_bad_retry_values(key: &str, value: &str) {
        let mut props = StringMap::new();
        props.insert("AUTH_TYPE".into(), "noauth".into());
        props.insert("ENABLE_RETRIES".into(), "true".into());
        props.insert(key.into(), value.into());
        assert!(matches!(
            ExternalConfig::from_properties(&props),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_credentials_file_wins_over_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "RESOURCE_CONFIGURATION_URL=https://from-file/v1").unwrap();
        writeln!(file, "RESOURCE_CONFIGURATION_AUTH_TYPE=basic").unwrap();
        writeln!(file, "RESOURCE_CONFIGURATION_USERNAME=user").unwrap();
        writeln!(file, "RESOURCE_CONFIGURATION_PASSWORD=pass").unwrap();
        writeln!(file, "OTHER_SERVICE_APIKEY=ignored").unwrap();

        let env = vars(&[
            ("RESOURCE_CONFIGURATION_URL", "https://from-env/v1"),
            ("RESOURCE_CONFIGURATION_AUTH_TYPE", "noauth"),
        ]);
        let config = ExternalConfig::load_from(Some(file.path()), env).unwrap();

        assert_eq!(config.service_url.as_deref(), Some("https://from-file/v1"));
        assert_eq!(config.auth, AuthConfig::basic("user", "pass"));
    }

    #[test]
    fn test_environment_used_when_file_has_no_properties() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "OTHER_SERVICE_URL=https://elsewhere").unwrap();

        let env = vars(&[
            ("RESOURCE_CONFIGURATION_URL", "https://from-env/v1"),
            ("RESOURCE_CONFIGURATION_AUTH_TYPE", "noauth"),
        ]);
        let config = ExternalConfig::load_from(Some(file.path()), env).unwrap();
        assert_eq!(config.service_url.as_deref(), Some("https://from-env/v1"));
        assert_eq!(config.auth, AuthConfig::NoAuth);
    }

    #[test]
    fn test_missing_credentials_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.env");
        let err = ExternalConfig::load_from(Some(&missing), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::CredentialsFile(_)));
    }

    #[test]
    fn test_no_configuration_anywhere() {
        let err = ExternalConfig::load_from(None, vars(&[("HOME", "/root")])).unwrap_err();
        assert!(err.to_string().contains("no configuration found"));
    }
}
