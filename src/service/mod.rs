//! The Resource Configuration service client
//!
//! [`ResourceConfigurationV1`] exposes one async method per API operation.
//! Each takes an options struct holding the operation's parameters plus
//! caller headers and an optional deadline, and returns a
//! [`DetailedResponse`](crate::http::DetailedResponse).
//!
//! Listing operations also have a pager (`backup_vaults_pager`,
//! `recovery_ranges_pager`, `restores_pager`) that follows continuation
//! tokens.

mod backup_policies;
mod backup_vaults;
mod buckets;
mod options;
mod recovery_ranges;
mod restores;

pub use backup_policies::{
    CreateBackupPolicyOptions, DeleteBackupPolicyOptions, GetBackupPolicyOptions,
    ListBackupPoliciesOptions,
};
pub use backup_vaults::{
    CreateBackupVaultOptions, DeleteBackupVaultOptions, GetBackupVaultOptions,
    ListBackupVaultsOptions, UpdateBackupVaultOptions,
};
pub use buckets::{GetBucketConfigOptions, UpdateBucketConfigOptions};
pub use options::CallOptions;
pub use recovery_ranges::{
    GetSourceResourceRecoveryRangeOptions, ListRecoveryRangesOptions,
    PatchSourceResourceRecoveryRangeOptions,
};
pub use restores::{CreateRestoreOptions, GetRestoreOptions, ListRestoresOptions};

use crate::auth::Authenticate;
use crate::config::{ExternalConfig, ServiceOptions};
use crate::error::Result;
use crate::http::{HttpClient, RetryPolicy};
use crate::types::StringMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Resource Configuration API
///
/// Cloning is cheap. Clones keep their own service URL, retry policy and
/// default headers, and share the authenticator and its token cache.
#[derive(Debug, Clone)]
pub struct ResourceConfigurationV1 {
    client: HttpClient,
}

impl ResourceConfigurationV1 {
    /// Name used for external configuration properties
    pub const SERVICE_NAME: &'static str = "resource_configuration";

    /// Create a client
    ///
    /// Fails if the service URL is not a valid URL or the credentials are
    /// unusable.
    pub fn new(options: ServiceOptions) -> Result<Self> {
        let config = options.http_config();
        let client = match options.authenticator {
            Some(authenticator) => HttpClient::with_authenticator(config, authenticator)?,
            None => HttpClient::new(config, options.auth)?,
        };
        debug!(
            "Created {} client for {} ({} auth)",
            Self::SERVICE_NAME,
            client.service_url(),
            client.authenticator().auth_type()
        );
        Ok(Self { client })
    }

    /// Create a client from the credentials file or the environment
    ///
    /// `service_url`, when given, overrides the configured `URL`.
    pub fn from_external_config(service_url: Option<&str>) -> Result<Self> {
        Self::from_config(ExternalConfig::load()?, service_url)
    }

    /// Create a client from already loaded external configuration
    pub fn from_config(config: ExternalConfig, service_url: Option<&str>) -> Result<Self> {
        let mut options = config.into_service_options();
        if let Some(url) = service_url {
            options.service_url = Some(url.to_string());
        }
        Self::new(options)
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// The authenticator in use
    pub fn authenticator(&self) -> &Arc<dyn Authenticate> {
        self.client.authenticator()
    }

    /// Current service URL
    pub fn service_url(&self) -> &str {
        self.client.service_url()
    }

    /// Point the client at another URL
    ///
    /// An empty URL is accepted, after which every call fails with
    /// [`Error::ServiceUrlMissing`](crate::Error::ServiceUrlMissing).
    pub fn set_service_url(&mut self, url: impl Into<String>) -> Result<()> {
        self.client.set_service_url(url)
    }

    /// Replace the headers sent with every request
    pub fn set_default_headers(&mut self, headers: StringMap) {
        self.client.set_default_headers(headers);
    }

    /// Turn on retries; zero values select 4 retries and a 30 s cap
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.client.enable_retries(max_retries, max_interval);
    }

    /// Install a fully specified retry policy
    pub fn set_retry_policy(&mut self, policy: RetryPolicy) {
        self.client.set_retry_policy(policy);
    }

    /// Turn off retries
    pub fn disable_retries(&mut self) {
        self.client.disable_retries();
    }
}
