//! Backup vault operations

use super::options::{call_settings, require, CallOptions};
use super::ResourceConfigurationV1;
use crate::error::Result;
use crate::http::{DetailedResponse, RequestConfig};
use crate::models::{
    BackupVault, BackupVaultCollection, BackupVaultPatch, VaultActivityTracking,
    VaultMetricsMonitoring,
};
use crate::pagination::{Pager, TOKEN_PARAM};
use crate::patch::AsPatch;
use crate::types::StringMap;
use reqwest::Method;
use serde::Serialize;
use std::time::Instant;

/// Options for [`ResourceConfigurationV1::list_backup_vaults`]
#[derive(Debug, Clone, Default)]
pub struct ListBackupVaultsOptions {
    /// Service instance whose vaults are listed
    pub service_instance_id: String,
    /// Continuation token from a previous page
    pub token: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl ListBackupVaultsOptions {
    pub fn new(service_instance_id: impl Into<String>) -> Self {
        Self {
            service_instance_id: service_instance_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

call_settings!(ListBackupVaultsOptions);

impl CallOptions for ListBackupVaultsOptions {
    fn validate(&self) -> Result<()> {
        require("service_instance_id", &self.service_instance_id)
    }
}

/// Options for [`ResourceConfigurationV1::create_backup_vault`]
#[derive(Debug, Clone, Default)]
pub struct CreateBackupVaultOptions {
    pub service_instance_id: String,
    pub backup_vault_name: String,
    /// Region the vault lives in
    pub region: String,
    pub activity_tracking: Option<VaultActivityTracking>,
    pub metrics_monitoring: Option<VaultMetricsMonitoring>,
    /// Key Protect root key for server-side encryption
    pub sse_kp_customer_root_key_crn: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl CreateBackupVaultOptions {
    pub fn new(
        service_instance_id: impl Into<String>,
        backup_vault_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            service_instance_id: service_instance_id.into(),
            backup_vault_name: backup_vault_name.into(),
            region: region.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn activity_tracking(mut self, settings: VaultActivityTracking) -> Self {
        self.activity_tracking = Some(settings);
        self
    }

    #[must_use]
    pub fn metrics_monitoring(mut self, settings: VaultMetricsMonitoring) -> Self {
        self.metrics_monitoring = Some(settings);
        self
    }

    #[must_use]
    pub fn sse_kp_customer_root_key_crn(mut self, crn: impl Into<String>) -> Self {
        self.sse_kp_customer_root_key_crn = Some(crn.into());
        self
    }
}

call_settings!(CreateBackupVaultOptions);

impl CallOptions for CreateBackupVaultOptions {
    fn validate(&self) -> Result<()> {
        require("service_instance_id", &self.service_instance_id)?;
        require("backup_vault_name", &self.backup_vault_name)?;
        require("region", &self.region)
    }
}

#[derive(Serialize)]
struct NewBackupVault<'a> {
    backup_vault_name: &'a str,
    region: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity_tracking: Option<&'a VaultActivityTracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics_monitoring: Option<&'a VaultMetricsMonitoring>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sse_kp_customer_root_key_crn: Option<&'a str>,
}

/// Options for [`ResourceConfigurationV1::get_backup_vault`]
#[derive(Debug, Clone, Default)]
pub struct GetBackupVaultOptions {
    pub backup_vault_name: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl GetBackupVaultOptions {
    pub fn new(backup_vault_name: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            ..Default::default()
        }
    }
}

call_settings!(GetBackupVaultOptions);

impl CallOptions for GetBackupVaultOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)
    }
}

/// Options for [`ResourceConfigurationV1::update_backup_vault`]
#[derive(Debug, Clone, Default)]
pub struct UpdateBackupVaultOptions {
    pub backup_vault_name: String,
    /// Fields to change; `None` sends no body
    pub backup_vault_patch: Option<BackupVaultPatch>,
    /// Only apply the change if the vault's ETag matches
    pub if_match: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl UpdateBackupVaultOptions {
    pub fn new(backup_vault_name: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn backup_vault_patch(mut self, patch: BackupVaultPatch) -> Self {
        self.backup_vault_patch = Some(patch);
        self
    }

    #[must_use]
    pub fn if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }
}

call_settings!(UpdateBackupVaultOptions);

impl CallOptions for UpdateBackupVaultOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)
    }
}

/// Options for [`ResourceConfigurationV1::delete_backup_vault`]
#[derive(Debug, Clone, Default)]
pub struct DeleteBackupVaultOptions {
    pub backup_vault_name: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl DeleteBackupVaultOptions {
    pub fn new(backup_vault_name: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            ..Default::default()
        }
    }
}

call_settings!(DeleteBackupVaultOptions);

impl CallOptions for DeleteBackupVaultOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)
    }
}

impl ResourceConfigurationV1 {
    /// List one page of vault names in a service instance
    pub async fn list_backup_vaults(
        &self,
        options: &ListBackupVaultsOptions,
    ) -> Result<DetailedResponse<BackupVaultCollection>> {
        options.validate()?;

        let req = RequestConfig::new("list_backup_vaults", Method::GET, "/backup_vaults")
            .query("service_instance_id", &options.service_instance_id)
            .query_opt(TOKEN_PARAM, options.token.as_deref())
            .headers(&options.headers)
            .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Pager over every vault name in a service instance
    ///
    /// A `token` in the options resumes the listing from that page.
    pub fn backup_vaults_pager(
        &self,
        options: ListBackupVaultsOptions,
    ) -> Result<Pager<'_, BackupVaultCollection>> {
        options.validate()?;

        let start = options.token.clone();
        Ok(Pager::new(start, move |token| {
            let mut options = options.clone();
            options.token = token;
            async move {
                let response = self.list_backup_vaults(&options).await?;
                Ok(response.result.unwrap_or_default())
            }
        }))
    }

    /// Create a backup vault
    pub async fn create_backup_vault(
        &self,
        options: &CreateBackupVaultOptions,
    ) -> Result<DetailedResponse<BackupVault>> {
        options.validate()?;

        let body = serde_json::to_value(NewBackupVault {
            backup_vault_name: &options.backup_vault_name,
            region: &options.region,
            activity_tracking: options.activity_tracking.as_ref(),
            metrics_monitoring: options.metrics_monitoring.as_ref(),
            sse_kp_customer_root_key_crn: options.sse_kp_customer_root_key_crn.as_deref(),
        })?;
        let req = RequestConfig::new("create_backup_vault", Method::POST, "/backup_vaults")
            .query("service_instance_id", &options.service_instance_id)
            .headers(&options.headers)
            .json(body)
            .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Get a backup vault
    pub async fn get_backup_vault(
        &self,
        options: &GetBackupVaultOptions,
    ) -> Result<DetailedResponse<BackupVault>> {
        options.validate()?;

        let req = RequestConfig::new(
            "get_backup_vault",
            Method::GET,
            "/backup_vaults/{backup_vault_name}",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Change a backup vault's settings
    pub async fn update_backup_vault(
        &self,
        options: &UpdateBackupVaultOptions,
    ) -> Result<DetailedResponse<BackupVault>> {
        options.validate()?;

        let mut req = RequestConfig::new(
            "update_backup_vault",
            Method::PATCH,
            "/backup_vaults/{backup_vault_name}",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .header_opt("If-Match", options.if_match.as_deref())
        .headers(&options.headers)
        .deadline(options.deadline);
        if let Some(patch) = &options.backup_vault_patch {
            req = req.merge_patch(patch.as_patch()?);
        }
        self.client.request(req).await
    }

    /// Delete an empty backup vault
    pub async fn delete_backup_vault(
        &self,
        options: &DeleteBackupVaultOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;

        let req = RequestConfig::new(
            "delete_backup_vault",
            Method::DELETE,
            "/backup_vaults/{backup_vault_name}",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request_no_result(req).await
    }
}
