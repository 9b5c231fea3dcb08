//! Backup policy operations

use super::options::{call_settings, require, CallOptions};
use super::ResourceConfigurationV1;
use crate::error::{Error, Result};
use crate::http::{DetailedResponse, RequestConfig};
use crate::models::{BackupPolicy, BackupPolicyCollection, BackupType, DeleteAfterDays};
use crate::types::StringMap;
use reqwest::Method;
use serde::Serialize;
use std::time::Instant;

/// Options for [`ResourceConfigurationV1::create_backup_policy`]
#[derive(Debug, Clone, Default)]
pub struct CreateBackupPolicyOptions {
    /// Source bucket
    pub bucket: String,
    pub policy_name: String,
    /// Vault the backups are written to
    pub target_backup_vault_crn: String,
    pub backup_type: BackupType,
    /// How long the first backup is retained
    pub initial_retention: DeleteAfterDays,
    /// Base64 MD5 of the request body, checked by the service
    pub md5: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl CreateBackupPolicyOptions {
    pub fn new(
        bucket: impl Into<String>,
        policy_name: impl Into<String>,
        target_backup_vault_crn: impl Into<String>,
        backup_type: BackupType,
        initial_retention: DeleteAfterDays,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            policy_name: policy_name.into(),
            target_backup_vault_crn: target_backup_vault_crn.into(),
            backup_type,
            initial_retention,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn md5(mut self, md5: impl Into<String>) -> Self {
        self.md5 = Some(md5.into());
        self
    }
}

call_settings!(CreateBackupPolicyOptions);

impl CallOptions for CreateBackupPolicyOptions {
    fn validate(&self) -> Result<()> {
        require("bucket", &self.bucket)?;
        require("policy_name", &self.policy_name)?;
        require("target_backup_vault_crn", &self.target_backup_vault_crn)?;
        if self.initial_retention.delete_after_days.is_none() {
            return Err(Error::missing_param("initial_retention.delete_after_days"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct NewBackupPolicy<'a> {
    initial_retention: &'a DeleteAfterDays,
    policy_name: &'a str,
    target_backup_vault_crn: &'a str,
    backup_type: BackupType,
}

/// Options for [`ResourceConfigurationV1::list_backup_policies`]
#[derive(Debug, Clone, Default)]
pub struct ListBackupPoliciesOptions {
    pub bucket: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl ListBackupPoliciesOptions {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }
}

call_settings!(ListBackupPoliciesOptions);

impl CallOptions for ListBackupPoliciesOptions {
    fn validate(&self) -> Result<()> {
        require("bucket", &self.bucket)
    }
}

/// Options for [`ResourceConfigurationV1::get_backup_policy`]
#[derive(Debug, Clone, Default)]
pub struct GetBackupPolicyOptions {
    pub bucket: String,
    pub policy_id: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl GetBackupPolicyOptions {
    pub fn new(bucket: impl Into<String>, policy_id: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            policy_id: policy_id.into(),
            ..Default::default()
        }
    }
}

call_settings!(GetBackupPolicyOptions);

impl CallOptions for GetBackupPolicyOptions {
    fn validate(&self) -> Result<()> {
        require("bucket", &self.bucket)?;
        require("policy_id", &self.policy_id)
    }
}

/// Options for [`ResourceConfigurationV1::delete_backup_policy`]
#[derive(Debug, Clone, Default)]
pub struct DeleteBackupPolicyOptions {
    pub bucket: String,
    pub policy_id: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl DeleteBackupPolicyOptions {
    pub fn new(bucket: impl Into<String>, policy_id: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            policy_id: policy_id.into(),
            ..Default::default()
        }
    }
}

call_settings!(DeleteBackupPolicyOptions);

impl CallOptions for DeleteBackupPolicyOptions {
    fn validate(&self) -> Result<()> {
        require("bucket", &self.bucket)?;
        require("policy_id", &self.policy_id)
    }
}

impl ResourceConfigurationV1 {
    /// Attach a backup policy to a bucket
    pub async fn create_backup_policy(
        &self,
        options: &CreateBackupPolicyOptions,
    ) -> Result<DetailedResponse<BackupPolicy>> {
        options.validate()?;

        let body = serde_json::to_value(NewBackupPolicy {
            initial_retention: &options.initial_retention,
            policy_name: &options.policy_name,
            target_backup_vault_crn: &options.target_backup_vault_crn,
            backup_type: options.backup_type,
        })?;
        let req = RequestConfig::new(
            "create_backup_policy",
            Method::POST,
            "/buckets/{bucket}/backup_policies",
        )
        .path_param("bucket", &options.bucket)
        .header_opt("MD5", options.md5.as_deref())
        .headers(&options.headers)
        .json(body)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// List a bucket's backup policies
    pub async fn list_backup_policies(
        &self,
        options: &ListBackupPoliciesOptions,
    ) -> Result<DetailedResponse<BackupPolicyCollection>> {
        options.validate()?;

        let req = RequestConfig::new(
            "list_backup_policies",
            Method::GET,
            "/buckets/{bucket}/backup_policies",
        )
        .path_param("bucket", &options.bucket)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Get one backup policy
    pub async fn get_backup_policy(
        &self,
        options: &GetBackupPolicyOptions,
    ) -> Result<DetailedResponse<BackupPolicy>> {
        options.validate()?;

        let req = RequestConfig::new(
            "get_backup_policy",
            Method::GET,
            "/buckets/{bucket}/backup_policies/{policy_id}",
        )
        .path_param("bucket", &options.bucket)
        .path_param("policy_id", &options.policy_id)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Remove a backup policy; existing backups are kept
    pub async fn delete_backup_policy(
        &self,
        options: &DeleteBackupPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;

        let req = RequestConfig::new(
            "delete_backup_policy",
            Method::DELETE,
            "/buckets/{bucket}/backup_policies/{policy_id}",
        )
        .path_param("bucket", &options.bucket)
        .path_param("policy_id", &options.policy_id)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request_no_result(req).await
    }
}
