//! Restore operations

use super::options::{call_settings, require, CallOptions};
use super::ResourceConfigurationV1;
use crate::error::Result;
use crate::http::{DetailedResponse, RequestConfig};
use crate::models::{Restore, RestoreCollection, RestoreType};
use crate::pagination::{Pager, TOKEN_PARAM};
use crate::types::StringMap;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;
use std::time::Instant;

/// Options for [`ResourceConfigurationV1::create_restore`]
#[derive(Debug, Clone)]
pub struct CreateRestoreOptions {
    pub backup_vault_name: String,
    /// Range the restore point is taken from
    pub recovery_range_id: String,
    pub restore_type: RestoreType,
    /// Point in time to restore to; must fall inside the range
    pub restore_point_in_time: DateTime<Utc>,
    /// Bucket receiving the restored objects
    pub target_resource_crn: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl CreateRestoreOptions {
    pub fn new(
        backup_vault_name: impl Into<String>,
        recovery_range_id: impl Into<String>,
        restore_type: RestoreType,
        restore_point_in_time: DateTime<Utc>,
        target_resource_crn: impl Into<String>,
    ) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            recovery_range_id: recovery_range_id.into(),
            restore_type,
            restore_point_in_time,
            target_resource_crn: target_resource_crn.into(),
            headers: StringMap::new(),
            deadline: None,
        }
    }
}

call_settings!(CreateRestoreOptions);

impl CallOptions for CreateRestoreOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)?;
        require("recovery_range_id", &self.recovery_range_id)?;
        require("target_resource_crn", &self.target_resource_crn)
    }
}

#[derive(Serialize)]
struct NewRestore<'a> {
    recovery_range_id: &'a str,
    restore_type: RestoreType,
    restore_point_in_time: &'a DateTime<Utc>,
    target_resource_crn: &'a str,
}

/// Options for [`ResourceConfigurationV1::list_restores`]
#[derive(Debug, Clone, Default)]
pub struct ListRestoresOptions {
    pub backup_vault_name: String,
    /// Continuation token from a previous page
    pub token: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl ListRestoresOptions {
    pub fn new(backup_vault_name: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

call_settings!(ListRestoresOptions);

impl CallOptions for ListRestoresOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)
    }
}

/// Options for [`ResourceConfigurationV1::get_restore`]
#[derive(Debug, Clone, Default)]
pub struct GetRestoreOptions {
    pub backup_vault_name: String,
    pub restore_id: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl GetRestoreOptions {
    pub fn new(backup_vault_name: impl Into<String>, restore_id: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            restore_id: restore_id.into(),
            ..Default::default()
        }
    }
}

call_settings!(GetRestoreOptions);

impl CallOptions for GetRestoreOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)?;
        require("restore_id", &self.restore_id)
    }
}

impl ResourceConfigurationV1 {
    /// Start restoring a bucket to a point in time
    pub async fn create_restore(
        &self,
        options: &CreateRestoreOptions,
    ) -> Result<DetailedResponse<Restore>> {
        options.validate()?;

        let body = serde_json::to_value(NewRestore {
            recovery_range_id: &options.recovery_range_id,
            restore_type: options.restore_type,
            restore_point_in_time: &options.restore_point_in_time,
            target_resource_crn: &options.target_resource_crn,
        })?;
        let req = RequestConfig::new(
            "create_restore",
            Method::POST,
            "/backup_vaults/{backup_vault_name}/restores",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .headers(&options.headers)
        .json(body)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// List one page of a vault's restores
    pub async fn list_restores(
        &self,
        options: &ListRestoresOptions,
    ) -> Result<DetailedResponse<RestoreCollection>> {
        options.validate()?;

        let req = RequestConfig::new(
            "list_restores",
            Method::GET,
            "/backup_vaults/{backup_vault_name}/restores",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .query_opt(TOKEN_PARAM, options.token.as_deref())
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Pager over every restore of a vault
    pub fn restores_pager(&self, options: ListRestoresOptions) -> Result<Pager<'_, RestoreCollection>> {
        options.validate()?;

        let start = options.token.clone();
        Ok(Pager::new(start, move |token| {
            let mut options = options.clone();
            options.token = token;
            async move {
                let response = self.list_restores(&options).await?;
                Ok(response.result.unwrap_or_default())
            }
        }))
    }

    /// Get a restore and its progress
    pub async fn get_restore(
        &self,
        options: &GetRestoreOptions,
    ) -> Result<DetailedResponse<Restore>> {
        options.validate()?;

        let req = RequestConfig::new(
            "get_restore",
            Method::GET,
            "/backup_vaults/{backup_vault_name}/restores/{restore_id}",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .path_param("restore_id", &options.restore_id)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }
}
