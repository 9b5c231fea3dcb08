//! Recovery range operations

use super::options::{call_settings, require, CallOptions};
use super::ResourceConfigurationV1;
use crate::error::Result;
use crate::http::{DetailedResponse, RequestConfig};
use crate::models::{RecoveryRange, RecoveryRangeCollection, RecoveryRangePatch};
use crate::pagination::{Pager, TOKEN_PARAM};
use crate::patch::AsPatch;
use crate::types::StringMap;
use reqwest::Method;
use std::time::Instant;

/// Options for [`ResourceConfigurationV1::list_recovery_ranges`]
#[derive(Debug, Clone, Default)]
pub struct ListRecoveryRangesOptions {
    pub backup_vault_name: String,
    /// Only ranges of this source bucket
    pub source_resource_crn: Option<String>,
    /// Only the most recent range of each source bucket
    pub latest: Option<bool>,
    /// Continuation token from a previous page
    pub token: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl ListRecoveryRangesOptions {
    pub fn new(backup_vault_name: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn source_resource_crn(mut self, crn: impl Into<String>) -> Self {
        self.source_resource_crn = Some(crn.into());
        self
    }

    #[must_use]
    pub fn latest(mut self, latest: bool) -> Self {
        self.latest = Some(latest);
        self
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

call_settings!(ListRecoveryRangesOptions);

impl CallOptions for ListRecoveryRangesOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)
    }
}

/// Options for [`ResourceConfigurationV1::get_source_resource_recovery_range`]
#[derive(Debug, Clone, Default)]
pub struct GetSourceResourceRecoveryRangeOptions {
    pub backup_vault_name: String,
    pub recovery_range_id: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl GetSourceResourceRecoveryRangeOptions {
    pub fn new(backup_vault_name: impl Into<String>, recovery_range_id: impl Into<String>) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            recovery_range_id: recovery_range_id.into(),
            ..Default::default()
        }
    }
}

call_settings!(GetSourceResourceRecoveryRangeOptions);

impl CallOptions for GetSourceResourceRecoveryRangeOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)?;
        require("recovery_range_id", &self.recovery_range_id)
    }
}

/// Options for [`ResourceConfigurationV1::patch_source_resource_recovery_range`]
#[derive(Debug, Clone, Default)]
pub struct PatchSourceResourceRecoveryRangeOptions {
    pub backup_vault_name: String,
    pub recovery_range_id: String,
    pub recovery_range_patch: RecoveryRangePatch,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl PatchSourceResourceRecoveryRangeOptions {
    pub fn new(
        backup_vault_name: impl Into<String>,
        recovery_range_id: impl Into<String>,
        recovery_range_patch: RecoveryRangePatch,
    ) -> Self {
        Self {
            backup_vault_name: backup_vault_name.into(),
            recovery_range_id: recovery_range_id.into(),
            recovery_range_patch,
            ..Default::default()
        }
    }
}

call_settings!(PatchSourceResourceRecoveryRangeOptions);

impl CallOptions for PatchSourceResourceRecoveryRangeOptions {
    fn validate(&self) -> Result<()> {
        require("backup_vault_name", &self.backup_vault_name)?;
        require("recovery_range_id", &self.recovery_range_id)
    }
}

impl ResourceConfigurationV1 {
    /// List one page of a vault's recovery ranges
    pub async fn list_recovery_ranges(
        &self,
        options: &ListRecoveryRangesOptions,
    ) -> Result<DetailedResponse<RecoveryRangeCollection>> {
        options.validate()?;

        let req = RequestConfig::new(
            "list_recovery_ranges",
            Method::GET,
            "/backup_vaults/{backup_vault_name}/recovery_ranges",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .query_opt("source_resource_crn", options.source_resource_crn.as_deref())
        .query_opt("latest", options.latest)
        .query_opt(TOKEN_PARAM, options.token.as_deref())
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Pager over every recovery range of a vault
    pub fn recovery_ranges_pager(
        &self,
        options: ListRecoveryRangesOptions,
    ) -> Result<Pager<'_, RecoveryRangeCollection>> {
        options.validate()?;

        let start = options.token.clone();
        Ok(Pager::new(start, move |token| {
            let mut options = options.clone();
            options.token = token;
            async move {
                let response = self.list_recovery_ranges(&options).await?;
                Ok(response.result.unwrap_or_default())
            }
        }))
    }

    /// Get one recovery range
    pub async fn get_source_resource_recovery_range(
        &self,
        options: &GetSourceResourceRecoveryRangeOptions,
    ) -> Result<DetailedResponse<RecoveryRange>> {
        options.validate()?;

        let req = RequestConfig::new(
            "get_source_resource_recovery_range",
            Method::GET,
            "/backup_vaults/{backup_vault_name}/recovery_ranges/{recovery_range_id}",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .path_param("recovery_range_id", &options.recovery_range_id)
        .headers(&options.headers)
        .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Change a recovery range's retention
    pub async fn patch_source_resource_recovery_range(
        &self,
        options: &PatchSourceResourceRecoveryRangeOptions,
    ) -> Result<DetailedResponse<RecoveryRange>> {
        options.validate()?;

        let req = RequestConfig::new(
            "patch_source_resource_recovery_range",
            Method::PATCH,
            "/backup_vaults/{backup_vault_name}/recovery_ranges/{recovery_range_id}",
        )
        .path_param("backup_vault_name", &options.backup_vault_name)
        .path_param("recovery_range_id", &options.recovery_range_id)
        .headers(&options.headers)
        .merge_patch(options.recovery_range_patch.as_patch()?)
        .deadline(options.deadline);
        self.client.request(req).await
    }
}
