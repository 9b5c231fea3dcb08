//! Bucket configuration operations

use super::options::{call_settings, require, CallOptions};
use super::ResourceConfigurationV1;
use crate::error::Result;
use crate::http::{DetailedResponse, RequestConfig};
use crate::models::{Bucket, BucketPatch};
use crate::patch::AsPatch;
use crate::types::StringMap;
use reqwest::Method;
use std::time::Instant;

/// Options for [`ResourceConfigurationV1::get_bucket_config`]
#[derive(Debug, Clone, Default)]
pub struct GetBucketConfigOptions {
    /// Name of the bucket
    pub bucket: String,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl GetBucketConfigOptions {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }
}

call_settings!(GetBucketConfigOptions);

impl CallOptions for GetBucketConfigOptions {
    fn validate(&self) -> Result<()> {
        require("bucket", &self.bucket)
    }
}

/// Options for [`ResourceConfigurationV1::update_bucket_config`]
#[derive(Debug, Clone, Default)]
pub struct UpdateBucketConfigOptions {
    /// Name of the bucket
    pub bucket: String,
    /// Fields to change; `None` sends no body
    pub bucket_patch: Option<BucketPatch>,
    /// Only apply the change if the bucket's ETag matches
    pub if_match: Option<String>,
    pub headers: StringMap,
    pub deadline: Option<Instant>,
}

impl UpdateBucketConfigOptions {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn bucket_patch(mut self, patch: BucketPatch) -> Self {
        self.bucket_patch = Some(patch);
        self
    }

    #[must_use]
    pub fn if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }
}

call_settings!(UpdateBucketConfigOptions);

impl CallOptions for UpdateBucketConfigOptions {
    fn validate(&self) -> Result<()> {
        require("bucket", &self.bucket)
    }
}

impl ResourceConfigurationV1 {
    /// Get a bucket's configuration and usage
    pub async fn get_bucket_config(
        &self,
        options: &GetBucketConfigOptions,
    ) -> Result<DetailedResponse<Bucket>> {
        options.validate()?;

        let req = RequestConfig::new("get_bucket_config", Method::GET, "/b/{bucket}")
            .path_param("bucket", &options.bucket)
            .headers(&options.headers)
            .deadline(options.deadline);
        self.client.request(req).await
    }

    /// Change a bucket's configuration
    ///
    /// Only the fields set in the patch are sent. The service answers with
    /// an empty body, so the response carries no result.
    pub async fn update_bucket_config(
        &self,
        options: &UpdateBucketConfigOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;

        let mut req = RequestConfig::new("update_bucket_config", Method::PATCH, "/b/{bucket}")
            .path_param("bucket", &options.bucket)
            .header_opt("If-Match", options.if_match.as_deref())
            .headers(&options.headers)
            .deadline(options.deadline);
        if let Some(patch) = &options.bucket_patch {
            req = req.merge_patch(patch.as_patch()?);
        }
        self.client.request_no_result(req).await
    }
}
