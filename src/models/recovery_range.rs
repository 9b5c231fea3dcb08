//! Recovery range models

use super::common::{DeleteAfterDays, NextPagination};
use crate::pagination::Pageable;
use crate::patch::{AsPatch, Patch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A span of time a source bucket can be restored to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_resource_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_policy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_create_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention: Option<DeleteAfterDays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_range_id: Option<String>,
}

/// One page of recovery ranges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryRangeCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextPagination>,
    pub recovery_ranges: Vec<RecoveryRange>,
}

impl Pageable for RecoveryRangeCollection {
    type Item = RecoveryRange;

    fn next_token(&self) -> Option<String> {
        self.next.as_ref().and_then(NextPagination::next_token)
    }

    fn into_items(self) -> Vec<RecoveryRange> {
        self.recovery_ranges
    }
}

/// Partial update of a recovery range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryRangePatch {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub retention: Patch<DeleteAfterDays>,
}

impl AsPatch for RecoveryRangePatch {}
