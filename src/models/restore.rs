//! Restore models

use super::common::NextPagination;
use crate::pagination::Pageable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a restore is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreType {
    /// Overwrite the target bucket's objects in place
    #[default]
    InPlace,
    /// A value this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// Progress of a restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStatus {
    Initializing,
    Running,
    Complete,
    Failed,
    /// A state this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl RestoreStatus {
    /// True once the restore will make no further progress
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// A restore operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_range_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_type: Option<RestoreType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_point_in_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_resource_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_resource_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_status: Option<RestoreStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_percent_progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_cause: Option<String>,
}

/// One page of restores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextPagination>,
    pub restores: Vec<Restore>,
}

impl Pageable for RestoreCollection {
    type Item = Restore;

    fn next_token(&self) -> Option<String> {
        self.next.as_ref().and_then(NextPagination::next_token)
    }

    fn into_items(self) -> Vec<Restore> {
        self.restores
    }
}
