//! Backup policy models

use super::common::DeleteAfterDays;
use serde::{Deserialize, Serialize};

/// Kind of backup a policy takes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupType {
    #[default]
    Continuous,
    /// A value this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// Lifecycle state of a backup policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Pending,
    Initializing,
    Active,
    ActionNeeded,
    Degraded,
    Failed,
    /// A state this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// A bucket's backup policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_retention: Option<DeleteAfterDays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_backup_vault_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_type: Option<BackupType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_status: Option<PolicyStatus>,
    /// Percentage of the initial sync completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_sync_progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_cause: Option<String>,
}

/// All backup policies of a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupPolicyCollection {
    pub backup_policies: Vec<BackupPolicy>,
}
