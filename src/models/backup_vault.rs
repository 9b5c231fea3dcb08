//! Backup vault models

use super::common::NextPagination;
use crate::pagination::Pageable;
use crate::patch::{AsPatch, Patch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity Tracker settings of a vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultActivityTracking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_events: Option<bool>,
}

/// Metrics settings of a vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultMetricsMonitoring {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metrics_enabled: Option<bool>,
}

/// A backup vault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupVault {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_tracking: Option<VaultActivityTracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_monitoring: Option<VaultMetricsMonitoring>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_vault_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Key Protect root key used for server-side encryption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sse_kp_customer_root_key_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_instance_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_used: Option<i64>,
}

/// One page of vault names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupVaultCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextPagination>,
    pub backup_vaults: Vec<String>,
}

impl Pageable for BackupVaultCollection {
    type Item = String;

    fn next_token(&self) -> Option<String> {
        self.next.as_ref().and_then(NextPagination::next_token)
    }

    fn into_items(self) -> Vec<String> {
        self.backup_vaults
    }
}

/// Partial update of a backup vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupVaultPatch {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub activity_tracking: Patch<VaultActivityTracking>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub metrics_monitoring: Patch<VaultMetricsMonitoring>,
}

impl AsPatch for BackupVaultPatch {}
