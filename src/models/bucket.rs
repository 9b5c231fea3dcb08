//! Bucket configuration models

use crate::patch::{AsPatch, Patch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration and usage of a bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_instance_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noncurrent_object_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noncurrent_bytes_used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_marker_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall: Option<Firewall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_tracking: Option<ActivityTracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_monitoring: Option<MetricsMonitoring>,
    /// Maximum bytes the bucket may hold; 0 means no quota
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_quota: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_management: Option<ProtectionManagementResponse>,
}

/// Network the firewall admits traffic from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    Public,
    Private,
    Direct,
    /// A value this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// IP and network access rules
///
/// An empty `allowed_ip` list lifts IP restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Firewall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_ip: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denied_ip: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_network_type: Option<Vec<NetworkType>>,
}

/// Activity Tracker event delivery for a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityTracking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_data_events: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_data_events: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_events: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_tracker_crn: Option<String>,
}

/// Metrics delivery for a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsMonitoring {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metrics_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_metrics_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_monitoring_crn: Option<String>,
}

/// Requested protection management state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionState {
    Activate,
    Deactivate,
}

/// Protection management change, as sent in a bucket update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionManagement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_state: Option<ProtectionState>,
    /// Signed token authorizing the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_management_token: Option<String>,
}

/// Protection management status, as returned with a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionManagementResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_applied_counter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_entries: Option<Vec<ProtectionManagementTokenEntry>>,
}

/// One applied protection management token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionManagementTokenEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiration_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalidated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shorten_retention_flag: Option<bool>,
}

/// Partial update of a bucket's configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketPatch {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub firewall: Patch<Firewall>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub activity_tracking: Patch<ActivityTracking>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub metrics_monitoring: Patch<MetricsMonitoring>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub hard_quota: Patch<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub protection_management: Patch<ProtectionManagement>,
}

impl AsPatch for BucketPatch {}
