//! API data models
//!
//! Plain serde value objects mirroring the service's JSON. Every response
//! field is optional; JSON field names are snake_case on the wire.
//! Partial updates (`*Patch`) use [`Patch`](crate::patch::Patch) fields and
//! implement [`AsPatch`](crate::patch::AsPatch).

mod backup_policy;
mod backup_vault;
mod bucket;
mod common;
mod recovery_range;
mod restore;

pub use backup_policy::{BackupPolicy, BackupPolicyCollection, BackupType, PolicyStatus};
pub use backup_vault::{
    BackupVault, BackupVaultCollection, BackupVaultPatch, VaultActivityTracking,
    VaultMetricsMonitoring,
};
pub use bucket::{
    ActivityTracking, Bucket, BucketPatch, Firewall, MetricsMonitoring, NetworkType,
    ProtectionManagement, ProtectionManagementResponse, ProtectionManagementTokenEntry,
    ProtectionState,
};
pub use common::{DeleteAfterDays, NextPagination, RETAIN_INDEFINITELY};
pub use recovery_range::{RecoveryRange, RecoveryRangeCollection, RecoveryRangePatch};
pub use restore::{Restore, RestoreCollection, RestoreStatus, RestoreType};
