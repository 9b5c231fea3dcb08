//! CLI runner - executes commands

use crate::cli::commands::{
    BucketCommand, Cli, Commands, OutputFormat, PolicyCommand, RangeCommand, RestoreCommand,
    SetRetentionArgs, VaultCommand,
};
use crate::config::{service_url_for_region, ExternalConfig};
use crate::error::Result;
use crate::http::DetailedResponse;
use crate::models::{BackupType, BucketPatch, DeleteAfterDays, RecoveryRangePatch, RestoreType};
use crate::patch::Patch;
use crate::service::{
    CreateBackupPolicyOptions, CreateBackupVaultOptions, CreateRestoreOptions,
    DeleteBackupPolicyOptions, DeleteBackupVaultOptions, GetBackupPolicyOptions,
    GetBackupVaultOptions, GetBucketConfigOptions, GetRestoreOptions,
    GetSourceResourceRecoveryRangeOptions, ListBackupPoliciesOptions, ListBackupVaultsOptions,
    ListRecoveryRangesOptions, ListRestoresOptions, PatchSourceResourceRecoveryRangeOptions,
    ResourceConfigurationV1, UpdateBucketConfigOptions,
};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let service = self.build_service(ExternalConfig::load()?)?;
        self.run_with(&service).await
    }

    /// Run the CLI command against an already built client
    pub async fn run_with(&self, service: &ResourceConfigurationV1) -> Result<()> {
        match &self.cli.command {
            Commands::Bucket(cmd) => self.bucket(service, cmd).await,
            Commands::Policies(cmd) => self.policies(service, cmd).await,
            Commands::Vaults(cmd) => self.vaults(service, cmd).await,
            Commands::Ranges(cmd) => self.ranges(service, cmd).await,
            Commands::Restores(cmd) => self.restores(service, cmd).await,
        }
    }

    /// Build the client from external configuration and the global flags
    pub fn build_service(&self, config: ExternalConfig) -> Result<ResourceConfigurationV1> {
        let mut options = config.into_service_options();

        if let Some(url) = &self.cli.url {
            options.service_url = Some(url.clone());
        } else if let Some(region) = &self.cli.region {
            options.service_url = Some(service_url_for_region(region)?.to_string());
        }
        if let Some(secs) = self.cli.timeout {
            options.timeout = Duration::from_secs(secs);
        }

        let mut service = ResourceConfigurationV1::new(options)?;
        if let Some(retries) = self.cli.retries {
            if retries == 0 {
                service.disable_retries();
            } else {
                service.enable_retries(retries, Duration::ZERO);
            }
        }

        debug!("Using service URL {}", service.service_url());
        Ok(service)
    }

    // ========================================================================
    // Buckets
    // ========================================================================

    async fn bucket(&self, service: &ResourceConfigurationV1, cmd: &BucketCommand) -> Result<()> {
        match cmd {
            BucketCommand::Get { bucket } => {
                let response = service
                    .get_bucket_config(&GetBucketConfigOptions::new(bucket))
                    .await?;
                self.output_result(response)
            }
            BucketCommand::Update {
                bucket,
                hard_quota,
                clear_hard_quota,
                clear_firewall,
                if_match,
            } => {
                let patch = bucket_patch(*hard_quota, *clear_hard_quota, *clear_firewall);
                let mut options = UpdateBucketConfigOptions::new(bucket).bucket_patch(patch);
                if let Some(etag) = if_match {
                    options = options.if_match(etag);
                }
                let response = service.update_bucket_config(&options).await?;
                info!("Updated bucket {bucket}");
                self.output_status(response.status_code())
            }
        }
    }

    // ========================================================================
    // Backup policies
    // ========================================================================

    async fn policies(&self, service: &ResourceConfigurationV1, cmd: &PolicyCommand) -> Result<()> {
        match cmd {
            PolicyCommand::List { bucket } => {
                let response = service
                    .list_backup_policies(&ListBackupPoliciesOptions::new(bucket))
                    .await?;
                self.output_result(response)
            }
            PolicyCommand::Get { bucket, policy_id } => {
                let response = service
                    .get_backup_policy(&GetBackupPolicyOptions::new(bucket, policy_id))
                    .await?;
                self.output_result(response)
            }
            PolicyCommand::Create {
                bucket,
                name,
                vault_crn,
                retention_days,
            } => {
                let options = CreateBackupPolicyOptions::new(
                    bucket,
                    name,
                    vault_crn,
                    BackupType::Continuous,
                    DeleteAfterDays::new(*retention_days),
                );
                let response = service.create_backup_policy(&options).await?;
                self.output_result(response)
            }
            PolicyCommand::Delete { bucket, policy_id } => {
                let response = service
                    .delete_backup_policy(&DeleteBackupPolicyOptions::new(bucket, policy_id))
                    .await?;
                info!("Deleted backup policy {policy_id}");
                self.output_status(response.status_code())
            }
        }
    }

    // ========================================================================
    // Backup vaults
    // ========================================================================

    async fn vaults(&self, service: &ResourceConfigurationV1, cmd: &VaultCommand) -> Result<()> {
        match cmd {
            VaultCommand::List { instance } => {
                let mut pager = service.backup_vaults_pager(ListBackupVaultsOptions::new(instance))?;
                let names = pager.all().await?;
                debug!(pages = pager.pages_fetched(), "Listed {} vaults", names.len());
                self.output(&names)
            }
            VaultCommand::Get { name } => {
                let response = service
                    .get_backup_vault(&GetBackupVaultOptions::new(name))
                    .await?;
                self.output_result(response)
            }
            VaultCommand::Create {
                name,
                instance,
                region,
            } => {
                let response = service
                    .create_backup_vault(&CreateBackupVaultOptions::new(instance, name, region))
                    .await?;
                self.output_result(response)
            }
            VaultCommand::Delete { name } => {
                let response = service
                    .delete_backup_vault(&DeleteBackupVaultOptions::new(name))
                    .await?;
                info!("Deleted backup vault {name}");
                self.output_status(response.status_code())
            }
        }
    }

    // ========================================================================
    // Recovery ranges
    // ========================================================================

    async fn ranges(&self, service: &ResourceConfigurationV1, cmd: &RangeCommand) -> Result<()> {
        match cmd {
            RangeCommand::List {
                vault,
                source_crn,
                latest,
            } => {
                let mut options = ListRecoveryRangesOptions::new(vault);
                if let Some(crn) = source_crn {
                    options = options.source_resource_crn(crn);
                }
                if *latest {
                    options = options.latest(true);
                }
                let mut pager = service.recovery_ranges_pager(options)?;
                let ranges = pager.all().await?;
                debug!(pages = pager.pages_fetched(), "Listed {} ranges", ranges.len());
                self.output(&ranges)
            }
            RangeCommand::Get { vault, range_id } => {
                let options = GetSourceResourceRecoveryRangeOptions::new(vault, range_id);
                let response = service.get_source_resource_recovery_range(&options).await?;
                self.output_result(response)
            }
            RangeCommand::SetRetention(SetRetentionArgs {
                vault,
                range_id,
                days,
            }) => {
                let patch = RecoveryRangePatch {
                    retention: Patch::Value(DeleteAfterDays::new(*days)),
                };
                let options = PatchSourceResourceRecoveryRangeOptions::new(vault, range_id, patch);
                let response = service.patch_source_resource_recovery_range(&options).await?;
                self.output_result(response)
            }
        }
    }

    // ========================================================================
    // Restores
    // ========================================================================

    async fn restores(&self, service: &ResourceConfigurationV1, cmd: &RestoreCommand) -> Result<()> {
        match cmd {
            RestoreCommand::List { vault } => {
                let mut pager = service.restores_pager(ListRestoresOptions::new(vault))?;
                let restores = pager.all().await?;
                self.output(&restores)
            }
            RestoreCommand::Get { vault, restore_id } => {
                let response = service
                    .get_restore(&GetRestoreOptions::new(vault, restore_id))
                    .await?;
                self.output_result(response)
            }
            RestoreCommand::Create {
                vault,
                range_id,
                point_in_time,
                target_crn,
            } => {
                let options = CreateRestoreOptions::new(
                    vault,
                    range_id,
                    RestoreType::InPlace,
                    *point_in_time,
                    target_crn,
                );
                let response = service.create_restore(&options).await?;
                self.output_result(response)
            }
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn output_result<T: Serialize>(&self, response: DetailedResponse<T>) -> Result<()> {
        let status = response.status_code();
        match response.result {
            Some(result) => self.output(&result),
            None => self.output_status(status),
        }
    }

    fn output_status(&self, status: u16) -> Result<()> {
        self.output(&json!({ "status": status }))
    }

    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", render(self.cli.format, value)?);
        Ok(())
    }
}

/// Build the merge patch for `bucket update`
pub(crate) fn bucket_patch(
    hard_quota: Option<i64>,
    clear_hard_quota: bool,
    clear_firewall: bool,
) -> BucketPatch {
    let mut patch = BucketPatch::default();
    if let Some(quota) = hard_quota {
        patch.hard_quota = Patch::Value(quota);
    } else if clear_hard_quota {
        patch.hard_quota = Patch::Null;
    }
    if clear_firewall {
        patch.firewall = Patch::Null;
    }
    patch
}

/// Serialize a value in the requested output format
pub(crate) fn render<T: Serialize + ?Sized>(format: OutputFormat, value: &T) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}
