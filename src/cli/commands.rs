//! CLI commands and argument parsing

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

/// Manage bucket configuration, backup policies, vaults and restores
#[derive(Parser, Debug)]
#[command(name = "cos-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service URL (overrides the configured URL)
    #[arg(long, global = true, conflicts_with = "region")]
    pub url: Option<String>,

    /// Region endpoint to use: global, private or direct
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Retry failed requests up to this many times
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bucket configuration
    #[command(subcommand)]
    Bucket(BucketCommand),

    /// Backup policies of a bucket
    #[command(subcommand)]
    Policies(PolicyCommand),

    /// Backup vaults
    #[command(subcommand)]
    Vaults(VaultCommand),

    /// Recovery ranges of a vault
    #[command(subcommand)]
    Ranges(RangeCommand),

    /// Restores from a vault
    #[command(subcommand)]
    Restores(RestoreCommand),
}

#[derive(Subcommand, Debug)]
pub enum BucketCommand {
    /// Show a bucket's configuration
    Get { bucket: String },

    /// Change a bucket's configuration
    Update {
        bucket: String,

        /// New hard quota in bytes
        #[arg(long, conflicts_with = "clear_hard_quota")]
        hard_quota: Option<i64>,

        /// Remove the hard quota
        #[arg(long)]
        clear_hard_quota: bool,

        /// Remove all firewall rules
        #[arg(long)]
        clear_firewall: bool,

        /// Only apply if the bucket's ETag matches
        #[arg(long)]
        if_match: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// List a bucket's backup policies
    List { bucket: String },

    /// Show one backup policy
    Get { bucket: String, policy_id: String },

    /// Attach a continuous backup policy to a bucket
    Create {
        bucket: String,

        #[arg(long)]
        name: String,

        /// CRN of the target backup vault
        #[arg(long)]
        vault_crn: String,

        /// Retention of the first backup, -1 keeps it indefinitely
        #[arg(long, allow_hyphen_values = true)]
        retention_days: i64,
    },

    /// Remove a backup policy
    Delete { bucket: String, policy_id: String },
}

#[derive(Subcommand, Debug)]
pub enum VaultCommand {
    /// List the vaults of a service instance
    List {
        #[arg(long)]
        instance: String,
    },

    /// Show one vault
    Get { name: String },

    /// Create a vault
    Create {
        name: String,

        #[arg(long)]
        instance: String,

        #[arg(long)]
        region: String,
    },

    /// Delete an empty vault
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum RangeCommand {
    /// List the recovery ranges of a vault
    List {
        vault: String,

        /// Only ranges of this source bucket
        #[arg(long)]
        source_crn: Option<String>,

        /// Only the most recent range per bucket
        #[arg(long)]
        latest: bool,
    },

    /// Show one recovery range
    Get { vault: String, range_id: String },

    /// Change a recovery range's retention
    SetRetention(SetRetentionArgs),
}

#[derive(Args, Debug)]
pub struct SetRetentionArgs {
    pub vault: String,
    pub range_id: String,

    /// Days to keep the range, -1 keeps it indefinitely
    #[arg(long, allow_hyphen_values = true)]
    pub days: i64,
}

#[derive(Subcommand, Debug)]
pub enum RestoreCommand {
    /// List the restores of a vault
    List { vault: String },

    /// Show one restore
    Get { vault: String, restore_id: String },

    /// Restore a bucket in place to a point in time
    Create {
        vault: String,

        #[arg(long)]
        range_id: String,

        /// RFC 3339 timestamp inside the recovery range
        #[arg(long)]
        point_in_time: DateTime<Utc>,

        /// CRN of the bucket receiving the restore
        #[arg(long)]
        target_crn: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
