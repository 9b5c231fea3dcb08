//! CLI module
//!
//! Command-line interface over the Resource Configuration client.
//!
//! # Commands
//!
//! - `bucket` - Show or update a bucket's configuration
//! - `policies` - Manage backup policies
//! - `vaults` - Manage backup vaults
//! - `ranges` - Inspect recovery ranges and their retention
//! - `restores` - Start and follow restores

mod commands;
mod runner;

pub use commands::{
    BucketCommand, Cli, Commands, OutputFormat, PolicyCommand, RangeCommand, RestoreCommand,
    SetRetentionArgs, VaultCommand,
};
pub use runner::Runner;
