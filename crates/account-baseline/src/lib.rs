//! account-baseline: security baseline handlers for newly created AWS accounts
//!
//! The handlers run in sequence for each new account, passing a
//! [`BaselineEvent`](account_baseline_common::BaselineEvent) along:
//!
//! - [`handlers::load_config`]: validates the trigger and loads the configuration document
//! - [`handlers::password_policy`]: IAM account password policy
//! - [`handlers::default_vpc`]: default VPC teardown in every region
//! - [`handlers::ebs_block_public_access`]: EBS snapshot block public access
//! - [`handlers::imdsv2`]: instance metadata defaults
//! - [`handlers::s3_block_public_access`]: account-wide S3 block public access

pub mod aws;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod pipeline;
pub mod teardown;

#[cfg(test)]
pub(crate) mod testing;

pub use config::HandlerSettings;
pub use pipeline::{apply_baseline, run_baseline};
pub use teardown::{TeardownOutcome, process_region, sweep_account, teardown_vpc};
