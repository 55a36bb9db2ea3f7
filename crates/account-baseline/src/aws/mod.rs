//! AWS client modules for the baseline handlers
//!
//! This module provides wrappers around AWS SDK clients for:
//! - STS: Cross-account role assumption
//! - EC2: Region discovery, default VPC teardown, regional settings
//! - IAM: Account password policy
//! - S3: Configuration document download
//! - S3 Control: Account-wide block public access

pub mod account;
pub mod context;
pub mod ec2;
pub mod error;
pub mod iam;
pub mod s3;
pub mod s3control;
pub mod session;

// Core clients
pub use account::{CrossAccountSession, RoleAssumer};
pub use context::{AwsContext, FromAwsContext};
pub use ec2::{Ec2Client, NetworkOperations, RegionalSettings};
pub use iam::IamClient;
pub use s3::S3Client;
pub use s3control::S3ControlClient;
pub use session::{AccountSession, AwsConnector, ConfigStore, Connector};

// Error handling
pub use error::{AwsError, classify_anyhow_error, classify_aws_error, ignore_not_found};
