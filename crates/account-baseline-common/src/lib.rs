//! account-baseline-common - Shared types and utilities
//!
//! This crate provides the types shared by the handlers and their tests,
//! without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`config`]: Typed configuration document (one optional field per feature)
//! - [`defaults`]: Default configuration values
//! - [`error`]: Configuration and trigger errors
//! - [`event`]: The event object threaded between handlers
//! - [`regions`]: Region ordering
//! - [`resource_kind`]: VPC resource categories and teardown order
//! - [`trigger`]: Account-creation notification parsing

pub mod config;
pub mod defaults;
pub mod error;
pub mod event;
pub mod regions;
pub mod resource_kind;
pub mod trigger;

// Re-export commonly used types
pub use config::{
    DefaultVpcConfig, GlobalConfig, InstanceMetadataDefaults, PasswordPolicy,
    PasswordPolicyConfig, S3BlockPublicAccess,
};
pub use error::{ConfigError, TriggerError};
pub use event::{AccountId, BaselineEvent};
pub use regions::ordered_regions;
pub use resource_kind::{ResourceCategory, TEARDOWN_ORDER};
pub use trigger::CreateAccountNotification;
