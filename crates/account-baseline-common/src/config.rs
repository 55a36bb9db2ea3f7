//! Configuration document shared by every handler
//!
//! The document is YAML (JSON also parses) fetched at invocation time. Each
//! recognized top-level key maps to one optional field; a missing key means
//! the feature is not configured and its handler does nothing. Unknown keys
//! are ignored so the same document can carry settings for other tooling.

use crate::defaults::{default_hop_limit, default_no_preference};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const HTTP_TOKENS_VALUES: &[&str] = &["optional", "required", "no-preference"];
const ENDPOINT_STATE_VALUES: &[&str] = &["enabled", "disabled", "no-preference"];

/// Typed configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, garde::Validate)]
pub struct GlobalConfig {
    /// IAM account password policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(dive)]
    pub account_password_policy: Option<PasswordPolicyConfig>,

    /// Default VPC teardown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(dive)]
    pub default_vpc: Option<DefaultVpcConfig>,

    /// EBS snapshot block public access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub enable_ebs_block_public_access: Option<bool>,

    /// Account-level instance metadata defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(dive)]
    pub require_imdsv2: Option<InstanceMetadataDefaults>,

    /// Account-wide S3 block public access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub enable_account_s3_block_public_access: Option<S3BlockPublicAccess>,
}

/// `account_password_policy` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, garde::Validate)]
pub struct PasswordPolicyConfig {
    #[serde(default)]
    #[garde(skip)]
    pub update_account_password_policy: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(dive)]
    pub password_policy: Option<PasswordPolicy>,
}

/// IAM password policy settings, field names as the IAM API spells them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, garde::Validate)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordPolicy {
    #[garde(range(min = 6, max = 128))]
    pub minimum_password_length: i32,
    #[garde(skip)]
    pub require_symbols: bool,
    #[garde(skip)]
    pub require_numbers: bool,
    #[garde(skip)]
    pub require_uppercase_characters: bool,
    #[garde(skip)]
    pub require_lowercase_characters: bool,
    #[garde(skip)]
    pub allow_users_to_change_password: bool,
    #[garde(range(min = 1, max = 1095))]
    pub max_password_age: i32,
    #[garde(range(min = 1, max = 24))]
    pub password_reuse_prevention: i32,
    #[garde(skip)]
    pub hard_expiry: bool,
}

/// `default_vpc` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, garde::Validate)]
pub struct DefaultVpcConfig {
    #[serde(default)]
    #[garde(skip)]
    pub delete_default_vpc: bool,

    /// Regions whose default VPC is kept
    #[serde(default)]
    #[garde(inner(length(min = 1)))]
    pub preserve_vpc_regions: Vec<String>,
}

impl DefaultVpcConfig {
    /// Whether the default VPC in `region` must be left alone
    pub fn preserves(&self, region: &str) -> bool {
        self.preserve_vpc_regions.iter().any(|r| r == region)
    }
}

/// `require_imdsv2` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, garde::Validate)]
pub struct InstanceMetadataDefaults {
    #[serde(rename = "HttpTokens", default = "default_no_preference")]
    #[garde(custom(http_tokens_value))]
    pub http_tokens: String,

    /// -1 means no preference
    #[serde(rename = "HttpPutResponseHopLimit", default = "default_hop_limit")]
    #[garde(range(min = -1, max = 64))]
    pub http_put_response_hop_limit: i32,

    #[serde(rename = "HttpEndpoint", default = "default_no_preference")]
    #[garde(custom(endpoint_state_value))]
    pub http_endpoint: String,

    #[serde(rename = "InstanceMetadataTags", default = "default_no_preference")]
    #[garde(custom(endpoint_state_value))]
    pub instance_metadata_tags: String,
}

impl Default for InstanceMetadataDefaults {
    fn default() -> Self {
        Self {
            http_tokens: default_no_preference(),
            http_put_response_hop_limit: default_hop_limit(),
            http_endpoint: default_no_preference(),
            instance_metadata_tags: default_no_preference(),
        }
    }
}

/// `enable_account_s3_block_public_access` section, passed through to S3 Control as given
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3BlockPublicAccess {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_public_acls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_public_acls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_public_policy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_public_buckets: Option<bool>,
}

impl S3BlockPublicAccess {
    /// True when no setting is present at all
    pub fn is_empty(&self) -> bool {
        self.block_public_acls.is_none()
            && self.ignore_public_acls.is_none()
            && self.block_public_policy.is_none()
            && self.restrict_public_buckets.is_none()
    }
}

fn one_of(value: &str, allowed: &[&str]) -> garde::Result {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "'{value}' is not one of: {}",
            allowed.join(", ")
        )))
    }
}

fn http_tokens_value(value: &str, _: &()) -> garde::Result {
    one_of(value, HTTP_TOKENS_VALUES)
}

fn endpoint_state_value(value: &str, _: &()) -> garde::Result {
    one_of(value, ENDPOINT_STATE_VALUES)
}

impl GlobalConfig {
    /// Parse and validate a configuration document.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ConfigError::Empty);
        }

        let config: Option<GlobalConfig> = serde_yaml::from_slice(bytes)?;
        let config = config.ok_or(ConfigError::Empty)?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Check field ranges and that an enabled password update carries a policy.
    ///
    /// Runs for every parsed document and for every event that embeds one.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        garde::Validate::validate(self)?;

        let policy_missing = self.account_password_policy.as_ref().is_some_and(|section| {
            section.update_account_password_policy && section.password_policy.is_none()
        });
        if policy_missing {
            return Err(ConfigError::MissingPasswordPolicy);
        }

        Ok(())
    }

    /// Load a configuration document from a local file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read(path).map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        Self::from_yaml(&content)
    }

    /// The password policy to apply, if the update flag is set
    pub fn password_policy_update(&self) -> Option<&PasswordPolicy> {
        self.account_password_policy
            .as_ref()
            .filter(|section| section.update_account_password_policy)
            .and_then(|section| section.password_policy.as_ref())
    }

    /// The default VPC section, if deletion is enabled
    pub fn default_vpc_deletion(&self) -> Option<&DefaultVpcConfig> {
        self.default_vpc
            .as_ref()
            .filter(|section| section.delete_default_vpc)
    }

    /// Whether EBS snapshot block public access should be enabled
    pub fn ebs_block_public_access(&self) -> bool {
        self.enable_ebs_block_public_access.unwrap_or(false)
    }

    /// The instance metadata defaults to apply, if configured
    pub fn imdsv2_defaults(&self) -> Option<&InstanceMetadataDefaults> {
        self.require_imdsv2.as_ref()
    }

    /// The S3 block public access configuration, if it sets anything
    pub fn s3_block_public_access(&self) -> Option<&S3BlockPublicAccess> {
        self.enable_account_s3_block_public_access
            .as_ref()
            .filter(|section| !section.is_empty())
    }
}
