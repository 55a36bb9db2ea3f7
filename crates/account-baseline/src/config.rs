//! Runtime settings shared by every handler
//!
//! Each setting can be given as a flag or through the environment variable
//! the deployment already sets.

use account_baseline_common::defaults::{DEFAULT_ROLE_SESSION_NAME, PREFERRED_REGION};
use anyhow::{Context, Result};
use std::borrow::Cow;

#[derive(clap::Args, Debug, Clone)]
pub struct HandlerSettings {
    /// Bucket holding the configuration document
    #[arg(long, env = "BUCKET")]
    pub bucket: Option<String>,

    /// Key of the configuration document in the bucket, percent-decoded before use
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Role to assume in the new account
    #[arg(long, env = "ROLE_NAME")]
    pub role_name: Option<String>,

    /// Session name recorded on the assumed role
    #[arg(long, env = "ROLE_SESSION_NAME", default_value = DEFAULT_ROLE_SESSION_NAME)]
    pub role_session_name: String,

    /// Region for management-account clients
    #[arg(long, env = "AWS_REGION", default_value = PREFERRED_REGION)]
    pub region: String,

    /// AWS profile to use for the management account
    #[arg(long, env = "AWS_PROFILE")]
    pub aws_profile: Option<String>,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            bucket: None,
            config_file: None,
            role_name: None,
            role_session_name: DEFAULT_ROLE_SESSION_NAME.to_string(),
            region: PREFERRED_REGION.to_string(),
            aws_profile: None,
        }
    }
}

impl HandlerSettings {
    /// Bucket and decoded key of the configuration document
    pub fn config_location(&self) -> Result<(&str, Cow<'_, str>)> {
        let bucket = self
            .bucket
            .as_deref()
            .context("BUCKET is not set (use --bucket)")?;
        let raw_key = self
            .config_file
            .as_deref()
            .context("CONFIG_FILE is not set (use --config-file)")?;
        let key = urlencoding::decode(raw_key).with_context(|| {
            format!("CONFIG_FILE '{raw_key}' is not valid percent-encoded UTF-8")
        })?;
        Ok((bucket, key))
    }

    pub fn role_name(&self) -> Result<&str> {
        self.role_name
            .as_deref()
            .context("ROLE_NAME is not set (use --role-name)")
    }
}
