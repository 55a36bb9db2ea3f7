//! IAM account password policy

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::sdk_error;
use account_baseline_common::PasswordPolicy;
use anyhow::{Context, Result};
use aws_sdk_iam::Client;
use tracing::debug;

/// IAM client for account-level settings in the target account
pub struct IamClient {
    client: Client,
}

impl FromAwsContext for IamClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.iam_client(),
        }
    }
}

impl IamClient {
    /// Replace the account password policy with `policy`
    pub async fn update_account_password_policy(&self, policy: &PasswordPolicy) -> Result<()> {
        self.client
            .update_account_password_policy()
            .minimum_password_length(policy.minimum_password_length)
            .require_symbols(policy.require_symbols)
            .require_numbers(policy.require_numbers)
            .require_uppercase_characters(policy.require_uppercase_characters)
            .require_lowercase_characters(policy.require_lowercase_characters)
            .allow_users_to_change_password(policy.allow_users_to_change_password)
            .max_password_age(policy.max_password_age)
            .password_reuse_prevention(policy.password_reuse_prevention)
            .hard_expiry(policy.hard_expiry)
            .send()
            .await
            .map_err(sdk_error)
            .context("Failed to update account password policy")?;

        debug!(
            min_length = policy.minimum_password_length,
            max_age = policy.max_password_age,
            "Account password policy updated"
        );
        Ok(())
    }
}
