//! Account-wide S3 block public access

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::sdk_error;
use account_baseline_common::{AccountId, S3BlockPublicAccess};
use anyhow::{Context, Result};
use aws_sdk_s3control::Client;
use aws_sdk_s3control::types::PublicAccessBlockConfiguration;
use tracing::debug;

/// S3 Control client in the target account
pub struct S3ControlClient {
    client: Client,
}

impl FromAwsContext for S3ControlClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.s3control_client(),
        }
    }
}

/// Map the configured settings onto the SDK shape; unset fields stay unset.
fn block_configuration(settings: &S3BlockPublicAccess) -> PublicAccessBlockConfiguration {
    PublicAccessBlockConfiguration::builder()
        .set_block_public_acls(settings.block_public_acls)
        .set_ignore_public_acls(settings.ignore_public_acls)
        .set_block_public_policy(settings.block_public_policy)
        .set_restrict_public_buckets(settings.restrict_public_buckets)
        .build()
}

impl S3ControlClient {
    pub async fn put_public_access_block(
        &self,
        account: &AccountId,
        settings: &S3BlockPublicAccess,
    ) -> Result<()> {
        self.client
            .put_public_access_block()
            .account_id(account.as_str())
            .public_access_block_configuration(block_configuration(settings))
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to put public access block for {account}"))?;

        debug!(account = %account, "Account public access block updated");
        Ok(())
    }
}
