use crate::aws::session::{AccountSession, Connector};
use account_baseline_common::BaselineEvent;
use anyhow::Result;
use tracing::info;

/// Apply account-wide S3 block public access.
pub async fn s3_block_public_access<C: Connector>(
    event: BaselineEvent,
    connector: &C,
) -> Result<BaselineEvent> {
    let Some(settings) = event.global_config.s3_block_public_access() else {
        return Ok(event);
    };

    let session = connector.connect(&event.cross_account_role_arn).await?;
    let message = format!(
        "Applying Account Wide Block Public Access for S3 in {}",
        event.new_aws_account_id
    );
    info!(account = %event.new_aws_account_id, "{message}");

    session
        .put_s3_public_access_block(&event.new_aws_account_id, settings)
        .await?;
    Ok(event.with_message(message))
}
