use crate::aws::ec2::RegionalSettings;
use crate::aws::session::{AccountSession, Connector};
use account_baseline_common::BaselineEvent;
use anyhow::Result;
use tracing::info;

/// Block public sharing of EBS snapshots in every region.
pub async fn ebs_block_public_access<C: Connector>(
    event: BaselineEvent,
    connector: &C,
) -> Result<BaselineEvent> {
    if !event.global_config.ebs_block_public_access() {
        return Ok(event);
    }

    let session = connector.connect(&event.cross_account_role_arn).await?;
    let mut messages = Vec::new();
    for region in session.regions().await? {
        let message = format!(
            "Applying EBS Block Public access in {region} in {}",
            event.new_aws_account_id
        );
        info!(region = %region, "{message}");
        messages.push(message);

        session
            .regional(&region)
            .await?
            .enable_snapshot_block_public_access()
            .await?;
    }

    Ok(event.with_messages(messages))
}
