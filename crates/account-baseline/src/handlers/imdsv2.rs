use crate::aws::ec2::RegionalSettings;
use crate::aws::session::{AccountSession, Connector};
use account_baseline_common::BaselineEvent;
use anyhow::Result;
use tracing::info;

/// Set the account's instance metadata defaults in every region.
pub async fn imdsv2<C: Connector>(event: BaselineEvent, connector: &C) -> Result<BaselineEvent> {
    let Some(defaults) = event.global_config.imdsv2_defaults() else {
        return Ok(event);
    };

    let session = connector.connect(&event.cross_account_role_arn).await?;
    let mut messages = Vec::new();
    for region in session.regions().await? {
        let message = format!(
            "Enabling IMDSv2 in {region} in {}",
            event.new_aws_account_id
        );
        info!(region = %region, http_tokens = %defaults.http_tokens, "{message}");
        messages.push(message);

        session
            .regional(&region)
            .await?
            .set_instance_metadata_defaults(defaults)
            .await?;
    }

    Ok(event.with_messages(messages))
}
