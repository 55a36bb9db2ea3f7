use crate::aws::session::Connector;
use crate::teardown::sweep_account;
use account_baseline_common::BaselineEvent;
use anyhow::Result;
use tracing::info;

/// Delete the default VPC of every region not marked for preservation.
pub async fn default_vpc<C: Connector>(
    event: BaselineEvent,
    connector: &C,
) -> Result<BaselineEvent> {
    let Some(config) = event.global_config.default_vpc_deletion() else {
        return Ok(event);
    };

    let session = connector.connect(&event.cross_account_role_arn).await?;
    let report = sweep_account(&session, &event.new_aws_account_id, config).await?;

    for region in &report.regions {
        info!(
            account = %event.new_aws_account_id,
            region = %region.region,
            outcomes = ?region.vpcs,
            "Default VPC sweep finished for region"
        );
    }

    Ok(event.with_messages(report.messages))
}
