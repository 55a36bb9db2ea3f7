use crate::aws::session::{AccountSession, Connector};
use account_baseline_common::{BaselineEvent, ConfigError};
use anyhow::Result;
use tracing::info;

/// Apply the configured IAM account password policy.
pub async fn password_policy<C: Connector>(
    event: BaselineEvent,
    connector: &C,
) -> Result<BaselineEvent> {
    let enabled = event
        .global_config
        .account_password_policy
        .as_ref()
        .is_some_and(|section| section.update_account_password_policy);
    if !enabled {
        return Ok(event);
    }
    let Some(policy) = event.global_config.password_policy_update() else {
        return Err(ConfigError::MissingPasswordPolicy.into());
    };

    let session = connector.connect(&event.cross_account_role_arn).await?;
    let message = format!("Applying Password Policy in {}", event.new_aws_account_id);
    info!(account = %event.new_aws_account_id, "{message}");

    session.update_password_policy(policy).await?;
    Ok(event.with_message(message))
}
