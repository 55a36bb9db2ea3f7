//! Local chaining of the handlers in deployment order

use crate::aws::session::{ConfigStore, Connector};
use crate::config::HandlerSettings;
use crate::handlers;
use account_baseline_common::{BaselineEvent, CreateAccountNotification};
use anyhow::Result;
use tracing::info;

/// Run every handler after the configuration loader, in order
pub async fn apply_baseline<C: Connector>(
    event: BaselineEvent,
    connector: &C,
) -> Result<BaselineEvent> {
    let event = handlers::password_policy(event, connector).await?;
    let event = handlers::default_vpc(event, connector).await?;
    let event = handlers::ebs_block_public_access(event, connector).await?;
    let event = handlers::imdsv2(event, connector).await?;
    handlers::s3_block_public_access(event, connector).await
}

/// Baseline a new account from its creation notification
pub async fn run_baseline<S: ConfigStore, C: Connector>(
    trigger: &CreateAccountNotification,
    settings: &HandlerSettings,
    store: &S,
    connector: &C,
) -> Result<BaselineEvent> {
    let event = handlers::load_config(trigger, settings, store, connector).await?;
    let event = apply_baseline(event, connector).await?;
    info!(
        account = %event.new_aws_account_id,
        steps = event.messages.len(),
        "Account baseline complete"
    );
    Ok(event)
}
