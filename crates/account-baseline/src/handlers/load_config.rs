use crate::aws::session::{ConfigStore, Connector};
use crate::config::HandlerSettings;
use account_baseline_common::{BaselineEvent, CreateAccountNotification, GlobalConfig};
use anyhow::{Context, Result};
use tracing::{error, info};

/// Start the chain for a newly created account.
///
/// Fails if account creation did not succeed, the configuration document
/// cannot be fetched or parsed, or the role in the new account cannot be
/// assumed.
pub async fn load_config<S: ConfigStore, C: Connector>(
    trigger: &CreateAccountNotification,
    settings: &HandlerSettings,
    store: &S,
    connector: &C,
) -> Result<BaselineEvent> {
    let account = match trigger.succeeded_account() {
        Ok(account) => account,
        Err(e) => {
            error!(critical = true, error = %e, "Account creation did not succeed");
            return Err(e.into());
        }
    };

    let (bucket, key) = settings.config_location()?;
    info!(bucket = %bucket, key = %key, "Loading configuration document");

    let document = store
        .fetch(bucket, &key)
        .await
        .with_context(|| format!("Failed to fetch configuration s3://{bucket}/{key}"))?;
    let global_config = GlobalConfig::from_yaml(&document)
        .with_context(|| format!("Invalid configuration document s3://{bucket}/{key}"))?;

    let role_arn = account.role_arn(settings.role_name()?);
    connector
        .connect(&role_arn)
        .await
        .with_context(|| format!("Cannot access account {account}"))?;

    info!(account = %account, role_arn = %role_arn, "Configuration loaded");
    Ok(BaselineEvent::new(global_config, account, role_arn))
}
