use super::region::{RegionReport, process_region};
use crate::aws::session::AccountSession;
use account_baseline_common::{AccountId, DefaultVpcConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Messages and per-region outcomes of one account sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub messages: Vec<String>,
    pub regions: Vec<RegionReport>,
}

impl SweepReport {
    pub fn region(&self, region: &str) -> Option<&RegionReport> {
        self.regions.iter().find(|r| r.region == region)
    }
}

/// Delete the default VPCs of every region of an account, except the
/// regions `config` preserves.
pub async fn sweep_account<S: AccountSession>(
    session: &S,
    account: &AccountId,
    config: &DefaultVpcConfig,
) -> Result<SweepReport> {
    let regions = session
        .regions()
        .await
        .context("Failed to list regions")?;

    let mut report = SweepReport::default();
    for region in regions {
        if config.preserves(&region) {
            info!(region = %region, account = %account, "Preserving default VPC");
            report.messages.push(format!(
                "Skipping deleting the default VPC in {region} in {account}"
            ));
            continue;
        }

        report
            .messages
            .push(format!("Deleting Default VPC in {region} in {account}"));

        let net = session.regional(&region).await?;
        let region_report = process_region(&net, &region)
            .await
            .with_context(|| format!("Default VPC teardown failed in {region}"))?;
        report.regions.push(region_report);
    }

    Ok(report)
}
