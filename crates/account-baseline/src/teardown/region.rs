use super::{TeardownOutcome, teardown_vpc};
use crate::aws::ec2::NetworkOperations;
use anyhow::Result;
use serde::Serialize;
use tracing::{error, info};

/// Outcome of every default VPC in one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionReport {
    pub region: String,
    pub vpcs: Vec<(String, TeardownOutcome)>,
}

impl RegionReport {
    pub fn outcome(&self, vpc_id: &str) -> Option<TeardownOutcome> {
        self.vpcs
            .iter()
            .find(|(id, _)| id == vpc_id)
            .map(|(_, outcome)| *outcome)
    }
}

/// Tear down every default VPC in `region`, one at a time.
///
/// A failure on one VPC does not stop the others from being attempted; the
/// first such error is returned once all of them have been tried.
pub async fn process_region<N: NetworkOperations>(net: &N, region: &str) -> Result<RegionReport> {
    let vpc_ids = net.default_vpc_ids().await?;
    let mut report = RegionReport {
        region: region.to_string(),
        vpcs: Vec::with_capacity(vpc_ids.len()),
    };

    if vpc_ids.is_empty() {
        info!(region = %region, "No default VPC");
        return Ok(report);
    }

    let mut first_error = None;
    for vpc_id in vpc_ids {
        match teardown_vpc(net, &vpc_id, region).await {
            Ok(outcome) => report.vpcs.push((vpc_id, outcome)),
            Err(e) => {
                error!(
                    vpc_id = %vpc_id,
                    region = %region,
                    error = %format!("{e:#}"),
                    "Teardown failed"
                );
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(report),
    }
}
