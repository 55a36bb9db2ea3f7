//! EC2 networking and regional settings

mod network;
mod operations;
mod settings;
mod types;

pub use operations::{NetworkOperations, RegionalSettings};
pub use types::{
    Attachment, Gateway, NetworkAcl, PeeringConnection, RouteTable, SecurityGroup, VpcEndpoint,
    VpnConnection, VpnGateway,
};

#[cfg(test)]
pub use operations::{MockNetworkOperations, MockRegionalSettings};

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::sdk_error;
use anyhow::{Context, Result};
use aws_sdk_ec2::{Client, types::Filter};
use tracing::debug;

/// EC2 client for one region of the target account
pub struct Ec2Client {
    pub(crate) client: Client,
    region: String,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
            region: ctx.region().to_string(),
        }
    }
}

impl Ec2Client {
    /// Region this client operates in
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Names of the regions enabled for the account, in provider order
    pub async fn available_regions(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .describe_regions()
            .send()
            .await
            .map_err(sdk_error)
            .context("Failed to describe regions")?;

        let regions: Vec<String> = response
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(str::to_string)
            .collect();

        debug!(count = regions.len(), "Found enabled regions");
        Ok(regions)
    }
}

/// Single-name filter helper
pub(crate) fn filter(name: &str, values: &[&str]) -> Filter {
    values
        .iter()
        .fold(Filter::builder().name(name), |builder, value| {
            builder.values(*value)
        })
        .build()
}
