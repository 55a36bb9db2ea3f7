//! Regional account settings: EBS snapshot sharing and instance metadata defaults

use super::Ec2Client;
use super::operations::RegionalSettings;
use crate::aws::error::sdk_error;
use account_baseline_common::InstanceMetadataDefaults;
use account_baseline_common::defaults::SNAPSHOT_BLOCK_STATE;
use anyhow::{Context, Result};
use aws_sdk_ec2::types::{
    DefaultInstanceMetadataEndpointState, DefaultInstanceMetadataTagsState,
    MetadataDefaultHttpTokensState, SnapshotBlockPublicAccessState,
};
use tracing::debug;

impl RegionalSettings for Ec2Client {
    async fn enable_snapshot_block_public_access(&self) -> Result<()> {
        let response = self
            .client
            .enable_snapshot_block_public_access()
            .state(SnapshotBlockPublicAccessState::from(SNAPSHOT_BLOCK_STATE))
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| {
                format!(
                    "Failed to enable snapshot block public access in {}",
                    self.region()
                )
            })?;

        debug!(
            region = %self.region(),
            state = ?response.state(),
            "Snapshot block public access updated"
        );
        Ok(())
    }

    async fn set_instance_metadata_defaults(
        &self,
        defaults: &InstanceMetadataDefaults,
    ) -> Result<()> {
        self.client
            .modify_instance_metadata_defaults()
            .http_tokens(MetadataDefaultHttpTokensState::from(
                defaults.http_tokens.as_str(),
            ))
            .http_put_response_hop_limit(defaults.http_put_response_hop_limit)
            .http_endpoint(DefaultInstanceMetadataEndpointState::from(
                defaults.http_endpoint.as_str(),
            ))
            .instance_metadata_tags(DefaultInstanceMetadataTagsState::from(
                defaults.instance_metadata_tags.as_str(),
            ))
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| {
                format!(
                    "Failed to modify instance metadata defaults in {}",
                    self.region()
                )
            })?;

        debug!(
            region = %self.region(),
            http_tokens = %defaults.http_tokens,
            hop_limit = defaults.http_put_response_hop_limit,
            "Instance metadata defaults updated"
        );
        Ok(())
    }
}
