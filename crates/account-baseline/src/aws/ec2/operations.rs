//! EC2 operations traits for testing
//!
//! [`NetworkOperations`] is the one seam between the teardown logic and EC2:
//! listing calls return plain snapshots, mutating calls return `()`. All
//! errors carry an [`AwsError`](crate::aws::AwsError) in their chain.

use super::types::{
    Gateway, NetworkAcl, PeeringConnection, RouteTable, SecurityGroup, VpcEndpoint, VpnConnection,
    VpnGateway,
};
use account_baseline_common::InstanceMetadataDefaults;
use anyhow::Result;

/// VPC networking operations used by default VPC teardown, scoped to one region.
///
/// Note: mutating calls take `&str` ids; listing calls are scoped by VPC id.
#[allow(async_fn_in_trait)] // Internal use only; everything runs on one task
#[cfg_attr(test, mockall::automock)]
pub trait NetworkOperations {
    /// IDs of every VPC flagged as default
    async fn default_vpc_ids(&self) -> Result<Vec<String>>;

    /// Whether a VPC with this id still exists
    async fn vpc_exists(&self, vpc_id: &str) -> Result<bool>;

    /// IDs of the network interfaces in a VPC
    async fn network_interface_ids(&self, vpc_id: &str) -> Result<Vec<String>>;

    /// Internet gateways attached to a VPC
    async fn internet_gateways(&self, vpc_id: &str) -> Result<Vec<Gateway>>;

    async fn detach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()>;

    async fn delete_internet_gateway(&self, gateway_id: &str) -> Result<()>;

    /// Egress-only internet gateways with an attachment to a VPC
    async fn egress_only_internet_gateways(&self, vpc_id: &str) -> Result<Vec<Gateway>>;

    async fn delete_egress_only_internet_gateway(&self, gateway_id: &str) -> Result<()>;

    async fn subnet_ids(&self, vpc_id: &str) -> Result<Vec<String>>;

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()>;

    async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>>;

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()>;

    async fn network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>>;

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<()>;

    /// Peering connections where the VPC is accepter or requester
    async fn peering_connections(&self, vpc_id: &str) -> Result<Vec<PeeringConnection>>;

    async fn delete_peering_connection(&self, connection_id: &str) -> Result<()>;

    async fn vpc_endpoints(&self, vpc_id: &str) -> Result<Vec<VpcEndpoint>>;

    async fn delete_vpc_endpoint(&self, endpoint_id: &str) -> Result<()>;

    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>>;

    async fn delete_security_group(&self, group_id: &str) -> Result<()>;

    /// Virtual private gateways attached to a VPC
    async fn vpn_gateways(&self, vpc_id: &str) -> Result<Vec<VpnGateway>>;

    async fn detach_vpn_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()>;

    /// VPN connections terminating on a virtual private gateway
    async fn vpn_connections(&self, gateway_id: &str) -> Result<Vec<VpnConnection>>;

    async fn delete_vpn_connection(&self, connection_id: &str) -> Result<()>;

    async fn delete_vpn_gateway(&self, gateway_id: &str) -> Result<()>;

    /// Delete the VPC itself; fails with a dependency violation while anything remains
    async fn delete_vpc(&self, vpc_id: &str) -> Result<()>;
}

/// Regional account settings applied by the single-call handlers.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait RegionalSettings {
    /// Block all public sharing of EBS snapshots in this region
    async fn enable_snapshot_block_public_access(&self) -> Result<()>;

    /// Set the account-level instance metadata defaults for this region
    async fn set_instance_metadata_defaults(&self, defaults: &InstanceMetadataDefaults)
    -> Result<()>;
}
