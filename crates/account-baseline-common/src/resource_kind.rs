//! VPC resource categories and teardown ordering
//!
//! A VPC can only be deleted once everything attached to it is gone, and the
//! dependents must be removed in dependency order or the provider rejects the
//! delete. [`TEARDOWN_ORDER`] is that order.

use std::fmt;

/// Resources attached to a VPC that must be removed before the VPC itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// Internet gateway (detached, then deleted)
    InternetGateway,
    /// Egress-only internet gateway (IPv6)
    EgressOnlyInternetGateway,
    /// Subnet
    Subnet,
    /// Route table (the main route table is kept)
    RouteTable,
    /// Network ACL (the default ACL is kept)
    NetworkAcl,
    /// VPC peering connection, accepted or requested
    VpcPeeringConnection,
    /// Gateway or interface endpoint
    VpcEndpoint,
    /// Security group (the `default` group is kept)
    SecurityGroup,
    /// Virtual private gateway together with its VPN connections
    VpnGateway,
}

/// Order in which categories are removed from a VPC
pub const TEARDOWN_ORDER: [ResourceCategory; 9] = [
    ResourceCategory::InternetGateway,
    ResourceCategory::EgressOnlyInternetGateway,
    ResourceCategory::Subnet,
    ResourceCategory::RouteTable,
    ResourceCategory::NetworkAcl,
    ResourceCategory::VpcPeeringConnection,
    ResourceCategory::VpcEndpoint,
    ResourceCategory::SecurityGroup,
    ResourceCategory::VpnGateway,
];

impl ResourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceCategory::InternetGateway => "internet_gateways",
            ResourceCategory::EgressOnlyInternetGateway => "egress_only_internet_gateways",
            ResourceCategory::Subnet => "subnets",
            ResourceCategory::RouteTable => "route_tables",
            ResourceCategory::NetworkAcl => "network_acls",
            ResourceCategory::VpcPeeringConnection => "vpc_peering_connections",
            ResourceCategory::VpcEndpoint => "vpc_endpoints",
            ResourceCategory::SecurityGroup => "security_groups",
            ResourceCategory::VpnGateway => "virtual_private_gateways",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
