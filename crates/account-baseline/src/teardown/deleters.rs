//! One remover per resource category
//!
//! Each remover lists the category's instances in a VPC, skips the protected
//! ones, and deletes the rest. Failures propagate; a resource that disappears
//! between listing and deleting is not an error.

use crate::aws::ec2::{
    Gateway, NetworkAcl, NetworkOperations, PeeringConnection, RouteTable, SecurityGroup,
    VpcEndpoint, VpnConnection, VpnGateway,
};
use crate::aws::error::ignore_not_found;
use account_baseline_common::ResourceCategory;
use anyhow::Result;
use tracing::{debug, info};

/// Internet gateway attachment states that still need a detach
const ACTIVE_IGW_ATTACHMENT: &[&str] = &["attached", "attaching", "available"];

/// Peering states that are already gone or going
const FINISHED_PEERING: &[&str] = &["deleted", "deleting"];

/// Endpoint states that accept a delete
const DELETABLE_ENDPOINT: &[&str] = &[
    "pendingacceptance",
    "pending",
    "available",
    "rejected",
    "failed",
];

/// VPN gateway and connection states worth acting on
const LIVE_VPN: &[&str] = &["pending", "available"];

/// VPN gateway attachment states that need a detach
const ACTIVE_VPN_ATTACHMENT: &[&str] = &["attaching", "attached"];

/// Remove every unprotected instance of `category` from `vpc_id`.
///
/// Returns the number of instances deleted.
pub async fn remove<N: NetworkOperations>(
    category: ResourceCategory,
    net: &N,
    vpc_id: &str,
) -> Result<usize> {
    let removed = match category {
        ResourceCategory::InternetGateway => remove_internet_gateways(net, vpc_id).await?,
        ResourceCategory::EgressOnlyInternetGateway => {
            remove_egress_only_internet_gateways(net, vpc_id).await?
        }
        ResourceCategory::Subnet => remove_subnets(net, vpc_id).await?,
        ResourceCategory::RouteTable => remove_route_tables(net, vpc_id).await?,
        ResourceCategory::NetworkAcl => remove_network_acls(net, vpc_id).await?,
        ResourceCategory::VpcPeeringConnection => remove_peering_connections(net, vpc_id).await?,
        ResourceCategory::VpcEndpoint => remove_vpc_endpoints(net, vpc_id).await?,
        ResourceCategory::SecurityGroup => remove_security_groups(net, vpc_id).await?,
        ResourceCategory::VpnGateway => remove_vpn_gateways(net, vpc_id).await?,
    };

    if removed > 0 {
        info!(vpc_id = %vpc_id, category = %category, count = removed, "Removed");
    } else {
        debug!(vpc_id = %vpc_id, category = %category, "Nothing to remove");
    }
    Ok(removed)
}

fn state_in(state: &str, states: &[&str]) -> bool {
    states.iter().any(|s| s.eq_ignore_ascii_case(state))
}

pub(crate) fn igw_needs_removal(gateway: &Gateway, vpc_id: &str) -> bool {
    gateway
        .attachment_state(vpc_id)
        .is_some_and(|state| state_in(state, ACTIVE_IGW_ATTACHMENT))
}

pub(crate) fn eigw_needs_removal(gateway: &Gateway, vpc_id: &str) -> bool {
    gateway
        .attachment_state(vpc_id)
        .is_some_and(|state| state.eq_ignore_ascii_case("attached"))
}

pub(crate) fn is_main_route_table(table: &RouteTable) -> bool {
    table.main
}

pub(crate) fn is_default_acl(acl: &NetworkAcl) -> bool {
    acl.is_default
}

pub(crate) fn is_finished_peering(connection: &PeeringConnection) -> bool {
    state_in(&connection.status, FINISHED_PEERING)
}

pub(crate) fn is_deletable_endpoint(endpoint: &VpcEndpoint) -> bool {
    state_in(&endpoint.state, DELETABLE_ENDPOINT)
}

pub(crate) fn is_default_security_group(group: &SecurityGroup) -> bool {
    group.name == "default"
}

pub(crate) fn is_live_vpn_gateway(gateway: &VpnGateway) -> bool {
    state_in(&gateway.state, LIVE_VPN)
}

pub(crate) fn is_live_vpn_connection(connection: &VpnConnection) -> bool {
    state_in(&connection.state, LIVE_VPN)
}

async fn remove_internet_gateways<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for gateway in net.internet_gateways(vpc_id).await? {
        if !igw_needs_removal(&gateway, vpc_id) {
            debug!(gateway_id = %gateway.id, "Internet gateway not attached, skipping");
            continue;
        }
        ignore_not_found(net.detach_internet_gateway(&gateway.id, vpc_id).await)?;
        ignore_not_found(net.delete_internet_gateway(&gateway.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_egress_only_internet_gateways<N: NetworkOperations>(
    net: &N,
    vpc_id: &str,
) -> Result<usize> {
    let mut removed = 0;
    for gateway in net.egress_only_internet_gateways(vpc_id).await? {
        if !eigw_needs_removal(&gateway, vpc_id) {
            continue;
        }
        ignore_not_found(net.delete_egress_only_internet_gateway(&gateway.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_subnets<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let subnets = net.subnet_ids(vpc_id).await?;
    for subnet_id in &subnets {
        ignore_not_found(net.delete_subnet(subnet_id).await)?;
    }
    Ok(subnets.len())
}

async fn remove_route_tables<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for table in net.route_tables(vpc_id).await? {
        if is_main_route_table(&table) {
            continue;
        }
        ignore_not_found(net.delete_route_table(&table.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_network_acls<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for acl in net.network_acls(vpc_id).await? {
        if is_default_acl(&acl) {
            continue;
        }
        ignore_not_found(net.delete_network_acl(&acl.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_peering_connections<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for connection in net.peering_connections(vpc_id).await? {
        if is_finished_peering(&connection) {
            continue;
        }
        ignore_not_found(net.delete_peering_connection(&connection.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_vpc_endpoints<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for endpoint in net.vpc_endpoints(vpc_id).await? {
        if !is_deletable_endpoint(&endpoint) {
            continue;
        }
        ignore_not_found(net.delete_vpc_endpoint(&endpoint.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_security_groups<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for group in net.security_groups(vpc_id).await? {
        if is_default_security_group(&group) {
            continue;
        }
        ignore_not_found(net.delete_security_group(&group.id).await)?;
        removed += 1;
    }
    Ok(removed)
}

async fn remove_vpn_gateways<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<usize> {
    let mut removed = 0;
    for gateway in net.vpn_gateways(vpc_id).await? {
        if !is_live_vpn_gateway(&gateway) {
            continue;
        }
        if gateway
            .attachment_state(vpc_id)
            .is_some_and(|state| state_in(state, ACTIVE_VPN_ATTACHMENT))
        {
            ignore_not_found(net.detach_vpn_gateway(&gateway.id, vpc_id).await)?;
        }
        for connection in net.vpn_connections(&gateway.id).await? {
            if !is_live_vpn_connection(&connection) {
                continue;
            }
            ignore_not_found(net.delete_vpn_connection(&connection.id).await)?;
        }
        ignore_not_found(net.delete_vpn_gateway(&gateway.id).await)?;
        removed += 1;
    }
    Ok(removed)
}
