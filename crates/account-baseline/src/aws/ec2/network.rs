//! VPC networking calls backing default VPC teardown

use super::operations::NetworkOperations;
use super::types::{
    Attachment, Gateway, NetworkAcl, PeeringConnection, RouteTable, SecurityGroup, VpcEndpoint,
    VpnConnection, VpnGateway,
};
use super::{Ec2Client, filter};
use crate::aws::error::{classify_aws_error, sdk_error};
use anyhow::{Context, Result};
use aws_sdk_ec2::types::InternetGatewayAttachment;
use tracing::debug;

/// Endpoint states that can still be deleted
const ENDPOINT_STATES: &[&str] = &[
    "pendingAcceptance",
    "pending",
    "available",
    "rejected",
    "failed",
];

/// VPN gateway states worth acting on
const VPN_GATEWAY_STATES: &[&str] = &["pending", "available"];

fn gateway_attachments(attachments: &[InternetGatewayAttachment]) -> Vec<Attachment> {
    attachments
        .iter()
        .map(|a| {
            Attachment::new(
                a.vpc_id().unwrap_or_default(),
                a.state().map(|s| s.as_str()).unwrap_or_default(),
            )
        })
        .collect()
}

impl NetworkOperations for Ec2Client {
    async fn default_vpc_ids(&self) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .describe_vpcs()
            .filters(filter("isDefault", &["true"]))
            .into_paginator()
            .send();

        let mut ids = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(sdk_error).context("Failed to describe VPCs")?;
            ids.extend(
                page.vpcs()
                    .iter()
                    .filter_map(|v| v.vpc_id())
                    .map(str::to_string),
            );
        }
        Ok(ids)
    }

    async fn vpc_exists(&self, vpc_id: &str) -> Result<bool> {
        // Filtering by id yields an empty page instead of InvalidVpcID.NotFound
        let response = self
            .client
            .describe_vpcs()
            .filters(filter("vpc-id", &[vpc_id]))
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to describe VPC {vpc_id}"))?;
        Ok(!response.vpcs().is_empty())
    }

    async fn network_interface_ids(&self, vpc_id: &str) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .describe_network_interfaces()
            .filters(filter("vpc-id", &[vpc_id]))
            .into_paginator()
            .send();

        let mut ids = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe network interfaces")?;
            ids.extend(
                page.network_interfaces()
                    .iter()
                    .filter_map(|eni| eni.network_interface_id())
                    .map(str::to_string),
            );
        }
        Ok(ids)
    }

    async fn internet_gateways(&self, vpc_id: &str) -> Result<Vec<Gateway>> {
        let mut pages = self
            .client
            .describe_internet_gateways()
            .filters(filter("attachment.vpc-id", &[vpc_id]))
            .into_paginator()
            .send();

        let mut gateways = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe internet gateways")?;
            for igw in page.internet_gateways() {
                if let Some(id) = igw.internet_gateway_id() {
                    gateways.push(Gateway {
                        id: id.to_string(),
                        attachments: gateway_attachments(igw.attachments()),
                    });
                }
            }
        }
        Ok(gateways)
    }

    async fn detach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()> {
        self.client
            .detach_internet_gateway()
            .internet_gateway_id(gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to detach internet gateway {gateway_id}"))?;
        Ok(())
    }

    async fn delete_internet_gateway(&self, gateway_id: &str) -> Result<()> {
        self.client
            .delete_internet_gateway()
            .internet_gateway_id(gateway_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete internet gateway {gateway_id}"))?;
        Ok(())
    }

    async fn egress_only_internet_gateways(&self, vpc_id: &str) -> Result<Vec<Gateway>> {
        // No server-side VPC filter for this call; page through everything.
        let mut pages = self
            .client
            .describe_egress_only_internet_gateways()
            .into_paginator()
            .send();

        let mut gateways = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe egress-only internet gateways")?;
            for eigw in page.egress_only_internet_gateways() {
                let attachments = gateway_attachments(eigw.attachments());
                if !attachments.iter().any(|a| a.vpc_id == vpc_id) {
                    continue;
                }
                if let Some(id) = eigw.egress_only_internet_gateway_id() {
                    gateways.push(Gateway {
                        id: id.to_string(),
                        attachments,
                    });
                }
            }
        }
        Ok(gateways)
    }

    async fn delete_egress_only_internet_gateway(&self, gateway_id: &str) -> Result<()> {
        self.client
            .delete_egress_only_internet_gateway()
            .egress_only_internet_gateway_id(gateway_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| {
                format!("Failed to delete egress-only internet gateway {gateway_id}")
            })?;
        Ok(())
    }

    async fn subnet_ids(&self, vpc_id: &str) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .describe_subnets()
            .filters(filter("vpc-id", &[vpc_id]))
            .into_paginator()
            .send();

        let mut ids = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(sdk_error).context("Failed to describe subnets")?;
            ids.extend(
                page.subnets()
                    .iter()
                    .filter_map(|s| s.subnet_id())
                    .map(str::to_string),
            );
        }
        Ok(ids)
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        self.client
            .delete_subnet()
            .subnet_id(subnet_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete subnet {subnet_id}"))?;
        Ok(())
    }

    async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>> {
        let mut pages = self
            .client
            .describe_route_tables()
            .filters(filter("vpc-id", &[vpc_id]))
            .into_paginator()
            .send();

        let mut tables = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe route tables")?;
            for rtb in page.route_tables() {
                if let Some(id) = rtb.route_table_id() {
                    tables.push(RouteTable {
                        id: id.to_string(),
                        main: rtb
                            .associations()
                            .iter()
                            .any(|assoc| assoc.main().unwrap_or(false)),
                    });
                }
            }
        }
        Ok(tables)
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        self.client
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete route table {route_table_id}"))?;
        Ok(())
    }

    async fn network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>> {
        let mut pages = self
            .client
            .describe_network_acls()
            .filters(filter("vpc-id", &[vpc_id]))
            .into_paginator()
            .send();

        let mut acls = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe network ACLs")?;
            for acl in page.network_acls() {
                if let Some(id) = acl.network_acl_id() {
                    acls.push(NetworkAcl {
                        id: id.to_string(),
                        is_default: acl.is_default().unwrap_or(false),
                    });
                }
            }
        }
        Ok(acls)
    }

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<()> {
        self.client
            .delete_network_acl()
            .network_acl_id(network_acl_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete network ACL {network_acl_id}"))?;
        Ok(())
    }

    async fn peering_connections(&self, vpc_id: &str) -> Result<Vec<PeeringConnection>> {
        let mut connections: Vec<PeeringConnection> = Vec::new();

        for side in ["accepter-vpc-info.vpc-id", "requester-vpc-info.vpc-id"] {
            let mut pages = self
                .client
                .describe_vpc_peering_connections()
                .filters(filter(side, &[vpc_id]))
                .into_paginator()
                .send();

            while let Some(page) = pages.next().await {
                let page = page
                    .map_err(sdk_error)
                    .context("Failed to describe VPC peering connections")?;
                for pcx in page.vpc_peering_connections() {
                    let Some(id) = pcx.vpc_peering_connection_id() else {
                        continue;
                    };
                    // A VPC peered with itself shows up on both sides.
                    if connections.iter().any(|c| c.id == id) {
                        continue;
                    }
                    connections.push(PeeringConnection {
                        id: id.to_string(),
                        status: pcx
                            .status()
                            .and_then(|s| s.code())
                            .map(|c| c.as_str().to_string())
                            .unwrap_or_default(),
                    });
                }
            }
        }
        Ok(connections)
    }

    async fn delete_peering_connection(&self, connection_id: &str) -> Result<()> {
        self.client
            .delete_vpc_peering_connection()
            .vpc_peering_connection_id(connection_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete VPC peering connection {connection_id}"))?;
        Ok(())
    }

    async fn vpc_endpoints(&self, vpc_id: &str) -> Result<Vec<VpcEndpoint>> {
        let mut pages = self
            .client
            .describe_vpc_endpoints()
            .filters(filter("vpc-id", &[vpc_id]))
            .filters(filter("vpc-endpoint-state", ENDPOINT_STATES))
            .into_paginator()
            .send();

        let mut endpoints = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe VPC endpoints")?;
            for endpoint in page.vpc_endpoints() {
                if let Some(id) = endpoint.vpc_endpoint_id() {
                    endpoints.push(VpcEndpoint {
                        id: id.to_string(),
                        state: endpoint
                            .state()
                            .map(|s| s.as_str().to_string())
                            .unwrap_or_default(),
                    });
                }
            }
        }
        Ok(endpoints)
    }

    async fn delete_vpc_endpoint(&self, endpoint_id: &str) -> Result<()> {
        let response = self
            .client
            .delete_vpc_endpoints()
            .vpc_endpoint_ids(endpoint_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete VPC endpoint {endpoint_id}"))?;

        // This call reports per-item failures in a successful response.
        if let Some(failure) = response.unsuccessful().first() {
            let err = failure.error();
            let aws_err = classify_aws_error(
                err.and_then(|e| e.code()),
                err.and_then(|e| e.message()),
            );
            return Err(anyhow::Error::new(aws_err)
                .context(format!("Failed to delete VPC endpoint {endpoint_id}")));
        }
        Ok(())
    }

    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>> {
        let mut pages = self
            .client
            .describe_security_groups()
            .filters(filter("vpc-id", &[vpc_id]))
            .into_paginator()
            .send();

        let mut groups = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(sdk_error)
                .context("Failed to describe security groups")?;
            for sg in page.security_groups() {
                if let Some(id) = sg.group_id() {
                    groups.push(SecurityGroup {
                        id: id.to_string(),
                        name: sg.group_name().unwrap_or_default().to_string(),
                    });
                }
            }
        }
        Ok(groups)
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<()> {
        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete security group {group_id}"))?;
        Ok(())
    }

    async fn vpn_gateways(&self, vpc_id: &str) -> Result<Vec<VpnGateway>> {
        let response = self
            .client
            .describe_vpn_gateways()
            .filters(filter("attachment.vpc-id", &[vpc_id]))
            .filters(filter("state", VPN_GATEWAY_STATES))
            .send()
            .await
            .map_err(sdk_error)
            .context("Failed to describe VPN gateways")?;

        let gateways = response
            .vpn_gateways()
            .iter()
            .filter_map(|vgw| {
                let id = vgw.vpn_gateway_id()?;
                Some(VpnGateway {
                    id: id.to_string(),
                    state: vgw
                        .state()
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_default(),
                    attachments: vgw
                        .vpc_attachments()
                        .iter()
                        .map(|a| {
                            Attachment::new(
                                a.vpc_id().unwrap_or_default(),
                                a.state().map(|s| s.as_str()).unwrap_or_default(),
                            )
                        })
                        .collect(),
                })
            })
            .collect();
        Ok(gateways)
    }

    async fn detach_vpn_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()> {
        self.client
            .detach_vpn_gateway()
            .vpn_gateway_id(gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to detach VPN gateway {gateway_id}"))?;
        Ok(())
    }

    async fn vpn_connections(&self, gateway_id: &str) -> Result<Vec<VpnConnection>> {
        let response = self
            .client
            .describe_vpn_connections()
            .filters(filter("vpn-gateway-id", &[gateway_id]))
            .send()
            .await
            .map_err(sdk_error)
            .context("Failed to describe VPN connections")?;

        Ok(response
            .vpn_connections()
            .iter()
            .filter_map(|conn| {
                Some(VpnConnection {
                    id: conn.vpn_connection_id()?.to_string(),
                    state: conn
                        .state()
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn delete_vpn_connection(&self, connection_id: &str) -> Result<()> {
        self.client
            .delete_vpn_connection()
            .vpn_connection_id(connection_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete VPN connection {connection_id}"))?;
        Ok(())
    }

    async fn delete_vpn_gateway(&self, gateway_id: &str) -> Result<()> {
        self.client
            .delete_vpn_gateway()
            .vpn_gateway_id(gateway_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete VPN gateway {gateway_id}"))?;
        Ok(())
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()> {
        self.client
            .delete_vpc()
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(sdk_error)
            .with_context(|| format!("Failed to delete VPC {vpc_id}"))?;
        debug!(vpc_id = %vpc_id, region = %self.region(), "DeleteVpc accepted");
        Ok(())
    }
}
