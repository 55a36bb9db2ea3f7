//! In-memory stand-ins for an AWS account
//!
//! [`FakeNetwork`] holds the live VPC state of one region and behaves like
//! EC2 for the calls teardown makes: listings reflect what is left, deletes
//! remove things, deleting something that is gone is a "not found" error.
//! Every mutating call is recorded in order.

use crate::aws::ec2::{
    Attachment, Gateway, NetworkAcl, NetworkOperations, PeeringConnection, RegionalSettings,
    RouteTable, SecurityGroup, VpcEndpoint, VpnConnection, VpnGateway,
};
use crate::aws::error::AwsError;
use crate::aws::session::{AccountSession, ConfigStore, Connector};
use account_baseline_common::{
    AccountId, InstanceMetadataDefaults, PasswordPolicy, S3BlockPublicAccess,
};
use anyhow::Result;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A recorded mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: String,
    pub target: String,
}

fn not_found(code: &str, id: &str) -> anyhow::Error {
    AwsError::NotFound {
        code: code.to_string(),
        message: format!("The ID '{id}' does not exist"),
    }
    .into()
}

fn gateway(id: &str, vpc_id: &str, state: &str) -> Gateway {
    Gateway {
        id: id.to_string(),
        attachments: vec![Attachment::new(vpc_id, state)],
    }
}

/// One VPC and everything attached to it
#[derive(Debug, Clone, Default)]
pub struct FakeVpc {
    pub id: String,
    pub is_default: bool,
    pub interfaces: Vec<String>,
    pub internet_gateways: Vec<Gateway>,
    pub egress_only_gateways: Vec<Gateway>,
    pub subnets: Vec<String>,
    pub route_tables: Vec<RouteTable>,
    pub network_acls: Vec<NetworkAcl>,
    pub peering_connections: Vec<PeeringConnection>,
    pub endpoints: Vec<VpcEndpoint>,
    pub security_groups: Vec<SecurityGroup>,
    pub vpn_gateways: Vec<VpnGateway>,
    /// (gateway id, connection)
    pub vpn_connections: Vec<(String, VpnConnection)>,
}

impl FakeVpc {
    /// A default VPC with only the resources that come with every VPC
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            is_default: true,
            route_tables: vec![RouteTable {
                id: "rtb-main".into(),
                main: true,
            }],
            network_acls: vec![NetworkAcl {
                id: "acl-default".into(),
                is_default: true,
            }],
            security_groups: vec![SecurityGroup {
                id: "sg-default".into(),
                name: "default".into(),
            }],
            ..Default::default()
        }
    }

    /// A default VPC with one deletable instance of every category, plus
    /// instances that must be left alone
    pub fn populated(id: &str) -> Self {
        let mut vpc = Self::empty(id);
        vpc.internet_gateways = vec![
            gateway("igw-1", id, "available"),
            gateway("igw-detached", id, "detached"),
        ];
        vpc.egress_only_gateways = vec![
            gateway("eigw-1", id, "attached"),
            gateway("eigw-detached", id, "detached"),
        ];
        vpc.subnets = vec!["subnet-1".into()];
        vpc.route_tables.push(RouteTable {
            id: "rtb-1".into(),
            main: false,
        });
        vpc.network_acls.push(NetworkAcl {
            id: "acl-1".into(),
            is_default: false,
        });
        vpc.peering_connections = vec![
            PeeringConnection {
                id: "pcx-1".into(),
                status: "active".into(),
            },
            PeeringConnection {
                id: "pcx-deleted".into(),
                status: "deleted".into(),
            },
        ];
        vpc.endpoints = vec![VpcEndpoint {
            id: "vpce-1".into(),
            state: "available".into(),
        }];
        vpc.security_groups.push(SecurityGroup {
            id: "sg-1".into(),
            name: "web".into(),
        });
        vpc.vpn_gateways = vec![VpnGateway {
            id: "vgw-1".into(),
            state: "available".into(),
            attachments: vec![Attachment::new(id, "attached")],
        }];
        vpc.vpn_connections = vec![
            (
                "vgw-1".into(),
                VpnConnection {
                    id: "vpn-1".into(),
                    state: "available".into(),
                },
            ),
            (
                "vgw-1".into(),
                VpnConnection {
                    id: "vpn-deleted".into(),
                    state: "deleted".into(),
                },
            ),
        ];
        vpc
    }

    pub fn with_interface(mut self, eni_id: &str) -> Self {
        self.interfaces.push(eni_id.to_string());
        self
    }

    pub fn non_default(mut self) -> Self {
        self.is_default = false;
        self
    }
}

#[derive(Debug, Default)]
struct NetworkState {
    vpcs: Vec<FakeVpc>,
    blocked_vpc_deletes: HashSet<String>,
    calls: Vec<Call>,
    metadata_defaults: Option<InstanceMetadataDefaults>,
}

impl NetworkState {
    fn record(&mut self, op: &str, target: &str) {
        self.calls.push(Call {
            op: op.to_string(),
            target: target.to_string(),
        });
    }

    fn vpc(&self, vpc_id: &str) -> Option<&FakeVpc> {
        self.vpcs.iter().find(|v| v.id == vpc_id)
    }

    /// Remove the first item matching `id` from whichever VPC holds it
    fn remove_from<T>(
        &mut self,
        field: impl Fn(&mut FakeVpc) -> &mut Vec<T>,
        matches: impl Fn(&T) -> bool,
    ) -> bool {
        for vpc in &mut self.vpcs {
            let items = field(vpc);
            if let Some(pos) = items.iter().position(&matches) {
                items.remove(pos);
                return true;
            }
        }
        false
    }
}

/// In-memory EC2 for one region
#[derive(Debug, Clone, Default)]
pub struct FakeNetwork {
    state: Arc<Mutex<NetworkState>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vpc(&self, vpc: FakeVpc) {
        self.state.lock().unwrap().vpcs.push(vpc);
    }

    pub fn has_vpc(&self, vpc_id: &str) -> bool {
        self.state.lock().unwrap().vpc(vpc_id).is_some()
    }

    /// Make `DeleteVpc` for `vpc_id` fail with a dependency violation
    pub fn fail_delete_vpc(&self, vpc_id: &str) {
        self.state
            .lock()
            .unwrap()
            .blocked_vpc_deletes
            .insert(vpc_id.to_string());
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn metadata_defaults(&self) -> Option<InstanceMetadataDefaults> {
        self.state.lock().unwrap().metadata_defaults.clone()
    }

    fn list<T: Clone>(&self, vpc_id: &str, field: impl Fn(&FakeVpc) -> &Vec<T>) -> Vec<T> {
        self.state
            .lock()
            .unwrap()
            .vpc(vpc_id)
            .map(|vpc| field(vpc).clone())
            .unwrap_or_default()
    }

    fn delete<T>(
        &self,
        op: &str,
        code: &str,
        id: &str,
        field: impl Fn(&mut FakeVpc) -> &mut Vec<T>,
        matches: impl Fn(&T) -> bool,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record(op, id);
        if state.remove_from(field, matches) {
            Ok(())
        } else {
            Err(not_found(code, id))
        }
    }

    fn detach(&self, op: &str, gateway_id: &str, vpc_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record(op, gateway_id);
        for vpc in &mut state.vpcs {
            for gw in &mut vpc.internet_gateways {
                if gw.id == gateway_id {
                    gw.attachments.retain(|a| a.vpc_id != vpc_id);
                }
            }
            for gw in &mut vpc.vpn_gateways {
                if gw.id == gateway_id {
                    gw.attachments.retain(|a| a.vpc_id != vpc_id);
                }
            }
        }
        Ok(())
    }
}

impl NetworkOperations for FakeNetwork {
    async fn default_vpc_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .vpcs
            .iter()
            .filter(|v| v.is_default)
            .map(|v| v.id.clone())
            .collect())
    }

    async fn vpc_exists(&self, vpc_id: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().vpc(vpc_id).is_some())
    }

    async fn network_interface_ids(&self, vpc_id: &str) -> Result<Vec<String>> {
        Ok(self.list(vpc_id, |v| &v.interfaces))
    }

    async fn internet_gateways(&self, vpc_id: &str) -> Result<Vec<Gateway>> {
        Ok(self.list(vpc_id, |v| &v.internet_gateways))
    }

    async fn detach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()> {
        self.detach("detach_internet_gateway", gateway_id, vpc_id)
    }

    async fn delete_internet_gateway(&self, gateway_id: &str) -> Result<()> {
        self.delete(
            "delete_internet_gateway",
            "InvalidInternetGatewayID.NotFound",
            gateway_id,
            |v| &mut v.internet_gateways,
            |g| g.id == gateway_id,
        )
    }

    async fn egress_only_internet_gateways(&self, vpc_id: &str) -> Result<Vec<Gateway>> {
        Ok(self.list(vpc_id, |v| &v.egress_only_gateways))
    }

    async fn delete_egress_only_internet_gateway(&self, gateway_id: &str) -> Result<()> {
        self.delete(
            "delete_egress_only_internet_gateway",
            "InvalidEgressOnlyInternetGatewayId.NotFound",
            gateway_id,
            |v| &mut v.egress_only_gateways,
            |g| g.id == gateway_id,
        )
    }

    async fn subnet_ids(&self, vpc_id: &str) -> Result<Vec<String>> {
        Ok(self.list(vpc_id, |v| &v.subnets))
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        self.delete(
            "delete_subnet",
            "InvalidSubnetID.NotFound",
            subnet_id,
            |v| &mut v.subnets,
            |s| s == subnet_id,
        )
    }

    async fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>> {
        Ok(self.list(vpc_id, |v| &v.route_tables))
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        self.delete(
            "delete_route_table",
            "InvalidRouteTableID.NotFound",
            route_table_id,
            |v| &mut v.route_tables,
            |t| t.id == route_table_id,
        )
    }

    async fn network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>> {
        Ok(self.list(vpc_id, |v| &v.network_acls))
    }

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<()> {
        self.delete(
            "delete_network_acl",
            "InvalidNetworkAclID.NotFound",
            network_acl_id,
            |v| &mut v.network_acls,
            |a| a.id == network_acl_id,
        )
    }

    async fn peering_connections(&self, vpc_id: &str) -> Result<Vec<PeeringConnection>> {
        Ok(self.list(vpc_id, |v| &v.peering_connections))
    }

    async fn delete_peering_connection(&self, connection_id: &str) -> Result<()> {
        self.delete(
            "delete_peering_connection",
            "InvalidVpcPeeringConnectionID.NotFound",
            connection_id,
            |v| &mut v.peering_connections,
            |p| p.id == connection_id,
        )
    }

    async fn vpc_endpoints(&self, vpc_id: &str) -> Result<Vec<VpcEndpoint>> {
        Ok(self.list(vpc_id, |v| &v.endpoints))
    }

    async fn delete_vpc_endpoint(&self, endpoint_id: &str) -> Result<()> {
        self.delete(
            "delete_vpc_endpoint",
            "InvalidVpcEndpointId.NotFound",
            endpoint_id,
            |v| &mut v.endpoints,
            |e| e.id == endpoint_id,
        )
    }

    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>> {
        Ok(self.list(vpc_id, |v| &v.security_groups))
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<()> {
        self.delete(
            "delete_security_group",
            "InvalidGroup.NotFound",
            group_id,
            |v| &mut v.security_groups,
            |g| g.id == group_id,
        )
    }

    async fn vpn_gateways(&self, vpc_id: &str) -> Result<Vec<VpnGateway>> {
        Ok(self.list(vpc_id, |v| &v.vpn_gateways))
    }

    async fn detach_vpn_gateway(&self, gateway_id: &str, vpc_id: &str) -> Result<()> {
        self.detach("detach_vpn_gateway", gateway_id, vpc_id)
    }

    async fn vpn_connections(&self, gateway_id: &str) -> Result<Vec<VpnConnection>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .vpcs
            .iter()
            .flat_map(|v| v.vpn_connections.iter())
            .filter(|(gw, _)| gw == gateway_id)
            .map(|(_, conn)| conn.clone())
            .collect())
    }

    async fn delete_vpn_connection(&self, connection_id: &str) -> Result<()> {
        self.delete(
            "delete_vpn_connection",
            "InvalidVpnConnectionID.NotFound",
            connection_id,
            |v| &mut v.vpn_connections,
            |(_, c)| c.id == connection_id,
        )
    }

    async fn delete_vpn_gateway(&self, gateway_id: &str) -> Result<()> {
        self.delete(
            "delete_vpn_gateway",
            "InvalidVpnGatewayID.NotFound",
            gateway_id,
            |v| &mut v.vpn_gateways,
            |g| g.id == gateway_id,
        )
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_vpc", vpc_id);
        if state.blocked_vpc_deletes.contains(vpc_id) {
            return Err(AwsError::DependencyViolation {
                message: format!("The vpc '{vpc_id}' has dependencies and cannot be deleted."),
            }
            .into());
        }
        match state.vpcs.iter().position(|v| v.id == vpc_id) {
            Some(pos) => {
                state.vpcs.remove(pos);
                Ok(())
            }
            None => Err(not_found("InvalidVpcID.NotFound", vpc_id)),
        }
    }
}

impl RegionalSettings for FakeNetwork {
    async fn enable_snapshot_block_public_access(&self) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .record("enable_snapshot_block_public_access", "block-all-sharing");
        Ok(())
    }

    async fn set_instance_metadata_defaults(
        &self,
        defaults: &InstanceMetadataDefaults,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("set_instance_metadata_defaults", &defaults.http_tokens);
        state.metadata_defaults = Some(defaults.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct AccountState {
    regions: Vec<String>,
    networks: BTreeMap<String, FakeNetwork>,
    regional_requests: Vec<String>,
    password_policy: Option<PasswordPolicy>,
    s3_block: Option<(AccountId, S3BlockPublicAccess)>,
}

/// In-memory target account: a set of regions, each with its own network
#[derive(Debug, Clone, Default)]
pub struct FakeAccount {
    state: Arc<Mutex<AccountState>>,
}

impl FakeAccount {
    /// An account whose provider region list is `regions`, in that order
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let account = Self::default();
        account.state.lock().unwrap().regions = regions.into_iter().map(Into::into).collect();
        account
    }

    /// The network of `region`, shared with the account
    pub fn network(&self, region: &str) -> FakeNetwork {
        self.state
            .lock()
            .unwrap()
            .networks
            .entry(region.to_string())
            .or_default()
            .clone()
    }

    /// Regions for which regional access was requested, in order
    pub fn regional_requests(&self) -> Vec<String> {
        self.state.lock().unwrap().regional_requests.clone()
    }

    pub fn password_policy(&self) -> Option<PasswordPolicy> {
        self.state.lock().unwrap().password_policy.clone()
    }

    pub fn s3_block(&self) -> Option<(AccountId, S3BlockPublicAccess)> {
        self.state.lock().unwrap().s3_block.clone()
    }
}

impl AccountSession for FakeAccount {
    type Regional = FakeNetwork;

    async fn available_regions(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().unwrap().regions.clone())
    }

    async fn regional(&self, region: &str) -> Result<Self::Regional> {
        self.state
            .lock()
            .unwrap()
            .regional_requests
            .push(region.to_string());
        Ok(self.network(region))
    }

    async fn update_password_policy(&self, policy: &PasswordPolicy) -> Result<()> {
        self.state.lock().unwrap().password_policy = Some(policy.clone());
        Ok(())
    }

    async fn put_s3_public_access_block(
        &self,
        account: &AccountId,
        settings: &S3BlockPublicAccess,
    ) -> Result<()> {
        self.state.lock().unwrap().s3_block = Some((account.clone(), settings.clone()));
        Ok(())
    }
}

/// Hands out one [`FakeAccount`] and records every role assumption
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    account: FakeAccount,
    assumed: Arc<Mutex<Vec<String>>>,
    deny: bool,
}

impl FakeConnector {
    pub fn new(account: FakeAccount) -> Self {
        Self {
            account,
            ..Default::default()
        }
    }

    /// A connector whose role assumptions are all refused
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Default::default()
        }
    }

    pub fn account(&self) -> &FakeAccount {
        &self.account
    }

    /// Role ARNs assumed so far
    pub fn assumed_roles(&self) -> Vec<String> {
        self.assumed.lock().unwrap().clone()
    }
}

impl Connector for FakeConnector {
    type Session = FakeAccount;

    async fn connect(&self, role_arn: &str) -> Result<Self::Session> {
        self.assumed.lock().unwrap().push(role_arn.to_string());
        if self.deny {
            return Err(AwsError::AccessDenied {
                code: "AccessDenied".into(),
                message: format!("not authorized to perform sts:AssumeRole on {role_arn}"),
            }
            .into());
        }
        Ok(self.account.clone())
    }
}

/// Object store holding documents in memory
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl FakeStore {
    pub fn with_object(mut self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), body.into());
        self
    }
}

impl ConfigStore for FakeStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| not_found("NoSuchKey", key))
    }
}
