//! EC2 networking types
//!
//! Plain snapshots of the fields teardown decisions depend on, so the
//! deleters can be exercised without SDK shapes.

/// A gateway's attachment to a VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub vpc_id: String,
    /// Provider state string (`attached`, `attaching`, `available`, `detached`, ...)
    pub state: String,
}

impl Attachment {
    pub fn new(vpc_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            state: state.into(),
        }
    }
}

/// Internet gateway or egress-only internet gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    pub id: String,
    pub attachments: Vec<Attachment>,
}

impl Gateway {
    /// State of the attachment to `vpc_id`, if any
    pub fn attachment_state(&self, vpc_id: &str) -> Option<&str> {
        self.attachments
            .iter()
            .find(|a| a.vpc_id == vpc_id)
            .map(|a| a.state.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub id: String,
    /// True when any association marks this as the VPC's main table
    pub main: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAcl {
    pub id: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeeringConnection {
    pub id: String,
    /// Status code (`active`, `pending-acceptance`, `deleted`, ...)
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcEndpoint {
    pub id: String,
    /// Endpoint state as the filter API spells it (`pendingAcceptance`, `available`, ...)
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroup {
    pub id: String,
    pub name: String,
}

/// Virtual private gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnGateway {
    pub id: String,
    /// Gateway state (`pending`, `available`, `deleting`, `deleted`)
    pub state: String,
    pub attachments: Vec<Attachment>,
}

impl VpnGateway {
    /// State of the attachment to `vpc_id`, if any
    pub fn attachment_state(&self, vpc_id: &str) -> Option<&str> {
        self.attachments
            .iter()
            .find(|a| a.vpc_id == vpc_id)
            .map(|a| a.state.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnConnection {
    pub id: String,
    /// Connection state (`pending`, `available`, `deleting`, `deleted`)
    pub state: String,
}
