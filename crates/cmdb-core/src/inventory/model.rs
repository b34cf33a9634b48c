//! Inventory snapshot domain models.
//!
//! Field names follow the JSON payload served by `GET /api/data`, which keeps
//! the cloud provider's PascalCase keys for every nested record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier as delivered by the backend.
///
/// The collector emits it either as a JSON string or as a bare number; both
/// are accepted and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Text(String),
    Number(u64),
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Text(id) => f.write_str(id),
            AccountId::Number(id) => write!(f, "{id}"),
        }
    }
}

/// The full inventory payload for one account at one point in time.
///
/// Immutable once fetched; a dashboard run fetches it once and derives every
/// table and diagram from the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub account_id: AccountId,
    pub region: String,
    /// Capture time as written by the collector (usually RFC 3339).
    pub timestamp: String,
    #[serde(default)]
    pub ec2_instances: Vec<Ec2Instance>,
    #[serde(default)]
    pub security_groups: Vec<SecurityGroup>,
    #[serde(default)]
    pub iam_configuration: IamConfiguration,
    #[serde(default)]
    pub vpc_configuration: VpcConfiguration,
}

impl InventorySnapshot {
    /// Looks up a VPC by identifier.
    pub fn vpc(&self, vpc_id: &str) -> Option<&Vpc> {
        self.vpc_configuration
            .vpcs
            .iter()
            .find(|vpc| vpc.vpc_id == vpc_id)
    }

    /// Index of the subnet with the given identifier, if present.
    pub fn subnet_index(&self, subnet_id: &str) -> Option<usize> {
        self.vpc_configuration
            .subnets
            .iter()
            .position(|subnet| subnet.subnet_id == subnet_id)
    }

    /// Index of the security group with the given identifier, if present.
    pub fn security_group_index(&self, group_id: &str) -> Option<usize> {
        self.security_groups
            .iter()
            .position(|group| group.group_id == group_id)
    }
}

/// A key/value resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Reference from an instance to one of its security groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupRef {
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

/// A compute instance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ec2Instance {
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<SecurityGroupRef>,
}

impl Ec2Instance {
    /// Value of the `Name` tag, if the instance carries one.
    pub fn name(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == "Name")
            .map(|tag| tag.value.as_str())
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }

    /// Whether this instance lists `group_id` among its security groups.
    pub fn in_security_group(&self, group_id: &str) -> bool {
        self.security_groups
            .iter()
            .any(|group| group.group_id == group_id)
    }
}

/// A security group record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Identity configuration: users and roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamConfiguration {
    #[serde(rename = "Users", default)]
    pub users: Vec<IamUser>,
    #[serde(rename = "Roles", default)]
    pub roles: Vec<IamRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IamUser {
    pub user_name: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IamRole {
    pub role_name: String,
    pub role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,
}

/// Network configuration: VPCs and subnets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcConfiguration {
    #[serde(rename = "VPCs", default)]
    pub vpcs: Vec<Vpc>,
    #[serde(rename = "Subnets", default)]
    pub subnets: Vec<Subnet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    pub vpc_id: String,
    pub cidr_block: String,
    pub state: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_id: String,
    pub cidr_block: String,
    pub availability_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_ip_address_count: Option<u64>,
}
