//! Inventory tabs: projection of the snapshot into tables.
//!
//! Rendering is a pure function of the snapshot. Rows keep input order and
//! there is no filtering, sorting or pagination.

use chrono::{DateTime, FixedOffset, Local};

use super::table::{BadgeTone, Cell, PLACEHOLDER, TableView};
use crate::inventory::InventorySnapshot;

/// The four dashboard tabs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum InventoryTab {
    Instances,
    SecurityGroups,
    Iam,
    Vpc,
}

impl InventoryTab {
    /// Label shown on the tab trigger.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryTab::Instances => "EC2 Instances",
            InventoryTab::SecurityGroups => "Security Groups",
            InventoryTab::Iam => "IAM",
            InventoryTab::Vpc => "VPC",
        }
    }
}

/// Summary line shown above the tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardHeader {
    pub account: String,
    pub region: String,
    pub last_updated: String,
}

impl DashboardHeader {
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        Self {
            account: snapshot.account_id.to_string(),
            region: snapshot.region.clone(),
            last_updated: format_timestamp(&snapshot.timestamp),
        }
    }
}

/// Renders every table belonging to `tab`.
pub fn render_tab(snapshot: &InventorySnapshot, tab: InventoryTab) -> Vec<TableView> {
    match tab {
        InventoryTab::Instances => vec![instances_table(snapshot)],
        InventoryTab::SecurityGroups => vec![security_groups_table(snapshot)],
        InventoryTab::Iam => vec![iam_users_table(snapshot), iam_roles_table(snapshot)],
        InventoryTab::Vpc => vec![vpcs_table(snapshot), subnets_table(snapshot)],
    }
}

fn instances_table(snapshot: &InventorySnapshot) -> TableView {
    let mut table = TableView::new(
        format!("EC2 Instances ({})", snapshot.ec2_instances.len()),
        vec!["Name", "Instance ID", "Type", "State", "Private IP", "Public IP"],
    );
    for instance in &snapshot.ec2_instances {
        let tone = if instance.is_running() {
            BadgeTone::Success
        } else {
            BadgeTone::Neutral
        };
        table.push_row(vec![
            Cell::plain_or_dash(instance.name().filter(|n| !n.is_empty())),
            Cell::mono(&instance.instance_id),
            Cell::plain(&instance.instance_type),
            Cell::badge(&instance.state, tone),
            Cell::mono_or_dash(instance.private_ip_address.as_deref()),
            Cell::mono_or_dash(instance.public_ip_address.as_deref()),
        ]);
    }
    table
}

fn security_groups_table(snapshot: &InventorySnapshot) -> TableView {
    let mut table = TableView::new(
        format!("Security Groups ({})", snapshot.security_groups.len()),
        vec!["Group Name", "Group ID", "VPC ID", "Description"],
    );
    for group in &snapshot.security_groups {
        table.push_row(vec![
            Cell::plain(&group.group_name),
            Cell::mono(&group.group_id),
            Cell::mono_or_dash(group.vpc_id.as_deref()),
            Cell::plain_or_dash(group.description.as_deref()),
        ]);
    }
    table
}

fn iam_users_table(snapshot: &InventorySnapshot) -> TableView {
    let users = &snapshot.iam_configuration.users;
    let mut table = TableView::new(
        format!("IAM Users ({})", users.len()),
        vec!["Username", "User ID", "Created"],
    );
    for user in users {
        table.push_row(vec![
            Cell::plain(&user.user_name),
            Cell::mono(&user.user_id),
            Cell::plain(format_date(user.create_date.as_deref())),
        ]);
    }
    table
}

fn iam_roles_table(snapshot: &InventorySnapshot) -> TableView {
    let roles = &snapshot.iam_configuration.roles;
    let mut table = TableView::new(
        format!("IAM Roles ({})", roles.len()),
        vec!["Role Name", "Role ID", "Created"],
    );
    for role in roles {
        table.push_row(vec![
            Cell::plain(&role.role_name),
            Cell::mono(&role.role_id),
            Cell::plain(format_date(role.create_date.as_deref())),
        ]);
    }
    table
}

fn vpcs_table(snapshot: &InventorySnapshot) -> TableView {
    let mut table = TableView::new(
        "VPC Configuration",
        vec!["VPC ID", "CIDR Block", "State", "Default"],
    );
    for vpc in &snapshot.vpc_configuration.vpcs {
        table.push_row(vec![
            Cell::mono(&vpc.vpc_id),
            Cell::plain(&vpc.cidr_block),
            Cell::plain(&vpc.state),
            Cell::plain(if vpc.is_default { "Yes" } else { "No" }),
        ]);
    }
    table
}

fn subnets_table(snapshot: &InventorySnapshot) -> TableView {
    let mut table = TableView::new(
        "Subnets",
        vec!["Subnet ID", "CIDR Block", "AZ", "Available IPs"],
    );
    for subnet in &snapshot.vpc_configuration.subnets {
        let available = subnet
            .available_ip_address_count
            .map(|count| count.to_string());
        table.push_row(vec![
            Cell::mono(&subnet.subnet_id),
            Cell::plain(&subnet.cidr_block),
            Cell::plain(&subnet.availability_zone),
            Cell::plain_or_dash(available.as_deref()),
        ]);
    }
    table
}

/// Parses the timestamp shapes the collector emits: RFC 3339, or the
/// space-separated form Python writes for timezone-aware datetimes.
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .ok()
}

/// Capture timestamp in local time, or the raw text if it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => raw.to_string(),
    }
}

/// Calendar date of a creation timestamp, in the timestamp's own offset.
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        None => PLACEHOLDER.to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => ts.date_naive().format("%Y-%m-%d").to_string(),
            None => raw.to_string(),
        },
    }
}
