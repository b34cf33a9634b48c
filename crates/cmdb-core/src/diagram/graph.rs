//! Node/edge graph derivation for network-style renderers.
//!
//! The output serializes to the `{nodes, edges}` shape vis-network consumes.

use serde::{Deserialize, Serialize};

use crate::inventory::{Ec2Instance, InventorySnapshot};

/// How instances and subnets are attached to VPC nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VpcAssociation {
    /// Attach each resource to the VPC it names. Resources that name no VPC
    /// fall back to the first VPC; resources naming an unknown VPC get no
    /// edge.
    #[default]
    ById,
    /// Attach everything to the first VPC in the snapshot regardless of the
    /// resource's own VPC.
    FirstVpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Box,
    Ellipse,
    Diamond,
    Hexagon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl InfraGraph {
    fn node(&mut self, id: String, label: String, shape: NodeShape, color: &str) {
        self.nodes.push(GraphNode {
            id,
            label,
            shape,
            color: color.to_string(),
        });
    }

    fn edge(&mut self, from: String, to: String) {
        self.edges.push(GraphEdge { from, to });
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.from == id)
    }

    pub fn edges_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.to == id)
    }
}

const VPC_COLOR: &str = "#FF5733";
const EC2_COLOR: &str = "#33C3FF";
const SG_COLOR: &str = "#7D3C98";
const SUBNET_COLOR: &str = "#F1C40F";

/// Derives the infrastructure graph from a snapshot.
///
/// Node ids are positional (`vpc-<i>`, `ec2-<i>`, `sg-<i>`, `subnet-<i>`).
/// Edges run VPC → instance, security group → member instance, and
/// VPC → subnet.
pub fn derive_graph(snapshot: &InventorySnapshot, association: VpcAssociation) -> InfraGraph {
    let mut graph = InfraGraph::default();

    for (index, vpc) in snapshot.vpc_configuration.vpcs.iter().enumerate() {
        graph.node(
            format!("vpc-{index}"),
            format!("VPC\n{}", vpc.vpc_id),
            NodeShape::Box,
            VPC_COLOR,
        );
    }

    for (index, instance) in snapshot.ec2_instances.iter().enumerate() {
        graph.node(
            format!("ec2-{index}"),
            format!("EC2\n{}", instance.instance_id),
            NodeShape::Ellipse,
            EC2_COLOR,
        );
        let vpc_id = instance_vpc_id(snapshot, instance);
        if let Some(vpc) = vpc_index(snapshot, vpc_id, association) {
            graph.edge(format!("vpc-{vpc}"), format!("ec2-{index}"));
        }
    }

    for (index, group) in snapshot.security_groups.iter().enumerate() {
        graph.node(
            format!("sg-{index}"),
            format!("SG\n{}", group.group_id),
            NodeShape::Diamond,
            SG_COLOR,
        );
        for (instance_index, instance) in snapshot.ec2_instances.iter().enumerate() {
            if instance.in_security_group(&group.group_id) {
                graph.edge(format!("sg-{index}"), format!("ec2-{instance_index}"));
            }
        }
    }

    for (index, subnet) in snapshot.vpc_configuration.subnets.iter().enumerate() {
        graph.node(
            format!("subnet-{index}"),
            format!("Subnet\n{}", subnet.subnet_id),
            NodeShape::Hexagon,
            SUBNET_COLOR,
        );
        if let Some(vpc) = vpc_index(snapshot, subnet.vpc_id.as_deref(), association) {
            graph.edge(format!("vpc-{vpc}"), format!("subnet-{index}"));
        }
    }

    graph
}

/// The instance's own VPC, or the VPC of the subnet it sits in.
fn instance_vpc_id<'a>(snapshot: &'a InventorySnapshot, instance: &'a Ec2Instance) -> Option<&'a str> {
    instance.vpc_id.as_deref().or_else(|| {
        let subnet_id = instance.subnet_id.as_deref()?;
        let index = snapshot.subnet_index(subnet_id)?;
        snapshot.vpc_configuration.subnets[index].vpc_id.as_deref()
    })
}

fn vpc_index(
    snapshot: &InventorySnapshot,
    vpc_id: Option<&str>,
    association: VpcAssociation,
) -> Option<usize> {
    let vpcs = &snapshot.vpc_configuration.vpcs;
    if vpcs.is_empty() {
        return None;
    }
    match (association, vpc_id) {
        (VpcAssociation::FirstVpc, _) | (VpcAssociation::ById, None) => Some(0),
        (VpcAssociation::ById, Some(id)) => vpcs.iter().position(|vpc| vpc.vpc_id == id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::sample_snapshot;

    fn targets<'a>(graph: &'a InfraGraph, from: &'a str) -> Vec<&'a str> {
        graph.edges_from(from).map(|e| e.to.as_str()).collect()
    }

    #[test]
    fn test_one_node_per_resource() {
        let snapshot = sample_snapshot();
        let graph = derive_graph(&snapshot, VpcAssociation::ById);
        let expected = snapshot.vpc_configuration.vpcs.len()
            + snapshot.ec2_instances.len()
            + snapshot.security_groups.len()
            + snapshot.vpc_configuration.subnets.len();
        assert_eq!(graph.nodes.len(), expected);
        assert_eq!(graph.nodes[0].label, "VPC\nvpc-main");
        assert_eq!(graph.nodes[0].shape, NodeShape::Box);
    }

    #[test]
    fn test_by_id_association() {
        let graph = derive_graph(&sample_snapshot(), VpcAssociation::ById);
        // i-0a1 and subnet-a live in vpc-main; i-0b2 and subnet-b in vpc-data.
        // i-0c3 and subnet-c name no VPC and fall back to the first one.
        assert_eq!(targets(&graph, "vpc-0"), vec!["ec2-0", "ec2-2", "subnet-0", "subnet-2"]);
        assert_eq!(targets(&graph, "vpc-1"), vec!["ec2-1", "subnet-1"]);
    }

    #[test]
    fn test_first_vpc_association() {
        let graph = derive_graph(&sample_snapshot(), VpcAssociation::FirstVpc);
        assert_eq!(
            targets(&graph, "vpc-0"),
            vec!["ec2-0", "ec2-1", "ec2-2", "subnet-0", "subnet-1", "subnet-2"]
        );
        assert_eq!(targets(&graph, "vpc-1").len(), 0);
    }

    #[test]
    fn test_security_group_membership_edges() {
        let graph = derive_graph(&sample_snapshot(), VpcAssociation::ById);
        assert_eq!(targets(&graph, "sg-0"), vec!["ec2-0"]);
        assert_eq!(targets(&graph, "sg-1"), vec!["ec2-0", "ec2-1"]);
    }

    #[test]
    fn test_unknown_vpc_gets_no_edge() {
        let mut snapshot = sample_snapshot();
        snapshot.ec2_instances[0].vpc_id = Some("vpc-gone".to_string());
        let graph = derive_graph(&snapshot, VpcAssociation::ById);
        assert_eq!(graph.edges_to("ec2-0").filter(|e| e.from.starts_with("vpc-")).count(), 0);
    }

    #[test]
    fn test_no_vpcs_means_no_vpc_edges() {
        let mut snapshot = sample_snapshot();
        snapshot.vpc_configuration.vpcs.clear();
        let graph = derive_graph(&snapshot, VpcAssociation::FirstVpc);
        assert!(graph.edges.iter().all(|e| e.from.starts_with("sg-")));
    }

    #[test]
    fn test_serializes_for_vis_network() {
        let graph = derive_graph(&sample_snapshot(), VpcAssociation::ById);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["shape"], "box");
        assert_eq!(json["nodes"][0]["color"], "#FF5733");
        assert_eq!(json["edges"][0]["from"], "vpc-0");
    }
}
