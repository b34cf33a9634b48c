//! Mermaid flowchart derivation.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::inventory::InventorySnapshot;

const INDENT: &str = "    ";

/// Generates a `graph TD` Mermaid document for the snapshot.
///
/// Layout: the first VPC is the root, every subnet hangs off it, security
/// groups are declared on their own, and each instance is linked from its
/// subnet and to each security group it references. Unmatched subnet or
/// group references produce no edge. The output depends only on the
/// snapshot, so repeated calls are byte-identical.
pub fn derive_mermaid(snapshot: &InventorySnapshot) -> String {
    let mut out = String::from("graph TD\n");
    let vpc = snapshot.vpc_configuration.vpcs.first();
    let subnets = &snapshot.vpc_configuration.subnets;

    if let Some(vpc) = vpc {
        line(
            &mut out,
            format_args!(
                "vpc[\"{}\"]",
                label(&[format!("VPC: {}", vpc.vpc_id), format!("CIDR: {}", vpc.cidr_block)])
            ),
        );
        out.push('\n');
    }

    for (index, subnet) in subnets.iter().enumerate() {
        line(
            &mut out,
            format_args!(
                "subnet{index}[\"{}\"]",
                label(&[
                    format!("Subnet: {}", subnet.subnet_id),
                    format!("AZ: {}", subnet.availability_zone),
                    format!("CIDR: {}", subnet.cidr_block),
                ])
            ),
        );
        if vpc.is_some() {
            line(&mut out, format_args!("vpc --> subnet{index}"));
        }
    }
    out.push('\n');

    let mut group_nodes: HashMap<&str, String> = HashMap::new();
    for (index, group) in snapshot.security_groups.iter().enumerate() {
        group_nodes.insert(group.group_id.as_str(), format!("sg{index}"));
        line(
            &mut out,
            format_args!("sg{index}[\"{}\"]", label(&[format!("SG: {}", group.group_name)])),
        );
    }
    out.push('\n');

    for (index, instance) in snapshot.ec2_instances.iter().enumerate() {
        let display = instance.name().unwrap_or(&instance.instance_id);
        line(
            &mut out,
            format_args!(
                "ec2_{index}[\"{}\"]",
                label(&[format!("EC2: {display}"), instance.instance_type.clone()])
            ),
        );

        let subnet_index = instance
            .subnet_id
            .as_deref()
            .and_then(|id| snapshot.subnet_index(id));
        if let Some(subnet_index) = subnet_index {
            line(&mut out, format_args!("subnet{subnet_index} --> ec2_{index}"));
        }

        for group in &instance.security_groups {
            if let Some(node) = group_nodes.get(group.group_id.as_str()) {
                line(&mut out, format_args!("ec2_{index} --> {node}"));
            }
        }
    }

    out.push('\n');
    line(&mut out, format_args!("%% Styling"));
    line(&mut out, format_args!("classDef vpc fill:#FFD700,stroke:#B8860B,stroke-width:2px"));
    line(&mut out, format_args!("classDef subnet fill:#98FB98,stroke:#228B22,stroke-width:2px"));
    line(&mut out, format_args!("classDef ec2 fill:#87CEEB,stroke:#4682B4,stroke-width:2px"));
    line(&mut out, format_args!("classDef sg fill:#FFA07A,stroke:#CD5C5C,stroke-width:2px"));
    out.push('\n');

    if vpc.is_some() {
        line(&mut out, format_args!("class vpc vpc"));
    }
    class_line(&mut out, "subnet", (0..subnets.len()).map(|i| format!("subnet{i}")));
    class_line(&mut out, "ec2", (0..snapshot.ec2_instances.len()).map(|i| format!("ec2_{i}")));
    class_line(&mut out, "sg", (0..snapshot.security_groups.len()).map(|i| format!("sg{i}")));

    out
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
    out.push_str(INDENT);
    // Writing to a String cannot fail.
    let _ = out.write_fmt(args);
    out.push('\n');
}

fn class_line(out: &mut String, class: &str, ids: impl Iterator<Item = String>) {
    let ids: Vec<String> = ids.collect();
    if !ids.is_empty() {
        line(out, format_args!("class {} {class}", ids.join(",")));
    }
}

/// Joins label parts with line breaks and escapes characters that would end
/// a quoted Mermaid label.
fn label<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| part.as_ref().replace('"', "#quot;"))
        .collect::<Vec<_>>()
        .join("<br/>")
}
