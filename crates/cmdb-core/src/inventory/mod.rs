//! Inventory domain module.
//!
//! - `model`: the snapshot payload (`InventorySnapshot`) and its record types

mod model;

pub use model::{
    AccountId, Ec2Instance, IamConfiguration, IamRole, IamUser, InventorySnapshot,
    SecurityGroup, SecurityGroupRef, Subnet, Tag, Vpc, VpcConfiguration,
};

#[cfg(test)]
pub(crate) fn sample_snapshot() -> InventorySnapshot {
    serde_json::from_str(include_str!("../../testdata/snapshot.json"))
        .expect("testdata/snapshot.json must parse")
}
