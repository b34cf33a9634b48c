//! Infrastructure diagrams derived from an inventory snapshot.

mod graph;
mod mermaid;

pub use graph::{GraphEdge, GraphNode, InfraGraph, NodeShape, VpcAssociation, derive_graph};
pub use mermaid::derive_mermaid;
