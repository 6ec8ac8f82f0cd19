//! Network topology module.
//!
//! This module builds the node/edge skeleton of a lab in one of two
//! modes, computes node placement, and runs the addressing pass that
//! attaches interfaces, loopbacks and DNS records to every node.

pub mod builder;
pub mod embed;
pub mod graph;
pub mod shell;
pub mod types;

pub use builder::{Blueprint, CoreHint, TopologyBuilder, TopologyError};
pub use graph::{LabGraph, NodeId};
pub use types::{Interface, Node};

/// Mode of operation, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
pub enum Mode {
    /// simple path of routers behind the DNS host
    #[value(name = "linear-chain")]
    #[serde(rename = "linear-chain")]
    LinearChain,
    /// randomized clusters with guaranteed connectivity
    #[value(name = "clustered-mesh")]
    #[serde(rename = "clustered-mesh")]
    ClusteredMesh,
}
