//! Randomized clustered graph synthesis.
//!
//! This file builds the raw node/edge skeleton for the clustered mesh
//! mode: the node count is split into clusters, each cluster gets a dense
//! random subgraph, and consecutive clusters are tied together with a few
//! random edges. The result is usually, but not necessarily, connected;
//! the builder always runs connectivity repair afterwards.

use rand::Rng;

use super::graph::{LabGraph, NodeId};

/// Fraction of a cluster's edge budget spent inside the cluster
const SHELL_DENSITY: f64 = 0.999;

/// Smallest cluster the node count is split into
const MIN_CLUSTER_SIZE: usize = 20;

/// Split the node count into cluster sizes.
///
/// Cluster size is max(count/4, 20); a final partial cluster picks up the
/// remainder when the count does not divide evenly.
fn cluster_sizes(node_count: usize) -> Vec<usize> {
    let size = (node_count / 4).max(MIN_CLUSTER_SIZE);
    let clusters = node_count / size;
    let remain = node_count - clusters * size;

    let mut sizes = vec![size; clusters];
    if remain > 0 {
        sizes.push(remain);
    }
    sizes
}

/// Add `target` distinct random edges inside one node range
fn add_intra_cluster_edges<R: Rng>(
    rng: &mut R,
    graph: &mut LabGraph,
    offset: NodeId,
    size: usize,
    target: usize,
) {
    let possible = size * size.saturating_sub(1) / 2;
    let target = target.min(possible);
    let mut added = 0;
    while added < target {
        let a = offset + rng.gen_range(0..size);
        let b = offset + rng.gen_range(0..size);
        if a != b && !graph.has_edge(a, b) {
            graph.add_edge(a, b);
            added += 1;
        }
    }
}

/// Add `target` distinct random edges between two node ranges
fn add_inter_cluster_edges<R: Rng>(
    rng: &mut R,
    graph: &mut LabGraph,
    prev_offset: NodeId,
    prev_size: usize,
    offset: NodeId,
    size: usize,
    target: usize,
) {
    let possible = prev_size * size;
    let target = target.min(possible);
    let mut added = 0;
    while added < target {
        let a = prev_offset + rng.gen_range(0..prev_size);
        let b = offset + rng.gen_range(0..size);
        if !graph.has_edge(a, b) {
            graph.add_edge(a, b);
            added += 1;
        }
    }
}

/// Build the randomized clustered skeleton for the given node count.
///
/// Every cluster of n nodes has an edge budget of 2n. The density
/// constant sends almost the whole budget into the cluster itself,
/// leaving one or two edges toward the previous cluster.
pub fn random_clusters<R: Rng>(rng: &mut R, node_count: usize) -> LabGraph {
    let mut graph = LabGraph::with_nodes(node_count);
    let sizes = cluster_sizes(node_count);

    let mut offset = 0;
    let mut prev: Option<(NodeId, usize)> = None;
    for &size in &sizes {
        let budget = size * 2;
        let intra = (budget as f64 * SHELL_DENSITY) as usize;
        let inter = budget - intra;

        add_intra_cluster_edges(rng, &mut graph, offset, size, intra);
        if let Some((prev_offset, prev_size)) = prev {
            add_inter_cluster_edges(rng, &mut graph, prev_offset, prev_size, offset, size, inter);
        }

        prev = Some((offset, size));
        offset += size;
    }
    graph
}
