//! Topology construction.
//!
//! This file assembles the full lab description: node/edge skeleton,
//! placement, per-interface addressing, DNS records and the ordered
//! provisioning plan. Both modes share the address pool and the DNS zone
//! builder, which are advanced in strict construction order so that a
//! run is reproducible from its inputs.

use std::net::Ipv4Addr;

use log::info;
use rand::Rng;

use crate::addressing::{AddressError, AddressPool, LinkNet};
use crate::dns::{DnsRecord, DnsZoneBuilder};
use crate::layout::{Point, SpiralLayout};
use crate::provision::ProvisionPlan;

use super::graph::{LabGraph, NodeId};
use super::shell;
use super::types::{
    interface_label, Interface, Node, DNS_HOST_DEFINITION, DNS_HOST_NAME, EXT_CONN_DEFINITION,
    EXT_CONN_NAME,
};
use super::{embed, Mode};

/// Smallest allowed number of routers
pub const MIN_NODE_COUNT: u32 = 2;

/// Largest allowed number of routers
pub const MAX_NODE_COUNT: u32 = 1000;

/// Errors raised during topology construction
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("invalid node count {0}, valid values are {MIN_NODE_COUNT} to {MAX_NODE_COUNT}")]
    InvalidNodeCount(u32),
    #[error("connectivity repair left the mesh disconnected")]
    ConnectivityRepairFailed,
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Default gateway hint for the core node of a mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreHint {
    pub hostname: String,
    /// DNS-host-side link address, used as the core node's default route
    pub origin: Ipv4Addr,
}

/// The finished lab description handed to the collaborators.
///
/// `nodes` lists the routers in increasing node id order; the
/// provisioning plan keeps the exact construction order, which differs
/// from the id order in mesh mode.
#[derive(Debug)]
pub struct Blueprint {
    pub mode: Mode,
    pub nodes: Vec<Node>,
    pub dns_host: Node,
    pub dns_zone: Vec<DnsRecord>,
    /// address every generated node resolves against
    pub nameserver: Ipv4Addr,
    pub core: Option<CoreHint>,
    pub plan: ProvisionPlan,
    /// mesh skeleton with final positions, absent in chain mode
    pub graph: Option<LabGraph>,
}

/// Wiring state of one mesh edge during the addressing pass
#[derive(Debug)]
struct EdgeWiring {
    link: LinkNet,
    /// (node, slot) per endpoint, in edge creation order
    ends: [(NodeId, u32); 2],
    /// usable addresses handed out so far, first taker gets the lower one
    assigned: usize,
}

impl EdgeWiring {
    fn take_host(&mut self) -> Ipv4Addr {
        let host = self.link.hosts[self.assigned];
        self.assigned += 1;
        host
    }

    /// Split the endpoints into (this end, other end) for the given node
    fn ends_for(&self, node: NodeId) -> ((NodeId, u32), (NodeId, u32)) {
        if self.ends[0].0 == node {
            (self.ends[0], self.ends[1])
        } else {
            (self.ends[1], self.ends[0])
        }
    }
}

/// Reject node counts outside the supported range before any allocation
pub fn validate_node_count(node_count: u32) -> Result<(), TopologyError> {
    if !(MIN_NODE_COUNT..=MAX_NODE_COUNT).contains(&node_count) {
        return Err(TopologyError::InvalidNodeCount(node_count));
    }
    Ok(())
}

/// Builds the lab topology in either mode.
///
/// The address pool is owned by the caller and borrowed for the duration
/// of one run; the builder never resets it.
#[derive(Debug)]
pub struct TopologyBuilder<'a> {
    pool: &'a mut AddressPool,
    distance: i32,
    router_definition: String,
}

impl<'a> TopologyBuilder<'a> {
    pub fn new(pool: &'a mut AddressPool, distance: i32, router_definition: &str) -> Self {
        TopologyBuilder {
            pool,
            distance,
            router_definition: router_definition.to_string(),
        }
    }

    fn hostname(&self, id: NodeId) -> String {
        format!("R{}", id + 1)
    }

    /// Build the linear chain: connector, DNS host, then R1..RN in a path.
    ///
    /// Every element takes its position from the spiral in creation
    /// order. Each router faces the next node on slot 0 and the previous
    /// one on slot 1; the forward subnet of the last router stays
    /// half-used, which keeps the subnet sequence identical for any
    /// suffix of the chain.
    pub fn build_chain(
        &mut self,
        spiral: &mut SpiralLayout,
        node_count: u32,
    ) -> Result<Blueprint, TopologyError> {
        validate_node_count(node_count)?;

        let mut plan = ProvisionPlan::new();
        let mut zone = DnsZoneBuilder::new();

        let coords = spiral.next().expect("spiral is infinite");
        plan.add_node(EXT_CONN_NAME, EXT_CONN_DEFINITION, coords);
        info!("external connector: {EXT_CONN_NAME}");

        // the first link subnet serves the DNS host and the first router
        let dns_link = self.pool.next_link()?;
        let dns_addr = dns_link.hosts[0];
        let dns_via = dns_link.interface(dns_link.hosts[1]);

        let coords = spiral.next().expect("spiral is infinite");
        plan.add_node(DNS_HOST_NAME, DNS_HOST_DEFINITION, coords);
        plan.add_link(EXT_CONN_NAME, 0, DNS_HOST_NAME, 0);
        info!("DNS host: {DNS_HOST_NAME}");

        let mut prev_end = (DNS_HOST_NAME.to_string(), 1u32);
        let mut prev_addr = dns_via;
        let mut nodes = Vec::with_capacity(node_count as usize);
        for idx in 0..node_count as usize {
            let hostname = self.hostname(idx);
            let loopback = self.pool.next_host()?;
            let forward = self.pool.next_link()?;

            let mut node = Node {
                hostname: hostname.clone(),
                loopback: Some(loopback),
                interfaces: vec![
                    Interface::new(forward.interface(forward.hosts[0]), String::new(), 0),
                    Interface::new(prev_addr, String::new(), 1),
                ],
            };
            node.sort_interfaces();

            let coords = spiral.next().expect("spiral is infinite");
            plan.add_node(&hostname, &self.router_definition, coords);
            plan.add_link(&prev_end.0, prev_end.1, &hostname, 1);
            info!("node: {hostname}");

            zone.push_host(&hostname, loopback);
            nodes.push(node);

            prev_end = (hostname, 0);
            prev_addr = forward.interface(forward.hosts[1]);
        }

        let dns_host = dns_host_node(&dns_link, dns_addr);
        Ok(Blueprint {
            mode: Mode::LinearChain,
            nodes,
            dns_host,
            dns_zone: zone.into_records(),
            nameserver: dns_addr,
            core: None,
            plan,
            graph: None,
        })
    }

    /// Build the clustered mesh: synthesize, repair, embed, then address.
    pub fn build_mesh<R: Rng>(
        &mut self,
        rng: &mut R,
        node_count: u32,
    ) -> Result<Blueprint, TopologyError> {
        validate_node_count(node_count)?;
        let n = node_count as usize;

        info!("creating the clustered mesh skeleton");
        let mut graph = shell::random_clusters(rng, n);
        let repaired = graph.repair_connectivity();
        if repaired > 0 {
            info!("connectivity repair added {repaired} edges");
        }
        if !graph.is_connected() {
            return Err(TopologyError::ConnectivityRepairFailed);
        }

        let scale = (n as f64).sqrt() * self.distance as f64;
        let points = embed::force_directed(&graph, scale);
        for (id, point) in points.iter().enumerate() {
            graph.set_position(id, *point);
        }

        // edge pass: one link subnet per edge, routers created lazily in
        // edge iteration order (this is the provisioning order)
        let mut plan = ProvisionPlan::new();
        let mut created = vec![false; n];
        let mut next_slot = vec![0u32; n];
        let mut wirings = Vec::with_capacity(graph.edge_count());
        for edge in 0..graph.edge_count() {
            let (a, b) = graph.endpoints(edge);
            let link = self.pool.next_link()?;
            for node in [a, b] {
                if !created[node] {
                    created[node] = true;
                    plan.add_node(&self.hostname(node), &self.router_definition, graph.position(node));
                    info!("router: {}", self.hostname(node));
                }
            }
            let slot_a = next_slot[a];
            next_slot[a] += 1;
            let slot_b = next_slot[b];
            next_slot[b] += 1;
            plan.add_link(&self.hostname(a), slot_a, &self.hostname(b), slot_b);
            wirings.push(EdgeWiring {
                link,
                ends: [(a, slot_a), (b, slot_b)],
                assigned: 0,
            });
        }

        plan.add_node(EXT_CONN_NAME, EXT_CONN_DEFINITION, Point::new(0, 0));
        info!("external connector: {EXT_CONN_NAME}");

        let dns_link = self.pool.next_link()?;
        let dns_addr = dns_link.hosts[0];
        let dns_via = dns_link.hosts[1];
        plan.add_node(DNS_HOST_NAME, DNS_HOST_DEFINITION, Point::new(self.distance, 0));
        plan.add_link(EXT_CONN_NAME, 0, DNS_HOST_NAME, 0);
        info!("DNS host: {DNS_HOST_NAME}");

        let core = graph.core_node().expect("mesh has at least two nodes");
        info!("identified core node is {}", self.hostname(core));

        // addressing pass, pinned to increasing node id so loopback and
        // zone order stay reproducible
        let mut zone = DnsZoneBuilder::new();
        let mut nodes = Vec::with_capacity(n);
        let mut core_hint = None;
        for node in 0..n {
            let hostname = self.hostname(node);
            let mut interfaces = Vec::new();

            for &edge in graph.incident_edges(node) {
                let wiring = &mut wirings[edge];
                let host = wiring.take_host();
                let (this_end, other_end) = wiring.ends_for(node);
                let this_label = interface_label(&self.router_definition, this_end.1);
                let other_name = self.hostname(other_end.0);
                let other_label = interface_label(&self.router_definition, other_end.1);

                interfaces.push(Interface::new(
                    wiring.link.interface(host),
                    format!("to {other_name} {other_label}"),
                    this_end.1,
                ));
                zone.push_link(&hostname, &this_label, &other_name, &other_label, host);
            }

            if node == core {
                let slot = next_slot[node];
                next_slot[node] += 1;
                plan.add_link(DNS_HOST_NAME, 1, &hostname, slot);
                let this_label = interface_label(&self.router_definition, slot);
                interfaces.push(Interface::new(
                    dns_link.interface(dns_via),
                    format!("to {DNS_HOST_NAME} eth1"),
                    slot,
                ));
                zone.push_link(&hostname, &this_label, DNS_HOST_NAME, "eth1", dns_via);
                core_hint = Some(CoreHint {
                    hostname: hostname.clone(),
                    origin: dns_addr,
                });
                info!("DNS host link");
            }

            interfaces.sort_by_key(|iface| iface.slot);
            let loopback = self.pool.next_host()?;
            zone.push_host(&hostname, loopback);
            nodes.push(Node {
                hostname,
                loopback: Some(loopback),
                interfaces,
            });
        }

        zone.push_raw(&format!("{DNS_HOST_NAME}-eth1"), dns_addr);
        let dns_host = dns_host_node(&dns_link, dns_addr);
        Ok(Blueprint {
            mode: Mode::ClusteredMesh,
            nodes,
            dns_host,
            dns_zone: zone.into_records(),
            nameserver: dns_addr,
            core: core_hint,
            plan,
            graph: Some(graph),
        })
    }
}

/// The DNS host exposes its zone-facing address and the gateway address
/// on the router side of its link, in that order
fn dns_host_node(dns_link: &LinkNet, dns_addr: Ipv4Addr) -> Node {
    let gateway = if dns_addr == dns_link.hosts[0] {
        dns_link.hosts[1]
    } else {
        dns_link.hosts[0]
    };
    Node {
        hostname: DNS_HOST_NAME.to_string(),
        loopback: None,
        interfaces: vec![
            Interface::new(dns_link.interface(dns_addr), String::new(), 0),
            Interface::new(dns_link.interface(gateway), String::new(), 1),
        ],
    }
}
