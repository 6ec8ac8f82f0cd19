//! Topology type definitions.
//!
//! This file contains the node and interface structures the builder
//! fills in and the naming conventions for the synthetic lab elements.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

/// Label of the synthetic external connector node
pub const EXT_CONN_NAME: &str = "ext-conn-0";

/// Label of the DNS host node, exists exactly once per lab
pub const DNS_HOST_NAME: &str = "dns-host";

/// Device definition used for the external connector
pub const EXT_CONN_DEFINITION: &str = "external_connector";

/// Device definition used for the DNS host
pub const DNS_HOST_DEFINITION: &str = "alpine";

/// One node-local attachment point.
///
/// The slot is the node-local ordering key; it is unique within a node's
/// interface list, and lists are sorted ascending by slot before they are
/// exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// host address combined with the link prefix
    pub address: Ipv4Net,
    pub description: String,
    pub slot: u32,
}

impl Interface {
    pub fn new(address: Ipv4Net, description: String, slot: u32) -> Self {
        Interface {
            address,
            description,
            slot,
        }
    }
}

/// A node of the generated topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub hostname: String,
    /// identifying host address, not bound to any link; the DNS host has none
    pub loopback: Option<Ipv4Addr>,
    pub interfaces: Vec<Interface>,
}

impl Node {
    /// Restore the slot ordering invariant after interfaces were attached
    pub fn sort_interfaces(&mut self) {
        self.interfaces.sort_by_key(|iface| iface.slot);
    }
}

/// Interface label for a given device definition and slot.
///
/// Router definitions follow the IOSv naming scheme; everything else
/// uses plain Linux interface names.
pub fn interface_label(definition: &str, slot: u32) -> String {
    match definition {
        "iosv" => format!("GigabitEthernet0/{slot}"),
        _ => format!("eth{slot}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_interfaces_orders_by_slot() {
        let mut node = Node {
            hostname: "R1".to_string(),
            loopback: None,
            interfaces: vec![
                Interface::new("172.16.0.9/30".parse().unwrap(), String::new(), 2),
                Interface::new("172.16.0.1/30".parse().unwrap(), String::new(), 0),
                Interface::new("172.16.0.5/30".parse().unwrap(), String::new(), 1),
            ],
        };
        node.sort_interfaces();
        let slots: Vec<u32> = node.interfaces.iter().map(|i| i.slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_interface_labels_per_definition() {
        assert_eq!(interface_label("iosv", 0), "GigabitEthernet0/0");
        assert_eq!(interface_label("alpine", 1), "eth1");
        assert_eq!(interface_label("frr", 3), "eth3");
    }
}
