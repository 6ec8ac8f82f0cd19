//! DNS zone accumulation and label synthesis.
//!
//! This file collects the hostname and interface records that end up in
//! the DNS host's zone, and normalizes link endpoint labels into names
//! that are safe to put into a zone file.

use std::net::Ipv4Addr;

use serde::Serialize;

/// Verbose interface-type substrings and their short forms.
///
/// The entries must stay sorted by descending key length. Only the first
/// matching entry is applied to a label, and that entry replaces every
/// occurrence of its key.
const INTERFACE_NAMES: &[(&str, &str)] = &[
    ("TenGigabitEthernet", "ten"),
    ("GigabitEthernet", "gi"),
    ("Ethernet", "e"),
];

/// One zone entry mapping a generated name to an IPv4 address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    pub name: String,
    pub address: Ipv4Addr,
}

/// Append-only accumulator for the DNS zone.
///
/// Records keep their generation order and are never deduplicated, so
/// colliding synthesized labels show up as duplicate zone entries. That
/// matches the behavior the zone consumers expect.
#[derive(Debug, Default)]
pub struct DnsZoneBuilder {
    records: Vec<DnsRecord>,
}

impl DnsZoneBuilder {
    pub fn new() -> Self {
        DnsZoneBuilder::default()
    }

    /// Record a node's loopback under its bare lower-cased hostname
    pub fn push_host(&mut self, hostname: &str, address: Ipv4Addr) {
        self.records.push(DnsRecord {
            name: hostname.to_lowercase(),
            address,
        });
    }

    /// Record one end of an inter-node link under a synthesized label
    pub fn push_link(
        &mut self,
        this_node: &str,
        this_iface: &str,
        other_node: &str,
        other_iface: &str,
        address: Ipv4Addr,
    ) {
        self.records.push(DnsRecord {
            name: link_label(this_node, this_iface, other_node, other_iface),
            address,
        });
    }

    /// Record an arbitrary name, used for the DNS host's own interface
    pub fn push_raw(&mut self, name: &str, address: Ipv4Addr) {
        self.records.push(DnsRecord {
            name: name.to_string(),
            address,
        });
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DnsRecord> {
        self.records
    }
}

/// Format a link endpoint pair as a DNS-safe label.
///
/// The this-end node and interface come first, then the other end. The
/// verbose interface-type substring is shortened, slashes become
/// underscores, spaces become dashes and the result is lower-cased.
pub fn link_label(this_node: &str, this_iface: &str, other_node: &str, other_iface: &str) -> String {
    let desc = format!("{this_node}-{this_iface}--{other_node}-{other_iface}");
    normalize_label(&desc)
}

/// Apply the fixed substitution rules to a raw label.
///
/// Applying this to an already normalized label is a no-op.
pub fn normalize_label(raw: &str) -> String {
    let mut desc = raw.to_string();
    for (long, short) in INTERFACE_NAMES {
        if desc.contains(long) {
            desc = desc.replace(long, short);
            break;
        }
    }
    desc.replace('/', "_").replace(' ', "-").to_lowercase()
}
