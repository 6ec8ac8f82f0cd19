//! Sequential subnet carving.
//!
//! This file implements the address pool that hands out single-host
//! subnets for loopbacks and 2-host subnets for point-to-point links.
//! Both cursors advance monotonically through their configured block and
//! never wrap or reuse a subnet.

use std::net::Ipv4Addr;

use ipnet::{Ipv4Net, Ipv4Subnets};

/// Errors raised while carving subnets from the configured blocks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("host block {0} is exhausted, no loopback addresses left")]
    HostsExhausted(Ipv4Net),
    #[error("link block {0} is exhausted, no point-to-point subnets left")]
    LinksExhausted(Ipv4Net),
    #[error("link block {0} is too small to hold a /30 subnet")]
    LinkBlockTooSmall(Ipv4Net),
}

/// A 2-host link subnet: the /30 prefix plus its two usable addresses.
///
/// The pool makes no endpoint assignment. Callers decide which of the two
/// addresses goes to which side of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkNet {
    /// the full /30 prefix (network and broadcast included)
    pub subnet: Ipv4Net,
    /// both usable host addresses, in increasing address order
    pub hosts: [Ipv4Addr; 2],
}

impl LinkNet {
    /// Address of the given host combined with the link prefix length
    pub fn interface(&self, host: Ipv4Addr) -> Ipv4Net {
        // prefix length comes from an existing net, it cannot be invalid
        Ipv4Net::new(host, self.subnet.prefix_len()).expect("valid prefix length")
    }
}

/// Sequential allocator over the configured host and link blocks.
///
/// The host cursor yields /32 subnets for loopbacks, the link cursor /30
/// subnets for point-to-point links. Calling either cursor N times
/// partitions the first N subnets of the block in increasing address
/// order with no gaps or overlaps.
#[derive(Debug, Clone)]
pub struct AddressPool {
    host_block: Ipv4Net,
    link_block: Ipv4Net,
    hosts: Ipv4Subnets,
    links: Ipv4Subnets,
}

impl AddressPool {
    /// Create a pool over the given host and link blocks.
    ///
    /// Fails if the link block is smaller than a single /30.
    pub fn new(host_block: Ipv4Net, link_block: Ipv4Net) -> Result<Self, AddressError> {
        let host_block = host_block.trunc();
        let link_block = link_block.trunc();

        let hosts = host_block
            .subnets(32)
            .expect("/32 is always a valid subdivision");
        let links = link_block
            .subnets(30)
            .map_err(|_| AddressError::LinkBlockTooSmall(link_block))?;

        Ok(AddressPool {
            host_block,
            link_block,
            hosts,
            links,
        })
    }

    /// Carve the next single-host address from the host block
    pub fn next_host(&mut self) -> Result<Ipv4Addr, AddressError> {
        self.hosts
            .next()
            .map(|net| net.addr())
            .ok_or(AddressError::HostsExhausted(self.host_block))
    }

    /// Carve the next 2-host link subnet from the link block
    pub fn next_link(&mut self) -> Result<LinkNet, AddressError> {
        let subnet = self
            .links
            .next()
            .ok_or(AddressError::LinksExhausted(self.link_block))?;
        let mut usable = subnet.hosts();
        let first = usable.next().expect("a /30 has two usable hosts");
        let second = usable.next().expect("a /30 has two usable hosts");
        Ok(LinkNet {
            subnet,
            hosts: [first, second],
        })
    }
}
