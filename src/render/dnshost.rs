//! DNS host boot configuration.
//!
//! This file renders the shell script that turns the alpine DNS host
//! into a dnsmasq resolver and NAT gateway for the lab. The zone records
//! become /etc/hosts entries, and static routes toward both configured
//! address blocks point at the router side of the DNS link.

use crate::config::Config;
use crate::dns::DnsRecord;
use crate::topology::Node;

/// Render the DNS host boot script.
///
/// `node` must be the DNS host: its first interface carries the
/// zone-facing address on eth1, its second one the gateway address on
/// the router side of the link.
pub fn render(config: &Config, node: &Node, records: &[DnsRecord]) -> String {
    let zone_iface = &node.interfaces[0];
    let gateway = node.interfaces[1].address.addr();

    let mut out = String::new();
    out.push_str("# this is a shell script which will be sourced at boot\n");
    out.push_str(&format!("hostname {}\n", node.hostname));
    out.push_str("# configurable user account\n");
    out.push_str(&format!("USERNAME={}\n", config.username));
    out.push_str(&format!("PASSWORD={}\n", config.password));
    out.push('\n');
    out.push_str("apk update\n");
    out.push_str("apk add dnsmasq iptables\n");
    out.push('\n');
    out.push_str("cat <<EOF >/etc/dnsmasq.conf\n");
    out.push_str("domain-needed\n");
    out.push_str("bogus-priv\n");
    out.push_str("resolv-file=/etc/resolv.dnsmasq\n");
    out.push_str("no-poll\n");
    out.push_str(&format!("local=/{}/\n", config.domainname));
    out.push_str("interface=eth1\n");
    out.push_str("no-dhcp-interface=eth1\n");
    out.push_str("log-queries\n");
    out.push_str("conf-dir=/etc/dnsmasq.d/,*.conf\n");
    out.push_str("EOF\n");
    out.push('\n');
    out.push_str("ip link set eth1 up\n");
    out.push_str(&format!("ip address add {} dev eth1\n", zone_iface.address));
    out.push_str(&format!("ip route add {} via {gateway}\n", config.host_block));
    out.push_str(&format!("ip route add {} via {gateway}\n", config.link_block));
    out.push('\n');
    for record in records {
        out.push_str(&format!(
            "echo -e \"{}\\t{}.{}\" >>/etc/hosts\n",
            record.address, record.name, config.domainname
        ));
    }
    out.push('\n');
    out.push_str("cp /etc/resolv.conf /etc/resolv.dnsmasq\n");
    out.push_str("cat <<EOF >/etc/resolv.conf\n");
    out.push_str("nameserver 127.0.0.1\n");
    out.push_str(&format!("search {}\n", config.domainname));
    out.push_str("EOF\n");
    out.push('\n');
    out.push_str("# make it a router, masquerading outgoing packets\n");
    out.push_str("iptables -t nat -A POSTROUTING -o eth0 -j MASQUERADE\n");
    out.push_str("echo 1 > /proc/sys/net/ipv4/ip_forward\n");
    out.push('\n');
    out.push_str("service dnsmasq start\n");
    out
}
