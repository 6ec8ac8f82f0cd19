//! FRR container boot script template.

use std::net::Ipv4Addr;

use crate::config::Config;
use crate::topology::types::interface_label;
use crate::topology::Node;

use super::NodeTemplate;

/// Routing daemons enabled in the FRR daemons file
const PROTOCOLS: &[&str] = &["ospf"];

/// Boot shell script for an FRR container node
pub struct FrrTemplate;

impl NodeTemplate for FrrTemplate {
    fn name(&self) -> &'static str {
        "frr"
    }

    fn render(&self, config: &Config, node: &Node, origin: Option<Ipv4Addr>) -> String {
        let mut out = String::new();
        out.push_str("#!/bin/bash\n");
        out.push_str(&format!("hostname {}\n", node.hostname));
        out.push_str("sed -r -e 's/^#(MAX_FDS=1024)$/\\1/' -i /etc/frr/daemons\n");
        for proto in PROTOCOLS {
            out.push_str(&format!(
                "sed -r -e 's/^({proto}d=)no$/\\1yes/' -i /etc/frr/daemons\n"
            ));
        }

        if let Some(loopback) = node.loopback {
            out.push_str(&format!("ip address add {loopback}/32 dev lo\n"));
        }
        for iface in &node.interfaces {
            let device = interface_label(self.name(), iface.slot);
            out.push_str(&format!("ip link set {device} up\n"));
            out.push_str(&format!("ip address add {} dev {device}\n", iface.address));
        }
        if let Some(gateway) = origin {
            out.push_str(&format!("ip route add default via {gateway}\n"));
        }

        out.push_str(&format!(
            "echo \"nameserver {}\" >/etc/resolv.conf\n",
            config.nameserver
        ));
        out.push_str(&format!(
            "echo \"search {}\" >>/etc/resolv.conf\n",
            config.domainname
        ));
        out.push_str("service frr start\n");
        out
    }
}
