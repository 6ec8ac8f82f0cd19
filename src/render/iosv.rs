//! IOSv router configuration template.

use std::net::Ipv4Addr;

use crate::config::Config;
use crate::topology::types::interface_label;
use crate::topology::Node;

use super::NodeTemplate;

/// Classic IOS-style configuration with OSPF over all attached networks
pub struct IosvTemplate;

impl NodeTemplate for IosvTemplate {
    fn name(&self) -> &'static str {
        "iosv"
    }

    fn render(&self, config: &Config, node: &Node, origin: Option<Ipv4Addr>) -> String {
        let mut out = String::new();
        out.push_str(&format!("hostname {}\n", node.hostname));
        out.push_str(&format!(
            "username {} privilege 15 secret {}\n",
            config.username, config.password
        ));
        out.push_str(&format!("ip domain name {}\n", config.domainname));
        out.push_str(&format!("ip name-server {}\n", config.nameserver));
        out.push_str("!\n");

        if let Some(loopback) = node.loopback {
            out.push_str("interface Loopback0\n");
            out.push_str(&format!(" ip address {loopback} 255.255.255.255\n"));
            out.push_str("!\n");
        }

        for iface in &node.interfaces {
            out.push_str(&format!(
                "interface {}\n",
                interface_label(self.name(), iface.slot)
            ));
            if !iface.description.is_empty() {
                out.push_str(&format!(" description {}\n", iface.description));
            }
            out.push_str(&format!(
                " ip address {} {}\n",
                iface.address.addr(),
                iface.address.netmask()
            ));
            out.push_str(" no shutdown\n!\n");
        }

        out.push_str("router ospf 1\n");
        if let Some(loopback) = node.loopback {
            out.push_str(&format!(" network {loopback} 0.0.0.0 area 0\n"));
        }
        for iface in &node.interfaces {
            out.push_str(&format!(
                " network {} {} area 0\n",
                iface.address.network(),
                iface.address.hostmask()
            ));
        }
        out.push_str("!\n");

        if let Some(gateway) = origin {
            out.push_str(&format!("ip route 0.0.0.0 0.0.0.0 {gateway}\n!\n"));
        }
        out.push_str("end\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Interface;

    fn sample_node() -> Node {
        Node {
            hostname: "R1".to_string(),
            loopback: Some(Ipv4Addr::new(10, 0, 0, 0)),
            interfaces: vec![
                Interface::new(
                    "172.16.0.5/30".parse().unwrap(),
                    "to R2 GigabitEthernet0/1".to_string(),
                    0,
                ),
                Interface::new("172.16.0.2/30".parse().unwrap(), String::new(), 1),
            ],
        }
    }

    #[test]
    fn test_renders_interfaces_and_ospf() {
        let config = Config::default();
        let rendered = IosvTemplate.render(&config, &sample_node(), None);
        assert!(rendered.contains("hostname R1"));
        assert!(rendered.contains("interface GigabitEthernet0/0"));
        assert!(rendered.contains(" description to R2 GigabitEthernet0/1"));
        assert!(rendered.contains(" ip address 172.16.0.5 255.255.255.252"));
        assert!(rendered.contains(" network 172.16.0.4 0.0.0.3 area 0"));
        assert!(rendered.contains(" ip address 10.0.0.0 255.255.255.255"));
        assert!(!rendered.contains("ip route 0.0.0.0"));
    }

    #[test]
    fn test_origin_becomes_the_default_route() {
        let config = Config::default();
        let rendered = IosvTemplate.render(
            &config,
            &sample_node(),
            Some(Ipv4Addr::new(172, 16, 0, 1)),
        );
        assert!(rendered.contains("ip route 0.0.0.0 0.0.0.0 172.16.0.1"));
    }
}
