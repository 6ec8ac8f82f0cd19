//! Node configuration rendering.
//!
//! This module is the templating side of the generator: it turns a
//! finished node description into the boot configuration text for that
//! device. Router templates are selected by name on the command line;
//! the DNS host always uses its fixed dnsmasq template.

pub mod dnshost;
pub mod frr;
pub mod iosv;

use std::net::Ipv4Addr;

use crate::config::Config;
use crate::topology::Node;

/// Errors raised while rendering node configurations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("template does not exist: {0}")]
    UnknownTemplate(String),
}

/// A device configuration template for router nodes
pub trait NodeTemplate {
    /// template name as given on the command line
    fn name(&self) -> &'static str;

    /// Render the boot configuration for one router.
    ///
    /// `origin` is only set for the core node of a mesh and carries the
    /// DNS-host-side link address as the default gateway.
    fn render(&self, config: &Config, node: &Node, origin: Option<Ipv4Addr>) -> String;
}

/// Names of all built-in templates
pub fn available() -> Vec<&'static str> {
    vec!["iosv", "frr"]
}

/// Look a template up by name
pub fn lookup(name: &str) -> Result<&'static dyn NodeTemplate, RenderError> {
    match name {
        "iosv" => Ok(&iosv::IosvTemplate),
        "frr" => Ok(&frr::FrrTemplate),
        _ => Err(RenderError::UnknownTemplate(name.to_string())),
    }
}
