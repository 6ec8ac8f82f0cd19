//! Generator configuration.
//!
//! This file holds the persistent settings of the generator: the two
//! address blocks the pools carve from, the lab domain and the account
//! that rendered configurations embed. Settings live in a YAML file; a
//! missing or unreadable file falls back to the defaults with a warning
//! so a bare invocation still works.

use std::fs;
use std::path::Path;

use ipnet::Ipv4Net;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// Configuration validation and persistence errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("link block {0} is too small, it must hold at least one /30")]
    LinkBlockTooSmall(Ipv4Net),
}

/// Topology generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// block carved into single-host loopback addresses
    pub host_block: Ipv4Net,
    /// block carved into 2-host point-to-point subnets
    pub link_block: Ipv4Net,
    /// nameserver put into rendered configurations, replaced per run
    /// with the generated DNS host address
    pub nameserver: String,
    pub domainname: String,
    pub username: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host_block: "10.0.0.0/8".parse().expect("valid default block"),
            link_block: "172.16.0.0/12".parse().expect("valid default block"),
            nameserver: "8.8.8.8".to_string(),
            domainname: "virl.lab".to_string(),
            username: "cisco".to_string(),
            password: "cisco".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from the given file.
    ///
    /// Falls back to the defaults when the file is missing or does not
    /// parse; a parse failure is logged, a missing file only warned
    /// about.
    pub fn load(path: &Path) -> Config {
        match fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    info!("configuration loaded from file {}", path.display());
                    config
                }
                Err(err) => {
                    error!("{err}");
                    warn!("using configuration defaults");
                    Config::default()
                }
            },
            Err(_) => {
                warn!("using configuration defaults");
                Config::default()
            }
        }
    }

    /// Save the configuration to the given file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Check constraints the address pools rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link_block.prefix_len() > 30 {
            return Err(ConfigError::LinkBlockTooSmall(self.link_block));
        }
        Ok(())
    }
}
