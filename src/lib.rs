//! # Labgen - Topology and address generator for virtual network labs
//!
//! This library synthesizes the logical description of a virtual network
//! lab: a set of nodes, the links between them, a 2-D layout,
//! per-interface IPv4 addressing and a DNS zone mapping every hostname
//! and interface to an address.
//!
//! ## Overview
//!
//! A run starts from two configured address blocks and a node count. The
//! topology builder constructs the node/edge skeleton in one of two
//! modes, a deterministic linear chain or a randomized clustered mesh
//! with guaranteed connectivity, then draws loopback and link addresses
//! from the address pool in strict construction order. The result is an
//! ordered provisioning plan, one boot configuration per device and the
//! DNS zone for the lab's resolver.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: persistent generator settings and YAML parsing
//! - `layout`: square spiral coordinate generation
//! - `addressing`: sequential subnet carving from the configured blocks
//! - `topology`: graph synthesis, connectivity repair, placement and the
//!   addressing pass
//! - `dns`: DNS zone accumulation and label normalization
//! - `render`: built-in device configuration templates
//! - `provision`: the ordered provisioning plan and collaborator trait
//! - `orchestrator`: high-level coordination of one generation run
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use labgen::config::Config;
//! use labgen::orchestrator::{self, RunOptions};
//! use labgen::topology::Mode;
//!
//! let config = Config::default();
//! let opts = RunOptions {
//!     labname: "labgen lab".to_string(),
//!     node_count: 10,
//!     distance: 200,
//!     mode: Mode::LinearChain,
//!     template: "iosv".to_string(),
//!     output: PathBuf::from("lab_output"),
//! };
//! orchestrator::generate_lab(&config, &opts)?;
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Modules expose typed errors; the orchestration layer and the binary
//! use `color_eyre` for error reporting with context. Address space
//! exhaustion and disconnected repair results abort the run with no
//! partial output salvage.

pub mod addressing;
pub mod config;
pub mod dns;
pub mod layout;
pub mod orchestrator;
pub mod provision;
pub mod render;
pub mod topology;
