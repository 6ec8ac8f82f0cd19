//! IPv4 address allocation module.
//!
//! This module carves loopback and point-to-point link subnets out of the
//! two address blocks given in the configuration. Allocation is strictly
//! sequential so that repeated runs with the same input produce the same
//! addressing plan.

pub mod pool;

pub use pool::{AddressError, AddressPool, LinkNet};
