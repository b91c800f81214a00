// SPDX-License-Identifier: Apache-2.0

//! Read, modify and write netplan network configuration.
//!
//! ```no_run
//! use netplan_conf::{Address, NetplanConfig};
//!
//! let config = NetplanConfig::read_file("/etc/netplan/01-netcfg.yaml")?;
//! let new_config = config
//!     .set_addresses("eth0", &["192.0.2.10/24".parse::<Address>()?])?
//!     .add_bond("bond0", "eth0", &["eth0", "eth1"])?;
//! new_config.write_file("/etc/netplan/01-netcfg.yaml")?;
//! # Ok::<(), netplan_conf::NetplanError>(())
//! ```

mod address;
mod config;
mod deserializer;
mod edit;
mod error;
mod iface;
mod iface_kind;
mod iface_trait;
mod iface_type;
mod ifaces;

pub(crate) use netplan_conf_derive::YamlDisplay;

pub use self::address::{parse_addresses, Address};
pub use self::config::{
    Netplan, NetplanConfig, DEFAULT_CONFIG_PATH, DEFAULT_CONFIG_VERSION,
    DEFAULT_RENDERER,
};
pub use self::error::{ErrorKind, NetplanError};
pub use self::iface::Interface;
pub use self::iface_kind::{InterfaceKind, InterfaceProbe};
pub use self::iface_trait::NetplanInterface;
pub use self::iface_type::InterfaceType;
pub use self::ifaces::{
    BondInterface, BondMode, BondParameters, CommonFields, EthernetInterface,
    Nameservers, VlanInterface,
};
