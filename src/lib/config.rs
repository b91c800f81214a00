// SPDX-License-Identifier: Apache-2.0

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    BondInterface, BondMode, ErrorKind, EthernetInterface, Interface,
    InterfaceType, NetplanError, VlanInterface, YamlDisplay,
};

pub const DEFAULT_CONFIG_VERSION: u32 = 2;
pub const DEFAULT_RENDERER: &str = "networkd";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/netplan/01-netcfg.yaml";

/// Netplan configuration file.
///
/// Interfaces are stored per section and sorted by name, hence the YAML
/// output is stable regardless of how the document was assembled.
/// Example:
/// ```yml
/// network:
///   version: 2
///   renderer: networkd
///   ethernets:
///     eth0: {}
///     eth1: {}
///   bonds:
///     bond0:
///       interfaces:
///       - eth0
///       - eth1
///       parameters:
///         mode: 802.3ad
///   vlans:
///     vlan100:
///       id: 100
///       link: bond0
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[non_exhaustive]
pub struct NetplanConfig {
    pub network: Netplan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, YamlDisplay)]
#[non_exhaustive]
pub struct Netplan {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub version: u32,
    /// Backend applying this configuration, e.g. `networkd` or
    /// `NetworkManager`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub renderer: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ethernets: BTreeMap<String, EthernetInterface>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bonds: BTreeMap<String, BondInterface>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vlans: BTreeMap<String, VlanInterface>,
}

impl Default for Netplan {
    fn default() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION,
            renderer: DEFAULT_RENDERER.to_string(),
            ethernets: BTreeMap::new(),
            bonds: BTreeMap::new(),
            vlans: BTreeMap::new(),
        }
    }
}

impl NetplanConfig {
    /// Empty configuration with default version and renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse netplan YAML. Content holding nothing but blank lines,
    /// comments or document markers is treated as empty configuration.
    pub fn from_yaml(content: &str) -> Result<Self, NetplanError> {
        // Replace non-breaking space '\u{A0}' with normal space
        let content = content.replace('\u{A0}', " ");
        if is_blank_yaml(&content) {
            log::debug!("Got empty netplan content");
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            NetplanError::new(
                ErrorKind::InvalidYaml,
                format!("Invalid netplan YAML: {e}"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_slice(content: &[u8]) -> Result<Self, NetplanError> {
        let content = std::str::from_utf8(content).map_err(|e| {
            NetplanError::new(
                ErrorKind::InvalidYaml,
                format!("Netplan content is not valid UTF-8: {e}"),
            )
        })?;
        Self::from_yaml(content)
    }

    pub fn to_yaml(&self) -> Result<String, NetplanError> {
        if let Some((name, _)) = self
            .network
            .bonds
            .iter()
            .find(|(_, bond)| bond.mode() == Some(BondMode::Unknown))
        {
            return Err(NetplanError::new(
                ErrorKind::UnknownBondingMode,
                format!("Bond {name} is holding unknown bond mode"),
            ));
        }
        serde_yaml::to_string(self).map_err(|e| {
            NetplanError::new(
                ErrorKind::Bug,
                format!("Failed to generate YAML for {self:?}: {e}"),
            )
        })
    }

    pub fn read_file<P>(path: P) -> Result<Self, NetplanError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        check_file_exists(path)?;
        let content = std::fs::read(path).map_err(|e| {
            NetplanError::new(
                ErrorKind::IoFailure,
                format!("Failed to read config file {}: {e}", path.display()),
            )
        })?;
        log::debug!("Loaded netplan config file {}", path.display());
        Self::from_slice(&content)
    }

    /// Override existing file with YAML of this configuration.
    /// The file is rewritten in place, not atomically.
    pub fn write_file<P>(&self, path: P) -> Result<(), NetplanError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        check_file_exists(path)?;
        let content = self.to_yaml()?;
        std::fs::write(path, content.as_bytes()).map_err(|e| {
            NetplanError::new(
                ErrorKind::IoFailure,
                format!(
                    "Failed to write config file {}: {e}",
                    path.display()
                ),
            )
        })?;
        log::info!("Saved netplan config to {}", path.display());
        Ok(())
    }

    /// Make sure no interface name is shared by two sections.
    pub fn validate(&self) -> Result<(), NetplanError> {
        let mut seen: BTreeMap<&str, InterfaceType> = BTreeMap::new();
        let names = self
            .network
            .ethernets
            .keys()
            .map(|n| (n, InterfaceType::Ethernet))
            .chain(self.network.bonds.keys().map(|n| (n, InterfaceType::Bond)))
            .chain(self.network.vlans.keys().map(|n| (n, InterfaceType::Vlan)));
        for (name, iface_type) in names {
            if let Some(exist_type) = seen.insert(name.as_str(), iface_type) {
                return Err(NetplanError::new(
                    ErrorKind::DuplicateInterface,
                    format!(
                        "Interface {name} is defined in both {} and {}",
                        exist_type.section(),
                        iface_type.section()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Copy all interfaces into single collection indexed by interface
    /// name. Changing the returned interfaces does not affect `self`.
    pub fn flatten(&self) -> BTreeMap<String, Interface> {
        let mut ret: BTreeMap<String, Interface> = BTreeMap::new();
        for (name, iface) in self.network.ethernets.iter() {
            ret.insert(name.to_string(), iface.clone().into());
        }
        for (name, iface) in self.network.bonds.iter() {
            ret.insert(name.to_string(), iface.clone().into());
        }
        for (name, iface) in self.network.vlans.iter() {
            ret.insert(name.to_string(), iface.clone().into());
        }
        ret
    }

    /// Build configuration from flattened interfaces with default version
    /// and renderer.
    pub fn from_interfaces<I>(ifaces: I) -> Self
    where
        I: IntoIterator<Item = (String, Interface)>,
    {
        let mut ret = Self::default();
        for (name, iface) in ifaces {
            match iface {
                Interface::Ethernet(i) => {
                    ret.network.ethernets.insert(name, i);
                }
                Interface::Bond(i) => {
                    ret.network.bonds.insert(name, i);
                }
                Interface::Vlan(i) => {
                    ret.network.vlans.insert(name, i);
                }
            }
        }
        ret
    }

    /// Like [NetplanConfig::from_interfaces()] but keep the version and
    /// renderer of `self`.
    pub fn with_interfaces<I>(&self, ifaces: I) -> Self
    where
        I: IntoIterator<Item = (String, Interface)>,
    {
        let mut ret = Self::from_interfaces(ifaces);
        ret.network.version = self.network.version;
        ret.network.renderer = self.network.renderer.clone();
        ret
    }

    pub fn contains(&self, name: &str) -> bool {
        self.network.ethernets.contains_key(name)
            || self.network.bonds.contains_key(name)
            || self.network.vlans.contains_key(name)
    }

    /// All interface names, sorted.
    pub fn iface_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .network
            .ethernets
            .keys()
            .chain(self.network.bonds.keys())
            .chain(self.network.vlans.keys())
            .map(|n| n.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.network.ethernets.is_empty()
            && self.network.bonds.is_empty()
            && self.network.vlans.is_empty()
    }
}

fn check_file_exists(path: &Path) -> Result<(), NetplanError> {
    if path.exists() {
        Ok(())
    } else {
        Err(NetplanError::new(
            ErrorKind::FileNotFound,
            format!("Config file does not exist: {}", path.display()),
        ))
    }
}

fn is_blank_yaml(content: &str) -> bool {
    content.lines().map(|l| l.trim()).all(|l| {
        l.is_empty() || l.starts_with('#') || l == "---" || l == "..."
    })
}

fn is_zero(d: &u32) -> bool {
    *d == 0
}
