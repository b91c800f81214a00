// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    BondInterface, BondMode, BondParameters, CommonFields, ErrorKind,
    EthernetInterface, Interface, NetplanError, VlanInterface,
};

const ARPHRD_LOOPBACK: u32 = 772;
const LOOPBACK_IFACE_NAME: &str = "lo";
// IFNAMSIZ minus the trailing NUL
const MAX_IFACE_NAME_LEN: usize = 15;

/// Kind of network interface as seen by kernel.
///
/// Wider than [crate::InterfaceType], only `ethernet`, `bonding` and
/// `vlan` could be stored into netplan document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum InterfaceKind {
    Loopback,
    Ethernet,
    Bonding,
    Bridge,
    Virtual,
    Vlan,
    #[default]
    Unknown,
}

impl std::fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Loopback => "loopback",
                Self::Ethernet => "ethernet",
                Self::Bonding => "bonding",
                Self::Bridge => "bridge",
                Self::Virtual => "virtual",
                Self::Vlan => "vlan",
                Self::Unknown => "unknown",
            }
        )
    }
}

/// Inspect interfaces of current host through sysfs and procfs.
///
/// The roots are configurable so the probe could run against a copy of
/// those file systems.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct InterfaceProbe {
    pub sysfs_root: PathBuf,
    pub procfs_root: PathBuf,
}

impl Default for InterfaceProbe {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from("/sys"),
            procfs_root: PathBuf::from("/proc"),
        }
    }
}

impl InterfaceProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roots<P, Q>(sysfs_root: P, procfs_root: Q) -> Self
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self {
            sysfs_root: sysfs_root.as_ref().to_path_buf(),
            procfs_root: procfs_root.as_ref().to_path_buf(),
        }
    }

    fn iface_dir(&self, name: &str) -> PathBuf {
        self.sysfs_root.join("class/net").join(name)
    }

    fn vlan_proc_file(&self, name: &str) -> PathBuf {
        self.procfs_root.join("net/vlan").join(name)
    }

    pub fn probe_kind(&self, name: &str) -> Result<InterfaceKind, NetplanError> {
        check_iface_name(name)?;
        let iface_dir = self.iface_dir(name);
        if !iface_dir.exists() {
            return Err(NetplanError::new(
                ErrorKind::InterfaceNotFound,
                format!("Interface {name} not found in {}", iface_dir.display()),
            ));
        }

        if let Some(driver) = self.driver(name) {
            log::debug!("Interface {name} is using driver {driver}");
            return Ok(InterfaceKind::Ethernet);
        }
        if iface_dir.join("bridge").exists() {
            return Ok(InterfaceKind::Bridge);
        }
        if iface_dir.join("bonding").exists() {
            return Ok(InterfaceKind::Bonding);
        }
        if self.vlan_proc_file(name).exists() {
            return Ok(InterfaceKind::Vlan);
        }
        if name == LOOPBACK_IFACE_NAME
            || read_u32(&iface_dir.join("type")) == Some(ARPHRD_LOOPBACK)
        {
            return Ok(InterfaceKind::Loopback);
        }
        if self
            .sysfs_root
            .join("devices/virtual/net")
            .join(name)
            .exists()
        {
            return Ok(InterfaceKind::Virtual);
        }
        Ok(InterfaceKind::Unknown)
    }

    /// Build the netplan record for interface found on this host.
    /// IP configurations are not imported.
    pub fn probe_interface(
        &self,
        name: &str,
    ) -> Result<Interface, NetplanError> {
        let kind = self.probe_kind(name)?;
        log::debug!("Interface {name} is {kind}");
        match kind {
            InterfaceKind::Ethernet => {
                Ok(EthernetInterface::default().into())
            }
            InterfaceKind::Bonding => Ok(self.probe_bond(name)?.into()),
            InterfaceKind::Vlan => Ok(self.probe_vlan(name)?.into()),
            _ => Err(NetplanError::new(
                ErrorKind::UnsupportedInterfaceKind,
                format!(
                    "Interface {name} is {kind} interface which cannot be \
                     stored in netplan configuration"
                ),
            )),
        }
    }

    fn driver(&self, name: &str) -> Option<String> {
        let driver_path = self.iface_dir(name).join("device/driver");
        if !driver_path.exists() {
            return None;
        }
        match std::fs::canonicalize(&driver_path) {
            Ok(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .filter(|n| !n.is_empty()),
            Err(e) => {
                log::warn!(
                    "Failed to resolve driver of interface {name} from {}: {e}",
                    driver_path.display()
                );
                None
            }
        }
    }

    fn probe_bond(&self, name: &str) -> Result<BondInterface, NetplanError> {
        let bonding_dir = self.iface_dir(name).join("bonding");
        let ports: Vec<String> = read_trimmed(&bonding_dir.join("slaves"))?
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();

        let mut bond = BondInterface::new(ports, CommonFields::new());
        // Kernel shows mode as `802.3ad 4`
        let mode_str = read_trimmed(&bonding_dir.join("mode"))?;
        if let Some(mode_name) = mode_str.split_whitespace().next() {
            let mode = BondMode::parse_lossy(mode_name);
            if mode.is_unknown() {
                log::warn!("Ignoring unknown bond mode {mode_name} of {name}");
            } else {
                let mut params = BondParameters::new();
                params.mode = Some(mode);
                bond.parameters = params;
            }
        }
        Ok(bond)
    }

    // The /proc/net/vlan/<name> file looks like:
    //  eth1.101  VID: 101   REORDER_HDR: 1  dev->priv_flags: 1021
    //           total frames received            0
    //  ...
    //  Device: eth1
    fn probe_vlan(&self, name: &str) -> Result<VlanInterface, NetplanError> {
        let proc_path = self.vlan_proc_file(name);
        let content = read_trimmed(&proc_path)?;
        let mut vlan_id: Option<u16> = None;
        let mut link: Option<String> = None;
        for line in content.lines() {
            let mut tokens = line.split_whitespace();
            while let Some(token) = tokens.next() {
                match token {
                    "VID:" if vlan_id.is_none() => {
                        vlan_id =
                            tokens.next().and_then(|v| v.parse::<u16>().ok());
                    }
                    "Device:" if link.is_none() => {
                        link = tokens.next().map(|v| v.to_string());
                    }
                    _ => (),
                }
            }
        }
        match (vlan_id, link) {
            (Some(id), Some(link)) => Ok(VlanInterface::new(id, &link)),
            _ => Err(NetplanError::new(
                ErrorKind::Bug,
                format!(
                    "Failed to find VLAN ID and parent of {name} from {}",
                    proc_path.display()
                ),
            )),
        }
    }
}

fn check_iface_name(name: &str) -> Result<(), NetplanError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.len() > MAX_IFACE_NAME_LEN
    {
        Err(NetplanError::new(
            ErrorKind::InvalidInterface,
            format!(
                "Invalid kernel interface name '{name}', should be 1 to \
                 {MAX_IFACE_NAME_LEN} bytes without '/' and not '.' or '..'"
            ),
        ))
    } else {
        Ok(())
    }
}

fn read_trimmed(path: &Path) -> Result<String, NetplanError> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            NetplanError::new(
                ErrorKind::IoFailure,
                format!("Failed to read {}: {e}", path.display()),
            )
        })
}

fn read_u32(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
}
