// SPDX-License-Identifier: Apache-2.0

// Every function here follows the same pattern: flatten the interfaces,
// change a copy, rebuild. `self` is never modified, the caller decides
// whether to use the returned configuration.

use std::collections::BTreeMap;

use crate::{
    Address, BondInterface, BondMode, BondParameters, ErrorKind,
    EthernetInterface, Interface, InterfaceProbe, NetplanConfig, NetplanError,
    NetplanInterface,
};

impl NetplanConfig {
    /// Copy of the interface with specified name.
    pub fn get_interface(&self, name: &str) -> Result<Interface, NetplanError> {
        self.flatten()
            .remove(name)
            .ok_or_else(|| iface_not_found(name))
    }

    pub fn get_addresses(
        &self,
        name: &str,
    ) -> Result<Vec<Address>, NetplanError> {
        Ok(self.get_interface(name)?.addresses().to_vec())
    }

    /// Override static addresses of specified interface. All addresses
    /// should be in `ip/prefix` format.
    pub fn set_addresses(
        &self,
        name: &str,
        addrs: &[Address],
    ) -> Result<Self, NetplanError> {
        if let Some(addr) = addrs.iter().find(|a| !a.is_cidr()) {
            return Err(NetplanError::new(
                ErrorKind::AddressMustBeCidr,
                format!("Invalid IP ({addr}), it should be CIDR"),
            ));
        }
        log::debug!("Setting addresses of {name} to {}", join(addrs));
        self.edit_iface(name, |iface| {
            iface.set_addresses(addrs.to_vec());
            Ok(())
        })
    }

    pub fn get_nameservers(
        &self,
        name: &str,
    ) -> Result<Vec<Address>, NetplanError> {
        Ok(self.get_interface(name)?.nameservers().to_vec())
    }

    /// Override DNS servers of specified interface. Addresses should not
    /// hold prefix length.
    pub fn set_nameservers(
        &self,
        name: &str,
        addrs: &[Address],
    ) -> Result<Self, NetplanError> {
        check_no_cidr(addrs)?;
        log::debug!("Setting nameservers of {name} to {}", join(addrs));
        self.edit_iface(name, |iface| {
            iface.set_nameservers(addrs.to_vec());
            Ok(())
        })
    }

    pub fn get_search_domains(
        &self,
        name: &str,
    ) -> Result<Vec<String>, NetplanError> {
        Ok(self.get_interface(name)?.search_domains().to_vec())
    }

    pub fn set_search_domains(
        &self,
        name: &str,
        domains: &[String],
    ) -> Result<Self, NetplanError> {
        log::debug!("Setting search domains of {name} to {domains:?}");
        self.edit_iface(name, |iface| {
            iface.set_search_domains(domains.to_vec());
            Ok(())
        })
    }

    pub fn set_dhcp4(
        &self,
        name: &str,
        enable: bool,
    ) -> Result<Self, NetplanError> {
        log::debug!("Setting dhcp4 of {name} to {enable}");
        self.edit_iface(name, |iface| {
            iface.set_dhcp4(enable);
            Ok(())
        })
    }

    pub fn set_dhcp6(
        &self,
        name: &str,
        enable: bool,
    ) -> Result<Self, NetplanError> {
        log::debug!("Setting dhcp6 of {name} to {enable}");
        self.edit_iface(name, |iface| {
            iface.set_dhcp6(enable);
            Ok(())
        })
    }

    pub fn set_gateway4(
        &self,
        name: &str,
        gateway: Address,
    ) -> Result<Self, NetplanError> {
        check_no_cidr(&[gateway])?;
        log::debug!("Setting gateway4 of {name} to {gateway}");
        self.edit_iface(name, |iface| {
            iface.set_gateway4(Some(gateway));
            Ok(())
        })
    }

    pub fn set_gateway6(
        &self,
        name: &str,
        gateway: Address,
    ) -> Result<Self, NetplanError> {
        check_no_cidr(&[gateway])?;
        log::debug!("Setting gateway6 of {name} to {gateway}");
        self.edit_iface(name, |iface| {
            iface.set_gateway6(Some(gateway));
            Ok(())
        })
    }

    /// Create bond `bond_name` holding `members`.
    ///
    /// The configuration(addresses, gateways, DNS and DHCP) of
    /// `conf_iface` is moved to the new bond, and `conf_iface` is reset
    /// to a plain ethernet.
    pub fn add_bond<S>(
        &self,
        bond_name: &str,
        conf_iface: &str,
        members: &[S],
    ) -> Result<Self, NetplanError>
    where
        S: AsRef<str>,
    {
        if bond_name.is_empty() || conf_iface.is_empty() {
            return Err(NetplanError::new(
                ErrorKind::InvalidInterface,
                "Bond name and configuration interface name should not be \
                 empty"
                    .to_string(),
            ));
        }
        if members.is_empty() {
            return Err(NetplanError::new(
                ErrorKind::EmptyInterfaceList,
                format!("No member interface defined for bond {bond_name}"),
            ));
        }
        let members: Vec<String> =
            members.iter().map(|m| m.as_ref().to_string()).collect();
        if !members.iter().any(|m| m == conf_iface) {
            return Err(NetplanError::new(
                ErrorKind::ConfigInterfaceNotInMembers,
                format!(
                    "Configuration interface {conf_iface} must be included \
                     within the bond interfaces: {}",
                    members.join(", ")
                ),
            ));
        }

        let mut ifaces = self.flatten();
        let missing: Vec<&str> = members
            .iter()
            .map(|m| m.as_str())
            .filter(|m| !ifaces.contains_key(*m))
            .collect();
        if !missing.is_empty() {
            return Err(NetplanError::new(
                ErrorKind::InterfaceNotFound,
                format!("Interface(s) not found: {}", missing.join(", ")),
            ));
        }
        let conf_common = match ifaces.get(conf_iface) {
            Some(iface) => iface.common().clone(),
            None => {
                return Err(NetplanError::new(
                    ErrorKind::InterfaceNotFound,
                    format!("Config interface not found: {conf_iface}"),
                ));
            }
        };
        if ifaces.contains_key(bond_name) {
            return Err(NetplanError::new(
                ErrorKind::InterfaceExists,
                format!("Interface {bond_name} already exists"),
            ));
        }

        log::debug!(
            "Creating bond {bond_name} with ports {} using configuration \
             of {conf_iface}",
            members.join(", ")
        );
        ifaces.insert(
            bond_name.to_string(),
            BondInterface::new(members, conf_common).into(),
        );
        ifaces.insert(
            conf_iface.to_string(),
            EthernetInterface::default().into(),
        );
        Ok(self.with_interfaces(ifaces))
    }

    /// Copy of the bond with specified name.
    pub fn get_bond(&self, name: &str) -> Result<BondInterface, NetplanError> {
        if let Some(bond) = self.network.bonds.get(name) {
            Ok(bond.clone())
        } else if self.contains(name) {
            Err(not_a_bond(name))
        } else {
            Err(bond_not_found(name))
        }
    }

    /// Remove bond and store its configuration as ethernet `restore_as`.
    /// An existing ethernet named `restore_as` is replaced, other bond
    /// ports are left untouched.
    pub fn remove_bond(
        &self,
        bond_name: &str,
        restore_as: &str,
    ) -> Result<Self, NetplanError> {
        if restore_as.is_empty() {
            return Err(NetplanError::new(
                ErrorKind::InvalidInterface,
                format!(
                    "Interface name for restoring configuration of bond \
                     {bond_name} should not be empty"
                ),
            ));
        }
        let mut ifaces = self.flatten();
        let eth_iface = match ifaces.remove(bond_name) {
            Some(Interface::Bond(bond)) => bond.to_ethernet(),
            Some(_) => return Err(not_a_bond(bond_name)),
            None => return Err(bond_not_found(bond_name)),
        };
        if let Some(exist_iface) = ifaces.get(restore_as) {
            if !matches!(exist_iface, Interface::Ethernet(_)) {
                return Err(NetplanError::new(
                    ErrorKind::InterfaceExists,
                    format!(
                        "Cannot restore bond {bond_name} configuration to \
                         {restore_as}: it is a {} interface",
                        exist_iface.iface_type()
                    ),
                ));
            }
        }

        log::debug!(
            "Removing bond {bond_name}, configuration restored to {restore_as}"
        );
        ifaces.insert(restore_as.to_string(), eth_iface.into());
        Ok(self.with_interfaces(ifaces))
    }

    pub fn set_bond_parameters(
        &self,
        name: &str,
        params: BondParameters,
    ) -> Result<Self, NetplanError> {
        if params.mode == Some(BondMode::Unknown) {
            return Err(NetplanError::new(
                ErrorKind::UnknownBondingMode,
                format!("Cannot set unknown bond mode to {name}"),
            ));
        }
        log::debug!("Setting bond parameters of {name} to {params:?}");
        self.edit_iface(name, |iface| match iface.as_bond_mut() {
            Some(bond) => {
                bond.parameters = params;
                Ok(())
            }
            None => Err(not_a_bond(name)),
        })
    }

    /// Store new interface, fail if name already used.
    pub fn add_interface(
        &self,
        name: &str,
        iface: Interface,
    ) -> Result<Self, NetplanError> {
        if name.is_empty() {
            return Err(NetplanError::new(
                ErrorKind::InvalidInterface,
                "Interface name should not be empty".to_string(),
            ));
        }
        let mut ifaces = self.flatten();
        if ifaces.contains_key(name) {
            return Err(NetplanError::new(
                ErrorKind::InterfaceExists,
                format!("Interface {name} already exists"),
            ));
        }
        log::debug!("Adding {} interface {name}", iface.iface_type());
        ifaces.insert(name.to_string(), iface);
        Ok(self.with_interfaces(ifaces))
    }

    /// Names of interfaces holding `name` as bond port or VLAN parent.
    pub fn get_dependents(&self, name: &str) -> Vec<String> {
        self.flatten()
            .into_iter()
            .filter(|(_, iface)| {
                iface.parent() == Some(name)
                    || iface
                        .ports()
                        .map(|ports| ports.iter().any(|p| p == name))
                        .unwrap_or_default()
            })
            .map(|(iface_name, _)| iface_name)
            .collect()
    }

    /// Remove interface. Bonds and VLANs referring to it are kept as is.
    pub fn remove_interface(&self, name: &str) -> Result<Self, NetplanError> {
        let mut ifaces = self.flatten();
        if ifaces.remove(name).is_none() {
            return Err(iface_not_found(name));
        }
        let dependents = self.get_dependents(name);
        if !dependents.is_empty() {
            log::warn!(
                "Removing interface {name} still used by {}",
                dependents.join(", ")
            );
        }
        log::debug!("Removing interface {name}");
        Ok(self.with_interfaces(ifaces))
    }

    /// Add interface found on this host, its type and type specific
    /// settings(bond ports, VLAN ID) are taken from the kernel.
    pub fn import_interface(
        &self,
        name: &str,
        probe: &InterfaceProbe,
    ) -> Result<Self, NetplanError> {
        if self.contains(name) {
            return Err(NetplanError::new(
                ErrorKind::InterfaceExists,
                format!("Interface {name} already exists"),
            ));
        }
        let iface = probe.probe_interface(name)?;
        self.add_interface(name, iface)
    }

    fn edit_iface<F>(&self, name: &str, action: F) -> Result<Self, NetplanError>
    where
        F: FnOnce(&mut Interface) -> Result<(), NetplanError>,
    {
        let mut ifaces: BTreeMap<String, Interface> = self.flatten();
        let iface = ifaces.get_mut(name).ok_or_else(|| iface_not_found(name))?;
        action(iface)?;
        Ok(self.with_interfaces(ifaces))
    }
}

fn check_no_cidr(addrs: &[Address]) -> Result<(), NetplanError> {
    if let Some(addr) = addrs.iter().find(|a| a.is_cidr()) {
        Err(NetplanError::new(
            ErrorKind::AddressMustNotBeCidr,
            format!("Invalid IP ({addr}), it should not be CIDR"),
        ))
    } else {
        Ok(())
    }
}

fn iface_not_found(name: &str) -> NetplanError {
    NetplanError::new(
        ErrorKind::InterfaceNotFound,
        format!("Interface not found: {name}"),
    )
}

fn bond_not_found(name: &str) -> NetplanError {
    NetplanError::new(
        ErrorKind::BondNotFound,
        format!("Bond not found: {name}"),
    )
}

fn not_a_bond(name: &str) -> NetplanError {
    NetplanError::new(
        ErrorKind::NotABond,
        format!("Interface is not bond: {name}"),
    )
}

fn join(addrs: &[Address]) -> String {
    addrs
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
