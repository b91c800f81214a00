// SPDX-License-Identifier: Apache-2.0

use crate::{Address, CommonFields, InterfaceType};

/// Trait implemented by all type of interfaces.
///
/// Only `common()`, `common_mut()` and `iface_type()` need to be
/// implemented, the accessors work on [CommonFields] and hence behave the
/// same for every interface type.
pub trait NetplanInterface: std::fmt::Debug + Clone {
    fn common(&self) -> &CommonFields;

    fn common_mut(&mut self) -> &mut CommonFields;

    fn iface_type(&self) -> InterfaceType;

    fn addresses(&self) -> &[Address] {
        self.common().addresses.as_slice()
    }

    /// Override all static addresses. Caller is responsible to make sure
    /// they are all in `ip/prefix` format.
    fn set_addresses(&mut self, addrs: Vec<Address>) {
        self.common_mut().addresses = addrs;
    }

    fn nameservers(&self) -> &[Address] {
        self.common().nameservers.addresses.as_slice()
    }

    fn set_nameservers(&mut self, addrs: Vec<Address>) {
        self.common_mut().nameservers.addresses = addrs;
    }

    fn search_domains(&self) -> &[String] {
        self.common().nameservers.search.as_slice()
    }

    fn set_search_domains(&mut self, domains: Vec<String>) {
        self.common_mut().nameservers.search = domains;
    }

    fn set_dhcp4(&mut self, enable: bool) {
        self.common_mut().dhcp4 = enable;
    }

    fn set_dhcp6(&mut self, enable: bool) {
        self.common_mut().dhcp6 = enable;
    }

    fn set_gateway4(&mut self, gateway: Option<Address>) {
        self.common_mut().gateway4 = gateway;
    }

    fn set_gateway6(&mut self, gateway: Option<Address>) {
        self.common_mut().gateway6 = gateway;
    }

    /// Return a list of port names. None means this interface cannot hold
    /// ports
    fn ports(&self) -> Option<&[String]> {
        None
    }

    /// Return parent interface name, None means not desired or no parent
    fn parent(&self) -> Option<&str> {
        None
    }
}
