// SPDX-License-Identifier: Apache-2.0

mod bond;
mod common;
mod ethernet;
mod vlan;

pub use self::{
    bond::{BondInterface, BondMode, BondParameters},
    common::{CommonFields, Nameservers},
    ethernet::EthernetInterface,
    vlan::VlanInterface,
};
