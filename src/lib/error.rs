// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::YamlDisplay;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Please report this as bug to upstream
    Bug,
    /// Malformed YAML document or structure not matching the netplan schema
    InvalidYaml,
    /// String is neither an IP address nor an `ip/prefix` network
    InvalidAddressFormat,
    /// Bonding mode is not one of the kernel bonding mode names
    UnknownBondingMode,
    /// The same interface name defined in more than one section
    DuplicateInterface,
    /// Address is required to hold a prefix length
    AddressMustBeCidr,
    /// Address is required to be a plain host address
    AddressMustNotBeCidr,
    /// Empty or otherwise unusable interface name
    InvalidInterface,
    /// Bond created without any member interface
    EmptyInterfaceList,
    /// The interface holding the configuration is not a bond member
    ConfigInterfaceNotInMembers,
    /// Interface name already used in this document
    InterfaceExists,
    /// Interface does not exist
    InterfaceNotFound,
    /// Bond does not exist
    BondNotFound,
    /// Configuration file does not exist
    FileNotFound,
    /// Interface exists but is not a bond
    NotABond,
    /// Interface kind cannot be stored in a netplan document
    UnsupportedInterfaceKind,
    /// Failed to read or write file
    IoFailure,
}

// Try not implement From for NetplanError here unless you are sure this
// error should always convert to certain type of ErrorKind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NetplanError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl std::fmt::Display for NetplanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl NetplanError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::error::Error for NetplanError {}

impl From<serde_yaml::Error> for NetplanError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::InvalidYaml, format!("Invalid YAML: {e}"))
    }
}

impl From<std::io::Error> for NetplanError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::IoFailure, format!("std::io::Error: {e}"))
    }
}

impl From<std::net::AddrParseError> for NetplanError {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::new(
            ErrorKind::InvalidAddressFormat,
            format!("Invalid IP address: {e}"),
        )
    }
}
