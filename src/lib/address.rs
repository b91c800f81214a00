// SPDX-License-Identifier: Apache-2.0

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, NetplanError};

const IPV4_ADDR_LEN: u8 = 32;
const IPV6_ADDR_LEN: u8 = 128;

/// IP address as written in netplan: either a plain host address
/// (`192.0.2.1`, used by `gateway4` and `nameservers`) or an address with
/// prefix length (`192.0.2.1/24`, used by `addresses`).
///
/// The literal form survives a parse/render cycle: host bits of a CIDR
/// address are kept, use [Address::network()] for the masked network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    ip: IpAddr,
    prefix_len: Option<u8>,
}

impl Address {
    pub fn new_host(ip: IpAddr) -> Self {
        Self {
            ip,
            prefix_len: None,
        }
    }

    pub fn new_cidr(ip: IpAddr, prefix_len: u8) -> Result<Self, NetplanError> {
        let max_len = max_prefix_len(&ip);
        if prefix_len > max_len {
            return Err(NetplanError::new(
                ErrorKind::InvalidAddressFormat,
                format!(
                    "Invalid network prefix length {prefix_len} for {ip}, \
                     should be in the range of 0 to {max_len}"
                ),
            ));
        }
        Ok(Self {
            ip,
            prefix_len: Some(prefix_len),
        })
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn prefix_len(&self) -> Option<u8> {
        self.prefix_len
    }

    pub fn is_cidr(&self) -> bool {
        self.prefix_len.is_some()
    }

    /// The network this address belongs to, host bits cleared.
    /// `None` for plain host address.
    pub fn network(&self) -> Option<Self> {
        self.prefix_len.map(|prefix_len| Self {
            ip: apply_ip_prefix_len(self.ip, prefix_len),
            prefix_len: Some(prefix_len),
        })
    }
}

impl FromStr for Address {
    type Err = NetplanError;

    fn from_str(value: &str) -> Result<Self, NetplanError> {
        let value = value.trim();
        if let Ok(ip) = IpAddr::from_str(value) {
            return Ok(Self::new_host(ip));
        }

        let invalid = || {
            NetplanError::new(
                ErrorKind::InvalidAddressFormat,
                format!(
                    "Invalid IP or CIDR format: '{value}', expecting \
                     'ip/prefix' or 'ip' format, for example: 192.0.2.0/24 \
                     or 2001:db8:1::/64 or 192.0.2.1"
                ),
            )
        };

        let (ip_str, prefix_str) = value.split_once('/').ok_or_else(invalid)?;
        let ip = IpAddr::from_str(ip_str).map_err(|_| invalid())?;
        // Plain decimal only, no sign or leading zero
        if prefix_str.is_empty()
            || !prefix_str.bytes().all(|b| b.is_ascii_digit())
            || (prefix_str.len() > 1 && prefix_str.starts_with('0'))
        {
            return Err(invalid());
        }
        let prefix_len = prefix_str.parse::<u8>().map_err(|_| invalid())?;
        Self::new_cidr(ip, prefix_len)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.prefix_len {
            Some(prefix_len) => write!(f, "{}/{prefix_len}", self.ip),
            None => write!(f, "{}", self.ip),
        }
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = NetplanError;

    fn try_from(value: String) -> Result<Self, NetplanError> {
        Self::from_str(value.as_str())
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Self::new_host(ip)
    }
}

fn max_prefix_len(ip: &IpAddr) -> u8 {
    if ip.is_ipv6() {
        IPV6_ADDR_LEN
    } else {
        IPV4_ADDR_LEN
    }
}

fn apply_ip_prefix_len(ip: IpAddr, prefix_len: u8) -> IpAddr {
    if prefix_len == 0 {
        return if ip.is_ipv6() {
            IpAddr::V6(0.into())
        } else {
            IpAddr::V4(0.into())
        };
    }

    if prefix_len >= max_prefix_len(&ip) {
        return ip;
    }

    match ip {
        IpAddr::V6(i) => Ipv6Addr::from(
            u128::from(i) & (u128::MAX << (IPV6_ADDR_LEN - prefix_len)),
        )
        .into(),
        IpAddr::V4(i) => Ipv4Addr::from(
            u32::from(i) & (u32::MAX << (IPV4_ADDR_LEN - prefix_len)),
        )
        .into(),
    }
}

/// Parse a list of address strings, stopping at the first invalid one.
pub fn parse_addresses<S>(values: &[S]) -> Result<Vec<Address>, NetplanError>
where
    S: AsRef<str>,
{
    values.iter().map(|v| Address::from_str(v.as_ref())).collect()
}
