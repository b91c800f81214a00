// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use crate::{parse_addresses, Address, ErrorKind};

#[test]
fn test_address_ipv4_host() {
    let addr = Address::from_str("192.0.2.1").unwrap();
    assert!(!addr.is_cidr());
    assert_eq!(addr.prefix_len(), None);
    assert_eq!(addr.to_string(), "192.0.2.1");
}

#[test]
fn test_address_ipv6_cidr() {
    let addr = Address::from_str("2001:db8:1::1/64").unwrap();
    assert!(addr.is_cidr());
    assert_eq!(addr.prefix_len(), Some(64));
    assert_eq!(addr.to_string(), "2001:db8:1::1/64");
}

#[test]
fn test_address_keep_host_bits() {
    let addr = Address::from_str("192.0.3.1/23").unwrap();
    assert_eq!(addr.to_string(), "192.0.3.1/23");
    assert_eq!(addr.network().unwrap().to_string(), "192.0.2.0/23");
}

#[test]
fn test_address_network_of_host_address() {
    let addr = Address::from_str("192.0.2.1").unwrap();
    assert_eq!(addr.network(), None);
}

#[test]
fn test_address_ipv6_network() {
    let addr = Address::from_str("2001:db8:1::1/64").unwrap();
    assert_eq!(addr.network().unwrap().to_string(), "2001:db8:1::/64");
}

#[test]
fn test_address_zero_prefix() {
    let addr = Address::from_str("0.0.0.1/0").unwrap();
    assert_eq!(addr.network().unwrap().to_string(), "0.0.0.0/0");
}

#[test]
fn test_address_invalid_str() {
    for value in ["", "192.0.2.1/24/", "abc", "192.0.2.1/", "192.0.2/24"] {
        let result = Address::from_str(value);
        assert!(result.is_err(), "{value} should be invalid");
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::InvalidAddressFormat);
        }
    }
}

#[test]
fn test_address_invalid_ipv4_prefix_length() {
    let result = Address::from_str("192.0.2.1/33");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidAddressFormat);
    }
}

#[test]
fn test_address_invalid_ipv6_prefix_length() {
    let result = Address::from_str("::1/129");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidAddressFormat);
    }
}

#[test]
fn test_address_yaml_string() {
    let addr: Address = serde_yaml::from_str("192.0.2.10/24").unwrap();
    assert_eq!(addr, Address::from_str("192.0.2.10/24").unwrap());
    assert_eq!(serde_yaml::to_string(&addr).unwrap(), "192.0.2.10/24\n");
}

#[test]
fn test_address_yaml_invalid() {
    assert!(serde_yaml::from_str::<Address>("192.0.2.300").is_err());
}

#[test]
fn test_parse_addresses_stop_at_invalid() {
    let result = parse_addresses(&["192.0.2.1", "not-an-ip", "192.0.2.2"]);
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidAddressFormat);
        assert!(e.msg().contains("not-an-ip"));
    }
}

#[test]
fn test_parse_addresses() {
    let addrs =
        parse_addresses(&["192.0.2.1".to_string(), "::1".to_string()])
            .unwrap();
    assert_eq!(addrs.len(), 2);
    assert!(addrs[1].ip().is_ipv6());
}

#[test]
fn test_address_literal_preserved() {
    for value in ["192.168.0.1", "10.123.7.0/24"] {
        assert_eq!(Address::from_str(value).unwrap().to_string(), value);
    }
    assert!(!Address::from_str("192.168.0.1").unwrap().is_cidr());
    assert!(Address::from_str("10.123.7.0/24").unwrap().is_cidr());
}

#[test]
fn test_address_prefix_not_plain_digits() {
    for value in ["10.0.0.0/+24", "10.0.0.0/024", "10.0.0.0/00", "::/-1"] {
        let result = Address::from_str(value);
        assert!(result.is_err(), "{value} should be invalid");
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::InvalidAddressFormat);
        }
    }
    assert_eq!(Address::from_str("0.0.0.0/0").unwrap().to_string(), "0.0.0.0/0");
}
