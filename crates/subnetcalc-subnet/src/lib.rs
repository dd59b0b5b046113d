//! Subnet calculation
//!
//! Derives subnet information from an address and a CIDR prefix:
//! - Network number (address AND mask)
//! - Broadcast address (network OR inverted mask)
//! - First and last usable host
//! - Usable host count and dot-decimal mask
//!
//! # Examples
//!
//! ```
//! use subnetcalc_subnet::{subnet_calc, Subnet};
//!
//! assert_eq!(subnet_calc("192.168.1.10", "/24").unwrap(), "192.168.1.0");
//!
//! let subnet = Subnet::calculate("192.168.1.10", "/24").unwrap();
//! assert_eq!(subnet.broadcast.to_string(), "192.168.1.255");
//! assert_eq!(subnet.usable_hosts, 254);
//! ```

use serde::Serialize;
use std::fmt;
use subnetcalc_core::{parse_ip, Ipv4, Prefix, Result};
use tracing::debug;

/// Prefixes longer than this leave no room for usable hosts
const MAX_HOST_PREFIX: u8 = 30;

/// Calculated subnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subnet {
    /// Address the subnet was derived from
    pub address: Ipv4,
    /// Network number
    pub network: Ipv4,
    /// Prefix length
    pub prefix: Prefix,
    /// Mask in dot-decimal form
    pub mask: Ipv4,
    /// Broadcast address (all host bits set)
    pub broadcast: Ipv4,
    /// First usable host, absent for /31 and /32
    pub first_host: Option<Ipv4>,
    /// Last usable host, absent for /31 and /32
    pub last_host: Option<Ipv4>,
    /// Number of usable host addresses
    pub usable_hosts: u64,
    /// Number of addresses covered by the prefix
    pub total_addresses: u64,
}

impl Subnet {
    /// Calculate a subnet from dot-decimal text and a `/n` prefix
    pub fn calculate(address: &str, prefix: &str) -> Result<Self> {
        let address = parse_ip(address)?.address;
        let prefix = Prefix::parse(prefix)?;
        Self::new(address, prefix)
    }

    /// Calculate a subnet from already parsed values
    pub fn new(address: Ipv4, prefix: Prefix) -> Result<Self> {
        let mask = prefix.mask();
        let network = Ipv4(address.0 & mask);
        let broadcast = Ipv4(network.0 | !mask);

        let (first_host, last_host) = if prefix.len() <= MAX_HOST_PREFIX {
            (
                Some(network.carry_add(1)?),
                Some(broadcast.borrow_sub(1)?),
            )
        } else {
            (None, None)
        };

        let subnet = Self {
            address,
            network,
            prefix,
            mask: Ipv4(mask),
            broadcast,
            first_host,
            last_host,
            usable_hosts: usable_hosts(prefix),
            total_addresses: prefix.size(),
        };
        debug!(%address, %prefix, network = %subnet.network, "calculated subnet");
        Ok(subnet)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.network, self.prefix)
    }
}

/// Usable hosts for a prefix: `2^(32-n) - 2`, zero for /31 and /32
pub fn usable_hosts(prefix: Prefix) -> u64 {
    if prefix.len() > MAX_HOST_PREFIX {
        0
    } else {
        prefix.size() - 2
    }
}

/// Network number of `address` under `prefix`, as dot-decimal text
pub fn subnet_calc(address: &str, prefix: &str) -> Result<String> {
    Ok(Subnet::calculate(address, prefix)?.network.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use subnetcalc_core::bits::{and_bits, binary_to_dotted};
    use subnetcalc_core::{parse_cidr, CalcError};

    #[test]
    fn test_subnet_calc() {
        assert_eq!(subnet_calc("192.168.1.10", "/24").unwrap(), "192.168.1.0");
        assert_eq!(subnet_calc("10.0.0.5", "/8").unwrap(), "10.0.0.0");
        assert_eq!(subnet_calc("172.16.37.200", "/20").unwrap(), "172.16.32.0");
        assert_eq!(subnet_calc("8.8.8.8", "/0").unwrap(), "0.0.0.0");
        assert_eq!(subnet_calc("8.8.8.8", "/32").unwrap(), "8.8.8.8");
    }

    #[test]
    fn test_subnet_calc_errors() {
        assert!(matches!(
            subnet_calc("1.2.3", "/24"),
            Err(CalcError::Value(_))
        ));
        assert!(matches!(
            subnet_calc("1.2.3.4", "24"),
            Err(CalcError::Value(_))
        ));
        assert!(matches!(
            subnet_calc("1.2.3.4", "/33"),
            Err(CalcError::Value(_))
        ));
    }

    #[test]
    fn test_matches_binary_string_pipeline() {
        for (ip, cidr) in [
            ("192.168.1.10", "/24"),
            ("10.0.0.5", "/8"),
            ("172.16.37.200", "/20"),
            ("203.0.113.77", "/27"),
        ] {
            let bits = parse_ip(ip).unwrap().binary;
            let mask = parse_cidr(cidr).unwrap();
            let expected = binary_to_dotted(&and_bits(&bits, &mask).unwrap()).unwrap();
            assert_eq!(subnet_calc(ip, cidr).unwrap(), expected);
        }
    }

    #[test]
    fn test_subnet_report_slash_24() {
        let subnet = Subnet::calculate("192.168.1.10", "/24").unwrap();
        assert_eq!(subnet.network.to_string(), "192.168.1.0");
        assert_eq!(subnet.mask.to_string(), "255.255.255.0");
        assert_eq!(subnet.broadcast.to_string(), "192.168.1.255");
        assert_eq!(subnet.first_host, Some(Ipv4::from([192, 168, 1, 1])));
        assert_eq!(subnet.last_host, Some(Ipv4::from([192, 168, 1, 254])));
        assert_eq!(subnet.usable_hosts, 254);
        assert_eq!(subnet.total_addresses, 256);
    }

    #[test]
    fn test_subnet_report_slash_31_and_32() {
        let subnet = Subnet::calculate("10.0.0.5", "/31").unwrap();
        assert_eq!(subnet.network.to_string(), "10.0.0.4");
        assert_eq!(subnet.broadcast.to_string(), "10.0.0.5");
        assert_eq!(subnet.first_host, None);
        assert_eq!(subnet.last_host, None);
        assert_eq!(subnet.usable_hosts, 0);

        let subnet = Subnet::calculate("255.255.255.255", "/32").unwrap();
        assert_eq!(subnet.network, subnet.broadcast);
        assert_eq!(subnet.usable_hosts, 0);
        assert_eq!(subnet.total_addresses, 1);
    }

    #[test]
    fn test_subnet_report_slash_0() {
        let subnet = Subnet::calculate("8.8.8.8", "/0").unwrap();
        assert_eq!(subnet.mask.to_string(), "0.0.0.0");
        assert_eq!(subnet.broadcast.to_string(), "255.255.255.255");
        assert_eq!(subnet.first_host, Some(Ipv4::from([0, 0, 0, 1])));
        assert_eq!(subnet.last_host, Some(Ipv4::from([255, 255, 255, 254])));
        assert_eq!(subnet.usable_hosts, (1u64 << 32) - 2);
    }

    #[test]
    fn test_usable_hosts() {
        let hosts = |n| usable_hosts(Prefix::new(n).unwrap());
        assert_eq!(hosts(8), 16_777_214);
        assert_eq!(hosts(16), 65_534);
        assert_eq!(hosts(24), 254);
        assert_eq!(hosts(30), 2);
        assert_eq!(hosts(31), 0);
        assert_eq!(hosts(32), 0);
    }

    #[test]
    fn test_subnet_display() {
        let subnet = Subnet::calculate("192.168.1.10", "/24").unwrap();
        assert_eq!(subnet.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_subnet_serialization() {
        let subnet = Subnet::calculate("10.0.0.5", "/30").unwrap();
        let json = serde_json::to_value(subnet).expect("serialization failed");
        assert_eq!(json["network"], "10.0.0.4");
        assert_eq!(json["prefix"], 30);
        assert_eq!(json["mask"], "255.255.255.252");
        assert_eq!(json["first_host"], "10.0.0.5");
        assert_eq!(json["last_host"], "10.0.0.6");
        assert_eq!(json["usable_hosts"], 2);
    }
}
