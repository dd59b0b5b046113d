//! Core types and operations for subnetcalc
//!
//! This crate provides the building blocks used by the subnet calculator:
//! - [`Ipv4`] - IPv4 address as a 32-bit value
//! - [`parse_ip`] / [`parse_cidr`] - validated text parsers
//! - [`bits`] - binary-string helpers (split, convert, AND)
//! - [`carry_sum`] / [`carry_subtract`] - octet arithmetic with carry and borrow
//! - [`CalcError`] - Error types
//!
//! ```
//! use subnetcalc_core::{parse_ip, Ipv4};
//!
//! let parsed = parse_ip("192.168.1.10").unwrap();
//! assert_eq!(parsed.octets, [192, 168, 1, 10]);
//! assert_eq!(parsed.address, Ipv4::from([192, 168, 1, 10]));
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub mod address;
pub mod arith;
pub mod bits;
pub mod loose;
pub mod prefix;

pub use address::{parse_ip, ParsedIp};
pub use arith::{carry_subtract, carry_sum, AddressInput};
pub use prefix::{parse_cidr, Prefix};

/// Number of bits in an IPv4 address.
pub const ADDRESS_BITS: u8 = 32;

/// IPv4 address
///
/// Stored as a native 32-bit value; the octet, binary and dot-decimal
/// forms are produced on demand.
///
/// # Examples
///
/// ```
/// use subnetcalc_core::Ipv4;
///
/// let ip = Ipv4::from([10, 0, 0, 1]);
/// assert_eq!(ip.to_string(), "10.0.0.1");
/// assert_eq!(ip.0, 0x0A000001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4(pub u32);

impl Ipv4 {
    /// The four octets, most significant first
    pub fn octets(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// 32-character '0'/'1' representation
    pub fn to_binary(&self) -> String {
        format!("{:032b}", self.0)
    }

    /// Each octet as an 8-character zero-padded binary string
    pub fn binary_octets(&self) -> [String; 4] {
        self.octets().map(|octet| format!("{:08b}", octet))
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl From<u32> for Ipv4 {
    fn from(value: u32) -> Self {
        Ipv4(value)
    }
}

impl From<[u8; 4]> for Ipv4 {
    fn from(octets: [u8; 4]) -> Self {
        Ipv4(u32::from_be_bytes(octets))
    }
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Error types for subnetcalc operations
///
/// Every variant signals a caller bug or an arithmetic boundary; none is
/// recovered internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Argument of the wrong kind (text, integer, octet sequence)
    #[error("Type error: {0}")]
    Type(String),

    /// Argument outside the valid domain
    #[error("Value error: {0}")]
    Value(String),

    /// Arithmetic left the 0.0.0.0 - 255.255.255.255 address space
    #[error("Overflow: {0}")]
    Overflow(String),
}

/// Result type alias for subnetcalc operations
pub type Result<T> = std::result::Result<T, CalcError>;
