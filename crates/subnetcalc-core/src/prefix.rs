//! CIDR prefix parsing and mask generation

use crate::{CalcError, Result, ADDRESS_BITS};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// CIDR prefix length (0-32)
///
/// # Examples
///
/// ```
/// use subnetcalc_core::Prefix;
///
/// let prefix = Prefix::parse("/24").unwrap();
/// assert_eq!(prefix.len(), 24);
/// assert_eq!(prefix.mask(), 0xFFFFFF00);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Prefix(u8);

impl Prefix {
    /// Create a prefix from its length
    pub fn new(len: u8) -> Result<Self> {
        if len > ADDRESS_BITS {
            return Err(CalcError::Value(format!(
                "CIDR must be between 0 and 32, got {}",
                len
            )));
        }
        Ok(Self(len))
    }

    /// Parse the textual `/n` form
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if text.chars().any(|c| !c.is_ascii_digit() && c != '/') {
            return Err(CalcError::Value(format!(
                "Invalid character in CIDR: {:?}",
                text
            )));
        }

        if !text.starts_with('/') {
            return Err(CalcError::Value(format!(
                "CIDR must start with a '/': {:?}",
                text
            )));
        }

        let digits = text.trim_matches('/');
        if digits.is_empty() || digits.contains('/') {
            return Err(CalcError::Value(format!(
                "CIDR prefix is not a number: {:?}",
                text
            )));
        }

        // Digit runs too long for u32 are out of range all the same
        let len = digits.parse::<u32>().unwrap_or(u32::MAX);
        if len > u32::from(ADDRESS_BITS) {
            return Err(CalcError::Value(format!(
                "CIDR must be between 0 and 32, got {}",
                digits
            )));
        }

        trace!(input = text, len, "parsed prefix");
        Ok(Self(len as u8))
    }

    /// Prefix length
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.0
    }

    /// Network mask with `len` leading one bits
    pub fn mask(&self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            u32::MAX << (ADDRESS_BITS - self.0)
        }
    }

    /// Network mask as a 32-character binary string
    pub fn mask_binary(&self) -> String {
        format!("{:032b}", self.mask())
    }

    /// Number of addresses covered by the prefix
    pub fn size(&self) -> u64 {
        1u64 << (ADDRESS_BITS - self.0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// Parse a `/n` prefix and return its 32-character binary mask
///
/// # Examples
///
/// ```
/// use subnetcalc_core::parse_cidr;
///
/// assert_eq!(parse_cidr("/8").unwrap(), format!("{}{}", "1".repeat(8), "0".repeat(24)));
/// assert!(parse_cidr("24").is_err());
/// assert!(parse_cidr("/33").is_err());
/// ```
pub fn parse_cidr(text: &str) -> Result<String> {
    Ok(Prefix::parse(text)?.mask_binary())
}
