//! Dot-decimal address parsing
//!
//! Accepts text such as `"192.168.1.10"` and produces the address in its
//! binary, integer-octet and binary-octet forms.

use crate::{CalcError, Ipv4, Result};
use tracing::trace;

/// Largest value an octet may hold
pub const OCTET_MAX: i64 = 255;

/// Result of [`parse_ip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIp {
    /// The parsed address
    pub address: Ipv4,
    /// 32-character binary string
    pub binary: String,
    /// Integer octets, most significant first
    pub octets: [u8; 4],
    /// Zero-padded 8-character binary octets
    pub binary_octets: [String; 4],
}

impl From<Ipv4> for ParsedIp {
    fn from(address: Ipv4) -> Self {
        Self {
            address,
            binary: address.to_binary(),
            octets: address.octets(),
            binary_octets: address.binary_octets(),
        }
    }
}

/// Parse a dot-decimal IPv4 address
///
/// Surrounding whitespace is ignored, as are empty segments produced by
/// leading, trailing or repeated dots.
///
/// # Examples
///
/// ```
/// use subnetcalc_core::parse_ip;
///
/// let parsed = parse_ip(" 10.0.0.5 ").unwrap();
/// assert_eq!(parsed.octets, [10, 0, 0, 5]);
/// assert_eq!(parsed.binary_octets[3], "00000101");
/// assert!(parse_ip("1.2.3").is_err());
/// ```
pub fn parse_ip(text: &str) -> Result<ParsedIp> {
    let text = text.trim();

    if text.chars().any(|c| !c.is_ascii_digit() && c != '.') {
        return Err(CalcError::Value(format!(
            "Invalid character in IP: {:?}",
            text
        )));
    }

    let segments: Vec<&str> = text.split('.').filter(|s| !s.is_empty()).collect();
    if segments.len() != 4 {
        return Err(CalcError::Value(format!(
            "IP does not have 4 octets: {:?}",
            text
        )));
    }

    let mut octets = [0u8; 4];
    for (slot, segment) in octets.iter_mut().zip(&segments) {
        // A digit run too long for i64 is certainly above 255
        let value = segment.parse::<i64>().unwrap_or(i64::MAX);
        *slot = validate_octet(value)?;
    }

    let parsed = ParsedIp::from(Ipv4::from(octets));
    trace!(input = text, binary = %parsed.binary, "parsed address");
    Ok(parsed)
}

/// Check one octet against both bounds of [0, 255]
///
/// Values parsed from digit text are never negative, but octets handed in
/// directly by the arithmetic entry points can be.
pub fn validate_octet(value: i64) -> Result<u8> {
    if value > OCTET_MAX {
        Err(CalcError::Value(format!(
            "Octet in IP larger than 255: {}",
            value
        )))
    } else if value < 0 {
        Err(CalcError::Value(format!("Octet in IP is negative: {}", value)))
    } else {
        Ok(value as u8)
    }
}
