//! Binary-string helpers
//!
//! Addresses are handled as native integers internally; these functions
//! cover the textual '0'/'1' boundary.

use crate::{CalcError, Result, ADDRESS_BITS};

fn check_binary(bits: &str) -> Result<()> {
    if bits.chars().any(|c| c != '0' && c != '1') {
        return Err(CalcError::Value(format!(
            "Binary string may only contain '0' and '1': {:?}",
            bits
        )));
    }
    Ok(())
}

/// Split a 32-character binary string into four 8-character octets
///
/// # Examples
///
/// ```
/// use subnetcalc_core::bits::split_octets;
///
/// let octets = split_octets("11000000101010000000000100000000").unwrap();
/// assert_eq!(octets[1], "10101000");
/// ```
pub fn split_octets(bits: &str) -> Result<[String; 4]> {
    check_binary(bits)?;
    if bits.len() != ADDRESS_BITS as usize {
        return Err(CalcError::Value(format!(
            "Expected 32 bits, got {}",
            bits.len()
        )));
    }

    Ok([0, 1, 2, 3].map(|i| bits[i * 8..i * 8 + 8].to_string()))
}

/// Interpret a binary string, most significant bit first
///
/// Any length is accepted as long as the value fits in 64 bits; leading
/// zeros do not count. The empty string is zero.
///
/// ```
/// use subnetcalc_core::bits::binary_to_int;
///
/// assert_eq!(binary_to_int("00001010").unwrap(), 10);
/// assert_eq!(binary_to_int(&format!("{}1", "0".repeat(100))).unwrap(), 1);
/// ```
pub fn binary_to_int(bits: &str) -> Result<u64> {
    check_binary(bits)?;
    let significant = bits.trim_start_matches('0');
    if significant.len() > 64 {
        return Err(CalcError::Value(format!(
            "Binary value needs {} bits, more than 64",
            significant.len()
        )));
    }
    if significant.is_empty() {
        return Ok(0);
    }

    u64::from_str_radix(significant, 2).map_err(|e| CalcError::Value(e.to_string()))
}

/// Bitwise AND of two equal-length binary strings
///
/// # Examples
///
/// ```
/// use subnetcalc_core::bits::and_bits;
///
/// assert_eq!(and_bits("1100", "1010").unwrap(), "1000");
/// assert!(and_bits("1", "10").is_err());
/// ```
pub fn and_bits(a: &str, b: &str) -> Result<String> {
    check_binary(a)?;
    check_binary(b)?;
    if a.len() != b.len() {
        return Err(CalcError::Value(format!(
            "Binary strings must be the same length ({} != {})",
            a.len(),
            b.len()
        )));
    }

    Ok(a
        .bytes()
        .zip(b.bytes())
        .map(|(x, y)| if x == b'1' && y == b'1' { '1' } else { '0' })
        .collect())
}

/// Render a 32-bit binary string as dot-decimal text
///
/// Split, convert each octet, and join with '.'.
pub fn binary_to_dotted(bits: &str) -> Result<String> {
    let octets = split_octets(bits)?;
    let values = octets
        .iter()
        .map(|octet| binary_to_int(octet).map(|v| v.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(values.join("."))
}
