//! Octet arithmetic with carry and borrow propagation
//!
//! An unsigned offset is added to (or subtracted from) an address one
//! octet at a time, least significant first. Leaving the address space
//! is an error, never a wrap-around.

use crate::address::{parse_ip, validate_octet};
use crate::{CalcError, Ipv4, Result};
use tracing::debug;

/// Address argument for the arithmetic entry points
///
/// Text is parsed as dot-decimal; octets are validated as given, so a
/// caller may hand in negative or oversized values and get a value error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressInput {
    /// Dot-decimal text
    Text(String),
    /// Pre-parsed octets, most significant first
    Octets(Vec<i64>),
}

impl AddressInput {
    /// Resolve into a validated address
    pub fn resolve(&self) -> Result<Ipv4> {
        match self {
            AddressInput::Text(text) => Ok(parse_ip(text)?.address),
            AddressInput::Octets(values) => {
                if values.len() != 4 {
                    return Err(CalcError::Value(format!(
                        "IP does not have 4 octets: got {}",
                        values.len()
                    )));
                }
                let mut octets = [0u8; 4];
                for (slot, value) in octets.iter_mut().zip(values) {
                    *slot = validate_octet(*value)?;
                }
                Ok(Ipv4::from(octets))
            }
        }
    }
}

impl From<&str> for AddressInput {
    fn from(text: &str) -> Self {
        AddressInput::Text(text.to_string())
    }
}

impl From<String> for AddressInput {
    fn from(text: String) -> Self {
        AddressInput::Text(text)
    }
}

impl From<Vec<i64>> for AddressInput {
    fn from(octets: Vec<i64>) -> Self {
        AddressInput::Octets(octets)
    }
}

impl From<[i64; 4]> for AddressInput {
    fn from(octets: [i64; 4]) -> Self {
        AddressInput::Octets(octets.to_vec())
    }
}

impl From<Ipv4> for AddressInput {
    fn from(ip: Ipv4) -> Self {
        AddressInput::Octets(ip.octets().iter().map(|&o| i64::from(o)).collect())
    }
}

fn check_offset(offset: i64) -> Result<u64> {
    u64::try_from(offset)
        .map_err(|_| CalcError::Value(format!("Offset is less than zero: {}", offset)))
}

impl Ipv4 {
    /// Add `offset`, carrying into higher octets
    ///
    /// The address is already valid, so only the offset is checked.
    pub fn carry_add(self, offset: i64) -> Result<Ipv4> {
        let mut remaining = check_offset(offset)?;
        let mut octets = self.octets().map(u64::from);

        for i in (0..4).rev() {
            if octets[i] + remaining < 256 {
                octets[i] += remaining;
                break;
            }
            if i == 0 {
                return Err(CalcError::Overflow(format!(
                    "{} + {} is greater than 255.255.255.255",
                    self, offset
                )));
            }
            remaining += octets[i];
            octets[i] = remaining % 256;
            remaining /= 256;
        }

        let result = Ipv4::from(octets.map(|o| o as u8));
        debug!(address = %self, offset, %result, "carry add");
        Ok(result)
    }

    /// Subtract `offset`, borrowing from higher octets
    pub fn borrow_sub(self, offset: i64) -> Result<Ipv4> {
        let mut remaining = check_offset(offset)?;
        let mut octets = self.octets().map(u64::from);

        for i in (0..4).rev() {
            if octets[i] >= remaining {
                octets[i] -= remaining;
                break;
            }
            if i == 0 {
                return Err(CalcError::Overflow(format!(
                    "{} - {} is less than 0.0.0.0",
                    self, offset
                )));
            }
            let deficit = remaining - octets[i];
            let borrow = deficit.div_ceil(256);
            octets[i] = borrow * 256 - deficit;
            remaining = borrow;
        }

        let result = Ipv4::from(octets.map(|o| o as u8));
        debug!(address = %self, offset, %result, "borrow sub");
        Ok(result)
    }
}

/// Add `offset` to an address, carrying into higher octets
///
/// # Examples
///
/// ```
/// use subnetcalc_core::carry_sum;
///
/// assert_eq!(carry_sum([192, 168, 1, 255], 1).unwrap(), [192, 168, 2, 0]);
/// assert_eq!(carry_sum("10.0.0.1", 255).unwrap(), [10, 0, 1, 0]);
/// assert!(carry_sum([255, 255, 255, 255], 1).is_err());
/// ```
pub fn carry_sum(address: impl Into<AddressInput>, offset: i64) -> Result<[u8; 4]> {
    let address = address.into().resolve()?;
    Ok(address.carry_add(offset)?.octets())
}

/// Subtract `offset` from an address, borrowing from higher octets
///
/// # Examples
///
/// ```
/// use subnetcalc_core::carry_subtract;
///
/// assert_eq!(carry_subtract([192, 168, 2, 0], 1).unwrap(), [192, 168, 1, 255]);
/// assert!(carry_subtract([0, 0, 0, 0], 1).is_err());
/// ```
pub fn carry_subtract(address: impl Into<AddressInput>, offset: i64) -> Result<[u8; 4]> {
    let address = address.into().resolve()?;
    Ok(address.borrow_sub(offset)?.octets())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carry_sum_no_carry() {
        assert_eq!(carry_sum([10, 0, 0, 1], 4).unwrap(), [10, 0, 0, 5]);
        assert_eq!(
            carry_sum([255, 255, 255, 255], 0).unwrap(),
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn test_carry_sum_single_carry() {
        assert_eq!(carry_sum([192, 168, 1, 255], 1).unwrap(), [192, 168, 2, 0]);
    }

    #[test]
    fn test_carry_sum_multi_carry() {
        assert_eq!(carry_sum([10, 255, 255, 255], 1).unwrap(), [11, 0, 0, 0]);
        assert_eq!(carry_sum([0, 0, 0, 0], 65536).unwrap(), [0, 1, 0, 0]);
        assert_eq!(carry_sum([0, 0, 0, 0], 0xFFFFFFFF).unwrap(), [255, 255, 255, 255]);
        assert_eq!(carry_sum([1, 2, 3, 4], 0x01010101).unwrap(), [2, 3, 4, 5]);
    }

    #[test]
    fn test_carry_sum_overflow() {
        let err = carry_sum([255, 255, 255, 255], 1).unwrap_err();
        assert!(matches!(err, CalcError::Overflow(_)));
        assert!(matches!(
            carry_sum([0, 0, 0, 0], 1i64 << 32),
            Err(CalcError::Overflow(_))
        ));
    }

    #[test]
    fn test_carry_sum_from_text() {
        assert_eq!(carry_sum("192.168.1.255", 1).unwrap(), [192, 168, 2, 0]);
        assert!(matches!(carry_sum("1.2.3", 1), Err(CalcError::Value(_))));
    }

    #[test]
    fn test_carry_sum_invalid_octets() {
        assert!(matches!(
            carry_sum(vec![1, 2, 3], 1),
            Err(CalcError::Value(_))
        ));
        assert!(matches!(
            carry_sum([1, 2, 3, 256], 1),
            Err(CalcError::Value(_))
        ));
        assert_eq!(
            carry_sum([1, -2, 3, 4], 1).unwrap_err(),
            CalcError::Value("Octet in IP is negative: -2".to_string())
        );
    }

    #[test]
    fn test_negative_offset() {
        assert_eq!(
            carry_sum([1, 2, 3, 4], -1).unwrap_err(),
            CalcError::Value("Offset is less than zero: -1".to_string())
        );
        assert!(matches!(
            carry_subtract([1, 2, 3, 4], -1),
            Err(CalcError::Value(_))
        ));
    }

    #[test]
    fn test_carry_subtract() {
        assert_eq!(carry_subtract([10, 0, 0, 5], 5).unwrap(), [10, 0, 0, 0]);
        assert_eq!(carry_subtract([192, 168, 2, 0], 1).unwrap(), [192, 168, 1, 255]);
        assert_eq!(carry_subtract([11, 0, 0, 0], 1).unwrap(), [10, 255, 255, 255]);
        assert_eq!(carry_subtract([1, 0, 0, 0], 257).unwrap(), [0, 255, 254, 255]);
        assert_eq!(carry_subtract([255, 255, 255, 255], 0xFFFFFFFF).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_carry_subtract_underflow() {
        assert!(matches!(
            carry_subtract([0, 0, 0, 0], 1),
            Err(CalcError::Overflow(_))
        ));
        assert!(matches!(
            carry_subtract([0, 0, 1, 0], 257),
            Err(CalcError::Overflow(_))
        ));
    }

    #[test]
    fn test_subtract_inverts_sum() {
        let samples: [[i64; 4]; 4] = [
            [0, 0, 0, 0],
            [10, 0, 0, 1],
            [192, 168, 1, 255],
            [172, 16, 254, 3],
        ];
        for octets in samples {
            for offset in [0i64, 1, 255, 256, 1000, 70000] {
                let sum = carry_sum(octets, offset).unwrap();
                let back = carry_subtract(Ipv4::from(sum), offset).unwrap();
                assert_eq!(back.map(i64::from), octets);
            }
        }
    }

    #[test]
    fn test_ipv4_carry_add_and_borrow_sub() {
        let ip = Ipv4::from([192, 168, 1, 255]);
        assert_eq!(ip.carry_add(1).unwrap(), Ipv4::from([192, 168, 2, 0]));
        assert_eq!(
            Ipv4::from([192, 168, 2, 0]).borrow_sub(1).unwrap(),
            Ipv4::from([192, 168, 1, 255])
        );
        assert!(matches!(
            Ipv4(u32::MAX).carry_add(1),
            Err(CalcError::Overflow(_))
        ));
        assert!(matches!(Ipv4(0).borrow_sub(1), Err(CalcError::Overflow(_))));
        assert!(matches!(ip.carry_add(-1), Err(CalcError::Value(_))));
    }

    #[test]
    fn test_matches_native_arithmetic() {
        let base = 0xC0A8_01F0u32;
        for offset in [0u32, 15, 16, 300, 0x10000] {
            let sum = carry_sum(Ipv4(base), offset as i64).unwrap();
            assert_eq!(u32::from_be_bytes(sum), base + offset);
            let diff = carry_subtract(Ipv4(base), offset as i64).unwrap();
            assert_eq!(u32::from_be_bytes(diff), base - offset);
        }
    }
}
