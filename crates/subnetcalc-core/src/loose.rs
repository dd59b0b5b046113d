//! Entry points for untyped arguments
//!
//! Values that arrive as JSON (for example an address typed on the command
//! line as `[10,0,0,1]`) are checked for kind here before the typed parsers
//! run. A value of the wrong kind is a [`CalcError::Type`].

use crate::address::OCTET_MAX;
use crate::bits::and_bits;
use crate::{parse_cidr, parse_ip, AddressInput, CalcError, ParsedIp, Result};
use serde_json::Value;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_str<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        CalcError::Type(format!("{} is not a string, got {}", what, kind(value)))
    })
}

impl TryFrom<&Value> for AddressInput {
    type Error = CalcError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(AddressInput::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item.as_i64() {
                    Some(octet) => Ok(octet),
                    // integers above i64::MAX are still integers, just out of range
                    None if item.is_u64() => Err(CalcError::Value(format!(
                        "Octet in IP larger than {}: {}",
                        OCTET_MAX, item
                    ))),
                    None => Err(CalcError::Type(format!(
                        "Octet in IP is not an integer: {}",
                        item
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(AddressInput::Octets),
            other => Err(CalcError::Type(format!(
                "Expected IP as string or list of octets, got {}",
                kind(other)
            ))),
        }
    }
}

/// [`parse_ip`] for an untyped value
///
/// ```
/// use serde_json::json;
/// use subnetcalc_core::{loose::parse_ip_value, CalcError};
///
/// assert!(matches!(parse_ip_value(&json!(300)), Err(CalcError::Type(_))));
/// ```
pub fn parse_ip_value(value: &Value) -> Result<ParsedIp> {
    parse_ip(expect_str(value, "IP")?)
}

/// [`parse_cidr`] for an untyped value
pub fn parse_cidr_value(value: &Value) -> Result<String> {
    parse_cidr(expect_str(value, "CIDR")?)
}

/// [`and_bits`] for untyped values
pub fn and_bits_value(a: &Value, b: &Value) -> Result<String> {
    and_bits(expect_str(a, "Binary string")?, expect_str(b, "Binary string")?)
}

/// Offset for the arithmetic entry points; must be an integer
///
/// An integer too large for `i64` cannot stay inside the address space
/// from any starting point, so it is an overflow rather than a type error.
pub fn offset_from_value(value: &Value) -> Result<i64> {
    match value.as_i64() {
        Some(offset) => Ok(offset),
        None if value.is_u64() => Err(CalcError::Overflow(format!(
            "Offset {} is beyond 255.255.255.255",
            value
        ))),
        None => Err(CalcError::Type(format!(
            "Offset expected integer, got {}",
            value
        ))),
    }
}
