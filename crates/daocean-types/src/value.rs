//! Typed entity field values.

use std::cmp::Ordering;
use std::fmt;

use primitive_types::U256;
use serde::{Serialize, Serializer};

use crate::error::TypesError;
use crate::event::FieldKind;

/// A single entity field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    BigInt(U256),
    Int(i32),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::BigInt(_) => FieldKind::BigInt,
            Value::Int(_) => FieldKind::Int,
            Value::String(_) => FieldKind::String,
            Value::Bytes(_) => FieldKind::Bytes,
        }
    }

    /// Parse a query literal for a field of the given kind.
    pub fn parse(kind: FieldKind, text: &str) -> Result<Self, TypesError> {
        match kind {
            FieldKind::BigInt => parse_u256(text).map(Value::BigInt),
            FieldKind::Int => text
                .trim()
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|_| TypesError::invalid("Int", text)),
            FieldKind::String => Ok(Value::String(text.to_string())),
            FieldKind::Bytes => parse_bytes(text).map(Value::Bytes),
        }
    }

    pub fn as_big_int(&self) -> Option<U256> {
        match self {
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Ordering between two values of the same kind. `None` across kinds.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::BigInt(a), Value::BigInt(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::BigInt(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::String(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

/// BigInt serializes as a decimal string, Bytes as `0x` hex.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::String(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}

/// Decimal, or `0x`-prefixed hex.
pub fn parse_u256(text: &str) -> Result<U256, TypesError> {
    let text = text.trim();
    if let Some(hex_digits) = text.strip_prefix("0x") {
        if hex_digits.is_empty() || hex_digits.len() > 64 {
            return Err(TypesError::invalid("BigInt", text));
        }
        return U256::from_str_radix(hex_digits, 16)
            .map_err(|_| TypesError::invalid("BigInt", text));
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypesError::invalid("BigInt", text));
    }
    U256::from_dec_str(text).map_err(|_| TypesError::invalid("BigInt", text))
}

/// `0x`-prefixed hex. Case-insensitive.
pub fn parse_bytes(text: &str) -> Result<Vec<u8>, TypesError> {
    let digits = text
        .trim()
        .strip_prefix("0x")
        .ok_or_else(|| TypesError::invalid("Bytes", text))?;
    hex::decode(digits).map_err(|_| TypesError::invalid("Bytes", text))
}

/// Serde adapter writing a U256 as a decimal string and reading it from a
/// decimal/hex string or a JSON integer of any width.
pub mod u256_dec {
    use primitive_types::U256;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::Serializer;
    use serde_json::Value as Json;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Integers go through their literal text, so values past u64 keep every digit.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Json::deserialize(deserializer)? {
            Json::String(s) => super::parse_u256(&s).map_err(de::Error::custom),
            Json::Number(n) => super::parse_u256(&n.to_string()).map_err(de::Error::custom),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(&other.to_string()),
                &"a non-negative integer or decimal string",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_big_int_decimal_and_hex() {
        assert_eq!(Value::parse(FieldKind::BigInt, "42").unwrap(), Value::BigInt(U256::from(42)));
        assert_eq!(Value::parse(FieldKind::BigInt, "0x2a").unwrap(), Value::BigInt(U256::from(42)));
        assert!(Value::parse(FieldKind::BigInt, "-1").is_err());
        assert!(Value::parse(FieldKind::BigInt, "").is_err());
        assert!(Value::parse(FieldKind::BigInt, "12abc").is_err());
    }

    #[test]
    fn test_parse_bytes_is_case_insensitive() {
        let lower = Value::parse(FieldKind::Bytes, "0xabcdef").unwrap();
        let upper = Value::parse(FieldKind::Bytes, "0xABCDEF").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_string(), "0xabcdef");
        assert!(Value::parse(FieldKind::Bytes, "abcdef").is_err());
        assert!(Value::parse(FieldKind::Bytes, "0xabc").is_err());
    }

    #[test]
    fn test_big_int_orders_numerically() {
        let nine = Value::BigInt(U256::from(9));
        let ten = Value::BigInt(U256::from(10));
        assert_eq!(nine.compare(&ten), Some(Ordering::Less));
        assert_eq!(nine.compare(&Value::Int(9)), None);
    }

    #[test]
    fn test_serialize_shapes() {
        let json = serde_json::to_value([
            Value::BigInt(U256::from(1_000u64)),
            Value::Int(2),
            Value::String("x".into()),
            Value::Bytes(vec![0xab, 0x01]),
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!(["1000", 2, "x", "0xab01"]));
    }

    #[derive(serde::Deserialize)]
    struct Wrapped {
        #[serde(with = "u256_dec")]
        v: U256,
    }

    #[test]
    fn test_u256_dec_reads_integers_past_u64() {
        let w: Wrapped = serde_json::from_str(r#"{"v": 100000000000000000000}"#).unwrap();
        assert_eq!(w.v, U256::from_dec_str("100000000000000000000").unwrap());

        let w: Wrapped = serde_json::from_str(r#"{"v": "18446744073709551616"}"#).unwrap();
        assert_eq!(w.v, U256::from(u64::MAX) + U256::one());
    }

    #[test]
    fn test_u256_dec_rejects_negative_and_fractional() {
        assert!(serde_json::from_str::<Wrapped>(r#"{"v": -1}"#).is_err());
        assert!(serde_json::from_str::<Wrapped>(r#"{"v": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Wrapped>(r#"{"v": true}"#).is_err());
    }

    #[test]
    fn test_big_int_beyond_u128() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let v = Value::parse(FieldKind::BigInt, max).unwrap();
        assert_eq!(v.to_string(), max);
    }
}
