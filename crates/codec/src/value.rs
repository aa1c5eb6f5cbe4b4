//! Dynamic Cairo values.
use num_bigint::{BigInt, BigUint, Sign};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use starknet::core::types::Felt;
use std::str::FromStr;

/// A value of any Cairo type, as accepted by the encoder and produced by the
/// decoder.
///
/// The decoder only outputs one kind per type: felt like types give
/// [`Value::Felt`], integers (including `u256`) give [`Value::Int`],
/// `ByteArray` and short strings give [`Value::String`] and the unit type gives
/// an empty [`Value::Tuple`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Felt(Felt),
    Int(BigInt),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
    /// Members in declaration order.
    Struct(Vec<(String, Value)>),
    /// A variant and its payload, `None` for unit variants.
    Enum {
        variant: String,
        value: Option<Box<Value>>,
    },
    Option(Option<Box<Value>>),
}

impl Value {
    pub fn unit() -> Self {
        Value::Tuple(vec![])
    }

    pub fn none() -> Self {
        Value::Option(None)
    }

    pub fn some(value: impl Into<Value>) -> Self {
        Value::Option(Some(Box::new(value.into())))
    }

    pub fn variant(name: &str, value: Option<Value>) -> Self {
        Value::Enum {
            variant: name.to_string(),
            value: value.map(Box::new),
        }
    }

    pub fn structure<K, I>(members: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Struct(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Tuple(t) if t.is_empty())
    }

    /// Member of a struct value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_felt(&self) -> Option<Felt> {
        match self {
            Value::Felt(f) => Some(*f),
            Value::Int(i) => felt_from_bigint(i),
            Value::Bool(b) => Some(if *b { Felt::ONE } else { Felt::ZERO }),
            Value::String(s) => parse_bigint(s).as_ref().and_then(felt_from_bigint),
            _ => None,
        }
    }

    /// Integer value of numeric kinds, numeric strings being parsed.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Value::Int(i) => Some(i.clone()),
            Value::Felt(f) => Some(felt_to_bigint(f)),
            Value::String(s) => parse_bigint(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for numeric values equal to zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Felt(f) => *f == Felt::ZERO,
            Value::Int(i) => i.sign() == Sign::NoSign,
            _ => false,
        }
    }
}

/// Parses a `0x` prefixed hexadecimal or a decimal (possibly negative) string.
pub fn parse_bigint(s: &str) -> Option<BigInt> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return BigUint::parse_bytes(hex.as_bytes(), 16).map(BigInt::from);
    }

    BigInt::from_str(s).ok()
}

pub fn felt_to_bigint(felt: &Felt) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &felt.to_bytes_be())
}

/// Felt of a non negative integer lower than the field prime.
pub fn felt_from_bigint(value: &BigInt) -> Option<Felt> {
    let (sign, bytes) = value.to_bytes_be();

    if sign == Sign::Minus || bytes.len() > 32 {
        return None;
    }

    if BigUint::from_bytes_be(&bytes) > BigUint::from_bytes_be(&Felt::MAX.to_bytes_be()) {
        return None;
    }

    Some(Felt::from_bytes_be_slice(&bytes))
}

impl From<Felt> for Value {
    fn from(value: Felt) -> Self {
        Value::Felt(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<BigUint> for Value {
    fn from(value: BigUint) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Option(value.map(|v| Box::new(v.into())))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128);

/// JSON form: felts as `0x` hex strings, integers as numbers when they fit
/// in 64 bits and decimal strings otherwise, structs as objects, enums as a
/// single entry object and `None` as null.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Felt(f) => serializer.serialize_str(&format!("{:#x}", f)),
            Value::Int(i) => {
                if let Ok(v) = i64::try_from(i) {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = u64::try_from(i) {
                    serializer.serialize_u64(v)
                } else {
                    serializer.serialize_str(&i.to_string())
                }
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) | Value::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for v in items {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Struct(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (k, v) in members {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Enum { variant, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(variant, value)?;
                map.end()
            }
            Value::Option(None) => serializer.serialize_none(),
            Value::Option(Some(v)) => v.serialize(serializer),
        }
    }
}
