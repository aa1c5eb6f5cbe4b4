//! Cairo `u256`, a struct of two `u128` limbs serialized low first.
use crate::{CairoSerde, Error, FeltReader, Result};
use num_bigint::BigUint;
use serde_with::{DeserializeAs, DisplayFromStr, SerializeAs};
use starknet::core::types::{Felt, U256 as StarknetU256};
use std::{cmp::Ordering, fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct U256 {
    pub low: u128,
    pub high: u128,
}

impl U256 {
    pub const ZERO: U256 = Self::from_u128(0);
    pub const ONE: U256 = Self::from_u128(1);
    pub const MAX: U256 = U256 {
        low: u128::MAX,
        high: u128::MAX,
    };

    const fn from_u128(value: u128) -> Self {
        U256 {
            low: value,
            high: 0,
        }
    }

    /// Joins the two limbs as `(high << 128) | low`.
    pub fn to_biguint(&self) -> BigUint {
        (BigUint::from(self.high) << 128) | BigUint::from(self.low)
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut bytes = [0; 32];
        bytes[0..16].copy_from_slice(&self.high.to_be_bytes());
        bytes[16..32].copy_from_slice(&self.low.to_be_bytes());
        bytes
    }

    pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
        let mut high = [0; 16];
        let mut low = [0; 16];
        high.copy_from_slice(&bytes[0..16]);
        low.copy_from_slice(&bytes[16..32]);

        U256 {
            low: u128::from_be_bytes(low),
            high: u128::from_be_bytes(high),
        }
    }
}

macro_rules! impl_from_for_u256 {
    ($($t:ty),*) => {
        $(
            impl From<$t> for U256 {
                fn from(value: $t) -> Self {
                    Self::from_u128(value as u128)
                }
            }
        )*
    };
}

impl_from_for_u256!(u8, u16, u32, u64, u128, usize);

impl TryFrom<&BigUint> for U256 {
    type Error = Error;

    /// Splits the integer into its two limbs, failing if it needs more than 256 bits.
    fn try_from(value: &BigUint) -> Result<Self> {
        if value.bits() > 256 {
            return Err(Error::out_of_range("u256", value));
        }

        let bytes = value.to_bytes_be();
        let mut padded = [0; 32];
        padded[32 - bytes.len()..].copy_from_slice(&bytes);

        Ok(U256::from_bytes_be(&padded))
    }
}

impl From<U256> for BigUint {
    fn from(value: U256) -> Self {
        value.to_biguint()
    }
}

impl From<StarknetU256> for U256 {
    fn from(value: StarknetU256) -> Self {
        Self {
            low: value.low(),
            high: value.high(),
        }
    }
}

impl From<U256> for StarknetU256 {
    fn from(value: U256) -> Self {
        StarknetU256::from_words(value.low, value.high)
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.high.cmp(&other.high) {
            Ordering::Equal => self.low.cmp(&other.low),
            ordering => ordering,
        }
    }
}

impl Display for U256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_biguint().to_str_radix(16))
    }
}

impl FromStr for U256 {
    type Err = Error;

    /// Parses a `0x` prefixed hexadecimal or a decimal string.
    fn from_str(s: &str) -> Result<Self> {
        let num = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
            None => BigUint::parse_bytes(s.as_bytes(), 10),
        }
        .ok_or_else(|| Error::Deserialize(format!("Invalid u256 string `{}`", s)))?;

        U256::try_from(&num)
    }
}

impl serde::Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DisplayFromStr::serialize_as(self, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        DisplayFromStr::deserialize_as(deserializer)
    }
}

impl CairoSerde for U256 {
    type RustType = Self;

    const SERIALIZED_SIZE: Option<usize> = Some(2);

    fn cairo_serialize_to(rust: &U256, out: &mut Vec<Felt>) {
        u128::cairo_serialize_to(&rust.low, out);
        u128::cairo_serialize_to(&rust.high, out);
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<U256> {
        let low = reader.read::<u128>()?;
        let high = reader.read::<u128>()?;
        Ok(U256 { low, high })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_felts;

    #[test]
    fn test_serialize_u256() {
        let felts = U256::cairo_serialize(&U256 { low: 9, high: 8 });
        assert_eq!(felts, vec![Felt::from(9_u128), Felt::from(8_u128)]);
    }

    #[test]
    fn test_serialize_u256_max() {
        let felts = U256::cairo_serialize(&U256::MAX);
        assert_eq!(felts, vec![Felt::from(u128::MAX), Felt::from(u128::MAX)]);
    }

    #[test]
    fn test_deserialize_u256() {
        let felts = vec![Felt::from(9_u128), Felt::from(8_u128)];
        let num = from_felts::<U256>(&felts).unwrap();
        assert_eq!(num.low, 9_u128);
        assert_eq!(num.high, 8_u128);
    }

    #[test]
    fn test_deserialize_u256_limb_overflow() {
        let felts = vec![Felt::from(u128::MAX) + Felt::ONE, Felt::ZERO];
        assert!(from_felts::<U256>(&felts).is_err());
    }

    #[test]
    fn test_deserialize_u256_truncated() {
        assert!(matches!(
            from_felts::<U256>(&[Felt::ONE]),
            Err(Error::UnexpectedEndOfData { offset: 1, .. })
        ));
    }

    #[test]
    fn test_biguint_split_join() {
        let n = (BigUint::from(7_u8) << 128) | BigUint::from(42_u8);
        let u = U256::try_from(&n).unwrap();
        assert_eq!(u, U256 { low: 42, high: 7 });
        assert_eq!(u.to_biguint(), n);

        let max = (BigUint::from(1_u8) << 256) - BigUint::from(1_u8);
        assert_eq!(U256::try_from(&max).unwrap(), U256::MAX);
        assert!(U256::try_from(&(max + BigUint::from(1_u8))).is_err());
    }

    #[test]
    fn test_display_u256() {
        assert_eq!(format!("{}", U256 { low: 12, high: 0 }), "0xc");
    }

    #[test]
    fn test_from_str() {
        let u = U256::from_str("18446744073709551616").unwrap();
        assert_eq!(u.low, 18446744073709551616_u128);
        assert_eq!(u.high, 0_u128);

        let u = U256::from_str("0x100000000000000000000000000000001").unwrap();
        assert_eq!(u, U256 { low: 1, high: 1 });

        assert!(U256::from_str("not a number").is_err());
    }

    #[test]
    fn test_bytes_be() {
        let u = U256 { low: 9, high: 8 };
        let bytes = u.to_bytes_be();
        assert_eq!(bytes[15], 8);
        assert_eq!(bytes[31], 9);
        assert_eq!(U256::from_bytes_be(&bytes), u);
    }

    #[test]
    fn test_ordering() {
        assert!(U256 { low: 9, high: 8 } < U256 { low: 0, high: 9 });
        assert!(U256 { low: 8, high: 9 } < U256 { low: 9, high: 9 });
    }
}
