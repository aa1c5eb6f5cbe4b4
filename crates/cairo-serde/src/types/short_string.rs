//! Cairo short strings: up to 31 ASCII characters packed big-endian into one felt.
use crate::{CairoSerde, Error, FeltReader, Result};
use starknet::core::types::Felt;
use starknet::core::utils::{cairo_short_string_to_felt, parse_cairo_short_string};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortString {
    value: String,
    felt: Felt,
}

impl ShortString {
    /// Packs the string, failing on non ASCII characters or more than 31 characters.
    pub fn new(value: &str) -> Result<Self> {
        let felt = cairo_short_string_to_felt(value)
            .map_err(|e| Error::ShortString(format!("{}: {}", value, e)))?;

        Ok(Self {
            value: value.to_string(),
            felt,
        })
    }

    /// Unpacks a felt, leading zero bytes are skipped.
    pub fn from_felt(felt: Felt) -> Result<Self> {
        let value = parse_cairo_short_string(&felt)
            .map_err(|e| Error::ShortString(format!("{:#x}: {}", felt, e)))?;

        Ok(Self { value, felt })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn felt(&self) -> Felt {
        self.felt
    }
}

impl TryFrom<&str> for ShortString {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl CairoSerde for ShortString {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(rust.felt);
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        Self::from_felt(reader.next_felt()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_felts;

    #[test]
    fn test_short_string_packing() {
        let s = ShortString::new("hello").unwrap();
        assert_eq!(s.felt(), Felt::from_hex("0x68656c6c6f").unwrap());
        assert_eq!(ShortString::cairo_serialize(&s), vec![s.felt()]);
    }

    #[test]
    fn test_short_string_max_len() {
        assert!(ShortString::new(&"a".repeat(31)).is_ok());
        assert!(ShortString::new(&"a".repeat(32)).is_err());
    }

    #[test]
    fn test_short_string_non_ascii() {
        assert!(matches!(ShortString::new("é"), Err(Error::ShortString(_))));
    }

    #[test]
    fn test_short_string_deserialize() {
        let felts = vec![Felt::from_hex("0x41424344").unwrap()];
        assert_eq!(from_felts::<ShortString>(&felts).unwrap().as_str(), "ABCD");
    }
}
