//! CairoSerde implementation for starknet types.
//!
//! They are all `Felt` under the hood, `EthAddress` being further
//! restricted to 160 bits.
use crate::{CairoSerde, Error, FeltReader, Result};
use starknet::core::types::Felt;

macro_rules! felt_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub Felt);

        impl From<$name> for Felt {
            fn from(item: $name) -> Self {
                item.0
            }
        }
    };
}

felt_newtype!(
    /// ContractAddress.
    ContractAddress
);
felt_newtype!(
    /// ClassHash.
    ClassHash
);
felt_newtype!(
    /// EthAddress, an L1 address of 20 bytes.
    EthAddress
);

impl From<Felt> for ContractAddress {
    fn from(item: Felt) -> Self {
        Self(item)
    }
}

impl From<Felt> for ClassHash {
    fn from(item: Felt) -> Self {
        Self(item)
    }
}

impl EthAddress {
    pub const BITS: usize = 160;

    pub fn new(felt: Felt) -> Result<Self> {
        if felt.bits() > Self::BITS {
            return Err(Error::out_of_range("EthAddress", format!("{:#x}", felt)));
        }

        Ok(Self(felt))
    }
}

impl TryFrom<Felt> for EthAddress {
    type Error = Error;

    fn try_from(item: Felt) -> Result<Self> {
        Self::new(item)
    }
}

impl CairoSerde for ContractAddress {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(rust.0);
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        Ok(ContractAddress(reader.next_felt()?))
    }
}

impl CairoSerde for ClassHash {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(rust.0);
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        Ok(ClassHash(reader.next_felt()?))
    }
}

impl CairoSerde for EthAddress {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(rust.0);
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        EthAddress::new(reader.next_felt()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_felts;

    #[test]
    fn test_contract_address_cairo_serialize() {
        let felts = ContractAddress::cairo_serialize(&ContractAddress(Felt::from(1_u32)));
        assert_eq!(felts, vec![Felt::from(1_u32)]);
    }

    #[test]
    fn test_contract_address_cairo_deserialize() {
        let felts = vec![Felt::from(1_u32)];
        assert_eq!(
            from_felts::<ContractAddress>(&felts).unwrap(),
            ContractAddress(Felt::from(1_u32))
        );
    }

    #[test]
    fn test_class_hash_cairo_deserialize() {
        let felts = vec![Felt::from(1_u32)];
        assert_eq!(
            from_felts::<ClassHash>(&felts).unwrap(),
            ClassHash(Felt::from(1_u32))
        );
    }

    #[test]
    fn test_eth_address_range() {
        let max = Felt::from_hex("0xffffffffffffffffffffffffffffffffffffffff").unwrap();
        assert!(EthAddress::new(max).is_ok());
        assert!(from_felts::<EthAddress>(&[max + Felt::ONE]).is_err());
    }
}
