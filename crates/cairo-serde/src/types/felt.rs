use crate::{CairoSerde, FeltReader, Result};
use starknet::core::types::Felt;

impl CairoSerde for Felt {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(*rust);
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        reader.next_felt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_field_element() {
        let felts = Felt::cairo_serialize(&Felt::ZERO);
        assert_eq!(felts, vec![Felt::ZERO]);
    }

    #[test]
    fn test_deserialize_field_element() {
        let felts = vec![Felt::ZERO, Felt::ONE, Felt::TWO];
        let mut reader = FeltReader::new(&felts);
        assert_eq!(reader.read::<Felt>().unwrap(), Felt::ZERO);
        assert_eq!(reader.read::<Felt>().unwrap(), Felt::ONE);
        assert_eq!(reader.read::<Felt>().unwrap(), Felt::TWO);
        assert!(reader.read::<Felt>().is_err());
    }
}
