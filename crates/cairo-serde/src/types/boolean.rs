//! CairoSerde implementation for bool.
//!
//! `core::bool` is an enum with `False` declared first, hence `0` and `1`.
//! Any other value is rejected.
use crate::{CairoSerde, Error, FeltReader, Result};
use starknet::core::types::Felt;

impl CairoSerde for bool {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(if *rust { Felt::ONE } else { Felt::ZERO });
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        let felt = reader.next_felt()?;

        if felt == Felt::ZERO {
            Ok(false)
        } else if felt == Felt::ONE {
            Ok(true)
        } else {
            Err(Error::out_of_range("bool", format!("{:#x}", felt)))
        }
    }
}
