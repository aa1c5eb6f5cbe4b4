//! CairoSerde implementation for Option.
//!
//! In cairo, `Some` is the first variant and `None` the second one.
//! To follow the serialization rule, `Some` has index 0, and `None` index 1.
//!
//! <https://github.com/starkware-libs/cairo/blob/main/corelib/src/option.cairo>
use crate::{CairoSerde, Error, FeltReader, Result};
use starknet::core::types::Felt;

/// Discriminant written before the payload of `Some`.
pub const OPTION_SOME_DISCRIMINANT: Felt = Felt::ZERO;
/// Discriminant of `None`, without payload.
pub const OPTION_NONE_DISCRIMINANT: Felt = Felt::ONE;

impl<T, RT> CairoSerde for Option<T>
where
    T: CairoSerde<RustType = RT>,
{
    type RustType = Option<RT>;

    const SERIALIZED_SIZE: Option<usize> = None;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        match rust {
            Some(r) => {
                out.push(OPTION_SOME_DISCRIMINANT);
                T::cairo_serialize_to(r, out);
            }
            None => out.push(OPTION_NONE_DISCRIMINANT),
        };
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        let idx = reader.next_felt()?;

        if idx == OPTION_SOME_DISCRIMINANT {
            Ok(Some(T::cairo_deserialize(reader)?))
        } else if idx == OPTION_NONE_DISCRIMINANT {
            Ok(None)
        } else {
            Err(Error::Deserialize(format!(
                "Option is expected 0 or 1 index only, got {:#x}",
                idx
            )))
        }
    }
}
