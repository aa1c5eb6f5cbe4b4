//! CairoSerde implementation for tuples.
//!
//! Members are concatenated in order, without any length prefix.
use crate::{CairoSerde, FeltReader, Result};
use starknet::core::types::Felt;

impl CairoSerde for () {
    type RustType = Self;

    const SERIALIZED_SIZE: Option<usize> = Some(0);

    fn cairo_serialize_to(_rust: &Self::RustType, _out: &mut Vec<Felt>) {}

    fn cairo_deserialize(_reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        Ok(())
    }
}

macro_rules! impl_tuples {
    ($( $ty:ident : $rt:ident : $no:tt ),+ $(,)?) => {
        impl<$( $ty, $rt ),+> CairoSerde for ($( $ty, )+)
        where
            $($ty: CairoSerde<RustType = $rt>,)+
        {
            type RustType = ($( $rt, )+);

            const SERIALIZED_SIZE: Option<usize> = None;

            fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
                $( $ty::cairo_serialize_to(&rust.$no, out); )+
            }

            fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
                Ok(($( $ty::cairo_deserialize(reader)?, )+))
            }
        }
    }
}

impl_tuples!(A:RA:0);
impl_tuples!(A:RA:0, B:RB:1);
impl_tuples!(A:RA:0, B:RB:1, C:RC:2);
impl_tuples!(A:RA:0, B:RB:1, C:RC:2, D:RD:3);
impl_tuples!(A:RA:0, B:RB:1, C:RC:2, D:RD:3, E:RE:4);
