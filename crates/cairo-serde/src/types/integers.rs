//! CairoSerde implementation for integers (signed/unsigned).
//!
//! Every integer takes one felt. Unsigned integers are range checked against
//! the width of the type when deserialized. Signed integers follow the field
//! arithmetic of Cairo: a negative value `-x` is represented by `P - x`.
use crate::{CairoSerde, Error, FeltReader, Result};
use starknet::core::types::Felt;

macro_rules! implement_trait_for_unsigned {
    ($type:ty) => {
        impl CairoSerde for $type {
            type RustType = Self;

            fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
                out.push(Felt::from(*rust));
            }

            fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
                let felt = reader.next_felt()?;

                u128::try_from(felt)
                    .ok()
                    .and_then(|v| <$type>::try_from(v).ok())
                    .ok_or_else(|| Error::out_of_range(stringify!($type), format!("{:#x}", felt)))
            }
        }
    };
}

macro_rules! implement_trait_for_signed {
    ($type:ty) => {
        impl CairoSerde for $type {
            type RustType = Self;

            fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
                let magnitude = Felt::from(rust.unsigned_abs());

                if *rust < 0 {
                    out.push(-magnitude);
                } else {
                    out.push(magnitude);
                }
            }

            fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
                let felt = reader.next_felt()?;
                let out_of_range = || Error::out_of_range(stringify!($type), format!("{:#x}", felt));

                if let Ok(positive) = u128::try_from(felt) {
                    if let Ok(v) = <$type>::try_from(positive) {
                        return Ok(v);
                    }
                }

                // Negative values live at the top of the field.
                let magnitude = u128::try_from(-felt).map_err(|_| out_of_range())?;

                if magnitude > <$type>::MIN.unsigned_abs() as u128 {
                    return Err(out_of_range());
                }

                <$type>::try_from((magnitude as i128).wrapping_neg()).map_err(|_| out_of_range())
            }
        }
    };
}

implement_trait_for_unsigned!(u8);
implement_trait_for_unsigned!(u16);
implement_trait_for_unsigned!(u32);
implement_trait_for_unsigned!(u64);
implement_trait_for_unsigned!(u128);
implement_trait_for_unsigned!(usize);

implement_trait_for_signed!(i8);
implement_trait_for_signed!(i16);
implement_trait_for_signed!(i32);
implement_trait_for_signed!(i64);
implement_trait_for_signed!(i128);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_felts;

    macro_rules! unsigned_tests {
        ($($type:ident),*) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<test_serialize_ $type>]() {
                        let felts = <$type>::cairo_serialize(&<$type>::MAX);
                        assert_eq!(felts, vec![Felt::from(<$type>::MAX)]);
                    }

                    #[test]
                    fn [<test_deserialize_ $type>]() {
                        let felts = vec![Felt::from(12_u8), Felt::from(<$type>::MAX)];
                        let mut reader = FeltReader::new(&felts);
                        assert_eq!(reader.read::<$type>().unwrap(), 12);
                        assert_eq!(reader.read::<$type>().unwrap(), <$type>::MAX);
                    }
                }
            )*
        };
    }

    macro_rules! signed_tests {
        ($($type:ident),*) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<test_roundtrip_bounds_ $type>]() {
                        let values: [$type; 5] = [-1, 0, 1, <$type>::MIN, <$type>::MAX];

                        for v in values {
                            let felts = <$type>::cairo_serialize(&v);
                            assert_eq!(felts.len(), 1);
                            assert_eq!(from_felts::<$type>(&felts).unwrap(), v);
                        }
                    }
                }
            )*
        };
    }

    unsigned_tests!(u8, u16, u32, u64, u128);
    signed_tests!(i8, i16, i32, i64, i128);

    #[test]
    fn test_serialize_negative_is_field_negation() {
        let felts = i8::cairo_serialize(&-1);
        assert_eq!(felts[0], Felt::ZERO - Felt::ONE);
        assert_eq!(felts[0], Felt::MAX);
    }

    #[test]
    fn test_deserialize_unsigned_out_of_range() {
        assert!(matches!(
            from_felts::<u8>(&[Felt::from(256_u32)]),
            Err(Error::ValueOutOfRange { type_name: "u8", .. })
        ));
        assert!(from_felts::<u128>(&[Felt::MAX]).is_err());
    }

    #[test]
    fn test_deserialize_signed_out_of_range() {
        assert!(from_felts::<i8>(&[Felt::from(128_u32)]).is_err());
        assert!(from_felts::<i8>(&[-Felt::from(129_u32)]).is_err());
        assert_eq!(from_felts::<i8>(&[-Felt::from(128_u32)]).unwrap(), i8::MIN);
    }
}
