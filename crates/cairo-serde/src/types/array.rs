//! CairoSerde implementation for `Vec`.
//! They are used for Array and Span cairo types, serialized as
//! `[len, elem_0 .. elem_n-1]` where `len` counts elements, not felts.
use crate::{CairoSerde, FeltReader, Result};
use starknet::core::types::Felt;

impl<T, RT> CairoSerde for Vec<T>
where
    T: CairoSerde<RustType = RT>,
{
    type RustType = Vec<RT>;

    const SERIALIZED_SIZE: Option<usize> = None;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(Felt::from(rust.len()));
        rust.iter().for_each(|r| T::cairo_serialize_to(r, out));
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        // Cairo arrays are indexed by u32.
        let len = reader.read::<u32>()? as usize;

        // The announced length can't be trusted to allocate.
        let mut out: Vec<RT> = Vec::with_capacity(len.min(reader.remaining()));

        for _ in 0..len {
            out.push(T::cairo_deserialize(reader)?);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_felts, Error};

    #[test]
    fn test_serialize_array() {
        let felts = Vec::<u32>::cairo_serialize(&vec![1, 2, 3]);
        assert_eq!(felts, vec![Felt::THREE, Felt::ONE, Felt::TWO, Felt::THREE]);
    }

    #[test]
    fn test_deserialize_array() {
        let felts = vec![Felt::TWO, Felt::from(123_u32), Felt::from(9988_u32), Felt::ONE];
        let mut reader = FeltReader::new(&felts);
        assert_eq!(reader.read::<Vec<u32>>().unwrap(), vec![123, 9988]);
        assert_eq!(reader.offset(), 3);
    }

    #[test]
    fn test_serialize_array_nested() {
        let v: Vec<Vec<u32>> = vec![vec![1, 2], vec![3]];
        let felts = Vec::<Vec<u32>>::cairo_serialize(&v);
        assert_eq!(
            felts,
            vec![
                Felt::TWO,
                Felt::TWO,
                Felt::ONE,
                Felt::TWO,
                Felt::ONE,
                Felt::THREE
            ]
        );
        assert_eq!(from_felts::<Vec<Vec<u32>>>(&felts).unwrap(), v);
    }

    #[test]
    fn test_deserialize_array_truncated() {
        let felts = vec![Felt::THREE, Felt::ONE];
        assert!(matches!(
            from_felts::<Vec<u32>>(&felts),
            Err(Error::UnexpectedEndOfData { offset: 2, .. })
        ));
    }

    #[test]
    fn test_deserialize_array_huge_len() {
        let felts = vec![Felt::MAX];
        assert!(from_felts::<Vec<u32>>(&felts).is_err());
    }
}
