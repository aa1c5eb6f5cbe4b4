use starknet::core::types::Felt;

use crate::{CairoSerde, Error, Result};

/// A cursor over a felt sequence.
///
/// The reader is owned by one decode call tree and passed down by mutable
/// reference, each primitive advancing the offset by the number of felts
/// it consumed. Reading past the end is always an error, the data is never
/// padded.
#[derive(Debug, Clone)]
pub struct FeltReader<'a> {
    felts: &'a [Felt],
    offset: usize,
}

impl<'a> FeltReader<'a> {
    pub fn new(felts: &'a [Felt]) -> Self {
        Self { felts, offset: 0 }
    }

    /// Current position in the underlying sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of felts not consumed yet.
    pub fn remaining(&self) -> usize {
        self.felts.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consumes the next felt.
    pub fn next_felt(&mut self) -> Result<Felt> {
        let felt = self
            .felts
            .get(self.offset)
            .copied()
            .ok_or(Error::UnexpectedEndOfData {
                offset: self.offset,
                wanted: 1,
                available: 0,
            })?;

        self.offset += 1;
        Ok(felt)
    }

    /// Consumes the next `len` felts at once.
    pub fn take(&mut self, len: usize) -> Result<&'a [Felt]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEndOfData {
                offset: self.offset,
                wanted: len,
                available: self.remaining(),
            });
        }

        let felts = self.felts;
        let slice = &felts[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Deserializes a `T` at the current position.
    pub fn read<T: CairoSerde>(&mut self) -> Result<T::RustType> {
        T::cairo_deserialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_felt_advances() {
        let felts = vec![Felt::ONE, Felt::TWO];
        let mut r = FeltReader::new(&felts);

        assert_eq!(r.next_felt().unwrap(), Felt::ONE);
        assert_eq!(r.offset(), 1);
        assert_eq!(r.next_felt().unwrap(), Felt::TWO);
        assert!(r.is_empty());
    }

    #[test]
    fn test_next_felt_past_end() {
        let felts = vec![Felt::ONE];
        let mut r = FeltReader::new(&felts);
        r.next_felt().unwrap();

        match r.next_felt() {
            Err(Error::UnexpectedEndOfData { offset, .. }) => assert_eq!(offset, 1),
            other => panic!("Expected end of data, got {:?}", other),
        }
    }

    #[test]
    fn test_take_does_not_advance_on_error() {
        let felts = vec![Felt::ONE, Felt::TWO, Felt::THREE];
        let mut r = FeltReader::new(&felts);

        assert!(r.take(4).is_err());
        assert_eq!(r.offset(), 0);
        assert_eq!(r.take(2).unwrap(), &[Felt::ONE, Felt::TWO]);
        assert_eq!(r.remaining(), 1);
    }
}
