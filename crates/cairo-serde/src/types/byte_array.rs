//! Support for string compatibility with Cairo `ByteArray`.
//! <https://github.com/starkware-libs/cairo/blob/main/corelib/src/byte_array.cairo>
//!
//! A `ByteArray` packs the bytes of a string by chunks of 31 bytes, each chunk
//! being a big-endian felt. The last chunk, always shorter than 31 bytes, is
//! stored apart as the `pending_word` along with its byte length.
//!
//! On the wire: `[num_full_words, word_0 .. word_n-1, pending_word, pending_word_len]`.
use starknet::core::types::Felt;

use crate::error::{Error, Result};
use crate::{CairoSerde, FeltReader};

pub const MAX_WORD_LEN: usize = 31;

/// A felt holding at most 31 bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Bytes31(Felt);

impl Bytes31 {
    pub fn new(felt: Felt) -> Result<Self> {
        // The most significant byte of a felt is the only one a 31 bytes word never uses.
        if felt.to_bytes_be()[0] != 0 {
            Err(Error::out_of_range("bytes31", format!("{:#x}", felt)))
        } else {
            Ok(Self(felt))
        }
    }

    pub fn felt(&self) -> Felt {
        self.0
    }
}

impl From<Bytes31> for Felt {
    fn from(value: Bytes31) -> Self {
        value.felt()
    }
}

impl TryFrom<Felt> for Bytes31 {
    type Error = Error;

    fn try_from(value: Felt) -> Result<Self> {
        Self::new(value)
    }
}

impl CairoSerde for Bytes31 {
    type RustType = Self;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        out.push(rust.felt());
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        Self::new(reader.next_felt()?)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ByteArray {
    pub data: Vec<Bytes31>,
    pub pending_word: Felt,
    pub pending_word_len: usize,
}

impl CairoSerde for ByteArray {
    type RustType = Self;

    const SERIALIZED_SIZE: Option<usize> = None;

    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>) {
        Vec::<Bytes31>::cairo_serialize_to(&rust.data, out);
        out.push(rust.pending_word);
        out.push(Felt::from(rust.pending_word_len));
    }

    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType> {
        let data = reader.read::<Vec<Bytes31>>()?;
        let pending_word = reader.next_felt()?;
        let pending_word_len = reader.read::<u32>()? as usize;

        if pending_word_len >= MAX_WORD_LEN {
            return Err(Error::Deserialize(format!(
                "ByteArray pending word length must be lower than {}, got {}",
                MAX_WORD_LEN, pending_word_len
            )));
        }

        let bytes = pending_word.to_bytes_be();
        if bytes[..32 - pending_word_len].iter().any(|b| *b != 0) {
            return Err(Error::Deserialize(format!(
                "ByteArray pending word {:#x} is longer than {} bytes",
                pending_word, pending_word_len
            )));
        }

        Ok(ByteArray {
            data,
            pending_word,
            pending_word_len,
        })
    }
}

impl ByteArray {
    /// Converts a string into a `ByteArray`.
    ///
    /// # Arguments
    ///
    /// * `string` - The string to convert, its UTF-8 bytes are packed as is.
    pub fn from_string(string: &str) -> Self {
        let bytes = string.as_bytes();
        let full_len = bytes.len() - bytes.len() % MAX_WORD_LEN;

        let data = bytes[..full_len]
            .chunks(MAX_WORD_LEN)
            .map(|chunk| Bytes31(Felt::from_bytes_be_slice(chunk)))
            .collect();

        let pending = &bytes[full_len..];

        Self {
            data,
            pending_word: Felt::from_bytes_be_slice(pending),
            pending_word_len: pending.len(),
        }
    }

    /// Converts `ByteArray` instance into a UTF-8 encoded string on success.
    /// Returns error if the `ByteArray` contains an invalid UTF-8 string.
    pub fn to_string(&self) -> Result<String> {
        let mut buffer = Vec::with_capacity(self.data.len() * MAX_WORD_LEN + self.pending_word_len);

        for d in &self.data {
            push_tail_bytes(&mut buffer, &d.felt(), MAX_WORD_LEN);
        }

        push_tail_bytes(&mut buffer, &self.pending_word, self.pending_word_len);

        Ok(String::from_utf8(buffer)?)
    }

    /// Number of felts of the serialized form.
    pub fn serialized_len(&self) -> usize {
        self.data.len() + 3
    }
}

/// Appends the `len` least significant bytes of the felt, big-endian.
fn push_tail_bytes(buffer: &mut Vec<u8>, felt: &Felt, len: usize) {
    let bytes = felt.to_bytes_be();
    buffer.extend_from_slice(&bytes[32 - len..]);
}

impl From<&str> for ByteArray {
    fn from(value: &str) -> Self {
        ByteArray::from_string(value)
    }
}

impl From<String> for ByteArray {
    fn from(value: String) -> Self {
        ByteArray::from_string(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_felts;

    fn felt(hex: &str) -> Felt {
        Felt::from_hex(hex).unwrap()
    }

    const ALPHABET_31: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ12345";
    const ALPHABET_31_HEX: &str =
        "0x004142434445464748494a4b4c4d4e4f505152535455565758595a3132333435";

    #[test]
    fn test_from_string_empty_string_default() {
        assert_eq!(ByteArray::from_string(""), ByteArray::default());
    }

    #[test]
    fn test_from_string_only_pending_word() {
        assert_eq!(
            ByteArray::from_string("ABCD"),
            ByteArray {
                data: vec![],
                pending_word: felt("0x41424344"),
                pending_word_len: 4,
            }
        );
    }

    #[test]
    fn test_from_string_max_pending_word_len() {
        let b = ByteArray::from_string("ABCDEFGHIJKLMNOPQRSTUVWXYZ1234");
        assert_eq!(b.pending_word_len, 30);
        assert!(b.data.is_empty());
    }

    #[test]
    fn test_from_string_data_only_multiple() {
        let b = ByteArray::from_string(&ALPHABET_31.repeat(2));

        assert_eq!(
            b,
            ByteArray {
                data: vec![Bytes31(felt(ALPHABET_31_HEX)), Bytes31(felt(ALPHABET_31_HEX))],
                pending_word: Felt::ZERO,
                pending_word_len: 0,
            }
        );
    }

    #[test]
    fn test_serialize_data_and_pending_word() {
        let b = ByteArray::from_string(&format!("{}ABCD", ALPHABET_31));

        assert_eq!(
            ByteArray::cairo_serialize(&b),
            vec![
                Felt::ONE,
                felt(ALPHABET_31_HEX),
                felt("0x41424344"),
                Felt::from(4_u8),
            ]
        );
    }

    #[test]
    fn test_to_string_data_and_pending_word() {
        let s = format!("{}{}ABCD", ALPHABET_31, ALPHABET_31);
        assert_eq!(ByteArray::from_string(&s).to_string().unwrap(), s);
    }

    #[test]
    fn test_to_string_invalid_utf8() {
        let b = ByteArray {
            data: vec![],
            pending_word: felt("0xffffffff"),
            pending_word_len: 4,
        };

        assert!(matches!(b.to_string(), Err(Error::InvalidUtf8(_))));
    }

    #[test]
    fn test_from_utf8() {
        let b: ByteArray = "🦀🌟".into();

        assert_eq!(
            b,
            ByteArray {
                data: vec![],
                pending_word: felt("0xf09fa680f09f8c9f"),
                pending_word_len: 8,
            }
        );
        assert_eq!(b.to_string().unwrap(), "🦀🌟");
    }

    #[test]
    fn test_deserialize_pending_len_too_big() {
        let felts = vec![Felt::ZERO, Felt::ZERO, Felt::from(31_u8)];
        assert!(from_felts::<ByteArray>(&felts).is_err());
    }

    #[test]
    fn test_deserialize_pending_word_wider_than_len() {
        let felts = vec![Felt::ZERO, felt("0x41424344"), Felt::from(2_u8)];
        assert!(from_felts::<ByteArray>(&felts).is_err());
    }

    #[test]
    fn test_bytes31_out_of_range() {
        assert!(Bytes31::new(Felt::MAX).is_err());
        assert!(Bytes31::new(felt(ALPHABET_31_HEX)).is_ok());
    }
}
