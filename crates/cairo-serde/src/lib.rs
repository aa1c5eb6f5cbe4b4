//! This crate contains the wire primitives of the Cairo calldata encoding:
//! a trait to (de)serialize native Rust types from/to a flat sequence of `Felt`,
//! and the implementations for every basic Cairo type (integers, felt, bool,
//! `u256`, `ByteArray`, short strings, `Option`, arrays and tuples).
//!
//! Deserialization goes through a [`FeltReader`], a cursor over the felts
//! that is advanced in place. The dynamic ABI codec reuses the same reader
//! and the same primitives, so the typed and dynamic paths cannot diverge
//! on the wire format.
mod error;
pub use error::{Error, Result};

mod reader;
pub use reader::FeltReader;

pub mod types;
pub use types::byte_array::*;
pub use types::option::{OPTION_NONE_DISCRIMINANT, OPTION_SOME_DISCRIMINANT};
pub use types::short_string::*;
pub use types::starknet::*;
pub use types::u256::*;

use ::starknet::core::types::Felt;

/// CairoSerde trait to implement in order to serialize/deserialize
/// a Rust type to/from a sequence of felts.
pub trait CairoSerde {
    /// The corresponding Rust type.
    type RustType;

    /// The serialized size of the type in felts, if known at compile time.
    const SERIALIZED_SIZE: Option<usize> = Some(1);

    /// Whether the serialized size is dynamic.
    const DYNAMIC: bool = Self::SERIALIZED_SIZE.is_none();

    /// Appends the serialized form of `rust` to `out`.
    fn cairo_serialize_to(rust: &Self::RustType, out: &mut Vec<Felt>);

    /// Serializes the given value into a new felt sequence.
    fn cairo_serialize(rust: &Self::RustType) -> Vec<Felt> {
        let mut out = Vec::with_capacity(Self::SERIALIZED_SIZE.unwrap_or(1));
        Self::cairo_serialize_to(rust, &mut out);
        out
    }

    /// Deserializes a value from the reader, advancing it past the consumed felts.
    fn cairo_deserialize(reader: &mut FeltReader<'_>) -> Result<Self::RustType>;
}

/// Deserializes a single value from the start of `felts`.
///
/// Trailing felts are ignored, use a [`FeltReader`] directly to consume
/// several values in sequence.
pub fn from_felts<T: CairoSerde>(felts: &[Felt]) -> Result<T::RustType> {
    let mut reader = FeltReader::new(felts);
    T::cairo_deserialize(&mut reader)
}
