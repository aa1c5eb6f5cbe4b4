//! Parsing of Cairo contract ABIs.
//!
//! Two levels are provided:
//!
//! * [`TypeDescriptor`]: a Cairo type string (`core::array::Array::<core::felt252>`,
//!   `(u8, bool)`, `mymodule::MyStruct`...) parsed into a structured descriptor.
//!   Structs and enums are kept as unresolved [`Composite`] references.
//! * [`ParsedAbi`]: the index built once from the ABI entries of a contract, used
//!   to resolve composite references and to find functions and events by name
//!   or by selector.
//!
//! The [`hash`] module bridges to the Starknet hash primitives used to derive
//! selectors.
mod error;
pub use error::{Error, ParserResult};

mod abi;
pub use crate::abi::index::{
    Enum, Event, EventKind, EventMember, EventMemberKind, Function, FunctionKind, Impl, Member,
    ParsedAbi, Resolved, StateMutability, Struct,
};
pub use crate::abi::parser::AbiParser;

pub mod descriptor;
pub use descriptor::{Array, ArrayKind, Composite, FixedArray, Primitive, Tuple, TypeDescriptor};

pub mod hash;
pub use hash::{compute_selector, compute_selector_hex, hash_many, HashFunction};
