/// Builtin types with a fixed wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Felt,
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    ContractAddress,
    ClassHash,
    StorageAddress,
    EthAddress,
    Bytes31,
    ByteArray,
    ShortString,
    Selector,
    Timestamp,
    Unit,
}

/// Every accepted spelling, short names first.
const SPELLINGS: [(&str, Primitive); 46] = [
    ("felt", Primitive::Felt),
    ("felt252", Primitive::Felt),
    ("core::felt252", Primitive::Felt),
    ("bool", Primitive::Bool),
    ("core::bool", Primitive::Bool),
    ("u8", Primitive::U8),
    ("core::integer::u8", Primitive::U8),
    ("u16", Primitive::U16),
    ("core::integer::u16", Primitive::U16),
    ("u32", Primitive::U32),
    ("core::integer::u32", Primitive::U32),
    ("u64", Primitive::U64),
    ("core::integer::u64", Primitive::U64),
    ("u128", Primitive::U128),
    ("core::integer::u128", Primitive::U128),
    ("usize", Primitive::Usize),
    ("core::integer::usize", Primitive::Usize),
    ("u256", Primitive::U256),
    ("core::integer::u256", Primitive::U256),
    ("i8", Primitive::I8),
    ("core::integer::i8", Primitive::I8),
    ("i16", Primitive::I16),
    ("core::integer::i16", Primitive::I16),
    ("i32", Primitive::I32),
    ("core::integer::i32", Primitive::I32),
    ("i64", Primitive::I64),
    ("core::integer::i64", Primitive::I64),
    ("i128", Primitive::I128),
    ("core::integer::i128", Primitive::I128),
    ("ContractAddress", Primitive::ContractAddress),
    ("core::starknet::contract_address::ContractAddress", Primitive::ContractAddress),
    ("ClassHash", Primitive::ClassHash),
    ("core::starknet::class_hash::ClassHash", Primitive::ClassHash),
    ("StorageAddress", Primitive::StorageAddress),
    ("core::starknet::storage_access::StorageAddress", Primitive::StorageAddress),
    ("EthAddress", Primitive::EthAddress),
    ("core::starknet::eth_address::EthAddress", Primitive::EthAddress),
    ("bytes31", Primitive::Bytes31),
    ("core::bytes_31::bytes31", Primitive::Bytes31),
    ("ByteArray", Primitive::ByteArray),
    ("core::byte_array::ByteArray", Primitive::ByteArray),
    ("shortstring", Primitive::ShortString),
    ("selector", Primitive::Selector),
    ("timestamp", Primitive::Timestamp),
    ("()", Primitive::Unit),
    ("unit", Primitive::Unit),
];

impl Primitive {
    /// Exact match of a short or fully qualified name.
    pub fn parse(type_path: &str) -> Option<Self> {
        SPELLINGS
            .iter()
            .find(|(name, _)| *name == type_path)
            .map(|(_, p)| *p)
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Felt => "core::felt252",
            Primitive::Bool => "core::bool",
            Primitive::U8 => "core::integer::u8",
            Primitive::U16 => "core::integer::u16",
            Primitive::U32 => "core::integer::u32",
            Primitive::U64 => "core::integer::u64",
            Primitive::U128 => "core::integer::u128",
            Primitive::Usize => "core::integer::usize",
            Primitive::U256 => "core::integer::u256",
            Primitive::I8 => "core::integer::i8",
            Primitive::I16 => "core::integer::i16",
            Primitive::I32 => "core::integer::i32",
            Primitive::I64 => "core::integer::i64",
            Primitive::I128 => "core::integer::i128",
            Primitive::ContractAddress => "core::starknet::contract_address::ContractAddress",
            Primitive::ClassHash => "core::starknet::class_hash::ClassHash",
            Primitive::StorageAddress => "core::starknet::storage_access::StorageAddress",
            Primitive::EthAddress => "core::starknet::eth_address::EthAddress",
            Primitive::Bytes31 => "core::bytes_31::bytes31",
            Primitive::ByteArray => "core::byte_array::ByteArray",
            Primitive::ShortString => "shortstring",
            Primitive::Selector => "selector",
            Primitive::Timestamp => "timestamp",
            Primitive::Unit => "()",
        }
    }

    /// Values carried as a raw felt, with no integer semantic.
    pub fn is_felt_like(&self) -> bool {
        matches!(
            self,
            Primitive::Felt
                | Primitive::ContractAddress
                | Primitive::ClassHash
                | Primitive::StorageAddress
                | Primitive::EthAddress
                | Primitive::Bytes31
                | Primitive::ShortString
                | Primitive::Selector
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Primitive::U8
                | Primitive::U16
                | Primitive::U32
                | Primitive::U64
                | Primitive::U128
                | Primitive::Usize
                | Primitive::U256
                | Primitive::I8
                | Primitive::I16
                | Primitive::I32
                | Primitive::I64
                | Primitive::I128
                | Primitive::Timestamp
        )
    }

    /// Number of felts of the serialized value, `None` if it depends on the value.
    pub fn serialized_size(&self) -> Option<usize> {
        match self {
            Primitive::Unit => Some(0),
            Primitive::U256 => Some(2),
            Primitive::ByteArray => None,
            _ => Some(1),
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
