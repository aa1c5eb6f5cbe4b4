//! Dynamic Cairo ABI codec.
//!
//! Encodes [`Value`]s into calldata felts and decodes felts back, driven by
//! the type descriptors of a [`snabi_parser::ParsedAbi`]. Struct and enum
//! references are resolved against the ABI when a value is encoded or decoded.
//!
//! ```ignore
//! let abi = ParsedAbi::from_json(abi_json)?;
//! let calldata = encode_calldata(&abi, "transfer", &[recipient.into(), amount.into()])?;
//! let outputs = decode_outputs(&abi, "balanceOf", &result)?;
//! ```
mod error;
pub use error::{CodecResult, Error};

mod value;
pub use value::{felt_from_bigint, felt_to_bigint, parse_bigint, Value};

mod encoder;
pub use encoder::{
    encode_args, encode_calldata, encode_calldata_named, encode_value, encode_value_to,
};

mod decoder;
pub use decoder::{decode_args, decode_by_type, decode_calldata, decode_outputs, decode_value};

mod event;
pub use event::{decode_event, DecodedEvent};

pub mod json;

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use snabi_parser::{AbiParser, ParsedAbi, TypeDescriptor};
    use starknet::core::types::Felt;

    fn felt(hex: &str) -> Felt {
        Felt::from_hex(hex).unwrap()
    }

    fn erc20() -> ParsedAbi {
        AbiParser::parse_abi(include_str!("../test_data/erc20.abi.json")).unwrap()
    }

    fn roundtrip(value: Value, ty: &str, abi: &ParsedAbi) {
        let ty = TypeDescriptor::parse(ty).unwrap();
        let felts = encode_value(&value, &ty, abi).unwrap();
        assert_eq!(decode_value(&felts, &ty, abi).unwrap(), value);
    }

    #[test]
    fn test_balance_of_calldata_and_outputs() {
        let abi = erc20();

        let calldata = encode_calldata(&abi, "balanceOf", &[Value::Felt(felt("0xabc"))]).unwrap();
        assert_eq!(calldata, vec![felt("0xabc")]);
        assert_eq!(json::felts_to_json(&calldata), serde_json::json!(["0xabc"]));

        let outputs = decode_outputs(&abi, "balanceOf", &[felt("0x2"), felt("0x0")]).unwrap();
        assert_eq!(outputs, vec![Value::Int(BigInt::from(2))]);
    }

    #[test]
    fn test_calldata_by_selector() {
        let abi = erc20();
        let calldata = encode_calldata(
            &abi,
            "0x02e4263afad30923c891518314c3c95dbe830a16874e8abc5777a9a20b54c76e",
            &[Value::Felt(felt("0xabc"))],
        )
        .unwrap();
        assert_eq!(calldata, vec![felt("0xabc")]);
    }

    #[test]
    fn test_nested_u256_struct() {
        let abi = AbiParser::parse_abi(include_str!("../test_data/structs.abi.json")).unwrap();
        let ty = TypeDescriptor::parse("game::Account").unwrap();

        let account = Value::structure([
            ("owner", Value::Felt(felt("0x123"))),
            ("balance", Value::Int((BigInt::from(1) << 128) + 5)),
            ("nonce", Value::from(9_u64)),
        ]);

        let felts = encode_value(&account, &ty, &abi).unwrap();
        assert_eq!(felts, vec![felt("0x123"), felt("0x5"), felt("0x1"), felt("0x9")]);
        assert_eq!(decode_value(&felts, &ty, &abi).unwrap(), account);

        // The limbs can also be given as the Cairo struct.
        let with_limbs = Value::structure([
            ("owner", Value::Felt(felt("0x123"))),
            (
                "balance",
                Value::structure([("low", Value::from(5_u8)), ("high", Value::from(1_u8))]),
            ),
            ("nonce", Value::from(9_u64)),
        ]);
        assert_eq!(encode_value(&with_limbs, &ty, &abi).unwrap(), felts);
    }

    #[test]
    fn test_option_felt() {
        let abi = ParsedAbi::default();
        let ty = TypeDescriptor::parse("core::option::Option::<core::felt252>").unwrap();

        let none = encode_value(&Value::none(), &ty, &abi).unwrap();
        assert_eq!(none, vec![felt("0x1")]);
        assert_eq!(decode_value(&none, &ty, &abi).unwrap(), Value::none());

        let some = Value::some(Value::Felt(felt("0x5")));
        let encoded = encode_value(&some, &ty, &abi).unwrap();
        assert_eq!(encoded, vec![felt("0x0"), felt("0x5")]);
        assert_eq!(decode_value(&encoded, &ty, &abi).unwrap(), some);
    }

    #[test]
    fn test_array_length_fidelity() {
        let abi = ParsedAbi::default();
        let ty = TypeDescriptor::parse("core::array::Array::<core::integer::u32>").unwrap();

        let encoded = encode_value(&Value::from(vec![7_u32, 8, 9]), &ty, &abi).unwrap();
        assert_eq!(encoded[0], Felt::THREE);
        assert_eq!(encoded.len(), 4);
    }

    #[test]
    fn test_byte_array_chunking() {
        let abi = ParsedAbi::default();
        let ty = TypeDescriptor::parse("core::byte_array::ByteArray").unwrap();

        for k in 0..3 {
            for r in [0, 1, 30] {
                let s = "x".repeat(31 * k + r);
                let felts = encode_value(&Value::from(s.as_str()), &ty, &abi).unwrap();

                assert_eq!(felts[0], Felt::from(k));
                assert_eq!(felts[felts.len() - 1], Felt::from(r));
                assert_eq!(decode_value(&felts, &ty, &abi).unwrap(), Value::from(s));
            }
        }
    }

    #[test]
    fn test_roundtrips() {
        let abi = AbiParser::parse_abi(include_str!("../test_data/structs.abi.json")).unwrap();

        roundtrip(Value::Felt(Felt::MAX), "felt252", &abi);
        roundtrip(Value::Bool(true), "core::bool", &abi);
        roundtrip(Value::from(i128::MIN), "core::integer::i128", &abi);
        roundtrip(Value::from(u64::MAX), "core::integer::u64", &abi);
        roundtrip(Value::Int((BigInt::from(1) << 256) - 1), "core::integer::u256", &abi);
        roundtrip(Value::from("hello"), "shortstring", &abi);
        roundtrip(Value::from("🦀 crab"), "core::byte_array::ByteArray", &abi);
        roundtrip(Value::unit(), "()", &abi);
        roundtrip(
            Value::Tuple(vec![Value::from(1_u8), Value::from(vec![Value::none()])]),
            "(core::integer::u8, core::array::Span::<core::option::Option::<core::integer::u16>>)",
            &abi,
        );
        roundtrip(
            Value::from(vec![
                Value::variant("Left", None),
                Value::variant("Right", Some(Value::from(2_u8))),
            ]),
            "[game::Direction; 2]",
            &abi,
        );
        roundtrip(
            Value::variant("Ok", Some(Value::from(3_u8))),
            "core::result::Result::<core::integer::u8, core::felt252>",
            &abi,
        );
    }
}
