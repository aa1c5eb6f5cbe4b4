//! Event decoding.
//!
//! An emitted event carries the selector of the event name as first key.
//! The members marked `key` follow in the keys, the other ones are in the data.
use serde::Serialize;
use snabi_cairo_serde::FeltReader;
use snabi_parser::{hash::felt_to_padded_hex, EventKind, EventMemberKind, ParsedAbi};
use starknet::core::types::Felt;

use crate::decoder::decode_by_type;
use crate::{CodecResult, Error, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    /// Full name of the event.
    pub name: String,
    /// Members in declaration order.
    pub members: Value,
}

/// Decodes an emitted struct event.
pub fn decode_event(abi: &ParsedAbi, keys: &[Felt], data: &[Felt]) -> CodecResult<DecodedEvent> {
    let selector = keys
        .first()
        .ok_or_else(|| Error::Arguments("event without keys".to_string()))?;

    let event = abi.get_event_by_selector(selector).ok_or(Error::Lookup {
        kind: "event",
        name: felt_to_padded_hex(selector),
    })?;
    tracing::debug!(event = %event.name, "decoding event");

    let EventKind::Struct(members) = &event.kind else {
        return Err(Error::Lookup {
            kind: "struct event",
            name: event.name.clone(),
        });
    };

    let mut keys_reader = FeltReader::new(&keys[1..]);
    let mut data_reader = FeltReader::new(data);

    let mut values = Vec::with_capacity(members.len());
    for m in members {
        let reader = match m.kind {
            EventMemberKind::Key => &mut keys_reader,
            EventMemberKind::Data | EventMemberKind::Nested | EventMemberKind::Flat => {
                &mut data_reader
            }
        };

        values.push((
            m.member.name.clone(),
            decode_by_type(reader, &m.member.ty, abi)?,
        ));
    }

    Ok(DecodedEvent {
        name: event.name.clone(),
        members: Value::Struct(values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snabi_parser::{compute_selector, AbiParser};

    fn abi() -> ParsedAbi {
        AbiParser::parse_abi(include_str!("../test_data/erc20.abi.json")).unwrap()
    }

    #[test]
    fn test_decode_transfer_event() {
        let keys = vec![
            compute_selector("Transfer").unwrap(),
            Felt::from(0x1_u8),
            Felt::from(0x2_u8),
        ];
        let data = vec![Felt::from(100_u8), Felt::ZERO];

        let e = decode_event(&abi(), &keys, &data).unwrap();
        assert_eq!(e.name, "erc20::ERC20::Transfer");
        assert_eq!(
            e.members,
            Value::structure([
                ("from", Value::Felt(Felt::ONE)),
                ("to", Value::Felt(Felt::TWO)),
                ("value", Value::from(100_u8)),
            ])
        );
    }

    #[test]
    fn test_decode_event_unknown_selector() {
        assert!(matches!(
            decode_event(&abi(), &[Felt::ONE], &[]),
            Err(Error::Lookup { kind: "event", .. })
        ));
        assert!(matches!(
            decode_event(&abi(), &[], &[]),
            Err(Error::Arguments(_))
        ));
    }

    #[test]
    fn test_decode_event_missing_key() {
        let keys = vec![compute_selector("Transfer").unwrap(), Felt::ONE];
        assert!(matches!(
            decode_event(&abi(), &keys, &[Felt::ONE, Felt::ZERO]),
            Err(Error::Decode { .. })
        ));
    }
}
