//! Selectors and array hashes.
//!
//! Thin bridge over the hash primitives of `starknet` and `starknet-types-core`.
use starknet::core::types::Felt;
use starknet::core::utils::get_selector_from_name;
use starknet_types_core::hash::{Pedersen, Poseidon, StarkHash};

use crate::{Error, ParserResult};

/// Hash function used by [`hash_many`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    #[default]
    Pedersen,
    Poseidon,
}

/// Computes the selector of an entry point or event name, as Starknet does
/// (`starknet_keccak` of the name, truncated to 250 bits).
///
/// `__default__` and `__l1_default__` are special entry points with a zero selector.
pub fn compute_selector(name: &str) -> ParserResult<Felt> {
    get_selector_from_name(name).map_err(|_| Error::Selector(name.to_string()))
}

/// Same as [`compute_selector`], formatted as a `0x` prefixed, 64 digits hex string.
pub fn compute_selector_hex(name: &str) -> ParserResult<String> {
    Ok(felt_to_padded_hex(&compute_selector(name)?))
}

/// Hashes a felt array.
///
/// Pedersen follows the `compute_hash_on_elements` convention, the array
/// length is hashed last. Poseidon uses `poseidon_hash_many`.
pub fn hash_many(function: HashFunction, felts: &[Felt]) -> Felt {
    match function {
        HashFunction::Pedersen => Pedersen::hash_array(felts),
        HashFunction::Poseidon => Poseidon::hash_array(felts),
    }
}

/// Felt as a `0x` prefixed, zero padded 64 digits hex string.
pub fn felt_to_padded_hex(felt: &Felt) -> String {
    let mut s = String::with_capacity(66);
    s.push_str("0x");
    for b in felt.to_bytes_be() {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALANCE_OF: &str = "0x02e4263afad30923c891518314c3c95dbe830a16874e8abc5777a9a20b54c76e";

    #[test]
    fn test_compute_selector_known_value() {
        assert_eq!(
            compute_selector("balanceOf").unwrap(),
            Felt::from_hex(BALANCE_OF).unwrap()
        );
        assert_eq!(compute_selector_hex("balanceOf").unwrap(), BALANCE_OF);
    }

    #[test]
    fn test_compute_selector_is_deterministic() {
        assert_eq!(
            compute_selector("transfer").unwrap(),
            compute_selector("transfer").unwrap()
        );
        assert_ne!(
            compute_selector("transfer").unwrap(),
            compute_selector("transfer_from").unwrap()
        );
    }

    #[test]
    fn test_compute_selector_default_entry_point() {
        assert_eq!(compute_selector("__default__").unwrap(), Felt::ZERO);
    }

    #[test]
    fn test_compute_selector_non_ascii() {
        assert!(matches!(
            compute_selector("balanceOfé"),
            Err(Error::Selector(_))
        ));
    }

    #[test]
    fn test_hash_many_empty_pedersen() {
        // pedersen(pedersen(0, ...), len) with no element is pedersen(0, 0).
        assert_eq!(
            hash_many(HashFunction::Pedersen, &[]),
            Pedersen::hash(&Felt::ZERO, &Felt::ZERO)
        );
    }

    #[test]
    fn test_hash_many_functions_differ() {
        let felts = [Felt::ONE, Felt::TWO, Felt::THREE];
        assert_ne!(
            hash_many(HashFunction::Pedersen, &felts),
            hash_many(HashFunction::Poseidon, &felts)
        );
    }

    #[test]
    fn test_felt_to_padded_hex() {
        assert_eq!(
            felt_to_padded_hex(&Felt::from(0xabc_u32)),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
    }
}
