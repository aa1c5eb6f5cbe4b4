//! JSON bridge.
//!
//! JSON arguments are converted to [`Value`]s following the expected type, so
//! that objects become structs or enum variants, `null` becomes `None`, and
//! numbers or strings become integers or felts. The JSON output of a [`Value`]
//! is given by its `Serialize` implementation.
use num_bigint::BigInt;
use serde_json::Value as JsonValue;
use snabi_parser::{ParsedAbi, Primitive, Resolved, TypeDescriptor};
use starknet::core::types::Felt;
use std::collections::HashMap;

use crate::{encode_calldata, encode_calldata_named, CodecResult, Error, Value};

static NULL: JsonValue = JsonValue::Null;

/// Converts a JSON value to a [`Value`] of the given type.
pub fn value_from_json(
    json: &JsonValue,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
) -> CodecResult<Value> {
    match ty {
        TypeDescriptor::Primitive(p) => primitive_from_json(json, *p, ty),
        TypeDescriptor::Array(a) => Ok(Value::Array(array_from_json(json, &a.inner, ty, abi)?)),
        TypeDescriptor::FixedArray(a) => {
            Ok(Value::Array(array_from_json(json, &a.inner, ty, abi)?))
        }
        TypeDescriptor::Tuple(t) => {
            let JsonValue::Array(items) = json else {
                return Err(json_error(ty, "an array", json));
            };

            if items.len() != t.inners.len() {
                return Err(Error::encode(
                    ty,
                    format!("expected {} members, got {}", t.inners.len(), items.len()),
                ));
            }

            items
                .iter()
                .zip(&t.inners)
                .map(|(j, inner)| value_from_json(j, inner, abi))
                .collect::<CodecResult<Vec<_>>>()
                .map(Value::Tuple)
        }
        TypeDescriptor::Option(inner) => match json {
            JsonValue::Null => Ok(Value::none()),
            _ => Ok(Value::some(value_from_json(json, inner, abi)?)),
        },
        TypeDescriptor::NonZero(inner) => value_from_json(json, inner, abi),
        TypeDescriptor::Composite(c) => match abi.resolve(c) {
            Some(Resolved::Struct(s)) => {
                let JsonValue::Object(fields) = json else {
                    return Err(json_error(ty, "an object", json));
                };

                if let Some(unknown) = fields
                    .keys()
                    .find(|k| !s.members.iter().any(|m| &m.name == *k))
                {
                    return Err(Error::encode(ty, format!("unknown member `{}`", unknown)));
                }

                let mut members = Vec::with_capacity(s.members.len());
                for m in &s.members {
                    let j = fields
                        .get(&m.name)
                        .ok_or_else(|| Error::encode(ty, format!("missing member `{}`", m.name)))?;
                    members.push((m.name.clone(), value_from_json(j, &m.ty, abi)?));
                }

                Ok(Value::Struct(members))
            }
            Some(Resolved::Enum(e)) => {
                // `"Variant"` for unit variants, `{ "Variant": payload }` otherwise.
                let (name, payload) = match json {
                    JsonValue::String(name) => (name, &NULL),
                    JsonValue::Object(o) if o.len() == 1 => match o.iter().next() {
                        Some((name, payload)) => (name, payload),
                        None => return Err(json_error(ty, "a single entry object", json)),
                    },
                    _ => return Err(json_error(ty, "a variant name or object", json)),
                };

                let variant = e
                    .variants
                    .iter()
                    .find(|v| &v.name == name)
                    .ok_or_else(|| Error::encode(ty, format!("unknown variant `{}`", name)))?;

                let value = if variant.ty.is_unit() {
                    None
                } else {
                    Some(value_from_json(payload, &variant.ty, abi)?)
                };

                Ok(Value::variant(name, value))
            }
            None => Err(Error::composite_not_found(&c.type_path)),
        },
    }
}

fn array_from_json(
    json: &JsonValue,
    inner: &TypeDescriptor,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
) -> CodecResult<Vec<Value>> {
    let JsonValue::Array(items) = json else {
        return Err(json_error(ty, "an array", json));
    };

    items.iter().map(|j| value_from_json(j, inner, abi)).collect()
}

fn primitive_from_json(
    json: &JsonValue,
    p: Primitive,
    ty: &TypeDescriptor,
) -> CodecResult<Value> {
    match (p, json) {
        (Primitive::Unit, JsonValue::Null) => Ok(Value::unit()),
        (Primitive::Unit, JsonValue::Array(a)) if a.is_empty() => Ok(Value::unit()),
        (Primitive::Bool, JsonValue::Bool(b)) => Ok(Value::Bool(*b)),
        (Primitive::U256, JsonValue::Object(o)) => {
            let limb = |name: &str| {
                o.get(name)
                    .and_then(number_from_json)
                    .map(Value::Int)
                    .ok_or_else(|| Error::encode(ty, format!("invalid member `{}`", name)))
            };
            Ok(Value::structure([("low", limb("low")?), ("high", limb("high")?)]))
        }
        (_, JsonValue::Number(_)) => number_from_json(json)
            .map(Value::Int)
            .ok_or_else(|| json_error(ty, "an integer", json)),
        // Left as is, the encoder parses numbers and packs short strings.
        (_, JsonValue::String(s)) => Ok(Value::String(s.clone())),
        _ => Err(json_error(ty, "a primitive value", json)),
    }
}

fn number_from_json(json: &JsonValue) -> Option<BigInt> {
    match json {
        JsonValue::Number(n) => n
            .as_u64()
            .map(BigInt::from)
            .or_else(|| n.as_i64().map(BigInt::from)),
        JsonValue::String(s) => crate::value::parse_bigint(s),
        _ => None,
    }
}

fn json_error(ty: &TypeDescriptor, expected: &str, json: &JsonValue) -> Error {
    Error::encode(ty, format!("expected {}, got JSON `{}`", expected, json))
}

/// Encodes the calldata of a function from JSON arguments, either an array
/// (positional) or an object (by name).
pub fn encode_calldata_json(
    abi: &ParsedAbi,
    function: &str,
    args: &JsonValue,
) -> CodecResult<Vec<Felt>> {
    let f = abi.function(function)?;

    match args {
        JsonValue::Array(items) => {
            if items.len() != f.inputs.len() {
                return Err(Error::Arguments(format!(
                    "expected {} argument(s), got {}",
                    f.inputs.len(),
                    items.len()
                )));
            }

            let values = items
                .iter()
                .zip(&f.inputs)
                .map(|(j, m)| value_from_json(j, &m.ty, abi))
                .collect::<CodecResult<Vec<_>>>()?;

            encode_calldata(abi, function, &values)
        }
        JsonValue::Object(o) => {
            let mut values = HashMap::new();
            for (name, j) in o {
                let m = f
                    .inputs
                    .iter()
                    .find(|m| &m.name == name)
                    .ok_or_else(|| Error::Arguments(format!("unknown argument `{}`", name)))?;
                values.insert(name.clone(), value_from_json(j, &m.ty, abi)?);
            }

            encode_calldata_named(abi, function, &values)
        }
        _ => Err(Error::Arguments(
            "arguments must be a JSON array or object".to_string(),
        )),
    }
}

/// Felts as a JSON array of `0x` hex strings.
pub fn felts_to_json(felts: &[Felt]) -> JsonValue {
    JsonValue::Array(
        felts
            .iter()
            .map(|f| JsonValue::String(format!("{:#x}", f)))
            .collect(),
    )
}
