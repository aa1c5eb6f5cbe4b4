//! Value encoder: [`Value`] to calldata felts, driven by a [`TypeDescriptor`].
use num_bigint::{BigInt, Sign, ToBigUint};
use snabi_cairo_serde::{
    ByteArray, Bytes31, CairoSerde, EthAddress, ShortString, U256, OPTION_NONE_DISCRIMINANT,
    OPTION_SOME_DISCRIMINANT,
};
use snabi_parser::{
    compute_selector, Composite, Enum, Member, ParsedAbi, Primitive, Resolved, Struct,
    TypeDescriptor,
};
use starknet::core::types::Felt;
use std::collections::HashMap;

use crate::value::{felt_from_bigint, parse_bigint};
use crate::{CodecResult, Error, Value};

/// Encodes one value of the given type.
pub fn encode_value(
    value: &Value,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
) -> CodecResult<Vec<Felt>> {
    let mut out = vec![];
    encode_value_to(value, ty, abi, &mut out)?;
    Ok(out)
}

/// Encodes values positionally against the members, concatenated.
pub fn encode_args(
    values: &[Value],
    members: &[Member],
    abi: &ParsedAbi,
) -> CodecResult<Vec<Felt>> {
    if values.len() != members.len() {
        return Err(Error::Arguments(format!(
            "expected {} argument(s), got {}",
            members.len(),
            values.len()
        )));
    }

    let mut out = vec![];
    for (v, m) in values.iter().zip(members) {
        encode_value_to(v, &m.ty, abi, &mut out)?;
    }

    Ok(out)
}

/// Encodes the calldata of a function, found by name or selector.
pub fn encode_calldata(
    abi: &ParsedAbi,
    function: &str,
    args: &[Value],
) -> CodecResult<Vec<Felt>> {
    let f = abi.function(function)?;
    tracing::debug!(function = %f.name, args = args.len(), "encoding calldata");

    encode_args(args, &f.inputs, abi)
}

/// Encodes the calldata of a function from arguments given by name.
pub fn encode_calldata_named(
    abi: &ParsedAbi,
    function: &str,
    args: &HashMap<String, Value>,
) -> CodecResult<Vec<Felt>> {
    let f = abi.function(function)?;
    tracing::debug!(function = %f.name, args = args.len(), "encoding named calldata");

    let mut out = vec![];
    for m in &f.inputs {
        let v = args
            .get(&m.name)
            .ok_or_else(|| Error::Arguments(format!("missing argument `{}`", m.name)))?;
        encode_value_to(v, &m.ty, abi, &mut out)?;
    }

    if let Some(unknown) = args.keys().find(|k| !f.inputs.iter().any(|m| &m.name == *k)) {
        return Err(Error::Arguments(format!("unknown argument `{}`", unknown)));
    }

    Ok(out)
}

/// Appends the encoding of `value` to `out`.
pub fn encode_value_to(
    value: &Value,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
    out: &mut Vec<Felt>,
) -> CodecResult<()> {
    tracing::trace!(kind = ty.kind_name(), "encode");

    match ty {
        TypeDescriptor::Primitive(p) => encode_primitive(value, *p, ty, out),
        TypeDescriptor::Array(a) => {
            let Value::Array(items) = value else {
                return Err(shape_error(ty, "an array", value));
            };

            let len = u32::try_from(items.len())
                .map_err(|_| Error::encode(ty, "array length exceeds u32"))?;
            out.push(Felt::from(len));

            for item in items {
                encode_value_to(item, &a.inner, abi, out)?;
            }
            Ok(())
        }
        TypeDescriptor::FixedArray(a) => {
            let Value::Array(items) = value else {
                return Err(shape_error(ty, "an array", value));
            };

            if items.len() != a.len {
                return Err(Error::encode(
                    ty,
                    format!("expected {} elements, got {}", a.len, items.len()),
                ));
            }

            for item in items {
                encode_value_to(item, &a.inner, abi, out)?;
            }
            Ok(())
        }
        TypeDescriptor::Tuple(t) => {
            let Value::Tuple(items) = value else {
                return Err(shape_error(ty, "a tuple", value));
            };

            if items.len() != t.inners.len() {
                return Err(Error::encode(
                    ty,
                    format!("expected {} members, got {}", t.inners.len(), items.len()),
                ));
            }

            for (item, inner) in items.iter().zip(&t.inners) {
                encode_value_to(item, inner, abi, out)?;
            }
            Ok(())
        }
        TypeDescriptor::Option(inner) => match value {
            Value::Option(None) => {
                out.push(OPTION_NONE_DISCRIMINANT);
                Ok(())
            }
            Value::Option(Some(v)) => {
                out.push(OPTION_SOME_DISCRIMINANT);
                encode_value_to(v, inner, abi, out)
            }
            _ => Err(shape_error(ty, "an option", value)),
        },
        TypeDescriptor::NonZero(inner) => {
            let start = out.len();
            encode_value_to(value, inner, abi, out)?;

            if out[start..].iter().all(|f| *f == Felt::ZERO) {
                return Err(Error::encode(ty, "value must not be zero"));
            }
            Ok(())
        }
        TypeDescriptor::Composite(c) => encode_composite(value, c, ty, abi, out),
    }
}

fn encode_composite(
    value: &Value,
    c: &Composite,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
    out: &mut Vec<Felt>,
) -> CodecResult<()> {
    match abi.resolve(c) {
        Some(Resolved::Enum(e)) => encode_enum(value, e, ty, abi, out),
        Some(Resolved::Struct(s)) => encode_struct(value, s, ty, abi, out),
        None => Err(Error::composite_not_found(&c.type_path)),
    }
}

fn encode_struct(
    value: &Value,
    s: &Struct,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
    out: &mut Vec<Felt>,
) -> CodecResult<()> {
    match value {
        Value::Struct(fields) => {
            for m in &s.members {
                let v = value
                    .get(&m.name)
                    .ok_or_else(|| Error::encode(ty, format!("missing member `{}`", m.name)))?;
                encode_value_to(v, &m.ty, abi, out)?;
            }

            if let Some((unknown, _)) = fields
                .iter()
                .find(|(n, _)| !s.members.iter().any(|m| &m.name == n))
            {
                return Err(Error::encode(ty, format!("unknown member `{}`", unknown)));
            }

            Ok(())
        }
        // Members given positionally.
        Value::Tuple(items) if items.len() == s.members.len() => {
            for (v, m) in items.iter().zip(&s.members) {
                encode_value_to(v, &m.ty, abi, out)?;
            }
            Ok(())
        }
        _ => Err(shape_error(ty, "a struct", value)),
    }
}

fn encode_enum(
    value: &Value,
    e: &Enum,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
    out: &mut Vec<Felt>,
) -> CodecResult<()> {
    let Value::Enum { variant, value: payload } = value else {
        return Err(shape_error(ty, "an enum variant", value));
    };

    let index = e
        .variant_index(variant)
        .ok_or_else(|| Error::encode(ty, format!("unknown variant `{}`", variant)))?;
    out.push(Felt::from(index));

    let v = &e.variants[index];

    if v.ty.is_unit() {
        return match payload.as_deref() {
            None => Ok(()),
            Some(p) if p.is_unit() => Ok(()),
            Some(_) => Err(Error::encode(
                ty,
                format!("variant `{}` takes no payload", variant),
            )),
        };
    }

    let payload = payload
        .as_deref()
        .ok_or_else(|| Error::encode(ty, format!("variant `{}` expects a payload", variant)))?;
    encode_value_to(payload, &v.ty, abi, out)
}

fn encode_primitive(
    value: &Value,
    p: Primitive,
    ty: &TypeDescriptor,
    out: &mut Vec<Felt>,
) -> CodecResult<()> {
    macro_rules! serialize_int {
        ($type:ty, $n:expr) => {{
            let n: &BigInt = $n;
            let v = <$type>::try_from(n)
                .map_err(|_| Error::encode(ty, format!("{} is out of range", n)))?;
            <$type>::cairo_serialize_to(&v, out);
        }};
    }

    match p {
        Primitive::Unit => {
            if !value.is_unit() {
                return Err(shape_error(ty, "unit", value));
            }
        }
        Primitive::Bool => {
            let b = match value {
                Value::Bool(b) => *b,
                _ => match value.as_bigint() {
                    Some(n) if n == BigInt::from(0) => false,
                    Some(n) if n == BigInt::from(1) => true,
                    _ => return Err(shape_error(ty, "a boolean", value)),
                },
            };
            bool::cairo_serialize_to(&b, out);
        }
        Primitive::U256 => {
            let n = match value {
                // `u256` as its Cairo struct.
                Value::Struct(_) => {
                    let limb = |name: &str| -> CodecResult<BigInt> {
                        value.get(name).and_then(Value::as_bigint).ok_or_else(|| {
                            Error::encode(ty, format!("missing integer member `{}`", name))
                        })
                    };
                    let low = u128::try_from(&limb("low")?)
                        .map_err(|_| Error::encode(ty, "low is out of range"))?;
                    let high = u128::try_from(&limb("high")?)
                        .map_err(|_| Error::encode(ty, "high is out of range"))?;
                    U256::cairo_serialize_to(&U256 { low, high }, out);
                    return Ok(());
                }
                _ => integer(value, ty)?,
            };

            let n = n
                .to_biguint()
                .ok_or_else(|| Error::encode(ty, format!("{} is negative", n)))?;
            let u = U256::try_from(&n).map_err(|e| Error::encode(ty, e))?;
            U256::cairo_serialize_to(&u, out);
        }
        Primitive::U8 => serialize_int!(u8, &integer(value, ty)?),
        Primitive::U16 => serialize_int!(u16, &integer(value, ty)?),
        Primitive::U32 | Primitive::Usize => serialize_int!(u32, &integer(value, ty)?),
        Primitive::U64 | Primitive::Timestamp => serialize_int!(u64, &integer(value, ty)?),
        Primitive::U128 => serialize_int!(u128, &integer(value, ty)?),
        Primitive::I8 => serialize_int!(i8, &integer(value, ty)?),
        Primitive::I16 => serialize_int!(i16, &integer(value, ty)?),
        Primitive::I32 => serialize_int!(i32, &integer(value, ty)?),
        Primitive::I64 => serialize_int!(i64, &integer(value, ty)?),
        Primitive::I128 => serialize_int!(i128, &integer(value, ty)?),
        Primitive::Felt => {
            let felt = match value {
                Value::Int(n) => signed_felt(n),
                // Only non numeric strings are packed as short strings.
                Value::String(s) => match parse_bigint(s) {
                    Some(n) => signed_felt(&n),
                    None => {
                        let s = ShortString::new(s).map_err(|e| Error::encode(ty, e))?;
                        Some(s.felt())
                    }
                },
                _ => value.as_felt(),
            };
            out.push(felt.ok_or_else(|| shape_error(ty, "a felt in field range", value))?);
        }
        Primitive::ContractAddress | Primitive::ClassHash | Primitive::StorageAddress => {
            out.push(felt(value, ty)?);
        }
        Primitive::EthAddress => {
            let a = EthAddress::new(felt(value, ty)?).map_err(|e| Error::encode(ty, e))?;
            EthAddress::cairo_serialize_to(&a, out);
        }
        Primitive::Bytes31 => {
            let b = Bytes31::new(felt(value, ty)?).map_err(|e| Error::encode(ty, e))?;
            Bytes31::cairo_serialize_to(&b, out);
        }
        Primitive::ShortString => {
            let felt = match value {
                Value::String(s) => ShortString::new(s).map_err(|e| Error::encode(ty, e))?.felt(),
                _ => felt(value, ty)?,
            };
            out.push(felt);
        }
        Primitive::Selector => {
            let felt = match value {
                Value::String(s) if parse_bigint(s).is_none() => {
                    compute_selector(s).map_err(|e| Error::encode(ty, e))?
                }
                _ => felt(value, ty)?,
            };
            out.push(felt);
        }
        Primitive::ByteArray => {
            let Value::String(s) = value else {
                return Err(shape_error(ty, "a string", value));
            };
            ByteArray::cairo_serialize_to(&ByteArray::from_string(s), out);
        }
    }

    Ok(())
}

fn integer(value: &Value, ty: &TypeDescriptor) -> CodecResult<BigInt> {
    match value {
        Value::Int(_) | Value::Felt(_) | Value::String(_) => value
            .as_bigint()
            .ok_or_else(|| shape_error(ty, "an integer", value)),
        _ => Err(shape_error(ty, "an integer", value)),
    }
}

/// Felt of an integer in `(-P, P)`, negative values being negated in the field.
fn signed_felt(n: &BigInt) -> Option<Felt> {
    match n.sign() {
        Sign::Minus => felt_from_bigint(&-n).map(|f| -f),
        _ => felt_from_bigint(n),
    }
}

fn felt(value: &Value, ty: &TypeDescriptor) -> CodecResult<Felt> {
    value
        .as_felt()
        .ok_or_else(|| shape_error(ty, "a felt in field range", value))
}

fn shape_error(ty: &TypeDescriptor, expected: &str, value: &Value) -> Error {
    Error::encode(ty, format!("expected {}, got {:?}", expected, value))
}
