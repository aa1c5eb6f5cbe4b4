//! Value decoder: felts to [`Value`], driven by a [`TypeDescriptor`].
//!
//! All the decoding functions share one [`FeltReader`] per call tree. An error
//! reports the offset at which the failing value started.
use num_bigint::BigInt;
use snabi_cairo_serde::{
    ByteArray, Bytes31, CairoSerde, EthAddress, FeltReader, ShortString, U256,
    OPTION_NONE_DISCRIMINANT, OPTION_SOME_DISCRIMINANT,
};
use snabi_parser::{Composite, Member, ParsedAbi, Primitive, Resolved, TypeDescriptor};
use starknet::core::types::Felt;

use crate::{CodecResult, Error, Value};

/// Most elements a zero sized array may declare.
const ZERO_SIZED_ELEMENTS_LIMIT: usize = 1 << 16;

/// Deepest type nesting accepted when sizing a type.
const MAX_TYPE_DEPTH: usize = 64;

/// Decodes one value from the start of `felts`.
///
/// Felts left after the value are ignored.
pub fn decode_value(
    felts: &[Felt],
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
) -> CodecResult<Value> {
    let mut reader = FeltReader::new(felts);
    let value = decode_by_type(&mut reader, ty, abi)?;
    log_trailing(&reader);
    Ok(value)
}

/// Decodes the values of the members in sequence, paired with the member names.
pub fn decode_args(
    felts: &[Felt],
    members: &[Member],
    abi: &ParsedAbi,
) -> CodecResult<Vec<(String, Value)>> {
    let mut reader = FeltReader::new(felts);

    let mut values = Vec::with_capacity(members.len());
    for m in members {
        values.push((m.name.clone(), decode_by_type(&mut reader, &m.ty, abi)?));
    }

    log_trailing(&reader);
    Ok(values)
}

/// Decodes the calldata of a function, found by name or selector.
pub fn decode_calldata(
    abi: &ParsedAbi,
    function: &str,
    felts: &[Felt],
) -> CodecResult<Vec<(String, Value)>> {
    let f = abi.function(function)?;
    tracing::debug!(function = %f.name, felts = felts.len(), "decoding calldata");

    decode_args(felts, &f.inputs, abi)
}

/// Decodes the values returned by a function, found by name or selector.
pub fn decode_outputs(
    abi: &ParsedAbi,
    function: &str,
    felts: &[Felt],
) -> CodecResult<Vec<Value>> {
    let f = abi.function(function)?;
    tracing::debug!(function = %f.name, felts = felts.len(), "decoding outputs");

    let mut reader = FeltReader::new(felts);

    let mut values = Vec::with_capacity(f.outputs.len());
    for o in &f.outputs {
        values.push(decode_by_type(&mut reader, o, abi)?);
    }

    log_trailing(&reader);
    Ok(values)
}

/// Decodes one value at the reader position, advancing it.
pub fn decode_by_type(
    reader: &mut FeltReader<'_>,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
) -> CodecResult<Value> {
    let offset = reader.offset();
    tracing::trace!(kind = ty.kind_name(), offset, "decode");

    match ty {
        TypeDescriptor::Primitive(p) => {
            decode_primitive(reader, *p).map_err(|e| Error::decode(ty, offset, e))
        }
        TypeDescriptor::Array(a) => {
            let len = reader
                .read::<u32>()
                .map_err(|e| Error::decode(ty, offset, e))?;

            decode_elements(reader, &a.inner, len as usize, ty, offset, abi).map(Value::Array)
        }
        TypeDescriptor::FixedArray(a) => {
            decode_elements(reader, &a.inner, a.len, ty, offset, abi).map(Value::Array)
        }
        TypeDescriptor::Tuple(t) => {
            let mut items = Vec::with_capacity(t.inners.len());
            for inner in &t.inners {
                items.push(decode_by_type(reader, inner, abi)?);
            }
            Ok(Value::Tuple(items))
        }
        TypeDescriptor::Option(inner) => {
            let discriminant = reader
                .next_felt()
                .map_err(|e| Error::decode(ty, offset, e))?;

            if discriminant == OPTION_SOME_DISCRIMINANT {
                Ok(Value::some(decode_by_type(reader, inner, abi)?))
            } else if discriminant == OPTION_NONE_DISCRIMINANT {
                Ok(Value::none())
            } else {
                Err(Error::decode(
                    ty,
                    offset,
                    format!("invalid option discriminant {:#x}", discriminant),
                ))
            }
        }
        TypeDescriptor::NonZero(inner) => {
            let value = decode_by_type(reader, inner, abi)?;

            if value.is_zero() {
                return Err(Error::decode(ty, offset, "value must not be zero"));
            }
            Ok(value)
        }
        TypeDescriptor::Composite(c) => decode_composite(reader, c, ty, abi),
    }
}

/// Decodes `len` elements, after checking that the remaining felts can hold them.
fn decode_elements(
    reader: &mut FeltReader<'_>,
    inner: &TypeDescriptor,
    len: usize,
    ty: &TypeDescriptor,
    offset: usize,
    abi: &ParsedAbi,
) -> CodecResult<Vec<Value>> {
    if len == 0 {
        return Ok(vec![]);
    }

    let min_size = min_serialized_size(inner, abi, 0)?;

    if min_size == 0 {
        // Zero sized elements all decode to the same value.
        if len > ZERO_SIZED_ELEMENTS_LIMIT {
            return Err(Error::decode(
                ty,
                offset,
                format!(
                    "length {} of zero sized elements exceeds {}",
                    len, ZERO_SIZED_ELEMENTS_LIMIT
                ),
            ));
        }

        let item = decode_by_type(reader, inner, abi)?;
        return Ok(vec![item; len]);
    }

    if len.saturating_mul(min_size) > reader.remaining() {
        return Err(Error::decode(
            ty,
            offset,
            format!(
                "length {} needs at least {} felt(s), {} remaining",
                len,
                len.saturating_mul(min_size),
                reader.remaining()
            ),
        ));
    }

    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(decode_by_type(reader, inner, abi)?);
    }
    Ok(items)
}

/// Lowest number of felts a value of this type can be serialized to.
///
/// Zero only for types that never take any felt: unit, empty tuples and
/// structs, and fixed size arrays of those.
fn min_serialized_size(
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
    depth: usize,
) -> CodecResult<usize> {
    if depth > MAX_TYPE_DEPTH {
        return Err(Error::decode(ty, 0, "type nesting too deep"));
    }

    let size = match ty {
        TypeDescriptor::Primitive(Primitive::Unit) => 0,
        TypeDescriptor::Primitive(Primitive::U256) => 2,
        // Full words count, pending word and its length.
        TypeDescriptor::Primitive(Primitive::ByteArray) => 3,
        TypeDescriptor::Primitive(_) => 1,
        // Length prefix, or discriminant.
        TypeDescriptor::Array(_) | TypeDescriptor::Option(_) => 1,
        TypeDescriptor::FixedArray(a) => {
            a.len.saturating_mul(min_serialized_size(&a.inner, abi, depth + 1)?)
        }
        TypeDescriptor::Tuple(t) => {
            let mut size = 0_usize;
            for inner in &t.inners {
                size = size.saturating_add(min_serialized_size(inner, abi, depth + 1)?);
            }
            size
        }
        TypeDescriptor::NonZero(inner) => min_serialized_size(inner, abi, depth + 1)?,
        TypeDescriptor::Composite(c) => match abi.resolve(c) {
            Some(Resolved::Enum(_)) => 1,
            Some(Resolved::Struct(s)) => {
                let mut size = 0_usize;
                for m in &s.members {
                    size = size.saturating_add(min_serialized_size(&m.ty, abi, depth + 1)?);
                }
                size
            }
            None => return Err(Error::composite_not_found(&c.type_path)),
        },
    };

    Ok(size)
}

/// A composite is decoded as an enum if the index knows an enum by this name,
/// and as a struct otherwise.
fn decode_composite(
    reader: &mut FeltReader<'_>,
    c: &Composite,
    ty: &TypeDescriptor,
    abi: &ParsedAbi,
) -> CodecResult<Value> {
    let offset = reader.offset();

    match abi.resolve(c) {
        Some(Resolved::Struct(s)) => {
            let mut members = Vec::with_capacity(s.members.len());
            for m in &s.members {
                members.push((m.name.clone(), decode_by_type(reader, &m.ty, abi)?));
            }
            Ok(Value::Struct(members))
        }
        Some(Resolved::Enum(e)) => {
            let discriminant = reader
                .next_felt()
                .map_err(|e| Error::decode(ty, offset, e))?;

            let variant = u128::try_from(discriminant)
                .ok()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| e.variants.get(i))
                .ok_or_else(|| {
                    Error::decode(
                        ty,
                        offset,
                        format!(
                            "variant index {:#x} out of range, enum has {} variant(s)",
                            discriminant,
                            e.variants.len()
                        ),
                    )
                })?;

            let value = if variant.ty.is_unit() {
                None
            } else {
                Some(decode_by_type(reader, &variant.ty, abi)?)
            };

            Ok(Value::variant(&variant.name, value))
        }
        None => Err(Error::composite_not_found(&c.type_path)),
    }
}

fn decode_primitive(
    reader: &mut FeltReader<'_>,
    p: Primitive,
) -> snabi_cairo_serde::Result<Value> {
    let value = match p {
        Primitive::Unit => Value::unit(),
        Primitive::Felt
        | Primitive::ContractAddress
        | Primitive::ClassHash
        | Primitive::StorageAddress
        | Primitive::Selector => Value::Felt(reader.next_felt()?),
        Primitive::EthAddress => Value::Felt(reader.read::<EthAddress>()?.0),
        Primitive::Bytes31 => Value::Felt(reader.read::<Bytes31>()?.felt()),
        Primitive::Bool => Value::Bool(reader.read::<bool>()?),
        Primitive::U8 => Value::from(reader.read::<u8>()?),
        Primitive::U16 => Value::from(reader.read::<u16>()?),
        Primitive::U32 | Primitive::Usize => Value::from(reader.read::<u32>()?),
        Primitive::U64 | Primitive::Timestamp => Value::from(reader.read::<u64>()?),
        Primitive::U128 => Value::from(reader.read::<u128>()?),
        Primitive::I8 => Value::from(reader.read::<i8>()?),
        Primitive::I16 => Value::from(reader.read::<i16>()?),
        Primitive::I32 => Value::from(reader.read::<i32>()?),
        Primitive::I64 => Value::from(reader.read::<i64>()?),
        Primitive::I128 => Value::from(reader.read::<i128>()?),
        Primitive::U256 => Value::Int(BigInt::from(reader.read::<U256>()?.to_biguint())),
        Primitive::ShortString => {
            Value::String(reader.read::<ShortString>()?.as_str().to_string())
        }
        Primitive::ByteArray => Value::String(reader.read::<ByteArray>()?.to_string()?),
    };

    Ok(value)
}

fn log_trailing(reader: &FeltReader<'_>) {
    if !reader.is_empty() {
        tracing::debug!(remaining = reader.remaining(), "trailing felts ignored");
    }
}
