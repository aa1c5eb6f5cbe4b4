use syn::{Expr, ExprLit, Lit, TypeArray};

use super::{genericity, TypeDescriptor};
use crate::{Error, ParserResult};

pub const CAIRO_CORE_ARRAY: [&str; 2] = ["core::array::Array", "Array"];
// A span is technically a struct, but its wire format is the array one.
pub const CAIRO_CORE_SPAN: [&str; 2] = ["core::array::Span", "Span"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    Array,
    Span,
}

impl ArrayKind {
    pub(crate) fn from_base_path(base: &str) -> Option<Self> {
        if CAIRO_CORE_ARRAY.contains(&base) {
            Some(ArrayKind::Array)
        } else if CAIRO_CORE_SPAN.contains(&base) {
            Some(ArrayKind::Span)
        } else {
            None
        }
    }
}

/// Length prefixed sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    pub type_path: String,
    pub kind: ArrayKind,
    pub inner: Box<TypeDescriptor>,
}

/// `[T; N]`, elements are concatenated without length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedArray {
    pub type_path: String,
    pub inner: Box<TypeDescriptor>,
    pub len: usize,
}

impl FixedArray {
    pub(crate) fn from_syn(type_path: &str, a: &TypeArray) -> ParserResult<Self> {
        let len = match &a.len {
            Expr::Lit(ExprLit {
                lit: Lit::Int(i), ..
            }) => i
                .base10_parse::<usize>()
                .map_err(|e| Error::parse_type(type_path, e))?,
            _ => {
                return Err(Error::parse_type(
                    type_path,
                    "fixed array length must be an integer literal",
                ))
            }
        };

        let elem = &a.elem;
        let inner = TypeDescriptor::parse(&genericity::type_to_string(elem))?;

        Ok(Self {
            type_path: type_path.to_string(),
            inner: Box::new(inner),
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;

    #[test]
    fn test_parse_fixed_array() {
        let t = TypeDescriptor::parse("[core::integer::u32; 3]").unwrap();
        assert_eq!(
            t,
            TypeDescriptor::FixedArray(FixedArray {
                type_path: "[core::integer::u32; 3]".to_string(),
                inner: Box::new(TypeDescriptor::Primitive(Primitive::U32)),
                len: 3,
            })
        );
    }

    #[test]
    fn test_parse_fixed_array_of_arrays() {
        let t = TypeDescriptor::parse("[core::array::Array::<core::felt252>; 2]").unwrap();
        let TypeDescriptor::FixedArray(a) = t else {
            panic!("Expected fixed array");
        };
        assert_eq!(a.len, 2);
        assert_eq!(a.inner.kind_name(), "array");
    }

    #[test]
    fn test_parse_fixed_array_bad_len() {
        assert!(TypeDescriptor::parse("[core::felt252; N]").is_err());
    }

    #[test]
    fn test_array_kind_from_base_path() {
        assert_eq!(ArrayKind::from_base_path("Array"), Some(ArrayKind::Array));
        assert_eq!(
            ArrayKind::from_base_path("core::array::Span"),
            Some(ArrayKind::Span)
        );
        assert_eq!(ArrayKind::from_base_path("core::array::SpanIter"), None);
    }
}
