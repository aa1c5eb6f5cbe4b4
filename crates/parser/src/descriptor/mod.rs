//! Cairo type descriptors.
//!
//! A type string found in an ABI is parsed into a [`TypeDescriptor`]. The parser
//! is permissive: any path that isn't a known builtin is considered as a
//! [`Composite`] (struct or enum) reference, which is only resolved against
//! the [`crate::ParsedAbi`] when a value is encoded or decoded.
mod array;
mod composite;
mod genericity;
mod primitive;
mod tuple;

pub use array::{Array, ArrayKind, FixedArray};
pub use composite::Composite;
pub use genericity::normalize_type_path;
pub use primitive::Primitive;
pub use tuple::Tuple;

use syn::Type;

use crate::{Error, ParserResult};

pub const CAIRO_OPTION: [&str; 2] = ["core::option::Option", "Option"];
pub const CAIRO_NON_ZERO: [&str; 2] = ["core::zeroable::NonZero", "NonZero"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Array(Array),
    FixedArray(FixedArray),
    Tuple(Tuple),
    Option(Box<TypeDescriptor>),
    NonZero(Box<TypeDescriptor>),
    Composite(Composite),
}

impl TypeDescriptor {
    /// Parses a Cairo type string.
    ///
    /// Forms are recognized in this order: legacy `T*` arrays, builtin primitives
    /// (short or fully qualified spelling), tuples, fixed size arrays,
    /// `Array`/`Span`, `Option`, `NonZero`, and finally composite references.
    ///
    /// A leading snapshot marker `@` is ignored, a snapshot has the same
    /// serialization as the value.
    ///
    /// Only structurally invalid strings (unbalanced delimiters, missing generic
    /// argument...) are rejected.
    pub fn parse(type_path: &str) -> ParserResult<Self> {
        let trimmed = type_path.trim();
        let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();

        if trimmed.is_empty() {
            return Err(Error::parse_type(type_path, "empty type"));
        }

        if let Some(inner) = trimmed.strip_suffix('*') {
            return Ok(TypeDescriptor::Array(Array {
                type_path: trimmed.to_string(),
                kind: ArrayKind::Array,
                inner: Box::new(Self::parse(inner)?),
            }));
        }

        if let Some(p) = Primitive::parse(trimmed) {
            return Ok(TypeDescriptor::Primitive(p));
        }

        let ty = match genericity::parse_syn_type(trimmed) {
            Ok(ty) => ty,
            Err(e) if genericity::is_plain_name(trimmed) => {
                // Names Rust wouldn't accept as a path are still valid
                // references, the index decides later if they exist.
                tracing::trace!(type_path = trimmed, error = %e, "fallback to composite");
                return Ok(TypeDescriptor::Composite(Composite::new(trimmed)));
            }
            // Odd names nested in generics or tuples.
            Err(e) => return Self::parse_structure(trimmed).unwrap_or(Err(e)),
        };

        Self::from_syn(trimmed, &ty)
    }

    /// Parses tuples and generics by splitting on their delimiters, each
    /// element going through [`Self::parse`] again.
    ///
    /// `None` if the string isn't a balanced tuple or generic type.
    fn parse_structure(type_path: &str) -> Option<ParserResult<Self>> {
        if let Some(inner) = type_path.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            let elems = genericity::split_top_level(inner)?;

            if elems.len() == 1 && !inner.trim_end().ends_with(',') {
                return Some(Self::parse(&elems[0]));
            }

            return Some(Self::parse_all(&elems).map(|inners| {
                TypeDescriptor::Tuple(Tuple {
                    type_path: type_path.to_string(),
                    inners,
                })
            }));
        }

        let (base, args) = genericity::split_generic(type_path)?;

        let descriptor = Self::parse_all(&args).and_then(|mut inners| {
            let mut single = || match inners.len() {
                1 => Ok(Box::new(inners.remove(0))),
                n => Err(Error::parse_type(
                    type_path,
                    format!("expected 1 generic argument, got {}", n),
                )),
            };

            if let Some(kind) = ArrayKind::from_base_path(&base) {
                return Ok(TypeDescriptor::Array(Array {
                    type_path: type_path.to_string(),
                    kind,
                    inner: single()?,
                }));
            }

            if CAIRO_OPTION.contains(&base.as_str()) {
                return Ok(TypeDescriptor::Option(single()?));
            }

            if CAIRO_NON_ZERO.contains(&base.as_str()) {
                return Ok(TypeDescriptor::NonZero(single()?));
            }

            Ok(TypeDescriptor::Composite(Composite::new(type_path)))
        });

        Some(descriptor)
    }

    fn parse_all(type_paths: &[String]) -> ParserResult<Vec<Self>> {
        type_paths.iter().map(|t| Self::parse(t)).collect()
    }

    fn from_syn(type_path: &str, ty: &Type) -> ParserResult<Self> {
        match ty {
            Type::Tuple(t) if t.elems.is_empty() => {
                Ok(TypeDescriptor::Primitive(Primitive::Unit))
            }
            Type::Tuple(t) => Ok(TypeDescriptor::Tuple(Tuple::from_syn(type_path, t)?)),
            Type::Paren(p) => Self::parse(&genericity::type_to_string(&p.elem)),
            Type::Group(g) => Self::parse(&genericity::type_to_string(&g.elem)),
            Type::Array(a) => Ok(TypeDescriptor::FixedArray(FixedArray::from_syn(
                type_path, a,
            )?)),
            Type::Path(p) => {
                let base = genericity::type_path_no_generic(type_path);

                if let Some(kind) = ArrayKind::from_base_path(&base) {
                    let inner = genericity::single_generic_arg(type_path, p)?;
                    return Ok(TypeDescriptor::Array(Array {
                        type_path: type_path.to_string(),
                        kind,
                        inner: Box::new(inner),
                    }));
                }

                if CAIRO_OPTION.contains(&base.as_str()) {
                    let inner = genericity::single_generic_arg(type_path, p)?;
                    return Ok(TypeDescriptor::Option(Box::new(inner)));
                }

                if CAIRO_NON_ZERO.contains(&base.as_str()) {
                    let inner = genericity::single_generic_arg(type_path, p)?;
                    return Ok(TypeDescriptor::NonZero(Box::new(inner)));
                }

                Ok(TypeDescriptor::Composite(Composite::new(type_path)))
            }
            _ => Err(Error::parse_type(type_path, "unsupported type form")),
        }
    }

    /// Short name of the descriptor kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDescriptor::Primitive(_) => "primitive",
            TypeDescriptor::Array(a) => match a.kind {
                ArrayKind::Array => "array",
                ArrayKind::Span => "span",
            },
            TypeDescriptor::FixedArray(_) => "fixed_array",
            TypeDescriptor::Tuple(_) => "tuple",
            TypeDescriptor::Option(_) => "option",
            TypeDescriptor::NonZero(_) => "non_zero",
            TypeDescriptor::Composite(_) => "composite",
        }
    }

    /// A Cairo-like rendering of the type, for error messages.
    pub fn type_path(&self) -> String {
        match self {
            TypeDescriptor::Primitive(p) => p.name().to_string(),
            TypeDescriptor::Array(a) => a.type_path.clone(),
            TypeDescriptor::FixedArray(a) => a.type_path.clone(),
            TypeDescriptor::Tuple(t) => t.type_path.clone(),
            TypeDescriptor::Option(inner) => {
                format!("core::option::Option::<{}>", inner.type_path())
            }
            TypeDescriptor::NonZero(inner) => {
                format!("core::zeroable::NonZero::<{}>", inner.type_path())
            }
            TypeDescriptor::Composite(c) => c.type_path.clone(),
        }
    }

    /// True for the unit type, which serializes to nothing.
    pub fn is_unit(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(Primitive::Unit))
    }
}

impl std::str::FromStr for TypeDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> ParserResult<Self> {
        Self::parse(s)
    }
}
