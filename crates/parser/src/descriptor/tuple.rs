use syn::TypeTuple;

use super::{genericity, TypeDescriptor};
use crate::ParserResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    pub type_path: String,
    pub inners: Vec<TypeDescriptor>,
}

impl Tuple {
    pub(crate) fn from_syn(type_path: &str, t: &TypeTuple) -> ParserResult<Self> {
        let mut inners = vec![];

        for e in t.elems.iter() {
            inners.push(TypeDescriptor::parse(&genericity::type_to_string(e))?);
        }

        Ok(Self {
            type_path: type_path.to_string(),
            inners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;

    #[test]
    fn test_parse_tuple() {
        let t = TypeDescriptor::parse("(core::felt252, core::bool)").unwrap();
        assert_eq!(
            t,
            TypeDescriptor::Tuple(Tuple {
                type_path: "(core::felt252, core::bool)".to_string(),
                inners: vec![
                    TypeDescriptor::Primitive(Primitive::Felt),
                    TypeDescriptor::Primitive(Primitive::Bool),
                ],
            })
        );
    }

    #[test]
    fn test_parse_single_element_tuple() {
        let t = TypeDescriptor::parse("(core::integer::u8,)").unwrap();
        let TypeDescriptor::Tuple(t) = t else {
            panic!("Expected tuple");
        };
        assert_eq!(t.inners, vec![TypeDescriptor::Primitive(Primitive::U8)]);
    }

    #[test]
    fn test_parse_nested_tuple() {
        let t = TypeDescriptor::parse("(core::felt252, (u8, u16))").unwrap();
        let TypeDescriptor::Tuple(t) = t else {
            panic!("Expected tuple");
        };
        assert_eq!(t.inners.len(), 2);
        assert_eq!(t.inners[1].kind_name(), "tuple");
    }

    #[test]
    fn test_parenthesized_type_is_not_a_tuple() {
        assert_eq!(
            TypeDescriptor::parse("(core::felt252)").unwrap(),
            TypeDescriptor::Primitive(Primitive::Felt)
        );
    }
}
