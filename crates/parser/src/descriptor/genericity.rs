use syn::{GenericArgument, PathArguments, Type, TypePath};

use super::TypeDescriptor;
use crate::{Error, ParserResult};

/// Identifiers Cairo accepts in paths but Rust reserves.
const RUST_KEYWORDS: [&str; 47] = [
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while",
];

/// Characters giving a structure to a type string.
const STRUCTURAL_CHARS: [char; 8] = ['(', ')', '<', '>', '[', ']', ',', ';'];

/// Parses the type string with `syn`, escaping Rust keywords first.
pub(crate) fn parse_syn_type(type_path: &str) -> ParserResult<Type> {
    syn::parse_str::<Type>(&escape_rust_keywords(type_path))
        .map_err(|e| Error::parse_type(type_path, e))
}

/// Stringifies a `syn` type back to its Cairo form.
pub(crate) fn type_to_string(ty: &Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "").replace("r#", "")
}

/// Returns the only generic type argument of the last path segment, parsed.
pub(crate) fn single_generic_arg(type_path: &str, p: &TypePath) -> ParserResult<TypeDescriptor> {
    let mut args = generic_args(p);

    if args.len() != 1 {
        return Err(Error::parse_type(
            type_path,
            format!("expected exactly one generic argument, found {}", args.len()),
        ));
    }

    let inner = args.remove(0);
    TypeDescriptor::parse(&type_to_string(inner))
}

fn generic_args(p: &TypePath) -> Vec<&Type> {
    let mut out = vec![];

    if let Some(segment) = p.path.segments.last() {
        if let PathArguments::AngleBracketed(args) = &segment.arguments {
            for arg in &args.args {
                if let GenericArgument::Type(ty) = arg {
                    out.push(ty);
                }
            }
        }
    }

    out
}

/// Prefixes every Rust keyword identifier with `r#`.
fn escape_rust_keywords(type_path: &str) -> String {
    let mut out = String::with_capacity(type_path.len());
    let mut ident = String::new();

    let flush = |ident: &mut String, out: &mut String| {
        if RUST_KEYWORDS.contains(&ident.as_str()) {
            out.push_str("r#");
        }
        out.push_str(ident);
        ident.clear();
    };

    for c in type_path.chars() {
        if c.is_alphanumeric() || c == '_' {
            ident.push(c);
        } else {
            flush(&mut ident, &mut out);
            out.push(c);
        }
    }
    flush(&mut ident, &mut out);

    out
}

/// True if the string has no structure, and then can only name a composite.
pub(crate) fn is_plain_name(type_path: &str) -> bool {
    !type_path
        .chars()
        .any(|c| c.is_whitespace() || STRUCTURAL_CHARS.contains(&c))
}

/// Splits `Base<A, B>` (or `Base::<A, B>`) into its base path and top level
/// generic arguments, without going through syn.
pub(crate) fn split_generic(type_path: &str) -> Option<(String, Vec<String>)> {
    let open = type_path.find('<')?;
    let inner = type_path[open + 1..].strip_suffix('>')?;
    let base = type_path[..open].trim().trim_end_matches("::");

    if base.is_empty() || !is_plain_name(base) {
        return None;
    }

    Some((base.to_string(), split_top_level(inner)?))
}

/// Splits on the commas that aren't nested in a delimiter.
///
/// `None` if the delimiters are unbalanced or an element is empty.
pub(crate) fn split_top_level(s: &str) -> Option<Vec<String>> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut depth = 0_usize;

    for c in s.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if depth != 0 {
        return None;
    }

    // A trailing comma is accepted.
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    if parts.is_empty() || parts.iter().any(String::is_empty) {
        return None;
    }

    Some(parts)
}

/// Path without its generic arguments.
pub(crate) fn type_path_no_generic(type_path: &str) -> String {
    let frags: Vec<&str> = type_path.split('<').collect();
    frags
        .first()
        .unwrap_or(&type_path)
        .trim_end_matches("::")
        .to_string()
}

/// Canonical form of a type path, used as lookup key: no whitespace, and
/// generic arguments always written `Name<T>`.
pub fn normalize_type_path(type_path: &str) -> String {
    let no_ws: String = type_path.chars().filter(|c| !c.is_whitespace()).collect();
    no_ws.replace("::<", "<")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_path_no_generic() {
        assert_eq!(type_path_no_generic("TypeName"), "TypeName");
        assert_eq!(type_path_no_generic("module::TypeName"), "module::TypeName");
        assert_eq!(type_path_no_generic("TypeName<core::felt252>"), "TypeName");
        assert_eq!(
            type_path_no_generic("module::TypeName::<core::integer::u64>"),
            "module::TypeName"
        );
    }

    #[test]
    fn test_escape_rust_keywords() {
        assert_eq!(escape_rust_keywords("game::move::Move"), "game::r#move::Move");
        assert_eq!(
            escape_rust_keywords("Array<type::Thing>"),
            "Array<r#type::Thing>"
        );
        assert_eq!(escape_rust_keywords("moves::Move"), "moves::Move");
    }

    #[test]
    fn test_type_to_string_unescapes() {
        let ty = parse_syn_type("core::array::Array::<game::move::Move>").unwrap();
        assert_eq!(type_to_string(&ty), "core::array::Array::<game::move::Move>");
    }

    #[test]
    fn test_normalize_type_path() {
        assert_eq!(
            normalize_type_path("a::Pair::< core::felt252, u8 >"),
            "a::Pair<core::felt252,u8>"
        );
        assert_eq!(normalize_type_path("a::Pair<u8,u8>"), "a::Pair<u8,u8>");
    }

    #[test]
    fn test_split_generic() {
        assert_eq!(
            split_generic("core::array::Array::<my-contract::Thing>"),
            Some((
                "core::array::Array".to_string(),
                vec!["my-contract::Thing".to_string()]
            ))
        );
        assert_eq!(
            split_generic("a::Pair<(u8, u16), b-c::D<u8>>").map(|(_, args)| args),
            Some(vec!["(u8, u16)".to_string(), "b-c::D<u8>".to_string()])
        );
        assert_eq!(split_generic("a::B<u8>c<u8>"), None);
        assert_eq!(split_generic("a::B<u8"), None);
        assert_eq!(split_generic("a::B<>"), None);
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("u8, Array<(u8, u8)>,"),
            Some(vec!["u8".to_string(), "Array<(u8, u8)>".to_string()])
        );
        assert_eq!(split_top_level("u8,,u8"), None);
        assert_eq!(split_top_level("u8)"), None);
    }

    #[test]
    fn test_is_plain_name() {
        assert!(is_plain_name("my-contract::Thing"));
        assert!(!is_plain_name("(u8"));
        assert!(!is_plain_name("Array<u8"));
    }
}
