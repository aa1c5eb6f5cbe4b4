use super::genericity::{normalize_type_path, type_path_no_generic};

/// Reference to a struct or an enum, not resolved yet.
///
/// Whether the path names a struct or an enum is only known once looked up
/// in a [`crate::ParsedAbi`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Composite {
    /// Path as written in the ABI.
    pub type_path: String,
    /// Normalized path, key of the ABI index tables.
    pub key: String,
}

impl Composite {
    pub fn new(type_path: &str) -> Self {
        Self {
            type_path: type_path.to_string(),
            key: normalize_type_path(type_path),
        }
    }

    /// Path without generic arguments.
    pub fn type_path_no_generic(&self) -> String {
        type_path_no_generic(&self.type_path)
    }

    /// Last segment of the path, without generic arguments.
    pub fn type_name(&self) -> String {
        let base = self.type_path_no_generic();
        base.rsplit("::").next().unwrap_or(&base).to_string()
    }

    pub fn is_generic(&self) -> bool {
        self.key.contains('<')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        let c = Composite::new("contracts::abicov::structs::Simple");
        assert_eq!(c.type_name(), "Simple");
        assert!(!c.is_generic());

        let c = Composite::new("contracts::abicov::GenericOne::<core::felt252>");
        assert_eq!(c.type_name(), "GenericOne");
        assert_eq!(c.type_path_no_generic(), "contracts::abicov::GenericOne");
        assert!(c.is_generic());
    }

    #[test]
    fn test_key_is_normalized() {
        let a = Composite::new("a::Pair::<core::felt252, core::felt252>");
        let b = Composite::new("a::Pair<core::felt252,core::felt252>");
        assert_eq!(a.key, b.key);
        assert_ne!(a, b);
    }
}
