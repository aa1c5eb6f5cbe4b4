use std::string::FromUtf8Error;

/// Cairo wire result.
pub type Result<T> = core::result::Result<T, Error>;

/// A cairo wire format error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected end of data at offset {offset}: {wanted} felt(s) wanted, {available} available.")]
    UnexpectedEndOfData {
        offset: usize,
        wanted: usize,
        available: usize,
    },
    #[error("Value {value} out of range for {type_name}.")]
    ValueOutOfRange {
        type_name: &'static str,
        value: String,
    },
    #[error("Invalid UTF-8 string {0}.")]
    InvalidUtf8(#[from] FromUtf8Error),
    #[error("Invalid short string {0:?}.")]
    ShortString(String),
    #[error("Error during serialization {0:?}.")]
    Serialize(String),
    #[error("Error during deserialization {0:?}.")]
    Deserialize(String),
}

impl Error {
    pub(crate) fn out_of_range(type_name: &'static str, value: impl std::fmt::Display) -> Self {
        Error::ValueOutOfRange {
            type_name,
            value: value.to_string(),
        }
    }
}
