use snabi_parser::{Error as ParserError, TypeDescriptor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Encoding `{type_path}` failed: {reason}")]
    Encode { type_path: String, reason: String },
    #[error("Decoding `{type_path}` at offset {offset} failed: {reason}")]
    Decode {
        type_path: String,
        offset: usize,
        reason: String,
    },
    #[error("{kind} `{name}` not found in ABI")]
    Lookup { kind: &'static str, name: String },
    #[error(transparent)]
    Parse(ParserError),
    #[error(transparent)]
    WireFormat(#[from] snabi_cairo_serde::Error),
    #[error("Invalid arguments: {0}")]
    Arguments(String),
}

impl From<ParserError> for Error {
    fn from(value: ParserError) -> Self {
        match value {
            ParserError::Lookup { kind, name } => Error::Lookup { kind, name },
            e => Error::Parse(e),
        }
    }
}

impl Error {
    pub(crate) fn encode(ty: &TypeDescriptor, reason: impl ToString) -> Self {
        Error::Encode {
            type_path: ty.type_path(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(ty: &TypeDescriptor, offset: usize, reason: impl ToString) -> Self {
        Error::Decode {
            type_path: ty.type_path(),
            offset,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn composite_not_found(type_path: &str) -> Self {
        Error::Lookup {
            kind: "struct or enum",
            name: type_path.to_string(),
        }
    }
}

pub type CodecResult<T, E = Error> = Result<T, E>;
