use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Type parsing failed for `{type_path}`: {reason}")]
    ParseType { type_path: String, reason: String },
    #[error("{kind} `{name}` not found in ABI")]
    Lookup { kind: &'static str, name: String },
    #[error("Selector can't be computed for `{0}`: name must be ASCII")]
    Selector(String),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse_type(type_path: &str, reason: impl ToString) -> Self {
        Error::ParseType {
            type_path: type_path.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ParserResult<T, E = Error> = Result<T, E>;
