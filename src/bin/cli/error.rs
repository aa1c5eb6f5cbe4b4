use snabi_codec::Error as CodecError;
use snabi_parser::Error as ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("An error occurred: {0}")]
    Other(String),
}

pub type SnabiCliResult<T, E = Error> = Result<T, E>;
