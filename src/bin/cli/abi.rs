use camino::Utf8Path;
use snabi_parser::{AbiParser, ParsedAbi};
use std::fs;

use crate::error::{Error, SnabiCliResult};

/// Loads and indexes the ABI of a file, which may be a Sierra class or a
/// bare array of ABI entries.
pub fn load_abi(path: &Utf8Path) -> SnabiCliResult<ParsedAbi> {
    let file_content = fs::read_to_string(path)?;

    let abi = AbiParser::parse_abi(&file_content).map_err(|e| {
        Error::Other(format!("ABI file {} could not be parsed: {}", path, e))
    })?;

    tracing::trace!(
        "Loaded {} ({} functions, {} events)",
        path,
        abi.functions().count(),
        abi.events().count()
    );

    Ok(abi)
}
