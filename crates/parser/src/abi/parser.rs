use starknet::core::types::contract::{AbiEntry, AbiEvent, SierraClass, TypedAbiEvent};

use super::index::{Enum, Event, Function, FunctionKind, Impl, ParsedAbi, Struct};
use crate::descriptor::TypeDescriptor;
use crate::{Error, ParserResult};

pub struct AbiParser {}

impl AbiParser {
    /// Parses an ABI string and indexes its entries.
    ///
    /// The `abi` can have three formats:
    /// 1. Entire [`SierraClass`] json representation.
    /// 2. The `abi` key from the [`SierraClass`], which is an array of [`AbiEntry`].
    /// 3. An object whose `abi` key is the array of [`AbiEntry`] serialized as a
    ///    JSON string, as some tools output.
    ///
    /// # Arguments
    ///
    /// * `abi` - A string representing the ABI.
    pub fn parse_abi(abi: &str) -> ParserResult<ParsedAbi> {
        let entries = Self::parse_abi_string(abi)?;
        Self::index_entries(&entries)
    }

    /// Parses an ABI string to output a `Vec<AbiEntry>`.
    ///
    /// # Arguments
    ///
    /// * `abi` - A string representing the ABI.
    pub fn parse_abi_string(abi: &str) -> ParserResult<Vec<AbiEntry>> {
        if let Ok(sierra) = serde_json::from_str::<SierraClass>(abi) {
            return Ok(sierra.abi);
        }

        match serde_json::from_str::<Vec<AbiEntry>>(abi) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let value: serde_json::Value = serde_json::from_str(abi)?;

                match value.get("abi").and_then(|a| a.as_str()) {
                    Some(inner) => Ok(serde_json::from_str::<Vec<AbiEntry>>(inner)?),
                    None => Err(Error::SerdeJson(e)),
                }
            }
        }
    }

    /// Builds the lookup tables from the ABI entries.
    ///
    /// Interface items are flattened, constructors and L1 handlers are indexed
    /// along with functions. Entries describing builtin types (spans, `bool`,
    /// `u256`, `Option`...) are skipped, they have a dedicated wire format.
    pub fn index_entries(entries: &[AbiEntry]) -> ParserResult<ParsedAbi> {
        let mut abi = ParsedAbi::default();

        for entry in entries {
            Self::collect_entry(entry, &mut abi, None)?;
        }

        tracing::debug!(
            functions = abi.functions.len(),
            events = abi.events.len(),
            structs = abi.structs.len(),
            enums = abi.enums.len(),
            "ABI indexed"
        );

        Ok(abi)
    }

    fn collect_entry(
        entry: &AbiEntry,
        abi: &mut ParsedAbi,
        interface_name: Option<&str>,
    ) -> ParserResult<()> {
        match entry {
            AbiEntry::Function(f) => {
                let func = Function::from_abi_function(
                    f,
                    FunctionKind::Function,
                    interface_name.map(String::from),
                )?;
                abi.insert_function(func);
            }
            AbiEntry::L1Handler(f) => {
                let func = Function::from_abi_function(f, FunctionKind::L1Handler, None)?;
                abi.insert_function(func);
            }
            AbiEntry::Constructor(c) => {
                abi.insert_function(Function::from_abi_constructor(c)?);
            }
            AbiEntry::Struct(s) => {
                if !Self::is_composite_name(&s.name) {
                    tracing::trace!(name = %s.name, "builtin struct skipped");
                    return Ok(());
                }

                abi.insert_struct(Struct::try_from(s)?);
            }
            AbiEntry::Enum(e) => {
                if !Self::is_composite_name(&e.name) {
                    tracing::trace!(name = %e.name, "builtin enum skipped");
                    return Ok(());
                }

                abi.insert_enum(Enum::try_from(e)?);
            }
            AbiEntry::Event(ev) => match ev {
                AbiEvent::Typed(TypedAbiEvent::Struct(s)) => {
                    abi.insert_event(Event::try_from(s)?);
                }
                AbiEvent::Typed(TypedAbiEvent::Enum(e)) => {
                    abi.insert_event(Event::try_from(e)?);
                }
                AbiEvent::Untyped(_) => {
                    // Cairo 0.
                    tracing::trace!("untyped event skipped");
                }
            },
            AbiEntry::Interface(interface) => {
                abi.interfaces.push(interface.name.clone());

                for item in &interface.items {
                    Self::collect_entry(item, abi, Some(&interface.name))?;
                }
            }
            AbiEntry::Impl(i) => {
                abi.impls.push(Impl {
                    name: i.name.clone(),
                    interface_name: i.interface_name.clone(),
                });
            }
        };

        Ok(())
    }

    /// True if the name parses as a struct or enum reference.
    fn is_composite_name(name: &str) -> bool {
        matches!(TypeDescriptor::parse(name), Ok(TypeDescriptor::Composite(_)))
    }
}

impl ParsedAbi {
    /// See [`AbiParser::parse_abi`].
    pub fn from_json(abi: &str) -> ParserResult<Self> {
        AbiParser::parse_abi(abi)
    }

    /// See [`AbiParser::index_entries`].
    pub fn from_entries(entries: &[AbiEntry]) -> ParserResult<Self> {
        AbiParser::index_entries(entries)
    }
}
