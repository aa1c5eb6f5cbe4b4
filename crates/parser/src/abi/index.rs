use starknet::core::types::Felt;
use std::collections::HashMap;

use crate::descriptor::{normalize_type_path, Composite, TypeDescriptor};
use crate::{Error, ParserResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateMutability {
    External,
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Constructor,
    L1Handler,
}

/// A named and typed field: function input, struct member or enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub type_path: String,
    pub ty: TypeDescriptor,
}

impl Member {
    pub fn new(name: &str, type_path: &str) -> ParserResult<Self> {
        Ok(Self {
            name: name.to_string(),
            type_path: type_path.to_string(),
            ty: TypeDescriptor::parse(type_path)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub selector: Felt,
    pub kind: FunctionKind,
    pub state_mutability: StateMutability,
    pub inputs: Vec<Member>,
    pub outputs: Vec<TypeDescriptor>,
    /// Interface the function was declared in, if any.
    pub interface: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    /// Variants in declaration order, the position is the wire discriminant.
    pub variants: Vec<Member>,
}

impl Enum {
    pub fn variant_index(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMemberKind {
    Key,
    Data,
    Nested,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMember {
    pub member: Member,
    pub kind: EventMemberKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Struct(Vec<EventMember>),
    Enum(Vec<EventMember>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    /// Selector of the short name, the first key of the emitted event.
    pub selector: Felt,
    pub kind: EventKind,
}

impl Event {
    /// Last path segment of the event name.
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impl {
    pub name: String,
    pub interface_name: String,
}

/// A struct or enum found for a composite reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Struct(&'a Struct),
    Enum(&'a Enum),
}

/// Lookup tables over the entries of a contract ABI.
///
/// Built once, then only read. Sharing a `ParsedAbi` across threads is safe.
#[derive(Debug, Clone, Default)]
pub struct ParsedAbi {
    pub(crate) functions: Vec<Function>,
    pub(crate) functions_by_name: HashMap<String, usize>,
    pub(crate) functions_by_selector: HashMap<Felt, usize>,
    pub(crate) events: Vec<Event>,
    pub(crate) events_by_name: HashMap<String, usize>,
    pub(crate) events_by_selector: HashMap<Felt, usize>,
    pub(crate) structs: HashMap<String, Struct>,
    pub(crate) enums: HashMap<String, Enum>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) impls: Vec<Impl>,
}

impl ParsedAbi {
    pub(crate) fn insert_function(&mut self, function: Function) {
        let idx = self.functions.len();

        if self
            .functions_by_name
            .insert(function.name.clone(), idx)
            .is_some()
        {
            tracing::warn!(name = %function.name, "duplicated function name, last one is kept");
        }
        self.functions_by_selector.insert(function.selector, idx);
        self.functions.push(function);
    }

    pub(crate) fn insert_event(&mut self, event: Event) {
        let idx = self.events.len();

        if self.events_by_name.insert(event.name.clone(), idx).is_some() {
            tracing::warn!(name = %event.name, "duplicated event name, last one is kept");
        }

        // Enum events are only containers, the emitted keys refer to their variants.
        if let EventKind::Struct(_) = event.kind {
            self.events_by_selector.insert(event.selector, idx);
        }

        self.events.push(event);
    }

    pub(crate) fn insert_struct(&mut self, s: Struct) {
        let key = normalize_type_path(&s.name);
        if self.structs.insert(key, s).is_some() {
            tracing::warn!("duplicated struct name, last one is kept");
        }
    }

    pub(crate) fn insert_enum(&mut self, e: Enum) {
        let key = normalize_type_path(&e.name);
        if self.enums.insert(key, e).is_some() {
            tracing::warn!("duplicated enum name, last one is kept");
        }
    }

    /// Finds a function by name, then by selector if `name_or_selector` is a
    /// `0x` prefixed hex string.
    pub fn get_function(&self, name_or_selector: &str) -> Option<&Function> {
        lookup(
            name_or_selector,
            &self.functions_by_name,
            &self.functions_by_selector,
        )
        .and_then(|i| self.functions.get(i))
    }

    /// Same as [`ParsedAbi::get_function`], with a lookup error when not found.
    pub fn function(&self, name_or_selector: &str) -> ParserResult<&Function> {
        self.get_function(name_or_selector).ok_or(Error::Lookup {
            kind: "function",
            name: name_or_selector.to_string(),
        })
    }

    /// Finds an event by full name, then by selector if `name_or_selector`
    /// is a `0x` prefixed hex string.
    pub fn get_event(&self, name_or_selector: &str) -> Option<&Event> {
        lookup(name_or_selector, &self.events_by_name, &self.events_by_selector)
            .and_then(|i| self.events.get(i))
    }

    pub fn event(&self, name_or_selector: &str) -> ParserResult<&Event> {
        self.get_event(name_or_selector).ok_or(Error::Lookup {
            kind: "event",
            name: name_or_selector.to_string(),
        })
    }

    /// Struct event whose short name hashes to `selector`.
    pub fn get_event_by_selector(&self, selector: &Felt) -> Option<&Event> {
        self.events_by_selector
            .get(selector)
            .and_then(|i| self.events.get(*i))
    }

    pub fn get_struct(&self, type_path: &str) -> Option<&Struct> {
        self.structs.get(&normalize_type_path(type_path))
    }

    pub fn get_enum(&self, type_path: &str) -> Option<&Enum> {
        self.enums.get(&normalize_type_path(type_path))
    }

    /// Resolves a composite reference, enums first.
    pub fn resolve(&self, composite: &Composite) -> Option<Resolved<'_>> {
        if let Some(e) = self.enums.get(&composite.key) {
            return Some(Resolved::Enum(e));
        }

        self.structs.get(&composite.key).map(Resolved::Struct)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions_by_name
            .values()
            .filter_map(|i| self.functions.get(*i))
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events_by_name.values().filter_map(|i| self.events.get(*i))
    }

    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.structs.values()
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.enums.values()
    }

    /// Names of the interfaces, in declaration order.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn impls(&self) -> &[Impl] {
        &self.impls
    }
}

fn lookup(
    name_or_selector: &str,
    by_name: &HashMap<String, usize>,
    by_selector: &HashMap<Felt, usize>,
) -> Option<usize> {
    if let Some(i) = by_name.get(name_or_selector) {
        return Some(*i);
    }

    if !name_or_selector.starts_with("0x") {
        return None;
    }

    Felt::from_hex(name_or_selector)
        .ok()
        .and_then(|selector| by_selector.get(&selector).copied())
}

pub(crate) fn short_name(type_path: &str) -> &str {
    type_path.rsplit("::").next().unwrap_or(type_path)
}
