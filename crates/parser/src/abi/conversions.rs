use starknet::core::types::contract::{
    AbiConstructor, AbiEnum, AbiEventEnum, AbiEventStruct, AbiFunction, AbiNamedMember,
    AbiStruct, EventField, EventFieldKind, StateMutability as StarknetStateMutability,
};

use super::index::{
    short_name, Enum, Event, EventKind, EventMember, EventMemberKind, Function, FunctionKind,
    Member, StateMutability, Struct,
};
use crate::descriptor::TypeDescriptor;
use crate::hash::compute_selector;
use crate::{Error, ParserResult};

impl From<StarknetStateMutability> for StateMutability {
    fn from(value: StarknetStateMutability) -> Self {
        match value {
            StarknetStateMutability::External => StateMutability::External,
            StarknetStateMutability::View => StateMutability::View,
        }
    }
}

impl From<EventFieldKind> for EventMemberKind {
    fn from(value: EventFieldKind) -> Self {
        match value {
            EventFieldKind::Key => EventMemberKind::Key,
            EventFieldKind::Data => EventMemberKind::Data,
            EventFieldKind::Nested => EventMemberKind::Nested,
            EventFieldKind::Flat => EventMemberKind::Flat,
        }
    }
}

impl TryFrom<&AbiNamedMember> for Member {
    type Error = Error;

    fn try_from(value: &AbiNamedMember) -> ParserResult<Self> {
        Member::new(&value.name, &value.r#type)
    }
}

impl TryFrom<&EventField> for EventMember {
    type Error = Error;

    fn try_from(value: &EventField) -> ParserResult<Self> {
        Ok(EventMember {
            member: Member::new(&value.name, &value.r#type)?,
            kind: value.kind.clone().into(),
        })
    }
}

fn members<'a, T, U>(items: impl IntoIterator<Item = &'a T>) -> ParserResult<Vec<U>>
where
    T: 'a,
    U: TryFrom<&'a T, Error = Error>,
{
    items.into_iter().map(U::try_from).collect()
}

impl TryFrom<&AbiStruct> for Struct {
    type Error = Error;

    fn try_from(value: &AbiStruct) -> ParserResult<Self> {
        Ok(Struct {
            name: value.name.clone(),
            members: members(&value.members)?,
        })
    }
}

impl TryFrom<&AbiEnum> for Enum {
    type Error = Error;

    fn try_from(value: &AbiEnum) -> ParserResult<Self> {
        Ok(Enum {
            name: value.name.clone(),
            variants: members(&value.variants)?,
        })
    }
}

impl TryFrom<&AbiEventStruct> for Event {
    type Error = Error;

    fn try_from(value: &AbiEventStruct) -> ParserResult<Self> {
        Ok(Event {
            name: value.name.clone(),
            selector: compute_selector(short_name(&value.name))?,
            kind: EventKind::Struct(members(&value.members)?),
        })
    }
}

impl TryFrom<&AbiEventEnum> for Event {
    type Error = Error;

    fn try_from(value: &AbiEventEnum) -> ParserResult<Self> {
        Ok(Event {
            name: value.name.clone(),
            selector: compute_selector(short_name(&value.name))?,
            kind: EventKind::Enum(members(&value.variants)?),
        })
    }
}

impl Function {
    pub(crate) fn from_abi_function(
        value: &AbiFunction,
        kind: FunctionKind,
        interface: Option<String>,
    ) -> ParserResult<Self> {
        let outputs = value
            .outputs
            .iter()
            .map(|o| TypeDescriptor::parse(&o.r#type))
            .collect::<ParserResult<Vec<_>>>()?;

        Ok(Function {
            name: value.name.clone(),
            selector: compute_selector(&value.name)?,
            kind,
            state_mutability: value.state_mutability.clone().into(),
            inputs: members(&value.inputs)?,
            outputs,
            interface,
        })
    }

    pub(crate) fn from_abi_constructor(value: &AbiConstructor) -> ParserResult<Self> {
        Ok(Function {
            name: value.name.clone(),
            selector: compute_selector(&value.name)?,
            kind: FunctionKind::Constructor,
            state_mutability: StateMutability::External,
            inputs: members(&value.inputs)?,
            outputs: vec![],
            interface: None,
        })
    }
}
