//! Reference host object model.
//!
//! Protocols can be composed onto anything implementing [`Target`]; this
//! module provides a small concrete model to do so: a [`Class`] with an
//! instance and a static [`Surface`], and [`Instance`]s of it. Member lookup
//! only sees what is installed directly on a surface.
//!
//! [`Target`]: crate::target::Target

mod class;
mod instance;

pub use class::{Class, Slot, Surface};
pub use instance::Instance;

use crate::descriptor::Descriptor;
use crate::error::{DispatchError, ProtocolError, ProtocolResult};
use crate::key::MemberKey;
use crate::value::Value;

/// The object a member body runs against.
///
/// Instance members receive the instance; static members receive the class.
#[derive(Debug, Clone, Copy)]
pub enum Receiver<'a> {
    Instance(&'a Instance),
    Class(&'a Class),
}

impl<'a> Receiver<'a> {
    /// The class whose surface this receiver dispatches through.
    #[must_use]
    pub fn class(&self) -> &'a Class {
        match *self {
            Self::Instance(obj) => obj.class(),
            Self::Class(class) => class,
        }
    }

    /// Calls another member on the same receiver.
    pub fn call(&self, key: &MemberKey, args: &[Value]) -> ProtocolResult<Value> {
        match self {
            Self::Instance(obj) => obj.call(key, args),
            Self::Class(class) => class.call_static(key, args),
        }
    }

    pub fn get(&self, key: &MemberKey) -> ProtocolResult<Value> {
        match self {
            Self::Instance(obj) => obj.get(key),
            Self::Class(class) => class.get_static(key),
        }
    }

    pub fn set(&self, key: &MemberKey, value: Value) -> ProtocolResult<()> {
        match self {
            Self::Instance(obj) => obj.set(key, value),
            Self::Class(class) => class.set_static(key, value),
        }
    }

    /// Reads an instance field. Classes have no fields.
    pub fn field(&self, name: &str) -> ProtocolResult<Option<Value>> {
        match self {
            Self::Instance(obj) => obj.field(name),
            Self::Class(_) => Ok(None),
        }
    }

    /// Writes an instance field.
    pub fn set_field(&self, name: &str, value: Value) -> ProtocolResult<()> {
        match self {
            Self::Instance(obj) => obj.set_field(name, value),
            Self::Class(class) => Err(ProtocolError::failed(format!(
                "class {} has no field '{name}'",
                class.name()
            ))),
        }
    }
}

fn slot_of<'s>(surface: &'s Surface, key: &MemberKey) -> ProtocolResult<&'s Descriptor> {
    surface
        .slot(key)
        .map(|slot| &slot.descriptor)
        .ok_or_else(|| DispatchError::MemberNotFound { key: key.clone() }.into())
}

pub(crate) fn dispatch_call(
    surface: &Surface,
    key: &MemberKey,
    receiver: Receiver<'_>,
    args: &[Value],
) -> ProtocolResult<Value> {
    match slot_of(surface, key)? {
        Descriptor::Method(method) => method.call(receiver, args),
        Descriptor::Accessor { .. } => Err(DispatchError::NotCallable { key: key.clone() }.into()),
    }
}

pub(crate) fn dispatch_get(
    surface: &Surface,
    key: &MemberKey,
    receiver: Receiver<'_>,
) -> ProtocolResult<Value> {
    match slot_of(surface, key)? {
        Descriptor::Accessor { get: Some(getter), .. } => getter.call(receiver),
        _ => Err(DispatchError::NoGetter { key: key.clone() }.into()),
    }
}

pub(crate) fn dispatch_set(
    surface: &Surface,
    key: &MemberKey,
    receiver: Receiver<'_>,
    value: Value,
) -> ProtocolResult<()> {
    match slot_of(surface, key)? {
        Descriptor::Accessor { set: Some(setter), .. } => setter.call(receiver, value),
        _ => Err(DispatchError::NoSetter { key: key.clone() }.into()),
    }
}
