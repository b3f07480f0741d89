//! Classes and their member surfaces.

use std::collections::HashMap;

use crate::descriptor::{Descriptor, PropertyAttributes};
use crate::error::ProtocolResult;
use crate::key::MemberKey;
use crate::member::Scope;
use crate::target::Target;
use crate::value::Value;

use super::{dispatch_call, dispatch_get, dispatch_set, Receiver};

/// One installed member.
#[derive(Debug, Clone)]
pub struct Slot {
    pub descriptor: Descriptor,
    pub attributes: PropertyAttributes,
}

/// A mapping from member key to installed member.
///
/// Keys keep their installation order.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    slots: HashMap<MemberKey, Slot>,
    order: Vec<MemberKey>,
}

impl Surface {
    /// Returns true if `key` is installed directly on this surface.
    #[must_use]
    pub fn has_own(&self, key: &MemberKey) -> bool {
        self.slots.contains_key(key)
    }

    #[must_use]
    pub fn slot(&self, key: &MemberKey) -> Option<&Slot> {
        self.slots.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All installed keys, in installation order.
    pub fn keys(&self) -> impl Iterator<Item = &MemberKey> + '_ {
        self.order.iter()
    }

    /// Installed keys whose slot is enumerable, in installation order.
    ///
    /// Members installed from protocol defaults are not listed.
    #[must_use]
    pub fn own_enumerable_keys(&self) -> Vec<&MemberKey> {
        self.order
            .iter()
            .filter(|key| self.slots.get(*key).is_some_and(|slot| slot.attributes.enumerable))
            .collect()
    }

    fn insert(&mut self, key: MemberKey, slot: Slot) {
        if self.slots.insert(key.clone(), slot).is_none() {
            self.order.push(key);
        }
    }
}

/// A constructible type in the reference object model.
///
/// # Examples
///
/// ```
/// use protomix::{Class, Descriptor, MemberKey, Value};
///
/// let of = MemberKey::mint("static Applicative.of");
/// let mut maybe = Class::new("Maybe");
/// maybe.define_static_method(of.clone(), Descriptor::method(|_, args| {
///     Ok(Value::arg(args, 0))
/// }));
///
/// assert_eq!(maybe.call_static(&of, &[Value::Int(42)])?, Value::Int(42));
/// # Ok::<(), protomix::ProtocolError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    constructible: bool,
    instance: Surface,
    statics: Surface,
}

impl Class {
    /// Creates an empty, constructible class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructible: true,
            instance: Surface::default(),
            statics: Surface::default(),
        }
    }

    /// Creates a bare object with no construct capability.
    ///
    /// It can be inspected but protocols cannot be applied to it.
    #[must_use]
    pub fn plain_object() -> Self {
        Self {
            name: String::new(),
            constructible: false,
            instance: Surface::default(),
            statics: Surface::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The surface shared by all instances.
    #[must_use]
    pub const fn instance(&self) -> &Surface {
        &self.instance
    }

    /// The surface of the class itself.
    #[must_use]
    pub const fn statics(&self) -> &Surface {
        &self.statics
    }

    #[must_use]
    pub const fn surface(&self, scope: Scope) -> &Surface {
        match scope {
            Scope::Instance => &self.instance,
            Scope::Static => &self.statics,
        }
    }

    fn surface_mut(&mut self, scope: Scope) -> &mut Surface {
        match scope {
            Scope::Instance => &mut self.instance,
            Scope::Static => &mut self.statics,
        }
    }

    /// Defines an own member, replacing any previous own definition.
    pub fn define(&mut self, scope: Scope, key: MemberKey, descriptor: Descriptor) -> &mut Self {
        let attributes = PropertyAttributes::own(&descriptor);
        self.surface_mut(scope).insert(
            key,
            Slot {
                descriptor,
                attributes,
            },
        );
        self
    }

    /// Defines an own instance member.
    pub fn define_method(&mut self, key: MemberKey, descriptor: Descriptor) -> &mut Self {
        self.define(Scope::Instance, key, descriptor)
    }

    /// Defines an own static member.
    pub fn define_static_method(&mut self, key: MemberKey, descriptor: Descriptor) -> &mut Self {
        self.define(Scope::Static, key, descriptor)
    }

    /// Calls a static method with the class as receiver.
    pub fn call_static(&self, key: &MemberKey, args: &[Value]) -> ProtocolResult<Value> {
        dispatch_call(&self.statics, key, Receiver::Class(self), args)
    }

    /// Reads a static accessor.
    pub fn get_static(&self, key: &MemberKey) -> ProtocolResult<Value> {
        dispatch_get(&self.statics, key, Receiver::Class(self))
    }

    /// Writes a static accessor.
    pub fn set_static(&self, key: &MemberKey, value: Value) -> ProtocolResult<()> {
        dispatch_set(&self.statics, key, Receiver::Class(self), value)
    }
}

impl Target for Class {
    fn describe(&self) -> String {
        if self.constructible {
            format!("class {}", self.name)
        } else {
            "object".to_string()
        }
    }

    fn is_constructible(&self) -> bool {
        self.constructible
    }

    fn has_own(&self, scope: Scope, key: &MemberKey) -> bool {
        self.surface(scope).has_own(key)
    }

    fn install(
        &mut self,
        scope: Scope,
        key: MemberKey,
        descriptor: Descriptor,
        attributes: PropertyAttributes,
    ) {
        self.surface_mut(scope).insert(
            key,
            Slot {
                descriptor,
                attributes,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DispatchError, ProtocolError};

    #[test]
    fn test_surfaces_are_separate() {
        let key = MemberKey::mint("k");
        let mut class = Class::new("C");
        class.define_static_method(key.clone(), Descriptor::method(|_, _| Ok(Value::Null)));
        assert!(class.statics().has_own(&key));
        assert!(!class.instance().has_own(&key));
        assert!(class.has_own(Scope::Static, &key));
    }

    #[test]
    fn test_keys_keep_installation_order() {
        let (a, b, c) = (MemberKey::mint("a"), MemberKey::from("b"), MemberKey::from(3i64));
        let mut class = Class::new("C");
        class
            .define_method(b.clone(), Descriptor::method(|_, _| Ok(Value::Null)))
            .define_method(a.clone(), Descriptor::method(|_, _| Ok(Value::Null)));
        class.install(
            Scope::Instance,
            c.clone(),
            Descriptor::method(|_, _| Ok(Value::Null)),
            PropertyAttributes {
                writable: Some(true),
                enumerable: false,
                configurable: true,
            },
        );

        let keys: Vec<_> = class.instance().keys().cloned().collect();
        assert_eq!(keys, vec![b.clone(), a.clone(), c]);
        assert_eq!(class.instance().own_enumerable_keys(), vec![&b, &a]);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Class::new("Maybe").describe(), "class Maybe");
        assert_eq!(Class::plain_object().describe(), "object");
        assert!(!Class::plain_object().is_constructible());
    }

    #[test]
    fn test_static_accessors() {
        let key = MemberKey::mint("static get I.b");
        let mut class = Class::new("C");
        class.define_static_method(key.clone(), Descriptor::getter(|_| Ok(Value::from("b"))));

        assert_eq!(class.get_static(&key).unwrap(), Value::from("b"));
        let err = class.set_static(&key, Value::Null).unwrap_err();
        assert!(matches!(err, ProtocolError::Dispatch(DispatchError::NoSetter { .. })));
        let err = class.call_static(&key, &[]).unwrap_err();
        assert!(matches!(err, ProtocolError::Dispatch(DispatchError::NotCallable { .. })));
    }
}
